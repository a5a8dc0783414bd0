//! # Request Rules
//!
//! Query and header requirements share one tree shape: captures combined
//! with AND (`&`) and OR (`|`), optionally wrapped with metadata.

use crate::reflect::{Reflect, TypeDescriptor};
use crate::rules::Metadata;
use serde_json::Value;
use std::ops::{BitAnd, BitOr};

/// A named value extracted from the query string or a header.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamCapture {
    /// Parameter or header name.
    pub name: String,
    /// Optional parameter description.
    pub description: Option<String>,
    /// Decoding type; `None` documents the parameter as a string.
    pub ty: Option<TypeDescriptor>,
    /// Value used when the request omits the parameter.
    pub default: Option<Value>,
    /// Explicit required flag, overriding inference from type and default.
    pub required: Option<bool>,
}

impl ParamCapture {
    /// A capture decoded as `T`.
    pub fn new<T: Reflect + ?Sized>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            ty: Some(T::describe()),
            default: None,
            required: None,
        }
    }

    /// A capture without type information.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            ty: None,
            default: None,
            required: None,
        }
    }

    /// Sets the default value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the explicit required flag.
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Sets the parameter description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the request must carry this parameter.
    ///
    /// An explicit flag wins; otherwise optional types and defaulted
    /// captures are not required.
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or_else(|| {
            let optional = self
                .ty
                .as_ref()
                .map(TypeDescriptor::is_optional_wrapper)
                .unwrap_or(false);
            !optional && self.default.is_none()
        })
    }
}

/// A node in a query or header rule tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestRule {
    /// Both rules apply.
    And(Box<RequestRule>, Box<RequestRule>),
    /// Either rule applies.
    Or(Box<RequestRule>, Box<RequestRule>),
    /// Metadata wrapping a sub-tree.
    Meta(Box<RequestRule>, Metadata),
    /// A single captured value.
    Capture(ParamCapture),
    /// No requirement.
    #[default]
    Empty,
}

impl RequestRule {
    /// No requirement.
    pub fn empty() -> Self {
        RequestRule::Empty
    }

    /// A capture decoded as `T`.
    pub fn param<T: Reflect + ?Sized>(name: impl Into<String>) -> Self {
        RequestRule::Capture(ParamCapture::new::<T>(name))
    }

    /// Both rules apply.
    pub fn and(self, other: impl Into<RequestRule>) -> Self {
        RequestRule::And(Box::new(self), Box::new(other.into()))
    }

    /// Either rule applies.
    pub fn or(self, other: impl Into<RequestRule>) -> Self {
        RequestRule::Or(Box::new(self), Box::new(other.into()))
    }

    /// Wraps the rule with arbitrary metadata.
    pub fn with_meta(self, meta: Metadata) -> Self {
        RequestRule::Meta(Box::new(self), meta)
    }

    /// Wraps the rule with a description of the captured value.
    pub fn describe(self, description: impl Into<String>) -> Self {
        self.with_meta(Metadata::Description(description.into()))
    }

    /// Whether the tree carries no requirement at all.
    pub fn is_empty(&self) -> bool {
        matches!(self, RequestRule::Empty)
    }
}

impl From<ParamCapture> for RequestRule {
    fn from(capture: ParamCapture) -> Self {
        RequestRule::Capture(capture)
    }
}

impl<R: Into<RequestRule>> BitAnd<R> for RequestRule {
    type Output = RequestRule;

    fn bitand(self, rhs: R) -> RequestRule {
        self.and(rhs)
    }
}

impl<R: Into<RequestRule>> BitOr<R> for RequestRule {
    type Output = RequestRule;

    fn bitor(self, rhs: R) -> RequestRule {
        self.or(rhs)
    }
}
