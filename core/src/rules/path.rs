//! # Path Rules
//!
//! A path rule tree combines literal segments and captures with AND (`/`)
//! and OR (`|`):
//!
//! ```
//! use routedoc_core::rules::PathRule;
//!
//! let rule = PathRule::root() / "users" / PathRule::capture::<i64>("id")
//!     | PathRule::root() / "people";
//! assert!(matches!(rule, PathRule::Or(_, _)));
//! ```

use crate::reflect::{Reflect, TypeDescriptor};
use crate::rules::Metadata;
use std::ops::{BitOr, Div};

/// A named placeholder within the path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCapture {
    /// Parameter name, rendered as `{name}` in the path template.
    pub name: String,
    /// Optional parameter description.
    pub description: Option<String>,
    /// Decoding type; `None` documents the parameter as a string.
    pub ty: Option<TypeDescriptor>,
}

impl PathCapture {
    /// A capture decoded as `T`.
    pub fn new<T: Reflect + ?Sized>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            ty: Some(T::describe()),
        }
    }

    /// A capture without type information.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            ty: None,
        }
    }

    /// Sets the parameter description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A node in the path rule tree.
#[derive(Debug, Clone, PartialEq)]
pub enum PathRule {
    /// Sequential composition: the left rule, then the right rule.
    And(Box<PathRule>, Box<PathRule>),
    /// Alternative composition: either rule.
    Or(Box<PathRule>, Box<PathRule>),
    /// Metadata wrapping a sub-tree.
    Meta(Box<PathRule>, Metadata),
    /// A literal segment. The empty literal matches the root.
    Match(String),
    /// A named, typed capture of one segment.
    Capture(PathCapture),
    /// Captures every remaining segment. Nothing may follow it.
    CaptureTail,
}

impl PathRule {
    /// The root path, contributing no segment.
    pub fn root() -> Self {
        PathRule::Match(String::new())
    }

    /// A literal segment.
    pub fn literal(segment: impl Into<String>) -> Self {
        PathRule::Match(segment.into())
    }

    /// A capture decoded as `T`.
    pub fn capture<T: Reflect + ?Sized>(name: impl Into<String>) -> Self {
        PathRule::Capture(PathCapture::new::<T>(name))
    }

    /// A capture without type information.
    pub fn capture_untyped(name: impl Into<String>) -> Self {
        PathRule::Capture(PathCapture::untyped(name))
    }

    /// A tail capture.
    pub fn tail() -> Self {
        PathRule::CaptureTail
    }

    /// Sequential composition.
    pub fn and(self, next: impl Into<PathRule>) -> Self {
        PathRule::And(Box::new(self), Box::new(next.into()))
    }

    /// Alternative composition.
    pub fn or(self, alternative: impl Into<PathRule>) -> Self {
        PathRule::Or(Box::new(self), Box::new(alternative.into()))
    }

    /// Wraps the rule with arbitrary metadata.
    pub fn with_meta(self, meta: Metadata) -> Self {
        PathRule::Meta(Box::new(self), meta)
    }

    /// Wraps the rule with a route description, used as the operation summary.
    pub fn describe(self, description: impl Into<String>) -> Self {
        self.with_meta(Metadata::RouteDesc(description.into()))
    }
}

impl From<&str> for PathRule {
    fn from(segment: &str) -> Self {
        PathRule::literal(segment)
    }
}

impl From<String> for PathRule {
    fn from(segment: String) -> Self {
        PathRule::literal(segment)
    }
}

impl From<PathCapture> for PathRule {
    fn from(capture: PathCapture) -> Self {
        PathRule::Capture(capture)
    }
}

impl<R: Into<PathRule>> Div<R> for PathRule {
    type Output = PathRule;

    fn div(self, rhs: R) -> PathRule {
        self.and(rhs)
    }
}

impl<R: Into<PathRule>> BitOr<R> for PathRule {
    type Output = PathRule;

    fn bitor(self, rhs: R) -> PathRule {
        self.or(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_div_is_left_associated_and() {
        let rule = PathRule::root() / "users" / PathRule::capture::<i64>("id");
        match rule {
            PathRule::And(left, right) => {
                assert_eq!(*right, PathRule::capture::<i64>("id"));
                assert_eq!(
                    *left,
                    PathRule::And(
                        Box::new(PathRule::root()),
                        Box::new(PathRule::literal("users"))
                    )
                );
            }
            other => panic!("expected And, got {:?}", other),
        }
    }

    #[test]
    fn test_bitor_binds_looser_than_div() {
        let rule = PathRule::root() / "a" | PathRule::root() / "b";
        assert!(matches!(rule, PathRule::Or(_, _)));
    }

    #[test]
    fn test_describe_wraps_with_route_desc() {
        let rule = PathRule::literal("ping").describe("Health check");
        assert_eq!(
            rule,
            PathRule::Meta(
                Box::new(PathRule::literal("ping")),
                Metadata::RouteDesc("Health check".into())
            )
        );
    }

    #[test]
    fn test_untyped_capture() {
        let capture = PathCapture::untyped("slug").with_description("URL slug");
        assert!(capture.ty.is_none());
        assert_eq!(capture.description.as_deref(), Some("URL slug"));
    }
}
