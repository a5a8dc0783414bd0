//! # Route Actions
//!
//! One registered endpoint: HTTP method, rule trees for path, query and
//! headers, the possible results, and an optional request body codec.

use crate::reflect::{Reflect, TypeDescriptor};
use crate::rules::{PathRule, RequestRule};
use http::{Method, StatusCode};

/// One possible outcome of a route.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultInfo {
    /// A successful (`200 OK`) response with a body of the given type.
    TypeOnly(TypeDescriptor),
    /// An explicit status with a body of the given type.
    StatusAndType(StatusCode, TypeDescriptor),
    /// An explicit status without a body.
    StatusOnly(StatusCode),
    /// Declared to produce nothing; contributes no response entry.
    Empty,
}

impl ResultInfo {
    /// A `200 OK` response carrying `T`.
    pub fn ok<T: Reflect + ?Sized>() -> Self {
        ResultInfo::TypeOnly(T::describe())
    }

    /// A response with `status` carrying `T`.
    pub fn status_with<T: Reflect + ?Sized>(status: StatusCode) -> Self {
        ResultInfo::StatusAndType(status, T::describe())
    }

    /// The body type, if this outcome has one.
    pub fn body_type(&self) -> Option<&TypeDescriptor> {
        match self {
            ResultInfo::TypeOnly(ty) | ResultInfo::StatusAndType(_, ty) => Some(ty),
            ResultInfo::StatusOnly(_) | ResultInfo::Empty => None,
        }
    }
}

/// Decoder of the request body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyCodec {
    /// Type the body decodes into.
    pub ty: TypeDescriptor,
    /// Media types the decoder accepts.
    pub media_types: Vec<String>,
}

impl BodyCodec {
    /// A codec decoding `T` from the given media types.
    pub fn new<T: Reflect + ?Sized>(
        media_types: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            ty: T::describe(),
            media_types: media_types.into_iter().map(Into::into).collect(),
        }
    }
}

/// A registered endpoint. Built once at registration time and read only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteAction {
    /// HTTP method.
    pub method: Method,
    /// Path rule tree.
    pub path: PathRule,
    /// Query rule tree.
    pub query: RequestRule,
    /// Header rule tree.
    pub headers: RequestRule,
    /// Possible results, in declaration order.
    pub results: Vec<ResultInfo>,
    /// Request body decoder, if the route reads a body.
    pub body: Option<BodyCodec>,
    /// Media types of the response encodings.
    pub produces: Vec<String>,
}

impl RouteAction {
    /// Creates an action with empty query/header rules and no results.
    pub fn new(method: Method, path: impl Into<PathRule>) -> Self {
        Self {
            method,
            path: path.into(),
            query: RequestRule::Empty,
            headers: RequestRule::Empty,
            results: Vec::new(),
            body: None,
            produces: Vec::new(),
        }
    }

    /// Sets the query rule tree.
    pub fn with_query(mut self, query: impl Into<RequestRule>) -> Self {
        self.query = query.into();
        self
    }

    /// Sets the header rule tree.
    pub fn with_headers(mut self, headers: impl Into<RequestRule>) -> Self {
        self.headers = headers.into();
        self
    }

    /// Adds a possible result.
    pub fn with_result(mut self, result: ResultInfo) -> Self {
        self.results.push(result);
        self
    }

    /// Sets the request body codec.
    pub fn with_body(mut self, body: BodyCodec) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a response media type.
    pub fn produces(mut self, media_type: impl Into<String>) -> Self {
        self.produces.push(media_type.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_accumulates_results() {
        let action = RouteAction::new(Method::GET, PathRule::root() / "users")
            .with_result(ResultInfo::ok::<Vec<String>>())
            .with_result(ResultInfo::StatusOnly(StatusCode::NOT_FOUND))
            .with_result(ResultInfo::Empty);

        assert_eq!(action.results.len(), 3);
        assert!(action.results[0].body_type().is_some());
        assert!(action.results[1].body_type().is_none());
        assert!(action.query.is_empty());
    }

    #[test]
    fn test_body_codec_media_types() {
        let codec = BodyCodec::new::<String>(["application/json", "text/plain"]);
        assert_eq!(codec.media_types, vec!["application/json", "text/plain"]);
        assert_eq!(codec.ty, TypeDescriptor::of::<String>());
    }
}
