//! # Naming Utilities
//!
//! Helper functions deriving path templates, operation identifiers and tags
//! from linearized routes.

use crate::swagger::linearize::PathOperation;
use http::Method;

/// Renders a linearized path as a template string.
///
/// Literals are split on `/` so embedded or doubled slashes never produce
/// empty segments. An empty path renders as `/`.
pub fn mk_path_string(operations: &[PathOperation<'_>]) -> String {
    let mut path = String::new();
    for op in operations {
        match op {
            PathOperation::Match(literal) => {
                for segment in literal.split('/').filter(|s| !s.is_empty()) {
                    path.push('/');
                    path.push_str(segment);
                }
            }
            PathOperation::Capture(capture) => {
                path.push_str("/{");
                path.push_str(&capture.name);
                path.push('}');
            }
            PathOperation::CaptureTail => {
                path.push_str("/{tail...}");
                break;
            }
            PathOperation::Meta(_) => {}
        }
    }
    if path.is_empty() {
        path.push('/');
    }
    path
}

/// Non-empty segments of a path template.
fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn is_capture_segment(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}

/// Upper-cases the first character, leaving the rest untouched.
fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Derives the operation identifier from the HTTP Method and path template.
///
/// e.g. `GET /users/{id}/posts` -> `getUsersPosts`
pub fn mk_operation_id(method: &Method, path: &str) -> String {
    let mut id = method.as_str().to_lowercase();
    for segment in segments(path).filter(|s| !is_capture_segment(s)) {
        id.push_str(&capitalize(segment));
    }
    id
}

/// The default tag: the first path segment, or `/` for the root.
pub fn derive_tag(path: &str) -> String {
    segments(path).next().unwrap_or("/").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Metadata, PathCapture};

    #[test]
    fn test_path_string() {
        let id = PathCapture::new::<i32>("id");
        let ops = [PathOperation::Match("users"), PathOperation::Capture(&id)];
        assert_eq!(mk_path_string(&ops), "/users/{id}");
    }

    #[test]
    fn test_path_string_normalizes_slashes() {
        let meta = Metadata::Deprecated;
        let ops = [
            PathOperation::Meta(&meta),
            PathOperation::Match("/api//v1/"),
            PathOperation::Match("users/"),
        ];
        assert_eq!(mk_path_string(&ops), "/api/v1/users");
        assert_eq!(mk_path_string(&[]), "/");
    }

    #[test]
    fn test_operation_id() {
        assert_eq!(mk_operation_id(&Method::GET, "/users/{id}/posts"), "getUsersPosts");
        assert_eq!(mk_operation_id(&Method::POST, "/users"), "postUsers");
        assert_eq!(mk_operation_id(&Method::DELETE, "/"), "delete");
        assert_eq!(mk_operation_id(&Method::GET, "/files/{tail...}"), "getFiles");
    }

    #[test]
    fn test_derive_tag() {
        assert_eq!(derive_tag("/users/{id}"), "users");
        assert_eq!(derive_tag("/"), "/");
    }
}
