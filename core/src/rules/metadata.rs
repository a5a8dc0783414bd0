//! Annotations attached to rule sub-trees.

/// Metadata wrapping a path or request rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Metadata {
    /// Human-readable description of the whole route, used as the operation summary.
    RouteDesc(String),
    /// Description of the wrapped capture.
    Description(String),
    /// Explicit operation tags, replacing the tag derived from the path.
    Tags(Vec<String>),
    /// Marks the route as deprecated.
    Deprecated,
}

impl Metadata {
    /// Descriptive text carried by this annotation, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Metadata::RouteDesc(s) | Metadata::Description(s) => Some(s),
            _ => None,
        }
    }
}
