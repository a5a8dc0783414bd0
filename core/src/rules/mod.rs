//! # Route Grammar
//!
//! Binary-combinator trees describing how a route matches a request:
//!
//! - **path**: literal segments, typed captures and tail captures.
//! - **request**: query and header captures.
//! - **metadata**: annotations wrapping any sub-tree.

pub mod metadata;
pub mod path;
pub mod request;

pub use metadata::Metadata;
pub use path::{PathCapture, PathRule};
pub use request::{ParamCapture, RequestRule};
