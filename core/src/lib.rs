#![deny(missing_docs)]

//! # Routedoc Core
//!
//! Generates Swagger 2.0 documents from declarative route descriptions.
//!
//! Routes are built from composable rules: path rules (`/` for sequence,
//! `|` for alternatives) and request rules for query parameters and headers
//! (`&` for sequence, `|` for alternatives). Types appearing in routes are
//! described at runtime through the `Reflect` trait, and records become
//! schema definitions.
//!
//! ```
//! use http::Method;
//! use routedoc_core::{PathRule, RequestRule, ResultInfo, RouteAction, SwaggerBuilder};
//!
//! let action = RouteAction::new(
//!     Method::GET,
//!     (PathRule::root() / "users" / PathRule::capture::<i64>("id")).describe("Fetch a user"),
//! )
//! .with_query(RequestRule::param::<bool>("verbose"))
//! .with_result(ResultInfo::ok::<String>());
//!
//! let doc = SwaggerBuilder::default().build_document(None, [&action]).unwrap();
//! let op = doc.operation("/users/{id}", &Method::GET).unwrap();
//! assert_eq!(op.operation_id, "getUsers");
//! assert_eq!(op.summary.as_deref(), Some("Fetch a user"));
//! ```

/// Shared error types.
pub mod error;

/// Builder configuration.
pub mod config;

/// Runtime type descriptions.
pub mod reflect;

/// Type mapping logic (Rust -> JSON).
pub mod type_mapping;

/// Path and request rule trees.
pub mod rules;

/// Route actions.
pub mod route;

/// Swagger document generation.
pub mod swagger;

pub use config::{CollisionPolicy, SwaggerConfig};
pub use error::{AppError, AppResult};
pub use reflect::{FieldDescriptor, Primitive, Reflect, TypeDescriptor, TypeKind};
pub use route::{BodyCodec, ResultInfo, RouteAction};
pub use rules::{Metadata, ParamCapture, PathCapture, PathRule, RequestRule};
pub use swagger::{ActionContribution, ApiDocument, SwaggerBuilder};
pub use type_mapping::{JsonSchema, JsonType};
