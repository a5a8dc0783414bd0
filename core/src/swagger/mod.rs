#![deny(missing_docs)]

//! # Swagger Generation Module
//!
//! - **models**: Serializable Swagger 2.0 document model.
//! - **linearize**: Flattening of path rule trees into concrete paths.
//! - **naming**: Path templates, operation identifiers and tags.
//! - **params**: Path, query, header and body parameter collection.
//! - **schemas**: Expansion of types into definition models.
//! - **summary**: Route-level metadata extraction.
//! - **builder**: Folding route actions into a document.

pub mod builder;
pub mod linearize;
pub mod models;
pub mod naming;
pub mod params;
pub mod schemas;
pub mod summary;

pub use builder::{ActionContribution, SwaggerBuilder};
pub use linearize::{linearize, linearize_route, LinearRoute, PathOperation};
pub use models::{
    ApiDocument, Info, Model, Operation, Parameter, ParameterLocation, PathItem, Property,
    Response, SchemaCollision,
};
pub use schemas::{collect_models, mk_property, KnownModels, ModelSet};
