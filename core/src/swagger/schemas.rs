//! # Type-Schema Expander
//!
//! Expands type descriptors into the schema models needed to describe them.
//!
//! - Records become models; every other shape is described inline.
//! - Containers and optional wrappers are expanded through to their elements.
//! - A model is registered before its fields are visited, so recursive and
//!   mutually recursive types terminate with one model each.

use crate::config::SwaggerConfig;
use crate::reflect::{FieldDescriptor, TypeDescriptor, TypeKind};
use crate::route::RouteAction;
use crate::rules::RequestRule;
use crate::swagger::models::{ApiDocument, Model, Property};
use crate::type_mapping::map_scalar;
use indexmap::IndexMap;

/// Models keyed by fully qualified type name.
pub type ModelSet = IndexMap<String, Model>;

/// A set of models that expansion must not produce again.
pub trait KnownModels {
    /// Whether a model for the fully qualified type name `id` exists.
    fn contains_model(&self, id: &str) -> bool;
}

impl KnownModels for ModelSet {
    fn contains_model(&self, id: &str) -> bool {
        self.contains_key(id)
    }
}

/// Definitions are keyed by short name, so lookups compare model ids.
impl KnownModels for ApiDocument {
    fn contains_model(&self, id: &str) -> bool {
        self.definitions.values().any(|model| model.id == id)
    }
}

/// The property describing a value of type `ty`; `None` for unit.
///
/// A type with custom models is referenced through the first of them.
pub fn mk_property(ty: &TypeDescriptor, config: &SwaggerConfig) -> Option<Property> {
    let custom = config
        .custom_models_for(ty.full_name())
        .and_then(|models| models.first());
    if let Some(model) = custom {
        return Some(Property::reference(&model.name, model.id.clone()));
    }
    match ty.kind() {
        TypeKind::Unit => None,
        TypeKind::Primitive(_) | TypeKind::Enumeration(_) => map_scalar(ty).map(Property::scalar),
        TypeKind::Optional(inner) => mk_property(&inner(), config),
        TypeKind::Collection(inner) => Some(Property::array(
            mk_property(&inner(), config).unwrap_or_default(),
        )),
        TypeKind::Map(inner) => Some(Property::map(
            mk_property(&inner(), config).unwrap_or_default(),
        )),
        TypeKind::Record(_) => Some(Property::reference(&ty.simple_name(), ty.full_name())),
    }
}

/// The models needed to describe `ty` that are not in `already_known`.
///
/// Together with `already_known`, the result is the minimal superset that
/// fully describes `ty`.
pub fn collect_models<K: KnownModels + ?Sized>(
    ty: &TypeDescriptor,
    already_known: &K,
    config: &SwaggerConfig,
) -> ModelSet {
    let mut added = ModelSet::new();
    expand_into(ty, already_known, &mut added, config);
    added
}

/// The models needed by one route action that are not in `already_known`:
/// result bodies, the request body, and non-scalar query/header captures.
pub fn collect_action_models<K: KnownModels + ?Sized>(
    action: &RouteAction,
    already_known: &K,
    config: &SwaggerConfig,
) -> ModelSet {
    let mut added = ModelSet::new();
    for ty in schema_types(action) {
        expand_into(&ty, already_known, &mut added, config);
    }
    added
}

/// Expands `root`, adding to `out` every model missing from both `known` and `out`.
fn expand_into<K: KnownModels + ?Sized>(
    root: &TypeDescriptor,
    known: &K,
    out: &mut ModelSet,
    config: &SwaggerConfig,
) {
    let mut pending = vec![root.clone()];

    while let Some(ty) = pending.pop() {
        if let Some(custom) = config.custom_models_for(ty.full_name()) {
            for model in custom {
                if !known.contains_model(&model.id) && !out.contains_key(&model.id) {
                    out.insert(model.id.clone(), model.clone());
                }
            }
            continue;
        }

        match ty.kind() {
            TypeKind::Unit | TypeKind::Primitive(_) | TypeKind::Enumeration(_) => {}
            TypeKind::Optional(inner) | TypeKind::Collection(inner) | TypeKind::Map(inner) => {
                pending.push(inner());
            }
            TypeKind::Record(_) => {
                let id = ty.full_name();
                if known.contains_model(id) || out.contains_key(id) {
                    continue;
                }
                let fields = ty.fields();
                out.insert(id.to_string(), mk_model(&ty, &fields, config));
                for field in fields.iter().rev() {
                    pending.push(field.descriptor());
                }
            }
        }
    }
}

/// Builds the model of a record type from its fields.
fn mk_model(
    ty: &TypeDescriptor,
    fields: &[FieldDescriptor],
    config: &SwaggerConfig,
) -> Model {
    let mut model = Model::object(ty.full_name(), ty.simple_name());
    model.description = ty.description().map(str::to_string);
    for field in fields {
        let field_ty = field.descriptor();
        if let Some(property) = mk_property(&field_ty, config) {
            model = model.with_property(
                field.name.to_string(),
                property,
                !field_ty.is_optional_wrapper(),
            );
        }
    }
    model
}

fn schema_types(action: &RouteAction) -> Vec<TypeDescriptor> {
    let mut types: Vec<TypeDescriptor> = action
        .results
        .iter()
        .filter_map(|r| r.body_type().cloned())
        .collect();
    types.extend(action.body.as_ref().map(|codec| codec.ty.clone()));
    types.extend(capture_types(&action.query));
    types.extend(capture_types(&action.headers));
    types
}

/// Non-scalar capture types of a request rule tree, in rule order.
fn capture_types(rule: &RequestRule) -> Vec<TypeDescriptor> {
    let mut types = Vec::new();
    let mut stack = vec![rule];
    while let Some(rule) = stack.pop() {
        match rule {
            RequestRule::And(first, second) | RequestRule::Or(first, second) => {
                stack.push(second);
                stack.push(first);
            }
            RequestRule::Meta(inner, _) => stack.push(inner),
            RequestRule::Capture(capture) => {
                types.extend(capture.ty.iter().filter(|t| !t.is_primitive()).cloned());
            }
            RequestRule::Empty => {}
        }
    }
    types
}
