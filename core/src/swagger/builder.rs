//! # Document Builder
//!
//! Logic that folds `RouteAction`s into an `ApiDocument`.
//!
//! Each action is first turned into an `ActionContribution` (its operations
//! per path plus the models it needs). Contributions are independent of each
//! other and can be computed in any order; merging them must follow
//! registration order, because later operations and models overwrite
//! earlier ones.

use crate::config::{CollisionPolicy, SwaggerConfig};
use crate::error::{AppError, AppResult};
use crate::route::{ResultInfo, RouteAction};
use crate::swagger::linearize::{linearize_route, LinearRoute};
use crate::swagger::models::{
    ensure_supported_verb, ApiDocument, Model, Operation, Response, SchemaCollision,
};
use crate::swagger::naming::{derive_tag, mk_operation_id};
use crate::swagger::params::collect_operation_params;
use crate::swagger::schemas::{collect_action_models, mk_property, KnownModels, ModelSet};
use crate::swagger::summary::{collect_summary, collect_tags, is_deprecated};
use http::Method;
use indexmap::IndexMap;
use tracing::{debug, warn};

/// Everything one route action adds to a document.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionContribution {
    /// The action's HTTP method.
    pub method: Method,
    /// One operation per linearized path, in linearization order.
    pub operations: Vec<(String, Operation)>,
    /// Models the action needs, keyed by fully qualified name.
    pub models: ModelSet,
}

/// Route-level metadata shared by every linear path of an action.
struct RouteMeta {
    summary: Option<String>,
    tags: Option<Vec<String>>,
    deprecated: bool,
}

impl RouteMeta {
    fn collect(routes: &[LinearRoute<'_>]) -> Self {
        Self {
            summary: collect_summary(routes.iter().map(|r| r.operations.as_slice())),
            tags: routes.first().and_then(|r| collect_tags(&r.operations)),
            deprecated: routes.iter().any(|r| is_deprecated(&r.operations)),
        }
    }
}

/// Builds Swagger documents from route actions.
#[derive(Debug, Clone, Default)]
pub struct SwaggerBuilder {
    config: SwaggerConfig,
}

impl SwaggerBuilder {
    /// Creates a builder with the given configuration.
    pub fn new(config: SwaggerConfig) -> Self {
        Self { config }
    }

    /// The builder configuration.
    pub fn config(&self) -> &SwaggerConfig {
        &self.config
    }

    /// An empty document carrying the configured metadata.
    pub fn empty_document(&self) -> ApiDocument {
        self.config.empty_document()
    }

    /// Builds the operation for one linear path of an action.
    pub fn build_operation(&self, route: &LinearRoute<'_>) -> Operation {
        let meta = RouteMeta::collect(&linearize_route(route.action));
        mk_operation(route, &meta, &self.config)
    }

    /// Computes what `action` adds to a document that knows no models yet.
    pub fn contribute(&self, action: &RouteAction) -> AppResult<ActionContribution> {
        self.contribute_with(action, &ModelSet::new())
    }

    /// Computes what `action` adds, skipping models in `known`.
    ///
    /// Fails with `UnsupportedVerb` before doing any work when the action's
    /// method cannot be documented.
    pub fn contribute_with<K: KnownModels + ?Sized>(
        &self,
        action: &RouteAction,
        known: &K,
    ) -> AppResult<ActionContribution> {
        ensure_supported_verb(&action.method)?;

        let routes = linearize_route(action);
        let meta = RouteMeta::collect(&routes);
        let operations = routes
            .iter()
            .map(|route| (route.path_string(), mk_operation(route, &meta, &self.config)))
            .collect();

        Ok(ActionContribution {
            method: action.method.clone(),
            operations,
            models: collect_action_models(action, known, &self.config),
        })
    }

    /// Folds a contribution into `document`.
    ///
    /// The contribution's operations replace any operation registered for the
    /// same path and verb; its models replace models with the same short name.
    pub fn merge_contribution(
        &self,
        mut document: ApiDocument,
        contribution: ActionContribution,
    ) -> AppResult<ApiDocument> {
        debug!(
            method = %contribution.method,
            paths = contribution.operations.len(),
            models = contribution.models.len(),
            "merging route action"
        );

        for (path, operation) in contribution.operations {
            document
                .paths
                .entry(path)
                .or_default()
                .set_operation(&contribution.method, operation)?;
        }

        for (_, model) in contribution.models {
            self.register_model(&mut document, model)?;
        }

        Ok(document)
    }

    /// Folds one route action into `document`.
    pub fn merge_action(
        &self,
        document: ApiDocument,
        action: &RouteAction,
    ) -> AppResult<ApiDocument> {
        let contribution = self.contribute_with(action, &document)?;
        self.merge_contribution(document, contribution)
    }

    /// Folds every action, in order, into `seed` (or an empty document).
    pub fn build_document<'a, I>(
        &self,
        seed: Option<ApiDocument>,
        actions: I,
    ) -> AppResult<ApiDocument>
    where
        I: IntoIterator<Item = &'a RouteAction>,
    {
        let initial = seed.unwrap_or_else(|| self.empty_document());
        actions
            .into_iter()
            .try_fold(initial, |document, action| self.merge_action(document, action))
    }

    fn register_model(&self, document: &mut ApiDocument, model: Model) -> AppResult<()> {
        if let Some(existing) = document.definitions.get(&model.name) {
            if existing.id != model.id {
                let collision = SchemaCollision {
                    name: model.name.clone(),
                    existing: existing.id.clone(),
                    replacement: model.id.clone(),
                };
                match self.config.collision_policy {
                    CollisionPolicy::Fail => {
                        return Err(AppError::SchemaCollision {
                            name: collision.name,
                            existing: collision.existing,
                            replacement: collision.replacement,
                        });
                    }
                    CollisionPolicy::Overwrite => {
                        warn!(
                            name = %collision.name,
                            existing = %collision.existing,
                            replacement = %collision.replacement,
                            "schema name collision, later model wins"
                        );
                        document.collisions.push(collision);
                    }
                }
            }
        }
        document.definitions.insert(model.name.clone(), model);
        Ok(())
    }
}

fn mk_operation(route: &LinearRoute<'_>, meta: &RouteMeta, config: &SwaggerConfig) -> Operation {
    let action = route.action;
    let path = route.path_string();

    // 1. Tags
    let tags = meta
        .tags
        .clone()
        .unwrap_or_else(|| vec![derive_tag(&path)]);

    // 2. Parameters
    let parameters = collect_operation_params(route, config);

    // 3. Media types
    let consumes = action
        .body
        .as_ref()
        .map(|codec| codec.media_types.clone())
        .unwrap_or_default();

    Operation {
        tags,
        summary: meta.summary.clone(),
        operation_id: mk_operation_id(&action.method, &path),
        consumes,
        produces: action.produces.clone(),
        parameters,
        responses: collect_responses(action, config),
        deprecated: meta.deprecated,
    }
}

/// One response per declared result; `ResultInfo::Empty` contributes nothing.
fn collect_responses(action: &RouteAction, config: &SwaggerConfig) -> IndexMap<String, Response> {
    let mut responses = IndexMap::new();
    for result in &action.results {
        let (code, description) = match result {
            ResultInfo::TypeOnly(_) => ("200".to_string(), "OK".to_string()),
            ResultInfo::StatusAndType(status, _) | ResultInfo::StatusOnly(status) => (
                status.as_str().to_string(),
                status
                    .canonical_reason()
                    .unwrap_or(status.as_str())
                    .to_string(),
            ),
            ResultInfo::Empty => continue,
        };
        responses.insert(
            code,
            Response {
                description,
                schema: result.body_type().and_then(|ty| mk_property(ty, config)),
            },
        );
    }
    responses
}
