//! # Parameter Collectors
//!
//! Folds path, query and header rules into ordered parameter lists.
//!
//! Swagger has no "exactly one of" construct, so both sides of a query or
//! header alternative are emitted, each annotated with the names of the
//! other side.

use crate::config::SwaggerConfig;
use crate::reflect::TypeDescriptor;
use crate::route::RouteAction;
use crate::rules::{Metadata, ParamCapture, PathCapture, RequestRule};
use crate::swagger::linearize::{LinearRoute, PathOperation};
use crate::swagger::models::{Parameter, ParameterLocation, Property};
use crate::swagger::schemas::mk_property;
use crate::type_mapping::{capture_schema, JsonSchema, JsonType};

/// Name of the synthetic parameter standing for a tail capture.
pub const TAIL_PARAM_NAME: &str = "tail...";

/// All parameters of one linear route: path, query, header, then body.
pub fn collect_operation_params(
    route: &LinearRoute<'_>,
    config: &SwaggerConfig,
) -> Vec<Parameter> {
    let mut params = collect_path_params(&route.operations);
    params.extend(collect_query_params(&route.action.query));
    params.extend(collect_header_params(&route.action.headers));
    params.extend(collect_body_param(route.action, config));
    params
}

/// Path parameters in path order.
///
/// A `Description` immediately wrapping a capture becomes its description.
/// A tail capture becomes a single `tail...` string parameter and ends
/// collection: operations after it are never converted.
pub fn collect_path_params(operations: &[PathOperation<'_>]) -> Vec<Parameter> {
    let mut params = Vec::new();
    let mut pending: Option<&str> = None;
    for op in operations {
        match op {
            PathOperation::Meta(Metadata::Description(text)) => pending = Some(text.as_str()),
            PathOperation::Meta(_) => {}
            PathOperation::Capture(capture) => {
                let param = mk_path_param(capture);
                params.push(match pending.take() {
                    Some(text) => param.with_description(text),
                    None => param,
                });
            }
            PathOperation::CaptureTail => {
                params.push(Parameter::scalar(
                    TAIL_PARAM_NAME,
                    ParameterLocation::Path,
                    string_schema(),
                    true,
                ));
                break;
            }
            PathOperation::Match(_) => pending = None,
        }
    }
    params
}

/// Query parameters in rule order.
pub fn collect_query_params(rule: &RequestRule) -> Vec<Parameter> {
    collect_request_params(rule, ParameterLocation::Query)
}

/// Header parameters in rule order.
pub fn collect_header_params(rule: &RequestRule) -> Vec<Parameter> {
    collect_request_params(rule, ParameterLocation::Header)
}

/// The body parameter, present iff the action decodes a request body.
pub fn collect_body_param(action: &RouteAction, config: &SwaggerConfig) -> Option<Parameter> {
    let codec = action.body.as_ref()?;
    Some(Parameter::body(
        mk_property(&codec.ty, config),
        codec.ty.simple_name(),
        !codec.ty.is_optional_wrapper(),
    ))
}

fn collect_request_params(rule: &RequestRule, location: ParameterLocation) -> Vec<Parameter> {
    let mut params = Vec::new();
    let mut stack = vec![rule];

    while let Some(rule) = stack.pop() {
        match rule {
            RequestRule::And(first, second) => {
                stack.push(second);
                stack.push(first);
            }
            RequestRule::Or(left, right) => {
                let left = collect_request_params(left, location);
                let right = collect_request_params(right, location);
                params.extend(disjoin(left, right, location));
            }
            RequestRule::Meta(inner, meta) => match (meta.text(), inner.as_ref()) {
                (Some(text), RequestRule::Capture(capture)) => {
                    params.push(mk_request_param(capture, location).with_description(text));
                }
                _ => stack.push(inner),
            },
            RequestRule::Capture(capture) => params.push(mk_request_param(capture, location)),
            RequestRule::Empty => {}
        }
    }
    params
}

/// Combines both sides of an alternative.
///
/// An empty side means the other is always required, so no note is added.
fn disjoin(
    left: Vec<Parameter>,
    right: Vec<Parameter>,
    location: ParameterLocation,
) -> Vec<Parameter> {
    if right.is_empty() {
        return left;
    }
    if left.is_empty() {
        return right;
    }

    let noun = match location {
        ParameterLocation::Header => "headers",
        _ => "params",
    };
    let left_note = optional_note(noun, &right);
    let right_note = optional_note(noun, &left);

    left.into_iter()
        .map(|p| annotate(p, &left_note))
        .chain(right.into_iter().map(|p| annotate(p, &right_note)))
        .collect()
}

fn optional_note(noun: &str, others: &[Parameter]) -> String {
    let names: Vec<&str> = others.iter().map(|p| p.name.as_str()).collect();
    format!(
        "Optional if the following {} are satisfied: [{}]",
        noun,
        names.join(", ")
    )
}

fn annotate(mut param: Parameter, note: &str) -> Parameter {
    param.description = Some(match param.description.take() {
        Some(existing) => format!("{} {}", existing, note),
        None => note.to_string(),
    });
    param
}

fn mk_path_param(capture: &PathCapture) -> Parameter {
    let mut param = Parameter::scalar(
        capture.name.clone(),
        ParameterLocation::Path,
        capture_schema(capture.ty.as_ref()),
        true,
    );
    param.description = capture.description.clone();
    param
}

fn mk_request_param(capture: &ParamCapture, location: ParameterLocation) -> Parameter {
    let required = capture.is_required();
    let ty = capture.ty.as_ref().map(strip_optional);

    let mut param = match ty.as_ref().filter(|t| t.is_collection()) {
        Some(collection) => {
            let element = collection.element_type().map(|e| strip_optional(&e));
            let mut param = Parameter::scalar(
                capture.name.clone(),
                location,
                JsonSchema {
                    type_: JsonType::Array,
                    format: None,
                    enum_values: None,
                },
                required,
            );
            param.items = Some(Property::scalar(capture_schema(element.as_ref())));
            param.collection_format = Some(match location {
                ParameterLocation::Query => "multi".to_string(),
                _ => "csv".to_string(),
            });
            param
        }
        None => Parameter::scalar(
            capture.name.clone(),
            location,
            capture_schema(ty.as_ref()),
            required,
        ),
    };

    param.description = capture.description.clone();
    param.default = capture.default.clone();
    param
}

/// Unwraps nested optional wrappers.
fn strip_optional(ty: &TypeDescriptor) -> TypeDescriptor {
    let mut ty = ty.clone();
    while ty.is_optional_wrapper() {
        match ty.element_type() {
            Some(inner) => ty = inner,
            None => break,
        }
    }
    ty
}

fn string_schema() -> JsonSchema {
    JsonSchema {
        type_: JsonType::String,
        format: None,
        enum_values: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::BodyCodec;
    use crate::rules::PathRule;
    use crate::swagger::linearize::linearize;
    use http::Method;
    use pretty_assertions::assert_eq;

    fn names(params: &[Parameter]) -> Vec<&str> {
        params.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_or_parameters_cross_annotated() {
        let rule = RequestRule::param::<i32>("a") | RequestRule::param::<i32>("b");
        let params = collect_query_params(&rule);

        assert_eq!(names(&params), vec!["a", "b"]);
        assert_eq!(
            params[0].description.as_deref(),
            Some("Optional if the following params are satisfied: [b]")
        );
        assert_eq!(
            params[1].description.as_deref(),
            Some("Optional if the following params are satisfied: [a]")
        );
    }

    #[test]
    fn test_or_with_empty_side_is_unannotated() {
        let rule = RequestRule::param::<i32>("a") | RequestRule::empty();
        let params = collect_query_params(&rule);
        assert_eq!(names(&params), vec!["a"]);
        assert_eq!(params[0].description, None);

        let rule = RequestRule::empty() | RequestRule::param::<i32>("b");
        let params = collect_query_params(&rule);
        assert_eq!(names(&params), vec!["b"]);
        assert_eq!(params[0].description, None);
    }

    #[test]
    fn test_or_of_groups_lists_every_name() {
        let rule = (RequestRule::param::<i32>("a") & RequestRule::param::<i32>("b"))
            | RequestRule::param::<String>("c");
        let params = collect_header_params(&rule);
        assert_eq!(names(&params), vec!["a", "b", "c"]);
        assert_eq!(
            params[1].description.as_deref(),
            Some("Optional if the following headers are satisfied: [c]")
        );
        assert_eq!(
            params[2].description.as_deref(),
            Some("Optional if the following headers are satisfied: [a, b]")
        );
        assert!(params.iter().all(|p| p.location == ParameterLocation::Header));
    }

    #[test]
    fn test_and_chain_preserves_order() {
        let rule = RequestRule::param::<i32>("a")
            & (RequestRule::param::<i32>("b") & RequestRule::param::<i32>("c"))
            & RequestRule::param::<i32>("d");
        assert_eq!(names(&collect_query_params(&rule)), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_description_metadata_on_capture() {
        let rule = RequestRule::param::<u32>("limit").describe("Page size")
            & RequestRule::param::<u32>("offset");
        let params = collect_query_params(&rule);
        assert_eq!(params[0].description.as_deref(), Some("Page size"));
        assert_eq!(params[1].description, None);
    }

    #[test]
    fn test_description_metadata_on_group_is_transparent() {
        let rule = (RequestRule::param::<u32>("a") & RequestRule::param::<u32>("b"))
            .describe("ignored");
        let params = collect_query_params(&rule);
        assert_eq!(names(&params), vec!["a", "b"]);
        assert!(params.iter().all(|p| p.description.is_none()));
    }

    #[test]
    fn test_query_param_typing() {
        let rule = RequestRule::from(ParamCapture::new::<i64>("page").with_default(1))
            & RequestRule::param::<Option<bool>>("verbose")
            & RequestRule::param::<Vec<String>>("tag");
        let params = collect_query_params(&rule);

        assert_eq!(params[0].type_.as_deref(), Some("integer"));
        assert_eq!(params[0].format.as_deref(), Some("int64"));
        assert_eq!(params[0].default, Some(serde_json::json!(1)));
        assert!(!params[0].required);

        assert_eq!(params[1].type_.as_deref(), Some("boolean"));
        assert!(!params[1].required);

        assert_eq!(params[2].type_.as_deref(), Some("array"));
        assert_eq!(params[2].collection_format.as_deref(), Some("multi"));
        assert_eq!(
            params[2].items.as_ref().and_then(|i| i.type_.as_deref()),
            Some("string")
        );
        assert!(params[2].required);
    }

    #[test]
    fn test_path_params() {
        let rule = PathRule::root()
            / "users"
            / PathRule::capture::<i64>("id")
            / "files"
            / PathRule::capture_untyped("name");
        let seqs = linearize(&rule);
        let params = collect_path_params(&seqs[0]);

        assert_eq!(names(&params), vec!["id", "name"]);
        assert!(params.iter().all(|p| p.required));
        assert_eq!(params[0].type_.as_deref(), Some("integer"));
        assert_eq!(params[1].type_.as_deref(), Some("string"));
    }

    #[test]
    fn test_path_capture_description_metadata() {
        let rule = PathRule::root()
            / "users"
            / PathRule::capture::<i64>("id").with_meta(Metadata::Description("User id".into()))
            / "posts"
            / PathRule::capture::<i64>("post");
        let seqs = linearize(&rule);
        let params = collect_path_params(&seqs[0]);

        assert_eq!(names(&params), vec!["id", "post"]);
        assert_eq!(params[0].description.as_deref(), Some("User id"));
        assert_eq!(params[1].description, None);
    }

    #[test]
    fn test_path_description_does_not_leak_past_literals() {
        let rule = (PathRule::literal("files") / PathRule::capture_untyped("name"))
            .with_meta(Metadata::Description("Files".into()));
        let seqs = linearize(&rule);
        let params = collect_path_params(&seqs[0]);
        assert_eq!(params[0].description, None);
    }

    #[test]
    fn test_tail_capture_param_ends_collection() {
        let id = PathCapture::new::<i32>("id");
        let late = PathCapture::new::<i32>("late");
        let ops = [
            PathOperation::Capture(&id),
            PathOperation::CaptureTail,
            PathOperation::Capture(&late),
        ];
        let params = collect_path_params(&ops);
        assert_eq!(names(&params), vec!["id", TAIL_PARAM_NAME]);
        assert_eq!(params[1].type_.as_deref(), Some("string"));
    }

    #[test]
    fn test_body_param() {
        let action = RouteAction::new(Method::POST, PathRule::root() / "notes")
            .with_body(BodyCodec::new::<Vec<String>>(["application/json"]));
        let body = collect_body_param(&action, &SwaggerConfig::default()).unwrap();
        assert_eq!(body.name, "body");
        assert_eq!(body.location, ParameterLocation::Body);
        assert!(body.required);
        assert_eq!(body.type_, None);
        assert_eq!(
            body.schema.as_ref().and_then(|s| s.type_.as_deref()),
            Some("array")
        );

        let without = RouteAction::new(Method::GET, PathRule::root());
        assert!(collect_body_param(&without, &SwaggerConfig::default()).is_none());
    }
}
