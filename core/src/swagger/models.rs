//! # Swagger Models
//!
//! The output document: paths with one optional operation per verb, and a
//! registry of named schema models. Serializes to the Swagger 2.0 shape.

use crate::error::{AppError, AppResult};
use crate::type_mapping::{JsonSchema, JsonType};
use http::Method;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// API metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// API description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            title: "API".to_string(),
            version: "1.0.0".to_string(),
            description: None,
        }
    }
}

/// A schema model replaced by another model with the same short name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaCollision {
    /// The short name both types map to.
    pub name: String,
    /// Fully qualified name of the model that was replaced.
    pub existing: String,
    /// Fully qualified name of the model that replaced it.
    pub replacement: String,
}

/// The accumulated API description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiDocument {
    /// Swagger version marker.
    pub swagger: String,
    /// API metadata.
    pub info: Info,
    /// Host serving the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Base path prefixed to every path.
    #[serde(rename = "basePath", skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    /// Transfer protocols.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,
    /// Path template to per-path record.
    pub paths: IndexMap<String, PathItem>,
    /// Short schema name to model.
    pub definitions: IndexMap<String, Model>,
    #[serde(skip)]
    pub(crate) collisions: Vec<SchemaCollision>,
}

impl ApiDocument {
    /// An empty document.
    pub fn new(info: Info) -> Self {
        Self {
            swagger: "2.0".to_string(),
            info,
            host: None,
            base_path: None,
            schemes: Vec::new(),
            paths: IndexMap::new(),
            definitions: IndexMap::new(),
            collisions: Vec::new(),
        }
    }

    /// Every short-name collision recorded while merging into this document.
    pub fn schema_collisions(&self) -> &[SchemaCollision] {
        &self.collisions
    }

    /// The operation registered for `method` at `path`.
    pub fn operation(&self, path: &str, method: &Method) -> Option<&Operation> {
        self.paths.get(path).and_then(|item| item.operation(method))
    }

    /// Renders the document as a JSON value.
    pub fn to_json_value(&self) -> AppResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Renders the document as pretty-printed JSON.
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Renders the document as YAML.
    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Writes the document to `path`: YAML for `.yml`/`.yaml`, JSON otherwise.
    pub fn write_to_path(&self, path: &Path) -> AppResult<()> {
        let rendered = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml") | Some("yaml") => self.to_yaml()?,
            _ => self.to_json()?,
        };
        fs::write(path, rendered)?;
        Ok(())
    }
}

impl Default for ApiDocument {
    fn default() -> Self {
        Self::new(Info::default())
    }
}

/// Operations available on a single path.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PathItem {
    /// GET operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// PUT operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// POST operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// DELETE operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// PATCH operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    /// OPTIONS operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    /// Parameters shared by every operation on the path.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
}

impl PathItem {
    /// The operation slot for `method`, or `UnsupportedVerb` for any verb
    /// outside the six the document can represent.
    fn slot_mut(&mut self, method: &Method) -> AppResult<&mut Option<Operation>> {
        match *method {
            Method::GET => Ok(&mut self.get),
            Method::PUT => Ok(&mut self.put),
            Method::POST => Ok(&mut self.post),
            Method::DELETE => Ok(&mut self.delete),
            Method::PATCH => Ok(&mut self.patch),
            Method::OPTIONS => Ok(&mut self.options),
            _ => Err(AppError::UnsupportedVerb(method.to_string())),
        }
    }

    /// Replaces the operation for `method`.
    pub fn set_operation(&mut self, method: &Method, operation: Operation) -> AppResult<()> {
        *self.slot_mut(method)? = Some(operation);
        Ok(())
    }

    /// The operation registered for `method`.
    pub fn operation(&self, method: &Method) -> Option<&Operation> {
        match *method {
            Method::GET => self.get.as_ref(),
            Method::PUT => self.put.as_ref(),
            Method::POST => self.post.as_ref(),
            Method::DELETE => self.delete.as_ref(),
            Method::PATCH => self.patch.as_ref(),
            Method::OPTIONS => self.options.as_ref(),
            _ => None,
        }
    }
}

/// Checks that `method` is one of the documentable verbs.
pub fn ensure_supported_verb(method: &Method) -> AppResult<()> {
    PathItem::default().slot_mut(method).map(|_| ())
}

/// The documented behavior of one verb at one path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    /// Grouping tags.
    pub tags: Vec<String>,
    /// Short summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Unique operation identifier.
    #[serde(rename = "operationId")]
    pub operation_id: String,
    /// Accepted request media types.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    /// Produced response media types.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,
    /// Ordered parameters: path, query, header, body.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Status code to response.
    pub responses: IndexMap<String, Response>,
    /// Whether the operation is deprecated.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
}

/// Where a parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// A path template placeholder.
    Path,
    /// A query string parameter.
    Query,
    /// A request header.
    Header,
    /// The request body.
    Body,
}

/// A single operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the parameter must be present.
    pub required: bool,
    /// Scalar or array type name (non-body parameters).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    /// Type format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Element type of array parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Property>,
    /// Serialization of array parameters.
    #[serde(rename = "collectionFormat", skip_serializing_if = "Option::is_none")]
    pub collection_format: Option<String>,
    /// Default value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Allowed values.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Schema of a body parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Property>,
}

impl Parameter {
    /// A scalar parameter of the given mapped type.
    pub fn scalar(
        name: impl Into<String>,
        location: ParameterLocation,
        schema: JsonSchema,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            description: None,
            required,
            type_: Some(schema.type_.to_string()),
            format: schema.format.map(str::to_string),
            items: None,
            collection_format: None,
            default: None,
            enum_values: schema.enum_values,
            schema: None,
        }
    }

    /// The request body parameter.
    pub fn body(schema: Option<Property>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: "body".to_string(),
            location: ParameterLocation::Body,
            description: Some(description.into()),
            required,
            type_: None,
            format: None,
            items: None,
            collection_format: None,
            default: None,
            enum_values: None,
            schema,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A response entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// Reason phrase or description.
    pub description: String,
    /// Body schema, absent for responses without a body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Property>,
}

/// A property schema: inline scalar, array, map, or reference to a model.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Property {
    /// Reference to a model, `#/definitions/<name>`.
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Fully qualified identity of the referenced model.
    #[serde(skip)]
    pub ref_id: Option<String>,
    /// Type name.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    /// Type format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Element schema of arrays.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Property>>,
    /// Value schema of maps.
    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<Box<Property>>,
    /// Allowed values.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

impl Property {
    /// An inline scalar.
    pub fn scalar(schema: JsonSchema) -> Self {
        Self {
            type_: Some(schema.type_.to_string()),
            format: schema.format.map(str::to_string),
            enum_values: schema.enum_values,
            ..Self::default()
        }
    }

    /// A reference to the model registered as `name`.
    pub fn reference(name: &str, id: impl Into<String>) -> Self {
        Self {
            reference: Some(format!("#/definitions/{}", name)),
            ref_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// An array of `items`.
    pub fn array(items: Property) -> Self {
        Self {
            type_: Some(JsonType::Array.to_string()),
            items: Some(Box::new(items)),
            ..Self::default()
        }
    }

    /// A string keyed map of `values`.
    pub fn map(values: Property) -> Self {
        Self {
            type_: Some(JsonType::Object.to_string()),
            additional_properties: Some(Box::new(values)),
            ..Self::default()
        }
    }
}

/// A named, structurally described type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Model {
    /// Fully qualified identity, used for deduplication.
    #[serde(skip)]
    pub id: String,
    /// Short name, used as the registry key.
    #[serde(skip)]
    pub name: String,
    /// Model type, `object` for records.
    #[serde(rename = "type")]
    pub type_: String,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field name to property, in declaration order.
    pub properties: IndexMap<String, Property>,
    /// Names of non-optional fields.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl Model {
    /// An object model without properties.
    pub fn object(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            type_: JsonType::Object.to_string(),
            description: None,
            properties: IndexMap::new(),
            required: Vec::new(),
        }
    }

    /// Adds a property, marking it required when asked.
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        property: Property,
        required: bool,
    ) -> Self {
        let name = name.into();
        if required {
            self.required.push(name.clone());
        }
        self.properties.insert(name, property);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_unsupported_verbs_are_rejected() {
        let mut item = PathItem::default();
        let op = Operation {
            tags: vec!["/".into()],
            summary: None,
            operation_id: "head".into(),
            consumes: Vec::new(),
            produces: Vec::new(),
            parameters: Vec::new(),
            responses: IndexMap::new(),
            deprecated: false,
        };
        let err = item.set_operation(&Method::HEAD, op.clone()).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedVerb(ref v) if v == "HEAD"));

        item.set_operation(&Method::PATCH, op).unwrap();
        assert!(item.patch.is_some());
        assert!(item.operation(&Method::PATCH).is_some());
        assert!(item.operation(&Method::GET).is_none());
    }

    #[test]
    fn test_empty_document_shape() {
        let doc = ApiDocument::new(Info {
            title: "Pets".into(),
            version: "2.1".into(),
            description: None,
        });
        assert_eq!(
            doc.to_json_value().unwrap(),
            json!({
                "swagger": "2.0",
                "info": {"title": "Pets", "version": "2.1"},
                "paths": {},
                "definitions": {}
            })
        );
    }

    #[test]
    fn test_property_serialization() {
        let prop = Property::array(Property::reference("User", "app::User"));
        assert_eq!(
            serde_json::to_value(&prop).unwrap(),
            json!({"type": "array", "items": {"$ref": "#/definitions/User"}})
        );
    }
}
