//! # Type Mapping
//!
//! Converts runtime type descriptors into the scalar Swagger representation
//! (`type` plus optional `format`). Handles primitives, string enumerations
//! and the `"string"` fallback for captures without type information.

use crate::reflect::{Primitive, TypeDescriptor, TypeKind};
use std::fmt::Display;
use tracing::trace;

/// Represents the simplified JSON types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    /// A string type.
    String,
    /// An integer type.
    Integer,
    /// A floating point number.
    Number,
    /// A boolean type.
    Boolean,
    /// An array of items.
    Array,
    /// A structured object.
    Object,
}

impl JsonType {
    /// The Swagger type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            JsonType::String => "string",
            JsonType::Integer => "integer",
            JsonType::Number => "number",
            JsonType::Boolean => "boolean",
            JsonType::Array => "array",
            JsonType::Object => "object",
        }
    }
}

impl Display for JsonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents the scalar schema of a mapped type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonSchema {
    /// The primary JSON type.
    pub type_: JsonType,
    /// Optional format specifier (e.g., "int64", "date-time").
    pub format: Option<&'static str>,
    /// Allowed values for string enumerations.
    pub enum_values: Option<Vec<String>>,
}

/// Maps a scalar primitive to its Swagger type and format.
pub fn map_primitive(primitive: Primitive) -> JsonSchema {
    match primitive {
        Primitive::String | Primitive::Char => simple(JsonType::String),
        Primitive::Bool => simple(JsonType::Boolean),
        Primitive::I8 | Primitive::I16 | Primitive::I32 | Primitive::U8 | Primitive::U16 => {
            formatted(JsonType::Integer, "int32")
        }
        Primitive::I64
        | Primitive::I128
        | Primitive::Isize
        | Primitive::U32
        | Primitive::U64
        | Primitive::U128
        | Primitive::Usize => formatted(JsonType::Integer, "int64"),
        Primitive::F32 => formatted(JsonType::Number, "float"),
        Primitive::F64 => formatted(JsonType::Number, "double"),
        Primitive::Uuid => formatted(JsonType::String, "uuid"),
        Primitive::DateTime => formatted(JsonType::String, "date-time"),
        Primitive::Date => formatted(JsonType::String, "date"),
    }
}

/// Maps scalars and enumerations; every other shape yields `None`.
pub fn map_scalar(ty: &TypeDescriptor) -> Option<JsonSchema> {
    match ty.kind() {
        TypeKind::Primitive(p) => Some(map_primitive(*p)),
        TypeKind::Enumeration(values) => Some(JsonSchema {
            type_: JsonType::String,
            format: None,
            enum_values: Some(values.iter().map(|v| v.to_string()).collect()),
        }),
        _ => None,
    }
}

/// Resolves the scalar type of a captured value.
///
/// Missing or non-scalar type information degrades to `"string"` so that
/// documentation stays best-effort.
pub fn capture_schema(ty: Option<&TypeDescriptor>) -> JsonSchema {
    match ty {
        Some(ty) => map_scalar(ty).unwrap_or_else(|| {
            trace!(
                type_name = ty.full_name(),
                "capture type is not a scalar, documenting as string"
            );
            simple(JsonType::String)
        }),
        None => {
            trace!("capture has no type information, documenting as string");
            simple(JsonType::String)
        }
    }
}

// Helpers for cleaner construction
fn simple(t: JsonType) -> JsonSchema {
    JsonSchema {
        type_: t,
        format: None,
        enum_values: None,
    }
}

fn formatted(t: JsonType, fmt: &'static str) -> JsonSchema {
    JsonSchema {
        type_: t,
        format: Some(fmt),
        enum_values: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_mapping() {
        let cases = vec![
            (TypeDescriptor::of::<i32>(), JsonType::Integer, Some("int32")),
            (TypeDescriptor::of::<u64>(), JsonType::Integer, Some("int64")),
            (TypeDescriptor::of::<f32>(), JsonType::Number, Some("float")),
            (TypeDescriptor::of::<f64>(), JsonType::Number, Some("double")),
            (TypeDescriptor::of::<bool>(), JsonType::Boolean, None),
            (TypeDescriptor::of::<String>(), JsonType::String, None),
        ];

        for (input, expected, format) in cases {
            let res = map_scalar(&input).expect(input.full_name());
            assert_eq!(res.type_, expected);
            assert_eq!(res.format, format);
        }
    }

    #[test]
    fn test_formats() {
        let uuid = TypeDescriptor::primitive("uuid::Uuid", Primitive::Uuid);
        let res = map_scalar(&uuid).unwrap();
        assert_eq!(res.type_, JsonType::String);
        assert_eq!(res.format, Some("uuid"));
    }

    #[test]
    fn test_enumeration() {
        let color = TypeDescriptor::enumeration("app::Color", &["red", "green"]);
        let res = map_scalar(&color).unwrap();
        assert_eq!(res.type_, JsonType::String);
        assert_eq!(
            res.enum_values,
            Some(vec!["red".to_string(), "green".to_string()])
        );
    }

    #[test]
    fn test_capture_fallback_to_string() {
        assert_eq!(capture_schema(None).type_, JsonType::String);
        let list = TypeDescriptor::of::<Vec<i32>>();
        assert_eq!(capture_schema(Some(&list)).type_, JsonType::String);
        let id = TypeDescriptor::of::<i64>();
        assert_eq!(capture_schema(Some(&id)).type_, JsonType::Integer);
    }
}
