//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the crate.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// A route action uses an HTTP method the document cannot represent.
    #[from(ignore)]
    #[display(
        "Unsupported HTTP verb '{_0}': only GET, PUT, POST, DELETE, PATCH and OPTIONS can be documented"
    )]
    UnsupportedVerb(String),

    /// Two distinct types share a short schema name and the policy forbids overwriting.
    #[from(ignore)]
    #[display(
        "Schema name collision on '{name}': '{existing}' would be replaced by '{replacement}'"
    )]
    SchemaCollision {
        /// The short name both types map to.
        name: String,
        /// Fully qualified name of the model already registered.
        existing: String,
        /// Fully qualified name of the model being registered.
        replacement: String,
    },

    /// Wrapper for file system errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Wrapper for JSON rendering errors.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// Wrapper for YAML rendering and parsing errors.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_conversion() {
        // Test that String defaults to General, not UnsupportedVerb
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_unsupported_verb_display() {
        let app_err = AppError::UnsupportedVerb("HEAD".into());
        assert!(format!("{}", app_err).starts_with("Unsupported HTTP verb 'HEAD'"));
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.yaml");
        let app_err: AppError = io_err.into();
        assert_eq!(format!("{}", app_err), "IO Error: missing.yaml");
    }

    #[test]
    fn test_yaml_conversion() {
        let yaml_err = serde_yaml::from_str::<u32>("not: [a number").unwrap_err();
        let app_err: AppError = yaml_err.into();
        assert!(matches!(app_err, AppError::Yaml(_)));
    }
}
