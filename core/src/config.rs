//! # Configuration
//!
//! Settings controlling document metadata and schema generation.

use crate::error::AppResult;
use crate::swagger::models::{ApiDocument, Info, Model};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// What to do when two distinct types share a short schema name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The later model replaces the earlier one; the collision is recorded.
    #[default]
    Overwrite,
    /// The merge fails with `AppError::SchemaCollision`.
    Fail,
}

/// Builder configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SwaggerConfig {
    /// Metadata of freshly created documents.
    pub info: Info,
    /// Host serving the API.
    pub host: Option<String>,
    /// Base path prefixed to every path.
    pub base_path: Option<String>,
    /// Transfer protocols.
    pub schemes: Vec<String>,
    /// Short-name collision handling.
    pub collision_policy: CollisionPolicy,
    /// Models replacing the structural expansion of specific types, keyed by
    /// fully qualified type name.
    #[serde(skip)]
    pub custom_models: HashMap<String, Vec<Model>>,
}

impl SwaggerConfig {
    /// Parses configuration from YAML.
    ///
    /// ```
    /// use routedoc_core::config::{CollisionPolicy, SwaggerConfig};
    ///
    /// let config = SwaggerConfig::from_yaml_str(
    ///     "info: {title: Pets, version: '1.2'}\ncollision_policy: fail\n",
    /// )
    /// .unwrap();
    /// assert_eq!(config.info.title, "Pets");
    /// assert_eq!(config.collision_policy, CollisionPolicy::Fail);
    /// ```
    pub fn from_yaml_str(yaml: &str) -> AppResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads YAML configuration from a file.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Registers the models describing `full_name` instead of expanding it.
    pub fn with_custom_models(
        mut self,
        full_name: impl Into<String>,
        models: Vec<Model>,
    ) -> Self {
        self.custom_models.insert(full_name.into(), models);
        self
    }

    /// Sets the collision policy.
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    /// The custom models registered for `full_name`.
    pub fn custom_models_for(&self, full_name: &str) -> Option<&[Model]> {
        self.custom_models.get(full_name).map(Vec::as_slice)
    }

    /// An empty document carrying this configuration's metadata.
    pub fn empty_document(&self) -> ApiDocument {
        let mut doc = ApiDocument::new(self.info.clone());
        doc.host = self.host.clone();
        doc.base_path = self.base_path.clone();
        doc.schemes = self.schemes.clone();
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SwaggerConfig::default();
        assert_eq!(config.collision_policy, CollisionPolicy::Overwrite);
        assert_eq!(config.info.version, "1.0.0");
        assert!(config.custom_models.is_empty());
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
info:
  title: Store
  version: 3.0.0
  description: Inventory
host: api.example.com
base_path: /v3
schemes: [https]
"#;
        let config = SwaggerConfig::from_yaml_str(yaml).unwrap();
        let doc = config.empty_document();
        assert_eq!(doc.info.description.as_deref(), Some("Inventory"));
        assert_eq!(doc.host.as_deref(), Some("api.example.com"));
        assert_eq!(doc.base_path.as_deref(), Some("/v3"));
        assert_eq!(doc.schemes, vec!["https"]);
        assert!(doc.paths.is_empty());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(SwaggerConfig::from_yaml_str("info: [").is_err());
    }
}
