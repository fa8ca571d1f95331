/// Link configuration: namespaces mapping link keys to URI templates
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::template::LinkTemplate;

/// Policy for link keys (or whole namespaces) absent from the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingKeyPolicy {
    /// Silently drop unresolved keys from the bundle.
    Ignore,
    /// Fail on the first missing key or namespace.
    Strict,
}

impl Default for MissingKeyPolicy {
    fn default() -> Self {
        Self::Ignore
    }
}

/// Configuration for link resolution: `namespace -> link key -> template`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinksConfig {
    namespaces: BTreeMap<String, BTreeMap<String, LinkTemplate>>,
}

impl LinksConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a template for a link key under a namespace.
    pub fn add(
        &mut self,
        namespace: impl Into<String>,
        key: impl Into<String>,
        template: LinkTemplate,
    ) -> &mut Self {
        self.namespaces
            .entry(namespace.into())
            .or_default()
            .insert(key.into(), template);
        self
    }

    /// The template table for a namespace, if configured.
    pub fn namespace(&self, namespace: &str) -> Option<&BTreeMap<String, LinkTemplate>> {
        self.namespaces.get(namespace)
    }

    pub fn contains_namespace(&self, namespace: &str) -> bool {
        self.namespaces.contains_key(namespace)
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Load a configuration from a TOML or JSON file, picked by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .context(format!("Failed to read links config: {}", path.display()))?;
        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).context("Failed to parse links config as JSON")
        } else {
            toml::from_str(&content).context("Failed to parse links config as TOML")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_lookup() {
        let mut config = LinksConfig::new();
        config
            .add("record", "self", LinkTemplate::new("/api/records{/pid_value}").unwrap())
            .add("record", "draft", LinkTemplate::new("/api/records{/pid_value}/draft").unwrap());

        let section = config.namespace("record").unwrap();
        assert_eq!(section.len(), 2);
        assert_eq!(section["self"].as_str(), "/api/records{/pid_value}");
        assert!(config.namespace("search").is_none());
    }

    #[test]
    fn test_parse_toml_section() {
        let config: LinksConfig = toml::from_str(
            r#"
            [record]
            self = "/api/records{/pid_value}"
            versions = "/api/records{/pid_value}/versions{?q}"
            "#,
        )
        .unwrap();
        assert!(config.contains_namespace("record"));
        let section = config.namespace("record").unwrap();
        assert_eq!(section["versions"].as_str(), "/api/records{/pid_value}/versions{?q}");
    }

    #[test]
    fn test_parse_rejects_malformed_template() {
        let result: Result<LinksConfig, _> = toml::from_str(
            r#"
            [record]
            self = "/api/records{.bad}"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_load_json_file() {
        let path = std::env::temp_dir().join("recapi-links-config-test.json");
        fs::write(&path, r#"{"search": {"self": "/{?params*}"}}"#).unwrap();
        let config = LinksConfig::load(&path).unwrap();
        assert!(config.contains_namespace("search"));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_key_policy_default() {
        assert_eq!(MissingKeyPolicy::default(), MissingKeyPolicy::Ignore);
    }
}
