/// Error types for the identifier scheme engine
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Configuration errors, raised at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemeConfigError {
    #[error("allowed and forbidden scheme lists are mutually exclusive")]
    MutuallyExclusive,

    #[error("allowed scheme list cannot be empty")]
    EmptyAllowList,
}

/// Field-keyed validation messages, aggregated across pipeline stages and
/// raised once per record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of messages across all fields.
    pub fn len(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.errors.iter()
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.errors
    }

    /// Returns `value` when no errors were collected, otherwise the errors.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregation_and_lookup() {
        let mut errors = ValidationErrors::new();
        errors.add("identifier", "Missing required identifier.");
        errors.add("scheme", "Invalid scheme foo.");
        errors.add("scheme", "Unknown scheme foo.");

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("scheme").map(Vec::len), Some(2));
        assert_eq!(
            errors.get("identifier").unwrap()[0],
            "Missing required identifier."
        );
    }

    #[test]
    fn test_into_result() {
        let empty = ValidationErrors::new();
        assert_eq!(empty.into_result(42).unwrap(), 42);

        let mut errors = ValidationErrors::new();
        errors.add("identifier", "Missing required identifier.");
        assert!(errors.into_result(42).is_err());
    }

    #[test]
    fn test_display_joins_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("identifier", "Invalid DOI identifier.");
        errors.add("scheme", "Invalid scheme foo.");
        assert_eq!(
            errors.to_string(),
            "identifier: Invalid DOI identifier.; scheme: Invalid scheme foo."
        );
    }

    #[test]
    fn test_serializes_as_field_map() {
        let mut errors = ValidationErrors::new();
        errors.add("identifier", "Invalid DOI identifier.");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"identifier": ["Invalid DOI identifier."]})
        );
    }
}
