/// Identifier record validation and normalization pipeline
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::ValidationErrors;
use crate::policy::AdmissibilityPolicy;
use crate::registry::SchemeRegistry;

/// An identifier with its (possibly absent) scheme.
///
/// Created on load of input data, mutated by scheme detection and
/// normalization, and immutable output once the pipeline completes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
}

impl IdentifierRecord {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: Some(identifier.into()),
            scheme: None,
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }
}

/// Validates and normalizes identifier records against a scheme registry
/// and an admissibility policy.
///
/// The pipeline stages run in strict order: intake trimming, scheme
/// detection, admissibility, format validation, requiredness, and finally
/// normalization. Stages 3-5 aggregate their failures into one
/// field-keyed [`ValidationErrors`] so a single failed load reports every
/// violated constraint.
pub struct IdentifierSchema {
    registry: SchemeRegistry,
    policy: AdmissibilityPolicy,
    identifier_required: bool,
    fail_on_unknown: bool,
}

impl IdentifierSchema {
    pub fn new(registry: SchemeRegistry, policy: AdmissibilityPolicy) -> Self {
        Self {
            registry,
            policy,
            identifier_required: true,
            fail_on_unknown: true,
        }
    }

    /// A schema over the built-in registry.
    pub fn with_policy(policy: AdmissibilityPolicy) -> Self {
        Self::new(SchemeRegistry::with_default_schemes(), policy)
    }

    /// Marks the identifier value as optional (absent records pass).
    pub fn optional(mut self) -> Self {
        self.identifier_required = false;
        self
    }

    /// When disabled, a registered scheme claim whose format check fails
    /// is tolerated instead of rejected (the identifier passes through
    /// unnormalized).
    pub fn fail_on_unknown(mut self, fail: bool) -> Self {
        self.fail_on_unknown = fail;
        self
    }

    pub fn registry(&self) -> &SchemeRegistry {
        &self.registry
    }

    /// Runs the full load pipeline over one record.
    pub fn load(&self, input: IdentifierRecord) -> Result<IdentifierRecord, ValidationErrors> {
        let mut record = intake(input);

        // Detection never overrides a caller-supplied scheme.
        if record.scheme.is_none() {
            if let Some(identifier) = &record.identifier {
                record.scheme = self.detect_scheme(identifier).map(String::from);
            }
        }

        let mut errors = ValidationErrors::new();

        match (&record.identifier, &record.scheme) {
            (Some(identifier), Some(scheme)) => {
                if !self.policy.admits(scheme) {
                    errors.add("scheme", format!("Invalid scheme {scheme}."));
                }
                match self.registry.get(scheme) {
                    Some(handler) => {
                        if !handler.validate(identifier) && self.fail_on_unknown {
                            errors.add(
                                "identifier",
                                format!("Invalid {} identifier.", handler.label()),
                            );
                        }
                    }
                    None => {
                        if !self.policy.accepts_unknown() {
                            errors.add("scheme", format!("Unknown scheme {scheme}."));
                        }
                    }
                }
            }
            (Some(identifier), None) => {
                errors.add("scheme", format!("Missing scheme for identifier {identifier}."));
            }
            (None, _) => {
                if self.identifier_required {
                    errors.add("identifier", "Missing required identifier.");
                }
            }
        }

        errors.into_result(())?;
        Ok(self.normalize(record))
    }

    /// Detection candidates come back in registry precedence order; the
    /// first one the policy admits wins, falling back to the most specific
    /// candidate so admissibility failures name the real scheme.
    fn detect_scheme(&self, identifier: &str) -> Option<&'static str> {
        let candidates = self.registry.detect(identifier);
        candidates
            .iter()
            .find(|candidate| self.policy.admits(candidate))
            .or_else(|| candidates.first())
            .copied()
    }

    fn normalize(&self, mut record: IdentifierRecord) -> IdentifierRecord {
        if let (Some(identifier), Some(scheme)) = (&record.identifier, &record.scheme) {
            if let Some(handler) = self.registry.get(scheme) {
                if handler.validate(identifier) {
                    record.identifier = Some(handler.normalize(identifier));
                }
            }
        }
        record
    }
}

/// Trims both fields; values blank after trimming count as absent.
fn intake(record: IdentifierRecord) -> IdentifierRecord {
    let clean = |value: Option<String>| {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };
    IdentifierRecord {
        identifier: clean(record.identifier),
        scheme: clean(record.scheme),
    }
}

/// Deduplication policy for lists of identifier records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Reject duplicate `(scheme, identifier)` pairs.
    UniquePairs,
    /// Reject any repeated scheme, regardless of identifier value.
    OnePerScheme,
}

/// Validates a list of identifier records against a duplication policy.
///
/// Errors are keyed to the `identifiers` list field.
pub fn check_unique(
    records: &[IdentifierRecord],
    policy: DuplicatePolicy,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    match policy {
        DuplicatePolicy::UniquePairs => {
            let mut seen = BTreeSet::new();
            for record in records {
                if !seen.insert((record.scheme.clone(), record.identifier.clone())) {
                    errors.add("identifiers", "Duplicate identifier entry.");
                    break;
                }
            }
        }
        DuplicatePolicy::OnePerScheme => {
            let mut seen = BTreeSet::new();
            for record in records {
                if !seen.insert(record.scheme.clone()) {
                    errors.add("identifiers", "Only one identifier per scheme is allowed.");
                    break;
                }
            }
        }
    }
    errors.into_result(())
}
