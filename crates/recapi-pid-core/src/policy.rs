/// Scheme admissibility policies
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::SchemeConfigError;

/// The rule set determining which schemes are accepted for an identifier
/// field.
///
/// A closed variant instead of a pair of optional lists: the "both lists
/// set" configuration state cannot be expressed at all, and admissibility
/// checks are an exhaustive match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissibilityPolicy {
    /// Only the listed schemes are admissible.
    AllowList(BTreeSet<String>),
    /// Everything except the listed schemes is admissible.
    ForbidList(BTreeSet<String>),
    /// Any scheme, as long as it is registered.
    AcceptKnown,
    /// Any scheme, including ones no registered handler recognizes.
    AcceptAll,
}

impl AdmissibilityPolicy {
    /// Builds an allow-list policy. An empty list is a configuration
    /// error: it would reject every identifier.
    pub fn allow<I, S>(schemes: I) -> Result<Self, SchemeConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = schemes.into_iter().map(Into::into).collect();
        if set.is_empty() {
            return Err(SchemeConfigError::EmptyAllowList);
        }
        Ok(Self::AllowList(set))
    }

    /// Builds a forbid-list policy.
    pub fn forbid<I, S>(schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ForbidList(schemes.into_iter().map(Into::into).collect())
    }

    /// Compatibility constructor for option-driven callers (configuration
    /// files, CLI flags). Fails fast when both lists are supplied.
    pub fn from_options(
        allowed: Option<Vec<String>>,
        forbidden: Option<Vec<String>>,
        accept_unknown: bool,
    ) -> Result<Self, SchemeConfigError> {
        match (allowed, forbidden) {
            (Some(_), Some(_)) => Err(SchemeConfigError::MutuallyExclusive),
            (Some(allowed), None) => Self::allow(allowed),
            (None, Some(forbidden)) => Ok(Self::forbid(forbidden)),
            (None, None) if accept_unknown => Ok(Self::AcceptAll),
            (None, None) => Ok(Self::AcceptKnown),
        }
    }

    /// Whether the policy admits a scheme name.
    ///
    /// `AcceptKnown` and `AcceptAll` both admit any name here; they differ
    /// in how the validation pipeline treats schemes no handler recognizes.
    pub fn admits(&self, scheme: &str) -> bool {
        match self {
            Self::AllowList(allowed) => allowed.contains(scheme),
            Self::ForbidList(forbidden) => !forbidden.contains(scheme),
            Self::AcceptKnown | Self::AcceptAll => true,
        }
    }

    /// Whether schemes without a registered handler pass validation.
    pub fn accepts_unknown(&self) -> bool {
        matches!(self, Self::AcceptAll)
    }
}
