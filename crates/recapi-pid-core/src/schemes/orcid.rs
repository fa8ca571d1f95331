use crate::schemes::{valid_mod11_2, SchemeHandler};

// ORCID iDs are the ISNI block reserved for researchers.
const ORCID_RANGE_START: &str = "0000-0001-5000-0007";
const ORCID_RANGE_END: &str = "0000-0003-5000-0001";

/// ORCID researcher identifier: 16 mod 11-2 characters in the reserved
/// ISNI range, canonically hyphenated in groups of four.
pub struct OrcidScheme;

impl OrcidScheme {
    pub fn new() -> Self {
        Self
    }

    /// Strips URL prefixes and separators, returning the compact
    /// 16-character form when the shape is plausible.
    fn compact(identifier: &str) -> Option<String> {
        let rest = identifier
            .strip_prefix("https://orcid.org/")
            .or_else(|| identifier.strip_prefix("http://orcid.org/"))
            .or_else(|| identifier.strip_prefix("orcid.org/"))
            .unwrap_or(identifier);
        let compact: String = rest
            .chars()
            .filter(|ch| !matches!(ch, '-' | ' '))
            .map(|ch| ch.to_ascii_uppercase())
            .collect();
        let shape_ok = compact.len() == 16
            && compact.is_ascii()
            && compact[..15].chars().all(|ch| ch.is_ascii_digit())
            && compact[15..].chars().all(|ch| ch.is_ascii_digit() || ch == 'X');
        shape_ok.then_some(compact)
    }

    fn hyphenate(compact: &str) -> String {
        format!(
            "{}-{}-{}-{}",
            &compact[0..4],
            &compact[4..8],
            &compact[8..12],
            &compact[12..16]
        )
    }
}

impl Default for OrcidScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemeHandler for OrcidScheme {
    fn scheme_id(&self) -> &'static str {
        "orcid"
    }

    fn label(&self) -> &'static str {
        "ORCID"
    }

    fn validate(&self, identifier: &str) -> bool {
        let Some(compact) = Self::compact(identifier) else {
            return false;
        };
        if !valid_mod11_2(&compact) {
            return false;
        }
        // Fixed-width hyphenated forms compare correctly as strings.
        let hyphenated = Self::hyphenate(&compact);
        hyphenated.as_str() >= ORCID_RANGE_START && hyphenated.as_str() <= ORCID_RANGE_END
    }

    fn normalize(&self, identifier: &str) -> String {
        match Self::compact(identifier) {
            Some(compact) => Self::hyphenate(&compact),
            None => identifier.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_hyphenated_and_url_forms() {
        let scheme = OrcidScheme::new();
        assert!(scheme.validate("0000-0001-6759-6273"));
        assert!(scheme.validate("https://orcid.org/0000-0001-6759-6273"));
        assert!(scheme.validate("0000000167596273"));
    }

    #[test]
    fn test_validate_rejects_bad_checksum_and_shape() {
        let scheme = OrcidScheme::new();
        assert!(!scheme.validate("0000-0001-6759-6274"));
        assert!(!scheme.validate("inv"));
        assert!(!scheme.validate("0000-0000-0000-00000000"));
    }

    #[test]
    fn test_validate_rejects_isni_outside_orcid_range() {
        // Valid ISNI checksum, but below the ORCID block.
        assert!(!OrcidScheme::new().validate("0000-0001-2281-955X"));
    }

    #[test]
    fn test_normalize_hyphenates() {
        let scheme = OrcidScheme::new();
        assert_eq!(
            scheme.normalize("https://orcid.org/0000000167596273"),
            "0000-0001-6759-6273"
        );
        assert_eq!(scheme.normalize("0000-0001-6759-6273"), "0000-0001-6759-6273");
    }
}
