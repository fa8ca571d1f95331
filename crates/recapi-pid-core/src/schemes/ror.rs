use regex::Regex;

use crate::schemes::SchemeHandler;

/// Research Organization Registry identifier: `0` followed by six
/// base32-Crockford characters and a two-digit checksum, with an optional
/// `ror.org` URL prefix.
pub struct RorScheme {
    pattern: Regex,
}

impl RorScheme {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"^(?:(?:https?://)?ror\.org/)?(0[a-hj-km-np-tv-z0-9]{6}\d{2})$")
                .expect("valid regex"),
        }
    }

    fn bare<'a>(&self, identifier: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(identifier)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str())
    }
}

impl Default for RorScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemeHandler for RorScheme {
    fn scheme_id(&self) -> &'static str {
        "ror"
    }

    fn label(&self) -> &'static str {
        "ROR"
    }

    fn validate(&self, identifier: &str) -> bool {
        self.bare(identifier).is_some()
    }

    fn normalize(&self, identifier: &str) -> String {
        match self.bare(identifier) {
            Some(bare) => bare.to_string(),
            None => identifier.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let scheme = RorScheme::new();
        assert!(scheme.validate("03yrm5c26"));
        assert!(scheme.validate("https://ror.org/03yrm5c26"));
        assert!(scheme.validate("ror.org/03yrm5c26"));
        // Crockford base32 excludes i, l, o and u.
        assert!(!scheme.validate("03yrm5i26"));
        assert!(!scheme.validate("13yrm5c26"));
        assert!(!scheme.validate("03yrm5c2"));
    }

    #[test]
    fn test_normalize_strips_url_prefix() {
        let scheme = RorScheme::new();
        assert_eq!(scheme.normalize("https://ror.org/03yrm5c26"), "03yrm5c26");
        assert_eq!(scheme.normalize("03yrm5c26"), "03yrm5c26");
    }
}
