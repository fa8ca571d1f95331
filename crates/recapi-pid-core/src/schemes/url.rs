use regex::Regex;

use crate::schemes::SchemeHandler;

/// Plain URL identifier. A shape check only; no resolution is attempted.
/// Registered last so every more specific scheme gets first claim.
pub struct UrlScheme {
    pattern: Regex,
}

impl UrlScheme {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"^(?:https?|ftp)://[^\s/$.?#][^\s]*$").expect("valid regex"),
        }
    }
}

impl Default for UrlScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemeHandler for UrlScheme {
    fn scheme_id(&self) -> &'static str {
        "url"
    }

    fn label(&self) -> &'static str {
        "URL"
    }

    fn validate(&self, identifier: &str) -> bool {
        self.pattern.is_match(identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let scheme = UrlScheme::new();
        assert!(scheme.validate("https://example.com/page"));
        assert!(scheme.validate("http://example.com"));
        assert!(scheme.validate("ftp://ftp.example.com/file"));
        assert!(!scheme.validate("example.com"));
        assert!(!scheme.validate("https:// example.com"));
    }

    #[test]
    fn test_normalize_is_identity() {
        let scheme = UrlScheme::new();
        assert_eq!(
            scheme.normalize("https://example.com/page"),
            "https://example.com/page"
        );
    }
}
