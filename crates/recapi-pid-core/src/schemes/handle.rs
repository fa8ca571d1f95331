use regex::Regex;

use crate::schemes::SchemeHandler;

/// Handle System identifier: a dotted numeric prefix and an opaque
/// suffix, e.g. `20.500.12345/abc`. Accepts `hdl:` and resolver URL
/// forms. DOIs match this shape too, so the DOI handler must be
/// registered ahead of this one.
pub struct HandleScheme {
    pattern: Regex,
}

impl HandleScheme {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(
                r"^(?:hdl:\s*|(?:https?://)?hdl\.handle\.net/)?(\d+(?:\.\d+)*/\S+)$",
            )
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

impl Default for HandleScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemeHandler for HandleScheme {
    fn scheme_id(&self) -> &'static str {
        "handle"
    }

    fn label(&self) -> &'static str {
        "Handle"
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
        let scheme = HandleScheme::new();
        assert!(scheme.validate("20.500.12345/abc"));
        assert!(scheme.validate("hdl:20.500.12345/abc"));
        assert!(scheme.validate("https://hdl.handle.net/20.500.12345/abc"));
        assert!(!scheme.validate("abc/def"));
        assert!(!scheme.validate("20.500.12345"));
    }

    #[test]
    fn test_normalize_strips_resolver() {
        let scheme = HandleScheme::new();
        assert_eq!(
            scheme.normalize("https://hdl.handle.net/20.500.12345/abc"),
            "20.500.12345/abc"
        );
        assert_eq!(scheme.normalize("20.500.12345/abc"), "20.500.12345/abc");
    }
}
