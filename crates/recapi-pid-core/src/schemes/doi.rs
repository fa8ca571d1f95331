use regex::Regex;

use crate::schemes::SchemeHandler;

/// Digital Object Identifier. Accepts the bare `10.x/suffix` form, the
/// `doi:` prefix and resolver URLs (`doi.org`, `dx.doi.org`).
pub struct DoiScheme {
    pattern: Regex,
}

impl DoiScheme {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(
                r"^(?:doi:\s*|(?:https?://)?(?:dx\.)?doi\.org/)?(10\.\d+(?:\.\d+)*/\S+)$",
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

impl Default for DoiScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemeHandler for DoiScheme {
    fn scheme_id(&self) -> &'static str {
        "doi"
    }

    fn label(&self) -> &'static str {
        "DOI"
    }

    fn validate(&self, identifier: &str) -> bool {
        self.bare(identifier).is_some()
    }

    fn normalize(&self, identifier: &str) -> String {
        match self.bare(identifier) {
            Some(bare) => bare.to_lowercase(),
            None => identifier.to_string(),
        }
    }
}
