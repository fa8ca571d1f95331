use regex::Regex;

use crate::schemes::SchemeHandler;

/// arXiv preprint identifier, post-2007 (`2108.12345`, optionally
/// versioned) and pre-2007 (`hep-th/9901001`) forms, with an optional
/// `arXiv:` prefix. Canonical form carries the prefix.
pub struct ArxivScheme {
    new_style: Regex,
    old_style: Regex,
}

impl ArxivScheme {
    pub fn new() -> Self {
        Self {
            new_style: Regex::new(r"^(?i:arxiv:)?(\d{4}\.\d{4,5}(?:v\d+)?)$")
                .expect("valid regex"),
            old_style: Regex::new(r"^(?i:arxiv:)?([a-z-]+(?:\.[A-Z]{2})?/\d{7}(?:v\d+)?)$")
                .expect("valid regex"),
        }
    }

    fn bare<'a>(&self, identifier: &'a str) -> Option<&'a str> {
        self.new_style
            .captures(identifier)
            .or_else(|| self.old_style.captures(identifier))
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str())
    }
}

impl Default for ArxivScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemeHandler for ArxivScheme {
    fn scheme_id(&self) -> &'static str {
        "arxiv"
    }

    fn label(&self) -> &'static str {
        "arXiv"
    }

    fn validate(&self, identifier: &str) -> bool {
        self.bare(identifier).is_some()
    }

    fn normalize(&self, identifier: &str) -> String {
        match self.bare(identifier) {
            Some(bare) => format!("arXiv:{bare}"),
            None => identifier.to_string(),
        }
    }
}
