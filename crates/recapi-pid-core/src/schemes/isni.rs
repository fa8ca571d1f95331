use crate::schemes::{valid_mod11_2, SchemeHandler};

/// International Standard Name Identifier: 16 mod 11-2 characters,
/// commonly written in spaced groups of four.
pub struct IsniScheme;

impl IsniScheme {
    pub fn new() -> Self {
        Self
    }

    fn compact(identifier: &str) -> Option<String> {
        let rest = identifier
            .strip_prefix("https://isni.org/isni/")
            .or_else(|| identifier.strip_prefix("http://isni.org/isni/"))
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
}

impl Default for IsniScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemeHandler for IsniScheme {
    fn scheme_id(&self) -> &'static str {
        "isni"
    }

    fn label(&self) -> &'static str {
        "ISNI"
    }

    fn validate(&self, identifier: &str) -> bool {
        Self::compact(identifier).is_some_and(|compact| valid_mod11_2(&compact))
    }

    fn normalize(&self, identifier: &str) -> String {
        match Self::compact(identifier) {
            Some(compact) => compact,
            None => identifier.to_string(),
        }
    }
}
