use regex::Regex;

use crate::schemes::SchemeHandler;

/// International Standard Serial Number: `NNNN-NNNC` where the check
/// character is a digit or `X`.
pub struct IssnScheme {
    pattern: Regex,
}

impl IssnScheme {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"^(\d{4})-?(\d{3}[\dXx])$").expect("valid regex"),
        }
    }

    fn compact(&self, identifier: &str) -> Option<String> {
        self.pattern.captures(identifier).map(|captures| {
            format!("{}{}", &captures[1], captures[2].to_ascii_uppercase())
        })
    }

    fn valid_checksum(compact: &str) -> bool {
        let mut sum: u32 = 0;
        for (index, ch) in compact[..7].chars().enumerate() {
            let Some(digit) = ch.to_digit(10) else {
                return false;
            };
            sum += digit * (8 - index as u32);
        }
        let expected = (11 - sum % 11) % 11;
        let check = match compact.chars().nth(7) {
            Some('X') => 10,
            Some(ch) => match ch.to_digit(10) {
                Some(digit) => digit,
                None => return false,
            },
            None => return false,
        };
        check == expected
    }
}

impl Default for IssnScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemeHandler for IssnScheme {
    fn scheme_id(&self) -> &'static str {
        "issn"
    }

    fn label(&self) -> &'static str {
        "ISSN"
    }

    fn validate(&self, identifier: &str) -> bool {
        self.compact(identifier)
            .is_some_and(|compact| Self::valid_checksum(&compact))
    }

    fn normalize(&self, identifier: &str) -> String {
        match self.compact(identifier) {
            Some(compact) => format!("{}-{}", &compact[..4], &compact[4..]),
            None => identifier.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let scheme = IssnScheme::new();
        assert!(scheme.validate("2049-3630"));
        assert!(scheme.validate("20493630"));
        assert!(scheme.validate("0378-5955"));
        assert!(!scheme.validate("2049-3631"));
        assert!(!scheme.validate("2049363"));
    }

    #[test]
    fn test_normalize_hyphenates_and_uppercases() {
        let scheme = IssnScheme::new();
        assert_eq!(scheme.normalize("20493630"), "2049-3630");
        assert_eq!(scheme.normalize("2049-3630"), "2049-3630");
    }
}
