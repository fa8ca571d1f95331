use crate::schemes::SchemeHandler;

/// International Standard Book Number, 10- or 13-digit form with their
/// respective check digits. Separators (hyphens, spaces) are accepted.
pub struct IsbnScheme;

impl IsbnScheme {
    pub fn new() -> Self {
        Self
    }

    fn compact(identifier: &str) -> String {
        identifier
            .chars()
            .filter(|ch| !matches!(ch, '-' | ' '))
            .map(|ch| ch.to_ascii_uppercase())
            .collect()
    }

    fn valid_isbn10(compact: &str) -> bool {
        if compact.len() != 10 {
            return false;
        }
        let mut sum: u32 = 0;
        for (index, ch) in compact.chars().enumerate() {
            let value = match ch {
                'X' if index == 9 => 10,
                _ => match ch.to_digit(10) {
                    Some(digit) => digit,
                    None => return false,
                },
            };
            sum += value * (10 - index as u32);
        }
        sum % 11 == 0
    }

    fn valid_isbn13(compact: &str) -> bool {
        if compact.len() != 13 {
            return false;
        }
        let mut sum: u32 = 0;
        for (index, ch) in compact.chars().enumerate() {
            let Some(digit) = ch.to_digit(10) else {
                return false;
            };
            sum += digit * if index % 2 == 0 { 1 } else { 3 };
        }
        sum % 10 == 0
    }
}

impl Default for IsbnScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemeHandler for IsbnScheme {
    fn scheme_id(&self) -> &'static str {
        "isbn"
    }

    fn label(&self) -> &'static str {
        "ISBN"
    }

    fn validate(&self, identifier: &str) -> bool {
        let compact = Self::compact(identifier);
        Self::valid_isbn10(&compact) || Self::valid_isbn13(&compact)
    }

    fn normalize(&self, identifier: &str) -> String {
        Self::compact(identifier)
    }
}
