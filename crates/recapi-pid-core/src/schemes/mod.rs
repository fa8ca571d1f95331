pub mod arxiv;
pub mod doi;
pub mod handle;
pub mod isbn;
pub mod isni;
pub mod issn;
pub mod orcid;
pub mod ror;
pub mod url;

/// Trait every identifier scheme handler implements.
///
/// A handler knows how to recognize, validate and canonicalize one
/// persistent-identifier scheme. Handlers are registered once at
/// [`crate::registry::SchemeRegistry`] construction.
pub trait SchemeHandler: Send + Sync {
    /// Unique scheme name, e.g. `"doi"`.
    fn scheme_id(&self) -> &'static str;

    /// Human-readable label used in validation messages, e.g. `"DOI"`.
    fn label(&self) -> &'static str;

    /// Whether the identifier conforms to this scheme's format.
    fn validate(&self, identifier: &str) -> bool;

    /// Rewrites a valid identifier into its canonical form.
    ///
    /// Must be idempotent; the default keeps the identifier unchanged.
    fn normalize(&self, identifier: &str) -> String {
        identifier.to_string()
    }
}

/// ISO 7064 mod 11-2 check character over a digit string (ORCID, ISNI).
pub(crate) fn mod11_2_check_char(digits: &str) -> Option<char> {
    let mut total: u32 = 0;
    for ch in digits.chars() {
        let digit = ch.to_digit(10)?;
        total = (total + digit) * 2;
    }
    let result = (12 - total % 11) % 11;
    if result == 10 {
        Some('X')
    } else {
        char::from_digit(result, 10)
    }
}

/// Validates a 16-character mod 11-2 identifier (15 digits + check char).
pub(crate) fn valid_mod11_2(compact: &str) -> bool {
    if compact.len() != 16 || !compact.is_ascii() {
        return false;
    }
    let (digits, check) = compact.split_at(15);
    let expected = match mod11_2_check_char(digits) {
        Some(ch) => ch,
        None => return false,
    };
    check
        .chars()
        .next()
        .is_some_and(|ch| ch.to_ascii_uppercase() == expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod11_2_check_char() {
        assert_eq!(mod11_2_check_char("000000016759627"), Some('3'));
        assert_eq!(mod11_2_check_char("000000012281955"), Some('X'));
        assert_eq!(mod11_2_check_char("not-digits"), None);
    }

    #[test]
    fn test_valid_mod11_2() {
        assert!(valid_mod11_2("0000000167596273"));
        assert!(valid_mod11_2("000000012281955X"));
        assert!(valid_mod11_2("000000012281955x"));
        assert!(!valid_mod11_2("0000000167596274"));
        assert!(!valid_mod11_2("00000001675962733"));
    }
}
