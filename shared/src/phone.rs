//! Phone number normalization
//!
//! Phone numbers are the login key for customers. Two raw inputs identify
//! the same customer when they normalize to the same string: all non-digit
//! characters are stripped, then leading zeros are dropped, so
//! "010-1234-5678", "01012345678" and "1012345678" all collide.

/// Normalize a raw phone string to its comparison form.
///
/// Returns an empty string when the input contains no significant digits
/// (e.g. "000" or "abc").
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .skip_while(|c| *c == '0')
        .collect()
}

/// Check whether two raw phone strings identify the same customer.
pub fn same_number(a: &str, b: &str) -> bool {
    let na = normalize(a);
    !na.is_empty() && na == normalize(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_formatting() {
        assert_eq!(normalize("010-1234-5678"), "1012345678");
        assert_eq!(normalize("(02) 345 6789"), "23456789");
    }

    #[test]
    fn test_normalize_strips_leading_zeros() {
        assert_eq!(normalize("01012345678"), "1012345678");
        assert_eq!(normalize("0001012345678"), "1012345678");
    }

    #[test]
    fn test_normalize_keeps_interior_zeros() {
        assert_eq!(normalize("010-1004-0078"), "1010040078");
    }

    #[test]
    fn test_normalize_empty_and_digitless() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("abc-def"), "");
        assert_eq!(normalize("0000"), "");
    }

    #[test]
    fn test_same_number_leading_zero_collision() {
        assert!(same_number("01012345678", "1012345678"));
        assert!(same_number("010-1234-5678", "01012345678"));
    }

    #[test]
    fn test_same_number_distinct() {
        assert!(!same_number("01012345678", "01012345679"));
    }

    #[test]
    fn test_same_number_never_matches_on_empty() {
        // Two digitless inputs must not be treated as the same identity
        assert!(!same_number("", ""));
        assert!(!same_number("000", "0"));
    }
}
