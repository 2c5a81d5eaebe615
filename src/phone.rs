//! Phone number normalization for visitor identity matching
//!
//! Visitors rarely type their number the same way twice: "+243 812 345 678",
//! "0812345678" and "812-345-678" all refer to the same line. Matching is
//! done on a canonical digit-only suffix.

/// Minimum number of normalized digits required for a match.
///
/// Shorter inputs are rejected rather than fuzzy-matched, which avoids
/// false-positive collisions on partial numbers.
pub const MIN_MATCH_DIGITS: usize = 9;

/// Canonicalize a raw phone string into its matchable suffix.
///
/// Strips every non-digit character, then the configured country calling
/// code, then a local leading zero, and finally clips to the last
/// [`MIN_MATCH_DIGITS`] digits. Returns `None` when the result is too
/// short to match.
pub fn normalize(raw: &str, country_code: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let cc: String = country_code.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut rest = digits.as_str();
    if !cc.is_empty() {
        if let Some(stripped) = rest.strip_prefix(cc.as_str()) {
            rest = stripped;
        }
    }
    if let Some(stripped) = rest.strip_prefix('0') {
        rest = stripped;
    }
    if rest.len() > MIN_MATCH_DIGITS {
        rest = &rest[rest.len() - MIN_MATCH_DIGITS..];
    }

    if rest.len() < MIN_MATCH_DIGITS {
        None
    } else {
        Some(rest.to_string())
    }
}

/// Whether two raw phone strings resolve to the same canonical suffix.
pub fn matches(a: &str, b: &str, country_code: &str) -> bool {
    match (normalize(a, country_code), normalize(b, country_code)) {
        (Some(na), Some(nb)) => na == nb,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CC: &str = "243";

    #[test]
    fn test_strips_country_code() {
        assert_eq!(normalize("+243812345678", CC), Some("812345678".to_string()));
    }

    #[test]
    fn test_strips_leading_zero() {
        assert_eq!(normalize("0812345678", CC), Some("812345678".to_string()));
    }

    #[test]
    fn test_strips_punctuation() {
        assert_eq!(normalize("812-345-678", CC), Some("812345678".to_string()));
        assert_eq!(normalize("(0) 812 345 678", CC), Some("812345678".to_string()));
    }

    #[test]
    fn test_equivalent_forms_match() {
        assert!(matches("+243812345678", "0812345678", CC));
        assert!(matches("0812345678", "812-345-678", CC));
        assert!(matches("+243 812 345 678", "812345678", CC));
    }

    #[test]
    fn test_different_numbers_do_not_match() {
        assert!(!matches("0812345678", "0899999999", CC));
    }

    #[test]
    fn test_too_short_rejected() {
        assert_eq!(normalize("12345", CC), None);
        assert_eq!(normalize("", CC), None);
        assert!(!matches("12345", "12345", CC));
    }

    #[test]
    fn test_clips_to_last_nine_digits() {
        // International format with both country code and leading zero kept
        assert_eq!(normalize("+2430812345678", CC), Some("812345678".to_string()));
        // Unrecognized long prefix: only the last nine digits are kept
        assert_eq!(normalize("99812345678", CC), Some("812345678".to_string()));
    }

    #[test]
    fn test_no_country_code_configured() {
        assert_eq!(normalize("0812345678", ""), Some("812345678".to_string()));
    }
}
