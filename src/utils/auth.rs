/// Compare a presented API key against a stored one in constant time.
///
/// A naive `==` would short-circuit on the first differing byte and let a
/// client probe keys character by character via response timing.
pub fn verify_api_key(provided: &str, expected: &str) -> bool {
    provided.as_bytes().len() == expected.as_bytes().len()
        && provided
            .as_bytes()
            .iter()
            .zip(expected.as_bytes().iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_keys() {
        assert!(verify_api_key("abc123XYZ", "abc123XYZ"));
    }

    #[test]
    fn test_mismatched_keys() {
        assert!(!verify_api_key("abc123XYZ", "abc123XYX"));
    }

    #[test]
    fn test_length_mismatch() {
        assert!(!verify_api_key("short", "a-much-longer-key"));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!verify_api_key("ABC123xyz", "abc123XYZ"));
    }

    #[test]
    fn test_empty_both_sides() {
        assert!(verify_api_key("", ""));
    }
}
