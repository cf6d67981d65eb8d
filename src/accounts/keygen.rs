use rand::{distr::Alphanumeric, Rng};

/// Length of issued API keys. 32 alphanumeric characters is just under
/// 191 bits of entropy, comfortably above bearer-token requirements.
pub const API_KEY_LEN: usize = 32;

/// Generate a random bearer token from the thread-local CSPRNG.
pub fn generate_api_key() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(API_KEY_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_length() {
        assert_eq!(generate_api_key().len(), API_KEY_LEN);
    }

    #[test]
    fn test_key_is_alphanumeric() {
        assert!(generate_api_key().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_keys_are_unique() {
        let a = generate_api_key();
        let b = generate_api_key();
        assert_ne!(a, b);
    }
}
