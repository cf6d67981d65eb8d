use serde::{Deserialize, Serialize};

/// A registered user as persisted in the store artifact.
///
/// The `password` field on disk holds a PHC-format salted hash, never the
/// plaintext password.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    #[serde(rename = "password")]
    pub password_hash: String,
    pub premium: bool,
    pub apikey: Option<String>,
}

impl UserRecord {
    pub fn new(username: String, password_hash: String, premium: bool) -> Self {
        Self {
            username,
            password_hash,
            premium,
            apikey: None,
        }
    }
}

/// Identity attached to a request once the API key gate has resolved it.
#[derive(Clone, Debug, PartialEq)]
pub struct Identity {
    pub username: String,
    pub premium: bool,
}
