use crate::accounts::{keygen, password};
use crate::core::error::AuthError;
use crate::models::user::UserRecord;
use crate::stores::user_store::UserStore;
use std::sync::Arc;
use tracing::info;

/// Result of a successful login.
#[derive(Debug)]
pub struct LoginOutcome {
    pub username: String,
    pub apikey: String,
    pub premium: bool,
}

/// Registration and login over the user store.
pub struct AccountManager {
    store: Arc<UserStore>,
}

impl AccountManager {
    pub fn new(store: Arc<UserStore>) -> Self {
        Self { store }
    }

    /// Create a new user record. No API key is issued at registration;
    /// the first successful login does that.
    ///
    /// Usernames are case-sensitive and must be unique across the store.
    pub fn register(
        &self,
        username: &str,
        plain_password: &str,
        premium: bool,
    ) -> Result<(), AuthError> {
        if username.is_empty() {
            return Err(AuthError::MissingField("username"));
        }
        if plain_password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        let password_hash = password::hash_password(plain_password)?;

        // Duplicate check and append happen inside one critical section,
        // so two racing registrations cannot both pass the check.
        self.store.update(|db| {
            if db.find_by_username(username).is_some() {
                return Err(AuthError::DuplicateUsername);
            }
            db.users.push(UserRecord::new(
                username.to_string(),
                password_hash,
                premium,
            ));
            Ok(())
        })?;

        info!(username, premium, "user registered");
        Ok(())
    }

    /// Verify credentials; on the first successful login, issue an API key
    /// and persist it. Issuance is idempotent: a key, once set, is never
    /// reassigned.
    pub fn login(&self, username: &str, plain_password: &str) -> Result<LoginOutcome, AuthError> {
        let db = self.store.load()?;

        let record = db
            .find_by_username(username)
            .ok_or(AuthError::InvalidCredentials)?;

        if !password::verify_password(plain_password, &record.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        if let Some(key) = &record.apikey {
            return Ok(LoginOutcome {
                username: record.username.clone(),
                apikey: key.clone(),
                premium: record.premium,
            });
        }

        // First login for this user. The key is assigned under the store's
        // writer lock, and re-checked there: a racing first login keeps
        // whichever key landed first instead of reissuing.
        let fresh = keygen::generate_api_key();
        let owner = username.to_string();

        let outcome = self.store.update(move |db| {
            let user = db
                .users
                .iter_mut()
                .find(|u| u.username == owner)
                .ok_or(AuthError::InvalidCredentials)?;

            let key = user.apikey.get_or_insert(fresh);

            Ok::<_, AuthError>(LoginOutcome {
                username: user.username.clone(),
                apikey: key.clone(),
                premium: user.premium,
            })
        })?;

        info!(username, "login succeeded");
        Ok(outcome)
    }
}
