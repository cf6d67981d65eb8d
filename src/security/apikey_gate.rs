use crate::core::error::GateError;
use crate::models::user::Identity;
use crate::stores::user_store::UserStore;
use crate::utils::auth::verify_api_key;
use tracing::warn;

/// Resolve a presented API key to the owning user's identity.
///
/// Called at the top of every protected handler, before any of the
/// handler's own work. Pure read side: a fresh store load per call and a
/// linear scan over the records, with constant-time key comparison.
/// An empty `apikey` query value counts as absent.
pub fn authorize(store: &UserStore, presented: Option<&str>) -> Result<Identity, GateError> {
    let presented = presented
        .filter(|key| !key.is_empty())
        .ok_or(GateError::MissingApiKey)?;

    let db = store.load()?;

    let user = db
        .users
        .iter()
        .find(|u| {
            u.apikey
                .as_deref()
                .is_some_and(|key| verify_api_key(presented, key))
        })
        .ok_or_else(|| {
            warn!("rejected request with unknown api key");
            GateError::InvalidApiKey
        })?;

    Ok(Identity {
        username: user.username.clone(),
        premium: user.premium,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::StorageError;
    use crate::models::user::UserRecord;
    use tempfile::tempdir;

    fn store_with_users(dir: &tempfile::TempDir) -> UserStore {
        let store = UserStore::open(dir.path().join("database.json")).unwrap();
        store
            .update(|db| -> Result<(), StorageError> {
                db.users.push(UserRecord {
                    username: "alice".to_string(),
                    password_hash: "hash".to_string(),
                    premium: false,
                    apikey: Some("alice-key-0000000000000000000000".to_string()),
                });
                db.users.push(UserRecord {
                    username: "bob".to_string(),
                    password_hash: "hash".to_string(),
                    premium: true,
                    apikey: Some("bob-key-000000000000000000000000".to_string()),
                });
                db.users.push(UserRecord::new(
                    "carol".to_string(),
                    "hash".to_string(),
                    false,
                ));
                Ok(())
            })
            .unwrap();
        store
    }

    #[test]
    fn test_missing_key() {
        let dir = tempdir().unwrap();
        let store = store_with_users(&dir);

        let err = authorize(&store, None).unwrap_err();
        assert!(matches!(err, GateError::MissingApiKey));
    }

    #[test]
    fn test_empty_key_counts_as_missing() {
        let dir = tempdir().unwrap();
        let store = store_with_users(&dir);

        let err = authorize(&store, Some("")).unwrap_err();
        assert!(matches!(err, GateError::MissingApiKey));
    }

    #[test]
    fn test_unknown_key() {
        let dir = tempdir().unwrap();
        let store = store_with_users(&dir);

        let err = authorize(&store, Some("bogus")).unwrap_err();
        assert!(matches!(err, GateError::InvalidApiKey));
    }

    #[test]
    fn test_resolves_owning_identity() {
        let dir = tempdir().unwrap();
        let store = store_with_users(&dir);

        let identity = authorize(&store, Some("bob-key-000000000000000000000000")).unwrap();
        assert_eq!(identity.username, "bob");
        assert!(identity.premium);
    }

    #[test]
    fn test_user_without_key_is_unreachable() {
        let dir = tempdir().unwrap();
        let store = store_with_users(&dir);

        // carol never logged in, so no key resolves to her.
        let identity = authorize(&store, Some("alice-key-0000000000000000000000")).unwrap();
        assert_eq!(identity.username, "alice");

        let err = authorize(&store, Some("carol")).unwrap_err();
        assert!(matches!(err, GateError::InvalidApiKey));
    }

    #[test]
    fn test_gate_does_not_mutate_store() {
        let dir = tempdir().unwrap();
        let store = store_with_users(&dir);

        let before = std::fs::read_to_string(dir.path().join("database.json")).unwrap();
        let _ = authorize(&store, Some("alice-key-0000000000000000000000"));
        let _ = authorize(&store, Some("bogus"));
        let after = std::fs::read_to_string(dir.path().join("database.json")).unwrap();

        assert_eq!(before, after);
    }
}
