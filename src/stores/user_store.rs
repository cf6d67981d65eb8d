use crate::core::error::StorageError;
use crate::models::user::UserRecord;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// On-disk shape of the store artifact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub users: Vec<UserRecord>,
}

impl Database {
    pub fn empty() -> Self {
        Self { users: Vec::new() }
    }

    pub fn find_by_username(&self, username: &str) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.username == username)
    }
}

/// File-backed user store.
///
/// Every operation reads the whole artifact fresh from disk; there is no
/// cross-request cache. Mutations go through [`UserStore::update`], which
/// holds a single writer lock across the load-modify-save cycle so
/// concurrent updates cannot lose each other's writes.
pub struct UserStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl UserStore {
    /// Open the store, creating an empty artifact if none exists yet.
    pub fn open(path: PathBuf) -> Result<Self, StorageError> {
        let store = Self {
            path,
            write_lock: Mutex::new(()),
        };

        if !store.path.exists() {
            if let Some(parent) = store.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            store.save(&Database::empty())?;
        }

        Ok(store)
    }

    /// Read the full artifact from disk.
    pub fn load(&self) -> Result<Database, StorageError> {
        let content = fs::read_to_string(&self.path)?;
        let db = serde_json::from_str(&content)?;
        Ok(db)
    }

    /// Overwrite the artifact with the full serialized store,
    /// pretty-printed for human inspection.
    fn save(&self, db: &Database) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(db)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Load-modify-save under the writer lock.
    ///
    /// The artifact is rewritten only when the closure succeeds; a failed
    /// closure leaves it untouched.
    pub fn update<R, E>(&self, f: impl FnOnce(&mut Database) -> Result<R, E>) -> Result<R, E>
    where
        E: From<StorageError>,
    {
        let _guard = self.write_lock.lock().unwrap();

        let mut db = self.load()?;
        let out = f(&mut db)?;
        self.save(&db)?;

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_store(dir: &tempfile::TempDir) -> UserStore {
        UserStore::open(dir.path().join("database.json")).expect("open store")
    }

    fn record(username: &str) -> UserRecord {
        UserRecord::new(username.to_string(), "hash".to_string(), false)
    }

    #[test]
    fn test_open_creates_empty_artifact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("database.json");

        let store = UserStore::open(path.clone()).unwrap();

        assert!(path.exists());
        assert!(store.load().unwrap().users.is_empty());

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"users\""));
    }

    #[test]
    fn test_open_creates_missing_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("db").join("database.json");

        let store = UserStore::open(path.clone()).unwrap();

        assert!(path.exists());
        assert!(store.load().unwrap().users.is_empty());
    }

    #[test]
    fn test_open_preserves_existing_artifact() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        store
            .update(|db| -> Result<(), StorageError> {
                db.users.push(record("alice"));
                Ok(())
            })
            .unwrap();

        // Re-opening must not reinitialize the file.
        let reopened = open_store(&dir);
        assert_eq!(reopened.load().unwrap().users.len(), 1);
    }

    #[test]
    fn test_update_persists_mutation() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        store
            .update(|db| -> Result<(), StorageError> {
                db.users.push(record("alice"));
                Ok(())
            })
            .unwrap();

        let db = store.load().unwrap();
        assert_eq!(db.users.len(), 1);
        assert_eq!(db.users[0].username, "alice");
        assert_eq!(db.users[0].apikey, None);
    }

    #[test]
    fn test_failed_update_leaves_artifact_untouched() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        store
            .update(|db| -> Result<(), StorageError> {
                db.users.push(record("alice"));
                Ok(())
            })
            .unwrap();

        let before = fs::read_to_string(dir.path().join("database.json")).unwrap();

        let result = store.update(|db| -> Result<(), StorageError> {
            db.users.push(record("bob"));
            Err(StorageError::Io(std::io::Error::other("rejected")))
        });
        assert!(result.is_err());

        let after = fs::read_to_string(dir.path().join("database.json")).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_save_load_round_trip_is_semantic_noop() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        store
            .update(|db| -> Result<(), StorageError> {
                db.users.push(UserRecord {
                    username: "alice".to_string(),
                    password_hash: "hash".to_string(),
                    premium: true,
                    apikey: Some("key".to_string()),
                });
                db.users.push(record("bob"));
                Ok(())
            })
            .unwrap();

        let first = store.load().unwrap();
        // A no-op update rewrites the artifact from the loaded state.
        store
            .update(|_| -> Result<(), StorageError> { Ok(()) })
            .unwrap();
        let second = store.load().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_load_malformed_artifact_fails() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        fs::write(dir.path().join("database.json"), "not json at all").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, StorageError::Malformed(_)));
    }

    #[test]
    fn test_apikey_serialized_as_null_until_issued() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        store
            .update(|db| -> Result<(), StorageError> {
                db.users.push(record("alice"));
                Ok(())
            })
            .unwrap();

        let raw = fs::read_to_string(dir.path().join("database.json")).unwrap();
        assert!(raw.contains("\"apikey\": null"));
    }
}
