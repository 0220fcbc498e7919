//! Client-local persistent state.
//!
//! The product keeps exactly two pieces of state on the client: the bearer
//! token and the wishlist. Both live in one sled tree under string keys
//! ("token", "wishlist"), the wishlist as a single JSON id array. Writes
//! replace the whole value; concurrent writers race and the last full write
//! wins, which matches the shared-storage behavior the views were built
//! against.

use sled::Db;

use crate::error::Result;

const TOKEN_KEY: &str = "token";
const WISHLIST_KEY: &str = "wishlist";

/// Handle over the local key-value store. Cheap to clone.
#[allow(dead_code)] // db kept for future ops like flush/close on Sled
#[derive(Clone)]
pub struct LocalStore {
    db: Db,
    local: sled::Tree,
}

impl LocalStore {
    /// Open or create the store at the given path. One process at a time;
    /// a second opener blocks on sled's directory lock.
    pub fn open(path: &str) -> Result<Self> {
        let db = sled::open(path)?;
        let local = db.open_tree("local")?;
        Ok(Self { db, local })
    }

    /// Bearer token from the last login, if any.
    pub fn token(&self) -> Result<Option<String>> {
        Ok(self
            .local
            .get(TOKEN_KEY)?
            .map(|raw| String::from_utf8_lossy(&raw).into_owned()))
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.local.insert(TOKEN_KEY, token.as_bytes())?;
        Ok(())
    }

    pub fn clear_token(&self) -> Result<()> {
        self.local.remove(TOKEN_KEY)?;
        Ok(())
    }

    /// Wishlist id array; a missing key reads as an empty list.
    pub fn wishlist_ids(&self) -> Result<Vec<i64>> {
        match self.local.get(WISHLIST_KEY)? {
            Some(raw) => Ok(serde_json::from_slice(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the whole wishlist array. No merging with concurrent writers.
    pub fn set_wishlist_ids(&self, ids: &[i64]) -> Result<()> {
        let raw = serde_json::to_vec(ids)?;
        self.local.insert(WISHLIST_KEY, raw)?;
        Ok(())
    }

    pub fn clear_wishlist(&self) -> Result<()> {
        self.local.remove(WISHLIST_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_store(name: &str) -> (LocalStore, std::path::PathBuf) {
        let temp_dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&temp_dir);
        let store = LocalStore::open(temp_dir.to_str().unwrap()).expect("open store");
        (store, temp_dir)
    }

    #[test]
    fn token_roundtrip_and_clear() {
        let (store, temp_dir) = temp_store("carboncalc_test_token");

        assert_eq!(store.token().unwrap(), None);
        store.set_token("eyJhbGciOi.fake.token").unwrap();
        assert_eq!(store.token().unwrap().as_deref(), Some("eyJhbGciOi.fake.token"));
        store.clear_token().unwrap();
        assert_eq!(store.token().unwrap(), None);

        let _ = fs::remove_dir_all(temp_dir);
    }

    #[test]
    fn wishlist_persists_across_reopen() {
        let temp_dir = std::env::temp_dir().join("carboncalc_test_wishlist_store");
        let _ = fs::remove_dir_all(&temp_dir);
        let path = temp_dir.to_str().unwrap().to_string();

        {
            let store = LocalStore::open(&path).expect("open store");
            store.set_wishlist_ids(&[3, 7, 11]).unwrap();
        }
        // Fresh handle sees the same array
        let store = LocalStore::open(&path).expect("reopen store");
        assert_eq!(store.wishlist_ids().unwrap(), vec![3, 7, 11]);

        store.clear_wishlist().unwrap();
        assert!(store.wishlist_ids().unwrap().is_empty());

        let _ = fs::remove_dir_all(temp_dir);
    }

    #[test]
    fn missing_wishlist_reads_as_empty() {
        let (store, temp_dir) = temp_store("carboncalc_test_wishlist_empty");
        assert!(store.wishlist_ids().unwrap().is_empty());
        let _ = fs::remove_dir_all(temp_dir);
    }
}
