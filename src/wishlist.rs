//! Client-only wishlist.
//!
//! A bare list of product ids under one key in the local store. Nothing is
//! mirrored server-side: the list survives restarts but belongs to this data
//! directory, not to the signed-in account. Concurrent writers race and the
//! last full-array write wins.

use crate::error::Result;
use crate::models::Product;
use crate::storage::LocalStore;

/// Wishlist operations over the local store. Synchronous; no network.
#[derive(Clone)]
pub struct Wishlist {
    store: LocalStore,
}

impl Wishlist {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn ids(&self) -> Result<Vec<i64>> {
        self.store.wishlist_ids()
    }

    pub fn is_wishlisted(&self, product_id: i64) -> Result<bool> {
        Ok(self.store.wishlist_ids()?.contains(&product_id))
    }

    /// Flip membership and persist the full updated list. Returns the new
    /// membership state.
    pub fn toggle(&self, product_id: i64) -> Result<bool> {
        let mut ids = self.store.wishlist_ids()?;
        let added = match ids.iter().position(|&id| id == product_id) {
            Some(position) => {
                ids.remove(position);
                false
            }
            None => {
                ids.push(product_id);
                true
            }
        };
        self.store.set_wishlist_ids(&ids)?;
        Ok(added)
    }

    pub fn remove(&self, product_id: i64) -> Result<()> {
        let ids: Vec<i64> = self
            .store
            .wishlist_ids()?
            .into_iter()
            .filter(|&id| id != product_id)
            .collect();
        self.store.set_wishlist_ids(&ids)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.clear_wishlist()
    }

    /// Catalog entries whose id is wishlisted, in catalog order. A linear
    /// membership scan is fine at these list sizes.
    pub fn resolve(&self, catalog: &[Product]) -> Result<Vec<Product>> {
        let ids = self.store.wishlist_ids()?;
        Ok(catalog
            .iter()
            .filter(|product| ids.contains(&product.id))
            .cloned()
            .collect())
    }
}
