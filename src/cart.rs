//! Cart synchronization.
//!
//! The backend owns the cart; every mutation here is one endpoint call and
//! the caller re-fetches afterwards. The client keeps no cache of its own, so
//! two overlapping mutations settle as "last fetch wins" rather than as
//! incremental patches.

use crate::api::ApiClient;
use crate::catalog::offset_magnitude;
use crate::error::{ApiError, Result};
use crate::models::{CartCountDto, CartDto, CartItem, CartItemDto, ProductSnapshot};

impl ApiClient {
    /// Current cart, normalized into the nested display shape.
    pub async fn get_cart(&self) -> Result<Vec<CartItem>> {
        let response = self.send(self.get("/api/cart")).await?;
        let dto: CartDto = response.json().await?;
        Ok(dto.items.into_iter().map(normalize_cart_item).collect())
    }

    pub async fn add_to_cart(&self, marketplace_item_id: i64, quantity: u32) -> Result<()> {
        let builder = self.post("/api/cart/items").query(&[
            ("marketplaceItemId", marketplace_item_id.to_string()),
            ("quantity", quantity.to_string()),
        ]);
        self.send(builder).await?;
        Ok(())
    }

    /// Set a cart line's quantity. Quantities below 1 are rejected here and
    /// no request is built for them.
    pub async fn update_cart_item(&self, cart_item_id: i64, quantity: u32) -> Result<()> {
        if quantity < 1 {
            return Err(ApiError::QuantityTooSmall);
        }
        let builder = self
            .put(&format!("/api/cart/items/{cart_item_id}"))
            .query(&[("quantity", quantity.to_string())]);
        self.send(builder).await?;
        Ok(())
    }

    pub async fn remove_from_cart(&self, cart_item_id: i64) -> Result<()> {
        self.send(self.delete(&format!("/api/cart/items/{cart_item_id}")))
            .await?;
        Ok(())
    }

    pub async fn clear_cart(&self) -> Result<()> {
        self.send(self.delete("/api/cart")).await?;
        Ok(())
    }

    /// Item count for the cart badge.
    pub async fn cart_count(&self) -> Result<u64> {
        let response = self.send(self.get("/api/cart/count")).await?;
        let body: CartCountDto = response.json().await?;
        Ok(body.count)
    }
}

/// Flat wire DTO to the nested display shape. Field for field; nothing is
/// recomputed on this side.
pub fn normalize_cart_item(dto: CartItemDto) -> CartItem {
    CartItem {
        id: dto.id,
        quantity: dto.quantity,
        total_price: dto.total_price,
        marketplace_item: ProductSnapshot {
            id: dto.marketplace_item_id,
            name: dto.item_name,
            description: dto.item_description,
            price: dto.item_price,
            category: None,
            carbon_offset: dto.carbon_offset,
            image: dto.image.or(dto.image_url),
        },
    }
}

/// Sum of price times quantity over the cart. Derived on demand, never
/// stored.
pub fn cart_subtotal(items: &[CartItem]) -> f64 {
    items
        .iter()
        .map(|item| item.marketplace_item.price * f64::from(item.quantity))
        .sum()
}

/// Total offset magnitude in kg over the lines whose display string parses.
pub fn cart_total_offset_kg(items: &[CartItem]) -> f64 {
    items
        .iter()
        .map(|item| {
            offset_magnitude(item.marketplace_item.carbon_offset.as_deref())
                * f64::from(item.quantity)
        })
        .sum()
}

pub fn cart_item_count(items: &[CartItem]) -> u32 {
    items.iter().map(|item| item.quantity).sum()
}
