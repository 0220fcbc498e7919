//! Order history and the simulated support action.
//!
//! Append-only from this side: one create call, reads after that. Status
//! moves are entirely backend-driven and only rendered here; the cancel and
//! track controls in the views stay inert.

use serde_json::json;
use tracing::debug;

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::Order;

impl ApiClient {
    /// Record a support action. A single plain POST with no deduplication
    /// token: retrying after a client-side failure can duplicate the order.
    pub async fn create_transaction(&self, item_id: i64, quantity: u32) -> Result<Order> {
        let builder = self.post("/api/transactions").json(&json!({
            "itemId": item_id,
            "quantity": quantity,
        }));
        let response = self.send(builder).await?;
        let order: Order = response.json().await?;
        debug!(order_id = order.id, "transaction recorded");
        Ok(order)
    }

    /// Order history in whatever order the backend returns it; never
    /// re-sorted here.
    pub async fn list_orders(&self) -> Result<Vec<Order>> {
        let response = self.send(self.get("/api/transactions")).await?;
        Ok(response.json().await?)
    }

    pub async fn get_order(&self, id: i64) -> Result<Order> {
        let response = self.send(self.get(&format!("/api/transactions/{id}"))).await?;
        Ok(response.json().await?)
    }
}
