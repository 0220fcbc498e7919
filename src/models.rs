use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Marketplace listing as served by the catalog. Read-only on this side;
/// the admin backend owns every field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub category: Category,
    /// Display string of the loose form "-<number><unit>", e.g. "-50kg CO2".
    #[serde(default)]
    pub carbon_offset: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
}

/// Listing categories; anything the backend sends outside the known pair
/// lands in `Uncategorized`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    TreePlanting,
    CarbonCredit,
    #[default]
    #[serde(other)]
    Uncategorized,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::TreePlanting => "tree planting",
            Category::CarbonCredit => "carbon credit",
            Category::Uncategorized => "uncategorized",
        };
        f.write_str(label)
    }
}

/// Flat cart line as returned inside the `items` array of `GET /api/cart`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDto {
    pub id: i64,
    pub marketplace_item_id: i64,
    pub item_name: String,
    #[serde(default)]
    pub item_description: String,
    pub item_price: f64,
    #[serde(default)]
    pub carbon_offset: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub total_price: Option<f64>,
}

/// Envelope of `GET /api/cart`.
#[derive(Deserialize, Debug, Default)]
pub struct CartDto {
    #[serde(default)]
    pub items: Vec<CartItemDto>,
}

/// Envelope of `GET /api/cart/count`.
#[derive(Deserialize, Debug)]
pub struct CartCountDto {
    pub count: u64,
}

/// Product fields denormalized into a cart line or an order for display.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub carbon_offset: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Cart line in the nested shape the views consume.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: i64,
    pub quantity: u32,
    #[serde(default)]
    pub total_price: Option<f64>,
    pub marketplace_item: ProductSnapshot,
}

/// A recorded support action. Append-only: the client creates and reads
/// orders, never mutates them.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub marketplace_item: Option<ProductSnapshot>,
    pub quantity: u32,
    /// Price times quantity, computed server-side.
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Backend-driven order lifecycle. The client renders these and never issues
/// a transition itself.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
    #[default]
    #[serde(other)]
    Pending,
}

impl OrderStatus {
    /// Rendering hint for the cancel control; pending is the only state the
    /// backend will still cancel from.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

#[derive(Serialize, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Login response; the backend names the bearer token field `jwt`.
#[derive(Deserialize, Debug)]
pub struct LoginResponse {
    pub jwt: String,
}

/// Lifestyle survey submission. Footprint math stays server-side.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRequest {
    pub monthly_mileage: f64,
    pub electricity_bill: f64,
    pub diet_type: DietType,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DietType {
    Vegetarian,
    #[serde(rename = "Non-Vegetarian")]
    NonVegetarian,
    Vegan,
}

/// Stored survey record echoed back by the backend, including the computed
/// footprint.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub monthly_mileage: f64,
    pub electricity_bill: f64,
    pub diet_type: String,
    #[serde(default)]
    pub carbon_footprint: Option<f64>,
    #[serde(default)]
    pub submission_date: Option<NaiveDateTime>,
}

/// Eco-challenge offered by the goal center.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub goal_type: Option<String>,
    #[serde(default)]
    pub target_value: Option<f64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<String>,
}
