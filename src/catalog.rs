//! Catalog views: listing, lookup, and the pure sort/page transforms the
//! marketplace grid is built from.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{Category, Product};

/// Grid page size used by every catalog view.
pub const PAGE_SIZE: usize = 9;

/// Optional catalog bounds. `category` is carried for the filter sidebar but
/// not applied: the catalog shows exactly what the admin has listed, and the
/// category controls are intentionally inert.
#[derive(Debug, Default, Clone)]
pub struct ProductFilter {
    pub category: Option<Category>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        if let Some(min) = self.min_price {
            if product.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if product.price > max {
                return false;
            }
        }
        true
    }
}

impl ApiClient {
    /// Fetch the full catalog, then intersect with the price bounds on this
    /// side. The listing endpoint itself is always called unfiltered.
    pub async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        let response = self.send(self.get("/api/catalog/products")).await?;
        let products: Vec<Product> = response.json().await?;
        debug!(count = products.len(), "fetched catalog");
        Ok(products
            .into_iter()
            .filter(|product| filter.matches(product))
            .collect())
    }

    /// Single product lookup; a missing id is `ApiError::NotFound`.
    pub async fn get_product(&self, id: i64) -> Result<Product> {
        let response = self
            .send(self.get(&format!("/api/catalog/products/{id}")))
            .await?;
        Ok(response.json().await?)
    }
}

/// Sort keys offered by the marketplace grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Case-insensitive A-Z.
    Name,
    PriceLowToHigh,
    PriceHighToLow,
    /// Estimated CO2e impact, largest first.
    OffsetHighToLow,
}

static OFFSET_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("offset token regex"));

/// Magnitude of a carbon-offset display string such as "-50kg CO2".
/// The first numeric token wins; absent or unparsable strings count as 0.
pub fn offset_magnitude(offset: Option<&str>) -> f64 {
    offset
        .and_then(|raw| OFFSET_TOKEN.find(raw))
        .and_then(|token| token.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Stable in-place sort; ties keep their fetch order.
pub fn sort_products(products: &mut [Product], key: SortKey) {
    match key {
        SortKey::Name => {
            products.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
        SortKey::PriceLowToHigh => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceHighToLow => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::OffsetHighToLow => products.sort_by(|a, b| {
            offset_magnitude(b.carbon_offset.as_deref())
                .total_cmp(&offset_magnitude(a.carbon_offset.as_deref()))
        }),
    }
}

/// 1-indexed page slice, clamped to the available range.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(items.len());
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `len` items.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, response::IntoResponse, routing::get, Json, Router};

    fn product(id: i64, name: &str, price: f64, offset: Option<&str>) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: String::new(),
            price,
            category: Category::Uncategorized,
            carbon_offset: offset.map(String::from),
            image: None,
            seller: None,
        }
    }

    #[test]
    fn offset_parser_handles_display_forms() {
        assert_eq!(offset_magnitude(Some("-50kg CO2")), 50.0);
        assert_eq!(offset_magnitude(Some("12.5 kg")), 12.5);
        assert_eq!(offset_magnitude(Some("no digits here")), 0.0);
        assert_eq!(offset_magnitude(None), 0.0);
    }

    #[test]
    fn name_sort_is_case_insensitive_and_stable() {
        let mut products = vec![
            product(1, "bamboo", 10.0, None),
            product(2, "Acacia", 12.0, None),
            product(3, "BAMBOO", 8.0, None),
        ];
        sort_products(&mut products, SortKey::Name);
        let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
        // "bamboo" and "BAMBOO" compare equal, so fetch order holds between them
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn price_sorts_are_total_orders() {
        let mut products = vec![
            product(1, "a", 30.0, None),
            product(2, "b", 10.0, None),
            product(3, "c", 20.0, None),
        ];
        sort_products(&mut products, SortKey::PriceLowToHigh);
        assert_eq!(products.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 3, 1]);
        sort_products(&mut products, SortKey::PriceHighToLow);
        assert_eq!(products.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 3, 2]);
    }

    #[test]
    fn offset_sort_treats_unparsable_as_zero() {
        let mut products = vec![
            product(1, "a", 1.0, None),
            product(2, "b", 1.0, Some("-50kg CO2")),
            product(3, "c", 1.0, Some("-12.5kg CO2")),
        ];
        sort_products(&mut products, SortKey::OffsetHighToLow);
        assert_eq!(products.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 3, 1]);
    }

    #[test]
    fn pagination_clamps_to_available_length() {
        let items: Vec<i32> = (0..20).collect();
        assert_eq!(paginate(&items, 1, PAGE_SIZE), &items[0..9]);
        assert_eq!(paginate(&items, 3, PAGE_SIZE), &items[18..20]);
        assert!(paginate(&items, 4, PAGE_SIZE).is_empty());
        assert_eq!(total_pages(20, PAGE_SIZE), 3);
        assert_eq!(total_pages(0, PAGE_SIZE), 0);
    }

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn catalog_json() -> serde_json::Value {
        serde_json::json!([
            { "id": 1, "name": "Oak Sapling", "price": 15.0, "category": "tree_planting" },
            { "id": 2, "name": "Wind Credit", "price": 80.0, "category": "carbon_credit" },
            { "id": 3, "name": "Mangrove Grove", "price": 45.0, "category": "tree_planting" }
        ])
    }

    #[tokio::test]
    async fn price_bounds_apply_after_unfiltered_fetch() {
        let app = Router::new().route(
            "/api/catalog/products",
            get(|| async { Json(catalog_json()) }),
        );
        let base = serve(app).await;
        let client = ApiClient::new(base);

        let filter = ProductFilter {
            // Accepted but never applied
            category: Some(Category::CarbonCredit),
            min_price: Some(20.0),
            max_price: Some(60.0),
        };
        let products = client.list_products(&filter).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, 3);

        let unbounded = client.list_products(&ProductFilter::default()).await.unwrap();
        assert_eq!(unbounded.len(), 3);
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let app = Router::new().route(
            "/api/catalog/products/:id",
            get(|Path(id): Path<i64>| async move {
                if id == 1 {
                    Json(serde_json::json!(
                        { "id": 1, "name": "Oak Sapling", "price": 15.0 }
                    ))
                    .into_response()
                } else {
                    axum::http::StatusCode::NOT_FOUND.into_response()
                }
            }),
        );
        let base = serve(app).await;
        let client = ApiClient::new(base);

        assert_eq!(client.get_product(1).await.unwrap().name, "Oak Sapling");
        assert!(matches!(
            client.get_product(99).await,
            Err(crate::error::ApiError::NotFound)
        ));
    }
}
