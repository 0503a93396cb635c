//! # Domain Types
//!
//! Catalog value types shared by the cart, the API client and the register.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────┐              │
//! │  │       Product        │        │    NutritionInfo     │              │
//! │  │  ──────────────────  │  0..1  │  ──────────────────  │              │
//! │  │  upc (required)      │───────►│  serving_size        │              │
//! │  │  id, isbn            │        │  calories, fat, ...  │              │
//! │  │  name, brand, price  │        │  nutrition_grade     │              │
//! │  │  images, tags, ...   │        └──────────────────────┘              │
//! │  │  author, publisher   │  (book metadata)                             │
//! │  └──────────────────────┘                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! - `upc`: barcode, the key of cart lines and the lookup path segment
//! - `id`: backend document id, used by admin edits (update/delete)
//!
//! Products are value objects: the cart copies them and never mutates them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A catalog product as returned by the catalog service.
///
/// Every field except `upc` is optional on the wire. Absent fields are omitted
/// when the product is serialized again.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Backend document id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Product kind as classified by the backend ("food", "book", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,

    /// Universal Product Code.
    pub upc: String,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Unit price as a decimal number (wire format).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// Where the price came from (retailer lookup, manual, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Uploaded image ids, resolvable through `/files/{id}/image`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<NutritionInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergens: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Free-form backend metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,

    // -------------------------------------------------------------------------
    // Book metadata
    // -------------------------------------------------------------------------
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl Product {
    /// Creates a product with only a UPC set.
    pub fn new(upc: impl Into<String>) -> Self {
        Product {
            upc: upc.into(),
            ..Default::default()
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Sets the decimal wire price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the backend id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Returns the unit price in cents.
    ///
    /// A missing price counts as zero. A price that cannot be represented
    /// (NaN, infinite) also counts as zero so totals stay computable.
    pub fn unit_price(&self) -> Money {
        self.price
            .and_then(|p| Money::from_decimal(p).ok())
            .unwrap_or_default()
    }

    /// Name for receipts and logs; falls back to the UPC.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.upc)
    }

    /// Case-insensitive substring match over name and brand.
    ///
    /// `needle_lower` must already be lowercase.
    pub fn matches_query(&self, needle_lower: &str) -> bool {
        let hit = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|v| v.to_lowercase().contains(needle_lower))
        };
        hit(&self.name) || hit(&self.brand)
    }
}

// =============================================================================
// Nutrition
// =============================================================================

/// Nutrition facts attached to food products.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturated_fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trans_fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbohydrates: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugars: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    /// Nutri-Score style letter grade.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition_grade: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_sparse_product() {
        let json = r#"{"id":"65a1","upc":"041196910759","name":"Soup","price":1.29,"unknown":"x"}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id.as_deref(), Some("65a1"));
        assert_eq!(product.upc, "041196910759");
        assert_eq!(product.unit_price().cents(), 129);
        assert!(product.brand.is_none());
    }

    #[test]
    fn test_serialize_omits_absent_fields() {
        let product = Product::new("123").with_name("Tea");
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json, serde_json::json!({"upc": "123", "name": "Tea"}));
    }

    #[test]
    fn test_missing_price_is_zero() {
        let product = Product::new("123");
        assert!(product.unit_price().is_zero());
    }

    #[test]
    fn test_book_metadata() {
        let json = r#"{"upc":"9780143127741","isbn":"9780143127741","author":"Ann","page_count":320}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.isbn.as_deref(), Some("9780143127741"));
        assert_eq!(product.page_count, Some(320));
        assert_eq!(product.display_name(), "9780143127741");
    }

    #[test]
    fn test_matches_query_on_name_or_brand() {
        let product = Product::new("1").with_name("Corn Flakes").with_brand("Kellogg's");

        assert!(product.matches_query("flakes"));
        assert!(product.matches_query("kellogg"));
        assert!(!product.matches_query("oat"));
        assert!(!Product::new("2").matches_query("anything"));
    }
}
