//! # Wire Types
//!
//! Request and response bodies of the catalog service that are not shared
//! domain types. [`izzymart_core::Product`] is used directly for product
//! payloads.

use izzymart_core::{Money, NutritionInfo};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a successful `POST /auth/token`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Partial product update for `PUT /products/{id}`.
///
/// Mirrors every editable [`izzymart_core::Product`] field. Only fields
/// that are `Some` are sent.
///
/// ## Example
/// ```rust
/// use izzymart_client::ProductPatch;
/// use izzymart_core::Money;
///
/// let patch = ProductPatch::default().with_price(Money::from_cents(349));
/// assert_eq!(patch.price, Some(3.49));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Decimal dollars, as on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,

    // Book fields
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

impl ProductPatch {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the price, converting cents to the decimal wire format.
    pub fn with_price(mut self, price: Money) -> Self {
        self.price = Some(price.to_decimal());
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = Some(images);
        self
    }

    /// Checks if the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == ProductPatch::default()
    }
}

/// Result of an image upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFile {
    /// Storage id; empty if the service returned none.
    pub id: String,
}

/// Raw `POST /files` response. The service reports the id as either `id`
/// or `_id`.
#[derive(Debug, Deserialize)]
pub(crate) struct UploadResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    underscore_id: Option<String>,
}

impl From<UploadResponse> for UploadedFile {
    fn from(raw: UploadResponse) -> Self {
        let id = [raw.id, raw.underscore_id]
            .into_iter()
            .flatten()
            .find(|id| !id.is_empty())
            .unwrap_or_default();
        UploadedFile { id }
    }
}

/// Binary image content ready for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        ImageFile {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

impl std::fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
