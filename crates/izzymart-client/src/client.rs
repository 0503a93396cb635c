//! # Catalog API Client
//!
//! Stateful HTTP client for the catalog/auth service. Holds at most one
//! bearer token, scoped to the client instance (clones share it).
//!
//! ## Endpoint Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation               Method  Path                         Auth      │
//! │  ─────────               ──────  ────                         ────      │
//! │  authenticate / login    POST    /auth/token (form)           no        │
//! │  get_product_by_upc      GET     /products/upc/{upc}?cache=   no        │
//! │  list_products           GET     /products                    bearer    │
//! │  search_products         GET     /products  (+ local filter)  bearer ↻  │
//! │  get_product             GET     /products/{id}               bearer    │
//! │  update_product          PUT     /products/{id}               bearer    │
//! │  delete_product          DELETE  /products/{id}               bearer    │
//! │  upload_image            POST    /files (multipart "file")    bearer    │
//! │  add_image_by_url        GET     <any url>, then upload_image bearer    │
//! │  image_url               -       /files/{id}/image            public    │
//! │                                                                         │
//! │  ↻ = one re-authentication with the default credentials on HTTP 401    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Token Lifecycle
//! ```text
//!   None ──authenticate/login──► Some(token) ──logout──► None
//!                                     │
//!                     search 401 ─────┘ (re-authenticate, overwrite)
//! ```
//!
//! Authenticated calls with no token fail with
//! [`ClientError::NotAuthenticated`] before anything is sent.

use std::sync::Arc;

use izzymart_core::Product;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};
use crate::types::{AuthTokenResponse, ImageFile, ProductPatch, UploadResponse, UploadedFile};

/// Re-authentication attempts allowed per search.
pub const MAX_REAUTH_RETRIES: u32 = 1;

/// File name used when a downloaded image URL has no usable last segment.
pub const DEFAULT_IMAGE_NAME: &str = "image.jpg";

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Client for the catalog service.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
    default_username: String,
    default_password: String,
    /// Current bearer token (if authenticated)
    token: Arc<RwLock<Option<String>>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.base.as_str())
            .field("default_username", &self.default_username)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates an unauthenticated client.
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(ApiClient {
            http: builder.build()?,
            base: Url::parse(&config.base_url)?,
            default_username: config.default_username.clone(),
            default_password: config.default_password.clone(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Root URL all endpoints are resolved against.
    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Exchanges credentials for a bearer token and keeps it.
    ///
    /// Any previously held token is overwritten on success and left alone
    /// on failure.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> ClientResult<()> {
        let url = self.endpoint(&["auth", "token"])?;

        let response = self
            .http
            .post(url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        let body: AuthTokenResponse = check(response).await?.json().await?;

        *self.token.write().await = Some(body.access_token);
        info!("Authenticated with catalog service");
        Ok(())
    }

    /// Same as [`ApiClient::authenticate`].
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<()> {
        self.authenticate(username, password).await
    }

    /// Authenticates with the configured default credentials.
    pub async fn authenticate_default(&self) -> ClientResult<()> {
        self.authenticate(&self.default_username, &self.default_password)
            .await
    }

    /// Discards the token.
    pub async fn logout(&self) {
        *self.token.write().await = None;
        info!("Logged out of catalog service");
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Looks up a product by barcode. No authentication needed.
    ///
    /// `use_cache` is forwarded as `?cache=true|false`.
    #[instrument(skip(self))]
    pub async fn get_product_by_upc(&self, upc: &str, use_cache: bool) -> ClientResult<Product> {
        let url = self.endpoint(&["products", "upc", upc])?;

        let response = self
            .http
            .get(url)
            .query(&[("cache", use_cache)])
            .send()
            .await?;

        let product: Product = check(response).await?.json().await?;
        debug!(upc = %product.upc, name = product.display_name(), "Product found");
        Ok(product)
    }

    /// Fetches the full product list.
    pub async fn list_products(&self) -> ClientResult<Vec<Product>> {
        let url = self.endpoint(&["products"])?;
        let request = self.authorized(self.http.get(url)).await?;

        let products: Vec<Product> = check(request.send().await?).await?.json().await?;
        Ok(products)
    }

    /// Products whose name or brand contains `query`, ignoring case.
    ///
    /// ## Retry
    /// A 401 from the service triggers one re-authentication with the
    /// default credentials and one more attempt. A second 401, a failed
    /// re-authentication, or any other error is returned as is. A missing
    /// token fails locally and is not retried.
    #[instrument(skip(self))]
    pub async fn search_products(&self, query: &str) -> ClientResult<Vec<Product>> {
        let mut reauths = 0;

        let products = loop {
            match self.list_products().await {
                Ok(products) => break products,
                Err(e) if e.is_unauthorized() && reauths < MAX_REAUTH_RETRIES => {
                    reauths += 1;
                    warn!("Token rejected during search, re-authenticating");
                    self.authenticate_default().await?;
                }
                Err(e) => return Err(e),
            }
        };

        let needle = query.to_lowercase();
        let matches: Vec<Product> = products
            .into_iter()
            .filter(|p| p.matches_query(&needle))
            .collect();

        debug!(count = matches.len(), "Search complete");
        Ok(matches)
    }

    /// Fetches one product by backend id.
    pub async fn get_product(&self, id: &str) -> ClientResult<Product> {
        let url = self.endpoint(&["products", id])?;
        let request = self.authorized(self.http.get(url)).await?;

        let product: Product = check(request.send().await?).await?.json().await?;
        Ok(product)
    }

    /// Sends a partial update for a product.
    #[instrument(skip(self, patch))]
    pub async fn update_product(&self, id: &str, patch: &ProductPatch) -> ClientResult<()> {
        let url = self.endpoint(&["products", id])?;
        let request = self.authorized(self.http.put(url)).await?;

        check(request.json(patch).send().await?).await?;
        info!(product_id = %id, "Product updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ClientResult<()> {
        let url = self.endpoint(&["products", id])?;
        let request = self.authorized(self.http.delete(url)).await?;

        check(request.send().await?).await?;
        info!(product_id = %id, "Product deleted");
        Ok(())
    }

    // =========================================================================
    // Images
    // =========================================================================

    /// Uploads an image as the multipart part `file`.
    #[instrument(skip(self, file), fields(filename = %file.filename, len = file.bytes.len()))]
    pub async fn upload_image(&self, file: ImageFile) -> ClientResult<UploadedFile> {
        let url = self.endpoint(&["files"])?;
        let request = self.authorized(self.http.post(url)).await?;

        let part = Part::bytes(file.bytes)
            .file_name(file.filename)
            .mime_str(&file.content_type)?;
        let form = Form::new().part("file", part);

        let raw: UploadResponse = check(request.multipart(form).send().await?)
            .await?
            .json()
            .await?;

        let uploaded = UploadedFile::from(raw);
        debug!(id = %uploaded.id, "Image uploaded");
        Ok(uploaded)
    }

    /// Downloads an image from anywhere and uploads it to the service.
    ///
    /// The file is named after the last path segment of `image_url`
    /// (`image.jpg` if there is none). `product_id` is only used for
    /// logging; linking the image to the product is a separate update.
    #[instrument(skip(self))]
    pub async fn add_image_by_url(&self, image_url: &str, product_id: &str) -> ClientResult<String> {
        let source = Url::parse(image_url)?;
        let filename = file_name_from_url(&source);

        let response = check(self.http.get(source).send().await?).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string();
        let bytes = response.bytes().await?;

        debug!(%filename, %content_type, len = bytes.len(), "Image downloaded");

        let uploaded = self
            .upload_image(ImageFile::new(filename, content_type, bytes.to_vec()))
            .await?;
        Ok(uploaded.id)
    }

    /// Public URL of an uploaded image.
    pub fn image_url(&self, image_id: &str) -> String {
        match self.endpoint(&["files", image_id, "image"]) {
            Ok(url) => url.into(),
            Err(_) => format!(
                "{}/files/{}/image",
                self.base.as_str().trim_end_matches('/'),
                image_id
            ),
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Resolves path segments under the base URL, percent-encoding each.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("{} cannot be a base", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Attaches the bearer token, or fails if there is none.
    async fn authorized(&self, request: RequestBuilder) -> ClientResult<RequestBuilder> {
        let token = self.token.read().await;
        match token.as_deref() {
            Some(token) => Ok(request.bearer_auth(token)),
            None => Err(ClientError::NotAuthenticated),
        }
    }
}

/// Passes successful responses through and turns the rest into
/// [`ClientError::Status`].
async fn check(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), %url, "Request failed");

    Err(ClientError::Status {
        status: status.as_u16(),
        url,
        body,
    })
}

fn file_name_from_url(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_IMAGE_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&ApiConfig::new(base)).unwrap()
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = client("http://localhost:8000/api/v1");
        let url = client.endpoint(&["products", "upc", "12 34/5"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/v1/products/upc/12%2034%2F5"
        );
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let client = client("http://localhost:8000/api/v1/");
        assert_eq!(
            client.endpoint(&["products"]).unwrap().as_str(),
            "http://localhost:8000/api/v1/products"
        );
    }

    #[test]
    fn test_image_url() {
        let client = client("http://localhost:8000/api/v1");
        assert_eq!(
            client.image_url("65f0c2"),
            "http://localhost:8000/api/v1/files/65f0c2/image"
        );
    }

    #[test]
    fn test_file_name_from_url() {
        let name = |s: &str| file_name_from_url(&Url::parse(s).unwrap());
        assert_eq!(name("https://cdn.example/img/soda.png?w=200"), "soda.png");
        assert_eq!(name("https://cdn.example/img/soda.png/"), "soda.png");
        assert_eq!(name("https://cdn.example/"), "image.jpg");
        assert_eq!(name("https://cdn.example"), "image.jpg");
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(ApiClient::new(&ApiConfig::new("localhost:8000")).is_err());
    }

    #[tokio::test]
    async fn test_authenticated_call_without_token_fails_locally() {
        // Nothing listens on this port; a request would surface as Http.
        let client = client("http://127.0.0.1:9/api/v1");
        assert!(!client.is_authenticated().await);

        let err = client.delete_product("p1").await.unwrap_err();
        assert!(matches!(err, ClientError::NotAuthenticated));

        let err = client.search_products("cola").await.unwrap_err();
        assert!(matches!(err, ClientError::NotAuthenticated));
    }
}
