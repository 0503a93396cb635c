//! # Admin Commands
//!
//! Session management and catalog edits. Every edit needs a token from
//! `login`; without one the client fails before sending anything.

use izzymart_client::ProductPatch;
use izzymart_core::Money;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::state::Register;

pub async fn login(register: &Register, username: &str, password: &str) -> AppResult<()> {
    register.api.login(username, password).await?;
    info!(username, "Admin session started");
    Ok(())
}

pub async fn logout(register: &Register) {
    register.api.logout().await;
    info!("Admin session ended");
}

pub async fn set_price(register: &Register, product_id: &str, amount: Money) -> AppResult<()> {
    let patch = ProductPatch::default().with_price(amount);
    register.api.update_product(product_id, &patch).await?;
    info!(product_id, price = %amount, "Price updated");
    Ok(())
}

pub async fn drop_product(register: &Register, product_id: &str) -> AppResult<()> {
    register.api.delete_product(product_id).await?;
    info!(product_id, "Product deleted");
    Ok(())
}

/// Uploads the image at `url` and appends it to the product's images.
///
/// Returns the URL the new image is served from.
pub async fn attach_image(register: &Register, product_id: &str, url: &str) -> AppResult<String> {
    let image_id = register.api.add_image_by_url(url, product_id).await?;
    if image_id.is_empty() {
        return Err(AppError::internal("Upload succeeded but returned no image id"));
    }

    let product = register.api.get_product(product_id).await?;
    let mut images = product.images.unwrap_or_default();
    images.push(image_id.clone());

    let patch = ProductPatch::default().with_images(images);
    register.api.update_product(product_id, &patch).await?;

    info!(product_id, image_id = %image_id, "Image attached");
    Ok(register.api.image_url(&image_id))
}
