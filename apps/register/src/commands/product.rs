//! # Product Commands
//!
//! Catalog search. Searching needs a session; the client re-authenticates
//! once with the configured credentials if the token has expired.

use izzymart_core::{Money, Product};
use tracing::info;

use crate::error::AppResult;
use crate::state::Register;
use crate::terminal::{TerminalEnvironment, Tone};

/// Product summary for search results.
#[derive(Debug, Clone)]
pub struct ProductSummary {
    pub id: Option<String>,
    pub upc: String,
    pub name: String,
    pub brand: Option<String>,
    pub price: Option<Money>,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        ProductSummary {
            id: product.id.clone(),
            upc: product.upc.clone(),
            name: product.display_name().to_string(),
            brand: product.brand.clone(),
            price: product.price.map(|_| product.unit_price()),
        }
    }
}

impl ProductSummary {
    pub fn render_list(results: &[ProductSummary], term: &TerminalEnvironment) -> String {
        if results.is_empty() {
            return "  (no matches)".to_string();
        }

        results
            .iter()
            .map(|p| {
                let price = p.price.map(|m| m.to_string()).unwrap_or_else(|| "--".to_string());
                format!(
                    "  {:<14} {:<28} {:<16} {:>10}  {}",
                    p.upc,
                    p.name,
                    p.brand.as_deref().unwrap_or(""),
                    price,
                    term.paint(Tone::Secondary, p.id.as_deref().unwrap_or("")),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Case-insensitive search over product name and brand.
pub async fn search_products(register: &Register, query: &str) -> AppResult<Vec<ProductSummary>> {
    let products = register.api.search_products(query).await?;
    info!(query, count = products.len(), "Search");
    Ok(products.iter().map(ProductSummary::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_keeps_missing_price_missing() {
        let priced = ProductSummary::from(&Product::new("1").with_name("Cola").with_price(1.5));
        assert_eq!(priced.price, Some(Money::from_cents(150)));

        let unpriced = ProductSummary::from(&Product::new("5"));
        assert_eq!(unpriced.name, "5");
        assert_eq!(unpriced.price, None);
    }

    #[test]
    fn test_render_list() {
        let term = TerminalEnvironment::new(false);
        assert_eq!(ProductSummary::render_list(&[], &term), "  (no matches)");

        let rows = [ProductSummary::from(
            &Product::new("1").with_id("p-1").with_name("Cola").with_brand("Fizz"),
        )];
        let text = ProductSummary::render_list(&rows, &term);
        assert!(text.contains("Cola"));
        assert!(text.contains("Fizz"));
        assert!(text.contains("--"));
        assert!(text.ends_with("p-1"));
    }
}
