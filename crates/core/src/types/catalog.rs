//! Catalog and stock records served by the inventory API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;

/// A product as described by the catalog.
///
/// Display attributes (`title`, `price`, `image`) are opaque to the cart
/// logic; only `id` participates in any decision. Prices travel as plain
/// JSON numbers on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub title: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Product image URL, when the catalog provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Live stock level for a product.
///
/// Fetched per mutation and never cached; the cart treats the inventory
/// service as the authoritative source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    pub id: ProductId,
    /// Units currently available.
    pub amount: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_product_from_api_json() {
        let json = r#"{"id": 1, "title": "Tenis de Caminhada Leve Confortavel",
                       "price": 179.9, "image": "https://cdn.example/shoes-1.jpg"}"#;
        let product: CatalogProduct = serde_json::from_str(json).expect("valid product");
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Decimal::new(1799, 1));
        assert!(product.image.is_some());
    }

    #[test]
    fn test_catalog_product_without_image() {
        let json = r#"{"id": 2, "title": "Sock", "price": 9.99}"#;
        let product: CatalogProduct = serde_json::from_str(json).expect("valid product");
        assert_eq!(product.image, None);
    }

    #[test]
    fn test_stock_level_from_api_json() {
        let stock: StockLevel =
            serde_json::from_str(r#"{"id": 1, "amount": 3}"#).expect("valid stock");
        assert_eq!(stock.id, ProductId::new(1));
        assert_eq!(stock.amount, 3);
    }
}
