//! Inventory service access.
//!
//! The cart consults the inventory service for two things only: the
//! catalog record of a product being added for the first time, and the
//! live stock level gating an increment or an explicit quantity change.
//! Stock is fetched per mutation and never cached.

mod http;

pub use http::HttpInventoryClient;

use std::future::Future;

use thiserror::Error;

use rocket_shoes_core::{CatalogProduct, ProductId, StockLevel};

/// Errors that can occur when querying the inventory service.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("inventory API returned {status} for {url}")]
    Api { status: u16, url: String },

    /// No catalog record exists for the product.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// Response body does not parse.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Request URL could not be built.
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Query-only lookup of catalog records and stock levels.
///
/// The returned futures are `Send` so the cart store task can be spawned
/// over any implementation.
pub trait Inventory: Send + Sync + 'static {
    /// Fetch the catalog record for a product.
    fn product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<CatalogProduct, InventoryError>> + Send;

    /// Fetch the live stock level for a product.
    fn stock(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<StockLevel, InventoryError>> + Send;
}
