//! Inventory API client implementation.
//!
//! Plain JSON-over-HTTP with `reqwest`: `GET {base}/products/{id}` for
//! catalog records and `GET {base}/stock/{id}` for stock levels. No other
//! verbs are used.

use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use rocket_shoes_core::{CatalogProduct, ProductId, StockLevel};

use super::{Inventory, InventoryError};
use crate::config::CartConfig;

/// Client for the inventory API.
#[derive(Debug, Clone)]
pub struct HttpInventoryClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpInventoryClient {
    /// Create a new inventory API client from configuration.
    #[must_use]
    pub fn new(config: &CartConfig) -> Self {
        Self::with_base_url(config.inventory_api_url.clone())
    }

    /// Create a client against an explicit base URL.
    #[must_use]
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Fetch and decode one resource, mapping 404 to `NotFound` for `id`.
    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        id: ProductId,
    ) -> Result<T, InventoryError> {
        let url = self.base_url.join(path)?;

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(InventoryError::NotFound(id));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                url = %url,
                body = %body.chars().take(200).collect::<String>(),
                "inventory API returned non-success status"
            );
            return Err(InventoryError::Api {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                url = %url,
                body = %body.chars().take(200).collect::<String>(),
                "failed to parse inventory response"
            );
            InventoryError::Parse(e)
        })
    }
}

impl Inventory for HttpInventoryClient {
    #[instrument(skip(self))]
    async fn product(&self, id: ProductId) -> Result<CatalogProduct, InventoryError> {
        self.fetch(&format!("products/{id}"), id).await
    }

    #[instrument(skip(self))]
    async fn stock(&self, id: ProductId) -> Result<StockLevel, InventoryError> {
        self.fetch(&format!("stock/{id}"), id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_paths_join_onto_base() {
        let base = Url::parse("http://localhost:3333/").expect("valid url");
        let joined = base.join("products/42").expect("joinable");
        assert_eq!(joined.as_str(), "http://localhost:3333/products/42");

        let joined = base.join("stock/42").expect("joinable");
        assert_eq!(joined.as_str(), "http://localhost:3333/stock/42");
    }
}
