use std::sync::Arc;

use log::{debug, error, info};

use super::backend_client::BackendClient;
use super::error_handling::map_api_error;
use crate::error::{AppError, AppResult};
use crate::models::{Produit, ProduitPayload};

/// Typed access to the product endpoints. Auth headers and 401 recovery
/// come from the underlying [`BackendClient`].
#[derive(Debug)]
pub struct ProduitClient {
    backend: Arc<BackendClient>,
    base_url: String,
}

impl ProduitClient {
    pub fn new(backend: Arc<BackendClient>, base_url: String) -> Self {
        Self { backend, base_url }
    }

    pub async fn list(&self) -> AppResult<Vec<Produit>> {
        debug!("Fetching products from {}", self.base_url);

        let response = self.backend.get(&self.base_url).await?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error text".to_string());
            error!("Product list API error: {} - {}", status, error_text);
            return Err(map_api_error(status.as_u16(), &error_text));
        }

        let produits: Vec<Produit> = response.json().await.map_err(|e| {
            AppError::SerdeError(format!("Failed to parse product list response: {}", e))
        })?;
        Ok(produits)
    }

    pub async fn get(&self, id: i64) -> AppResult<Produit> {
        let url = format!("{}/{}", self.base_url, id);
        debug!("Fetching product {} from {}", id, url);

        let response = self.backend.get(&url).await?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error text".to_string());
            error!("Product fetch API error: {} - {}", status, error_text);
            return Err(map_api_error(status.as_u16(), &error_text));
        }

        let produit: Produit = response
            .json()
            .await
            .map_err(|e| AppError::SerdeError(format!("Failed to parse product response: {}", e)))?;
        Ok(produit)
    }

    pub async fn create(&self, payload: &ProduitPayload) -> AppResult<Produit> {
        info!("Creating product '{}'", payload.name);

        let response = self.backend.post_json(&self.base_url, payload).await?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error text".to_string());
            error!("Product create API error: {} - {}", status, error_text);
            return Err(map_api_error(status.as_u16(), &error_text));
        }

        let produit: Produit = response
            .json()
            .await
            .map_err(|e| AppError::SerdeError(format!("Failed to parse product response: {}", e)))?;
        info!("Created product with id {:?}", produit.id);
        Ok(produit)
    }

    pub async fn update(&self, id: i64, payload: &ProduitPayload) -> AppResult<Produit> {
        let url = format!("{}/{}", self.base_url, id);
        info!("Updating product {} via {}", id, url);

        let response = self.backend.put_json(&url, payload).await?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error text".to_string());
            error!("Product update API error: {} - {}", status, error_text);
            return Err(map_api_error(status.as_u16(), &error_text));
        }

        let produit: Produit = response
            .json()
            .await
            .map_err(|e| AppError::SerdeError(format!("Failed to parse product response: {}", e)))?;
        Ok(produit)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let url = format!("{}/{}", self.base_url, id);
        info!("Deleting product {} via {}", id, url);

        let response = self.backend.delete(&url).await?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error text".to_string());
            error!("Product delete API error: {} - {}", status, error_text);
            return Err(map_api_error(status.as_u16(), &error_text));
        }

        Ok(())
    }
}
