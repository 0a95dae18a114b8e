//! Product CRUD calls.

use reqwest::Method;
use tracing::debug;

use super::error::SESSION_EXPIRED_MESSAGE;
use super::{ApiClient, ApiError};
use crate::models::{Product, ProductDraft};

const PRODUCTS_PATH: &str = "/api/products";

fn product_path(id: i64) -> String {
    format!("{}/{}", PRODUCTS_PATH, id)
}

impl ApiClient {
    /// Fetch every product
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let products: Vec<Product> = self
            .get(PRODUCTS_PATH, "Failed to fetch products")
            .await
            .map_err(|e| e.with_unauthorized_message(SESSION_EXPIRED_MESSAGE))?;
        debug!(count = products.len(), "Products fetched");
        Ok(products)
    }

    pub async fn get_product(&self, id: i64) -> Result<Product, ApiError> {
        self.get(&product_path(id), "Failed to fetch product")
            .await
            .map_err(|e| e.with_unauthorized_message(SESSION_EXPIRED_MESSAGE))
    }

    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ApiError> {
        self.send_json(Method::POST, PRODUCTS_PATH, draft, "Failed to create product")
            .await
            .map_err(|e| e.with_unauthorized_message(SESSION_EXPIRED_MESSAGE))
    }

    pub async fn update_product(&self, id: i64, draft: &ProductDraft) -> Result<Product, ApiError> {
        self.send_json(Method::PUT, &product_path(id), draft, "Failed to update product")
            .await
            .map_err(|e| e.with_unauthorized_message(SESSION_EXPIRED_MESSAGE))
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&product_path(id), "Failed to delete product")
            .await
            .map_err(|e| e.with_unauthorized_message(SESSION_EXPIRED_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_path() {
        assert_eq!(product_path(17), "/api/products/17");
    }
}
