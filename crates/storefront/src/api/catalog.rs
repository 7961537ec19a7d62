//! Catalog API client: products and reviews.

use std::sync::Arc;

use serde::Deserialize;
use tracing::instrument;
use vitrina_core::{Product, ProductDetail, ProductId, Review, ReviewDraft, SellerId, UserId};

use super::{ApiError, send_json};
use crate::config::CatalogApiConfig;

/// Envelope used by the list endpoints.
#[derive(Debug, Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    result: Option<Vec<Product>>,
}

/// Client for the catalog endpoints of the backend API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &CatalogApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// List every product.
    ///
    /// Returns `None` when the response carries no `result` list.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Option<Vec<Product>>, ApiError> {
        let request = self.inner.client.get(self.url("/products"));
        let envelope: ListEnvelope = send_json(request, "products").await?;
        Ok(envelope.result)
    }

    /// List the products of one shop.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    #[instrument(skip(self), fields(seller_id = %seller_id))]
    pub async fn list_products_by_seller(
        &self,
        seller_id: &SellerId,
    ) -> Result<Option<Vec<Product>>, ApiError> {
        let url = self.url(&format!(
            "/products/shops/{}",
            urlencoding::encode(seller_id.as_str())
        ));
        let envelope: ListEnvelope =
            send_json(self.inner.client.get(url), "seller products").await?;
        Ok(envelope.result)
    }

    /// Search products by name.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn search_products(&self, name: &str) -> Result<Option<Vec<Product>>, ApiError> {
        let url = self.url(&format!("/products?name={}", urlencoding::encode(name)));
        let envelope: ListEnvelope = send_json(self.inner.client.get(url), "products").await?;
        Ok(envelope.result)
    }

    /// Get a product with its reviews.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no product has this id, or another
    /// error if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<ProductDetail, ApiError> {
        let url = self.url(&format!("/products/{}", urlencoding::encode(id.as_str())));
        send_json(self.inner.client.get(url), &format!("product {id}")).await
    }

    /// Create a product. The backend expects it wrapped as `{ "product": ... }`.
    ///
    /// # Errors
    ///
    /// Returns error if the backend rejects the product or the request fails.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create_product(&self, product: &Product) -> Result<Product, ApiError> {
        let body = serde_json::json!({ "product": product });
        let request = self.inner.client.post(self.url("/products")).json(&body);
        send_json(request, "products").await
    }

    /// Replace a product's fields. The id travels in the path only.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingId` if the product has no id, or another
    /// error if the request fails.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn edit_product(&self, product: &Product) -> Result<Product, ApiError> {
        if product.id.is_empty() {
            return Err(ApiError::MissingId("product"));
        }

        let mut body = serde_json::to_value(product)?;
        if let Some(fields) = body.as_object_mut() {
            fields.remove("id");
        }

        let url = self.url(&format!(
            "/products/{}",
            urlencoding::encode(product.id.as_str())
        ));
        let request = self.inner.client.put(url).json(&body);
        send_json(request, &format!("product {}", product.id)).await
    }

    /// Post a review for a product on behalf of a user.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    #[instrument(skip(self, review), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn create_review(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        review: &ReviewDraft,
    ) -> Result<Review, ApiError> {
        let url = self.url(&format!(
            "/reviews?userId={}&productId={}",
            urlencoding::encode(user_id.as_str()),
            urlencoding::encode(product_id.as_str())
        ));
        let request = self.inner.client.post(url).json(review);
        send_json(request, "reviews").await
    }

    /// Update an existing review.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingId` if the draft has no id, or another error
    /// if the request fails.
    #[instrument(skip(self, review))]
    pub async fn edit_review(&self, review: &ReviewDraft) -> Result<Review, ApiError> {
        let id = review.id.as_ref().ok_or(ApiError::MissingId("review"))?;
        let url = self.url(&format!("/reviews/{}", urlencoding::encode(id.as_str())));
        let request = self.inner.client.put(url).json(review);
        send_json(request, &format!("review {id}")).await
    }

    /// Check that the backend is reachable.
    ///
    /// Any HTTP answer below 500 counts as reachable.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be reached or answers with 5xx.
    pub async fn ping(&self) -> Result<(), ApiError> {
        let response = self.inner.client.get(self.url("/")).send().await?;
        let status = response.status();
        if status.is_server_error() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: "backend unavailable".to_string(),
            });
        }
        Ok(())
    }
}
