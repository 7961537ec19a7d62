//! Seller API client.
//!
//! Caches found sellers using `moka` so repeated visits to the same shop
//! page do not hit the backend every time.

use std::sync::Arc;

use moka::future::Cache;
use reqwest::StatusCode;
use tracing::{debug, instrument};
use vitrina_core::{SELLER_NOT_FOUND, Seller};

use super::ApiError;
use crate::config::CatalogApiConfig;

/// Client for looking up sellers by their public shop name.
#[derive(Clone)]
pub struct SellerClient {
    inner: Arc<SellerClientInner>,
}

struct SellerClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, Seller>,
}

impl SellerClient {
    /// Create a new seller client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &CatalogApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.seller_cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(SellerClientInner {
                client,
                base_url: config.base_url.clone(),
                cache,
            }),
        })
    }

    /// Look up a seller by shop name.
    ///
    /// The backend marks unknown shops either with a 404 or with a body of
    /// `{ "message": "Seller not found" }`; both map to `ApiError::NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for unknown shops, or another error if
    /// the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn get_seller_by_name(&self, name: &str) -> Result<Seller, ApiError> {
        if let Some(seller) = self.inner.cache.get(name).await {
            debug!("Cache hit for seller");
            return Ok(seller);
        }

        let url = format!(
            "{}/sellers?name={}",
            self.inner.base_url,
            urlencoding::encode(name)
        );
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(format!("seller {name}")));
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let value: serde_json::Value = serde_json::from_str(&body)?;
        if value.get("message").and_then(serde_json::Value::as_str) == Some(SELLER_NOT_FOUND) {
            return Err(ApiError::NotFound(format!("seller {name}")));
        }

        let seller: Seller = serde_json::from_value(value)?;
        self.inner
            .cache
            .insert(name.to_string(), seller.clone())
            .await;
        Ok(seller)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> SellerClient {
        SellerClient::new(&CatalogApiConfig::new(&server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_found_seller_is_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sellers"))
            .and(query_param("name", "lapiz"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "s1",
                "name": "lapiz",
                "nombreNegocio": "Lapiz SRL",
                "template_page": "3"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let sellers = client(&server);
        let first = sellers.get_seller_by_name("lapiz").await.unwrap();
        let second = sellers.get_seller_by_name("lapiz").await.unwrap();

        assert_eq!(first.id.as_str(), "s1");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_not_found_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sellers"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client(&server).get_seller_by_name("nadie").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_not_found_message_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sellers"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "message": "Seller not found" })),
            )
            .mount(&server)
            .await;

        let err = client(&server).get_seller_by_name("nadie").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_server_error_is_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sellers"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&server)
            .await;

        let sellers = client(&server);
        assert!(matches!(
            sellers.get_seller_by_name("lapiz").await,
            Err(ApiError::Status { status: 500, .. })
        ));
        assert!(sellers.get_seller_by_name("lapiz").await.is_err());
    }
}
