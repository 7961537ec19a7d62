//! Clients for the Vitrina backend REST API.
//!
//! # APIs
//!
//! ## Catalog
//! - `GET /products`, `GET /products?name=`, `GET /products/{id}`
//! - `GET /products/shops/{sellerId}`
//! - `POST /products`, `PUT /products/{id}`
//! - `POST /reviews`, `PUT /reviews/{id}`
//!
//! ## Sellers
//! - `GET /sellers?name=` - look up a shop by its public name
//!
//! List endpoints wrap their payload as `{ "result": [...] }`; single-item
//! endpoints return the record directly.

mod catalog;
mod sellers;

pub use catalog::CatalogClient;
pub use sellers::SellerClient;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur when calling the backend API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A record was submitted without the identifier the endpoint requires.
    #[error("Missing {0} id")]
    MissingId(&'static str),
}

/// Send `request` and decode a JSON body of type `T`.
///
/// A 404 maps to `ApiError::NotFound(what)`; other non-success statuses map
/// to `ApiError::Status` with a truncated body.
async fn send_json<T: DeserializeOwned>(request: RequestBuilder, what: &str) -> Result<T, ApiError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound(what.to_string()));
    }

    if !status.is_success() {
        tracing::warn!(
            status = %status,
            body = %body.chars().take(500).collect::<String>(),
            "Backend API returned non-success status"
        );
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: body.chars().take(200).collect(),
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %body.chars().take(500).collect::<String>(),
            "Failed to parse backend API response"
        );
        ApiError::Parse(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("product p1".to_string());
        assert_eq!(err.to_string(), "Not found: product p1");

        let err = ApiError::Status {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 500 - boom");

        assert_eq!(ApiError::MissingId("review").to_string(), "Missing review id");
    }
}
