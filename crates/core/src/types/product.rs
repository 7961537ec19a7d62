//! Catalog records as served by the remote catalog API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{ProductId, ReviewId, UserId};

/// A product listed in a shop's catalog.
///
/// Prices are decimals so the price sort has a total, exact order. On the
/// wire they are plain JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Units in stock.
    #[serde(default)]
    pub stock: u32,
    /// Price in the shop's local currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub price_local: Decimal,
    /// Optional price in US dollars.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price_dolar: Option<Decimal>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub suspended: bool,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub categories: String,
    #[serde(default)]
    pub description: String,
}

/// A product together with its reviews, as returned by `GET /products/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// The author of a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserSummary {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
}

/// A shopper's review of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub body: String,
    pub score: u8,
    pub user: UserSummary,
}

/// A partial review used as the payload for creating or editing a review.
///
/// Absent fields are left out of the request body entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReviewDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ReviewId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}
