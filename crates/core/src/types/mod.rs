//! Core types for Vitrina.
//!
//! This module provides type-safe wrappers for the storefront domain.

pub mod id;
pub mod product;
pub mod seller;
pub mod theme;

pub use id::*;
pub use product::{Product, ProductDetail, Review, ReviewDraft, UserSummary};
pub use seller::{SELLER_NOT_FOUND, Seller, SellerState};
pub use theme::{Theme, ThemeError};
