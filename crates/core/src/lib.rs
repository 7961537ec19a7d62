//! Vitrina Core - Shared types and storefront decision logic.
//!
//! This crate provides the pieces of the storefront that contain no I/O:
//! - `types` - Sellers, products, reviews, themes and typed IDs
//! - `shop` - The shop visibility resolver (which page state to render)
//! - `catalog` - The product catalog state and its reducer
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no HTTP
//! clients, no async runtime. The `storefront` crate performs the requests
//! and feeds their outcomes back in here.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod shop;
pub mod types;

pub use types::*;
