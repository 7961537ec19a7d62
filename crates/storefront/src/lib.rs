//! Vitrina storefront library.
//!
//! Client access to the catalog and seller backends, the product store, the
//! shop visibility context and the HTTP surface (shop status, checkout).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod shop;
pub mod state;
