//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (catalog API reachable)
//!
//! # Shops
//! GET  /shops/{shop_name}      - Which page state to render, and its theme
//!
//! # Checkout
//! POST /api/checkout           - Create and confirm a card payment
//! ```

pub mod checkout;
pub mod shops;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the checkout API routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new().route("/checkout", post(checkout::checkout))
}

/// Create the shop routes router.
pub fn shop_routes() -> Router<AppState> {
    Router::new().route("/{shop_name}", get(shops::show))
}

/// Create all storefront routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api", checkout_routes())
        .nest("/shops", shop_routes())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::net::{IpAddr, Ipv4Addr};

    use secrecy::SecretString;

    use crate::config::{CatalogApiConfig, StorefrontConfig, StripeConfig};
    use crate::state::AppState;

    /// State whose catalog and Stripe clients both point at `base_url`.
    #[allow(clippy::unwrap_used)]
    pub fn state(base_url: &str) -> AppState {
        let config = StorefrontConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            allowed_origins: vec![],
            catalog: CatalogApiConfig::new(base_url),
            stripe: StripeConfig {
                api_base: base_url.to_string(),
                secret_key: SecretString::from("sk_test_fake7Qm2Vx9Lp4"),
            },
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };
        AppState::new(config).unwrap()
    }
}
