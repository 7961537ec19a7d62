//! Shop page context: drives the visibility resolver with real seller data.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument, warn};
use vitrina_core::shop::{RenderState, ShopResolver};
use vitrina_core::{SELLER_NOT_FOUND, SellerState, Theme, ThemeError};

use crate::api::{ApiError, SellerClient};

/// Errors producing a shop view.
#[derive(Debug, Error)]
pub enum ShopError {
    /// The seller lookup failed for a reason other than "not found".
    #[error("Seller lookup failed: {0}")]
    Api(#[from] ApiError),

    /// The shop is active but its template cannot be rendered.
    #[error("Theme error: {0}")]
    Theme(#[from] ThemeError),
}

/// What the shop route should render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShopView {
    pub state: RenderState,
    /// Present only for active shops.
    pub theme: Option<Theme>,
}

/// Seller slice and resolver for one visitor's shop navigation.
///
/// Changing the shop name discards the previous shop's seller data, so the
/// resolver never judges one shop by another shop's profile.
pub struct ShopContext {
    sellers: SellerClient,
    seller_state: SellerState,
    resolver: ShopResolver,
    current: Option<String>,
}

impl ShopContext {
    #[must_use]
    pub fn new(sellers: SellerClient) -> Self {
        Self {
            sellers,
            seller_state: SellerState::default(),
            resolver: ShopResolver::new(),
            current: None,
        }
    }

    /// The seller data currently held.
    #[must_use]
    pub const fn seller_state(&self) -> &SellerState {
        &self.seller_state
    }

    /// Recompute the render state for `shop_name`.
    ///
    /// Fetches the seller when the resolver asks for it (at most once per
    /// shop name) and resolves again with the result.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the seller fetch fails for a reason other than
    /// "not found". The fetch guard is released so a later call can retry.
    #[instrument(skip(self))]
    pub async fn evaluate(&mut self, shop_name: Option<&str>) -> Result<RenderState, ApiError> {
        self.switch_to(shop_name);

        let resolution = self.resolver.evaluate(shop_name, &self.seller_state);
        let Some(name) = resolution.fetch else {
            return Ok(resolution.state);
        };

        match self.sellers.get_seller_by_name(&name).await {
            Ok(seller) => self.seller_state.record_loaded(seller),
            Err(ApiError::NotFound(_)) => {
                info!(shop = %name, "Shop does not exist");
                self.seller_state.record_error(SELLER_NOT_FOUND);
            }
            Err(err) => {
                warn!(shop = %name, error = %err, "Seller lookup failed");
                self.resolver.reset(&name);
                self.seller_state.record_error(err.to_string());
                return Err(err);
            }
        }

        Ok(self.resolver.evaluate(shop_name, &self.seller_state).state)
    }

    /// Resolve the page for `shop_name`, including the theme for active shops.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Api` if the seller lookup fails, and
    /// `ShopError::Theme` if an active shop has an unknown template.
    pub async fn view(&mut self, shop_name: Option<&str>) -> Result<ShopView, ShopError> {
        let state = self.evaluate(shop_name).await?;
        let theme = match (state, &self.seller_state.seller) {
            (RenderState::Active, Some(seller)) => Some(seller.theme()?),
            _ => None,
        };
        Ok(ShopView { state, theme })
    }

    fn switch_to(&mut self, shop_name: Option<&str>) {
        if self.current.as_deref() == shop_name {
            return;
        }
        if let Some(previous) = self.current.take() {
            self.resolver.reset(&previous);
        }
        self.seller_state = SellerState::default();
        self.current = shop_name.map(String::from);
    }
}
