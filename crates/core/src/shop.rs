//! Shop visibility resolution.
//!
//! Decides which page a shopper sees when visiting `/{shop_name}`: a loading
//! placeholder, a "no such shop" page, an "incomplete profile" page, a
//! "suspended" page, or the live themed storefront.
//!
//! Resolution is a pure function of the route parameter and the seller
//! slice. [`ShopResolver`] wraps it with a per-shop-name guard so the seller
//! fetch is requested at most once per name, however many times the state is
//! re-evaluated.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::SellerState;

/// The page state for a shop route. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderState {
    /// Seller data has been requested but not yet received.
    Loading,
    /// The route carried no shop name.
    NoShopName,
    /// The seller API reported that the shop does not exist.
    NotFound,
    /// The seller exists but has not filled in their storefront profile.
    Incomplete,
    /// The seller's storefront has been suspended.
    Suspended,
    /// The storefront is live.
    Active,
}

/// Outcome of resolving a shop route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub state: RenderState,
    /// Shop name whose seller record should be fetched, if any.
    pub fetch: Option<String>,
}

impl Resolution {
    const fn settled(state: RenderState) -> Self {
        Self { state, fetch: None }
    }
}

/// Resolve the page state for `shop_name` given the current seller slice.
///
/// Rules are checked in order and the first match wins:
/// 1. no shop name: `NoShopName`
/// 2. nothing loaded and not known missing: `Loading`, requesting a fetch
/// 3. the seller API said "Seller not found": `NotFound`
/// 4. complete profile: `Suspended` or `Active` depending on the flag
/// 5. otherwise: `Incomplete`
#[must_use]
pub fn resolve(shop_name: Option<&str>, sellers: &SellerState) -> Resolution {
    let Some(name) = shop_name.filter(|n| !n.is_empty()) else {
        return Resolution::settled(RenderState::NoShopName);
    };

    if !sellers.is_loaded() && !sellers.is_not_found() {
        return Resolution {
            state: RenderState::Loading,
            fetch: Some(name.to_string()),
        };
    }

    if sellers.is_not_found() {
        return Resolution::settled(RenderState::NotFound);
    }

    match &sellers.seller {
        Some(seller) if seller.is_complete() => Resolution::settled(if seller.suspended {
            RenderState::Suspended
        } else {
            RenderState::Active
        }),
        _ => Resolution::settled(RenderState::Incomplete),
    }
}

/// Stateful resolver that suppresses repeat fetch requests.
///
/// Each distinct shop name is handed out for fetching once. Later
/// evaluations for the same name still report `Loading` until seller data
/// arrives, but carry no fetch request.
#[derive(Debug, Default)]
pub struct ShopResolver {
    requested: HashSet<String>,
}

impl ShopResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the page state, handing out each shop name's fetch only once.
    pub fn evaluate(&mut self, shop_name: Option<&str>, sellers: &SellerState) -> Resolution {
        let mut resolution = resolve(shop_name, sellers);
        if let Some(name) = resolution.fetch.take()
            && self.requested.insert(name.clone())
        {
            resolution.fetch = Some(name);
        }
        resolution
    }

    /// Whether a fetch has already been handed out for `shop_name`.
    #[must_use]
    pub fn has_requested(&self, shop_name: &str) -> bool {
        self.requested.contains(shop_name)
    }

    /// Allow the fetch for `shop_name` to be requested again.
    ///
    /// Used after a transport failure, so a later evaluation can retry.
    pub fn reset(&mut self, shop_name: &str) {
        self.requested.remove(shop_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SELLER_NOT_FOUND, Seller, SellerId};

    fn complete_seller(suspended: bool) -> Seller {
        Seller {
            id: SellerId::new("s1"),
            name: "lapiz".to_string(),
            business_name: Some("Lapiz SRL".to_string()),
            description: Some("Papeleria".to_string()),
            logo: Some("logo.png".to_string()),
            categories: vec!["papeleria".to_string()],
            template_id: Some("1".to_string()),
            suspended,
        }
    }

    fn loaded(seller: Seller) -> SellerState {
        SellerState {
            seller: Some(seller),
            error: None,
        }
    }

    #[test]
    fn test_no_shop_name() {
        let state = SellerState::default();
        assert_eq!(resolve(None, &state).state, RenderState::NoShopName);
        assert_eq!(resolve(Some(""), &state).state, RenderState::NoShopName);

        // Takes precedence even when a seller is loaded.
        let state = loaded(complete_seller(false));
        assert_eq!(resolve(Some(""), &state).state, RenderState::NoShopName);
    }

    #[test]
    fn test_unloaded_seller_requests_fetch() {
        let resolution = resolve(Some("lapiz"), &SellerState::default());
        assert_eq!(resolution.state, RenderState::Loading);
        assert_eq!(resolution.fetch.as_deref(), Some("lapiz"));
    }

    #[test]
    fn test_seller_without_id_counts_as_unloaded() {
        let state = loaded(Seller::default());
        let resolution = resolve(Some("lapiz"), &state);
        assert_eq!(resolution.state, RenderState::Loading);
    }

    #[test]
    fn test_not_found_marker() {
        let state = SellerState {
            seller: None,
            error: Some(SELLER_NOT_FOUND.to_string()),
        };
        let resolution = resolve(Some("nadie"), &state);
        assert_eq!(resolution.state, RenderState::NotFound);
        assert_eq!(resolution.fetch, None);
    }

    #[test]
    fn test_other_errors_keep_loading() {
        let state = SellerState {
            seller: None,
            error: Some("Seller was not found".to_string()),
        };
        assert_eq!(resolve(Some("x"), &state).state, RenderState::Loading);
    }

    #[test]
    fn test_active_and_suspended() {
        let active = loaded(complete_seller(false));
        assert_eq!(resolve(Some("lapiz"), &active).state, RenderState::Active);

        let suspended = loaded(complete_seller(true));
        assert_eq!(
            resolve(Some("lapiz"), &suspended).state,
            RenderState::Suspended
        );
    }

    #[test]
    fn test_incomplete_profile() {
        let mut seller = complete_seller(true);
        seller.logo = None;
        // Suspension only matters once the profile is complete.
        assert_eq!(
            resolve(Some("lapiz"), &loaded(seller)).state,
            RenderState::Incomplete
        );
    }

    #[test]
    fn test_resolver_requests_each_name_once() {
        let mut resolver = ShopResolver::new();
        let state = SellerState::default();

        let first = resolver.evaluate(Some("lapiz"), &state);
        assert_eq!(first.fetch.as_deref(), Some("lapiz"));

        let second = resolver.evaluate(Some("lapiz"), &state);
        assert_eq!(second.state, RenderState::Loading);
        assert_eq!(second.fetch, None);

        let other = resolver.evaluate(Some("goma"), &state);
        assert_eq!(other.fetch.as_deref(), Some("goma"));
    }

    #[test]
    fn test_resolver_reset_allows_retry() {
        let mut resolver = ShopResolver::new();
        let state = SellerState::default();

        let _ = resolver.evaluate(Some("lapiz"), &state);
        assert!(resolver.has_requested("lapiz"));

        resolver.reset("lapiz");
        assert!(!resolver.has_requested("lapiz"));
        let retry = resolver.evaluate(Some("lapiz"), &state);
        assert_eq!(retry.fetch.as_deref(), Some("lapiz"));
    }
}
