//! Sellers (shops) and the seller data the storefront resolver reads.

use serde::{Deserialize, Serialize};

use super::id::SellerId;
use super::theme::{Theme, ThemeError};

/// Error message the seller API uses to mark an unknown shop name.
pub const SELLER_NOT_FOUND: &str = "Seller not found";

/// A seller's public shop profile.
///
/// Read-only from the storefront's point of view. Field names on the wire
/// follow the backend's schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Seller {
    pub id: SellerId,
    #[serde(default)]
    pub name: String,
    /// Registered business name shown on the storefront header.
    #[serde(default, rename = "nombreNegocio")]
    pub business_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "imageLogo")]
    pub logo: Option<String>,
    #[serde(default, rename = "categorias")]
    pub categories: Vec<String>,
    /// Storefront template chosen by the seller ("1", "2" or "3").
    #[serde(default, rename = "template_page")]
    pub template_id: Option<String>,
    #[serde(default)]
    pub suspended: bool,
}

impl Seller {
    /// Whether every field a public storefront needs has been filled in.
    ///
    /// Requires a non-empty category list, description, logo, business name
    /// and template identifier.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        fn filled(value: Option<&String>) -> bool {
            value.is_some_and(|v| !v.is_empty())
        }

        !self.categories.is_empty()
            && filled(self.description.as_ref())
            && filled(self.logo.as_ref())
            && filled(self.business_name.as_ref())
            && filled(self.template_id.as_ref())
    }

    /// Select the storefront theme from the seller's template identifier.
    ///
    /// # Errors
    ///
    /// Returns `ThemeError::MissingTemplate` if no template is set and
    /// `ThemeError::UnknownTemplate` if the identifier is not one of the
    /// known templates.
    pub fn theme(&self) -> Result<Theme, ThemeError> {
        let template = self
            .template_id
            .as_deref()
            .ok_or(ThemeError::MissingTemplate)?;
        Theme::from_template(template).known()
    }
}

/// The seller data last fetched for the current shop route.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SellerState {
    /// The loaded seller, if a fetch has succeeded.
    pub seller: Option<Seller>,
    /// Message of the last failed seller fetch.
    pub error: Option<String>,
}

impl SellerState {
    /// Whether a seller with a real identifier has been loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.seller.as_ref().is_some_and(|s| !s.id.is_empty())
    }

    /// Whether the last fetch reported that the shop does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.error.as_deref() == Some(SELLER_NOT_FOUND)
    }

    /// Record a successful fetch, clearing any previous error.
    pub fn record_loaded(&mut self, seller: Seller) {
        self.seller = Some(seller);
        self.error = None;
    }

    /// Record a failed fetch.
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }
}
