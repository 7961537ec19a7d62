//! Storefront visual themes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors selecting a storefront theme.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    /// The seller has not chosen a template.
    #[error("seller has no template selected")]
    MissingTemplate,

    /// The template identifier does not map to any theme.
    #[error("unknown storefront template: {0:?}")]
    UnknownTemplate(String),
}

/// The visual theme a shop page is rendered with.
///
/// Sellers pick a template by identifier. Unrecognized identifiers are kept
/// as `Unknown` so callers must handle them explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Template "1".
    A,
    /// Template "2".
    B,
    /// Template "3".
    C,
    /// Any other template identifier.
    Unknown(String),
}

impl Theme {
    /// Map a template identifier to its theme.
    #[must_use]
    pub fn from_template(template_id: &str) -> Self {
        match template_id {
            "1" => Self::A,
            "2" => Self::B,
            "3" => Self::C,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Reject `Unknown`, passing known themes through.
    ///
    /// # Errors
    ///
    /// Returns `ThemeError::UnknownTemplate` carrying the unrecognized id.
    pub fn known(self) -> Result<Self, ThemeError> {
        match self {
            Self::Unknown(id) => Err(ThemeError::UnknownTemplate(id)),
            theme => Ok(theme),
        }
    }

    /// Short stable name used in API responses.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
            Self::Unknown(_) => "unknown",
        }
    }
}
