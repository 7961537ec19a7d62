//! Stripe client for card payments.
//!
//! The checkout flow creates a `PaymentIntent` and confirms it in the same
//! request, using the payment method the browser tokenized with Stripe.js.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::config::StripeConfig;

/// Currency every charge is settled in.
pub const CHARGE_CURRENCY: &str = "usd";

/// Errors that can occur when charging through Stripe.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stripe rejected the request.
    #[error("Stripe error: {status} - {}", .error.message.as_deref().unwrap_or("no message"))]
    Stripe { status: u16, error: StripeErrorBody },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl PaymentError {
    /// Whether the failure was the card itself (declined, expired, ...).
    #[must_use]
    pub fn is_card_error(&self) -> bool {
        matches!(self, Self::Stripe { error, .. } if error.kind == "card_error")
    }

    /// Whether Stripe rejected the request parameters.
    #[must_use]
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Self::Stripe { error, .. } if error.kind == "invalid_request_error")
    }
}

/// The `error` object of a Stripe error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripeErrorBody {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decline_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorBody,
}

/// A charge requested by the checkout form.
#[derive(Debug, Clone)]
pub struct Charge {
    /// Stripe payment method id (`pm_...`).
    pub payment_method: String,
    /// Amount in the smallest currency unit (cents).
    pub amount: u64,
    pub description: String,
}

/// The subset of a Stripe `PaymentIntent` the storefront reads.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentIntent {
    pub id: String,
    pub status: String,
    pub amount: u64,
    pub currency: String,
}

/// Stripe API client.
#[derive(Clone)]
pub struct StripeClient {
    client: reqwest::Client,
    api_base: String,
    secret_key: SecretString,
}

impl StripeClient {
    /// Create a new Stripe client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &StripeConfig) -> Result<Self, PaymentError> {
        Ok(Self {
            client: reqwest::Client::builder().build()?,
            api_base: config.api_base.clone(),
            secret_key: config.secret_key.clone(),
        })
    }

    /// Create and immediately confirm a card payment.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::Stripe` if Stripe declines or rejects the
    /// payment, or another error if the request fails.
    #[instrument(skip(self, charge), fields(amount = charge.amount))]
    pub async fn create_and_confirm(&self, charge: &Charge) -> Result<PaymentIntent, PaymentError> {
        let url = format!("{}/v1/payment_intents", self.api_base);
        let amount = charge.amount.to_string();
        let form = [
            ("amount", amount.as_str()),
            ("currency", CHARGE_CURRENCY),
            ("description", charge.description.as_str()),
            ("payment_method", charge.payment_method.as_str()),
            ("payment_method_types[]", "card"),
            ("confirm", "true"),
        ];

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.secret_key.expose_secret())
            .form(&form)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let envelope: StripeErrorEnvelope = serde_json::from_str(&body)?;
            return Err(PaymentError::Stripe {
                status: status.as_u16(),
                error: envelope.error,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
