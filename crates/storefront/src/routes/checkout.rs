//! Checkout route handler.
//!
//! The browser tokenizes the card with Stripe.js and posts the resulting
//! payment method id together with the amount. The charge is created and
//! confirmed in one step.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use crate::error::{AppError, add_breadcrumb};
use crate::services::payments::StripeErrorBody;
use crate::services::{Charge, PaymentError};
use crate::state::AppState;

/// Checkout request body.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    /// Stripe payment method id.
    pub id: String,
    /// Amount in cents.
    pub amount: i64,
    #[serde(default)]
    pub description: String,
}

/// Checkout success body.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub message: &'static str,
}

/// Create and confirm a payment.
///
/// POST /api/checkout
///
/// Responds `{"message": "Success"}` when the charge is confirmed. Failures
/// carry the Stripe error object as `message`, with 402 for card errors,
/// 400 for rejected parameters and 502 when Stripe cannot be reached.
#[instrument(skip_all, fields(amount = request.amount))]
pub async fn checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Response {
    if request.id.trim().is_empty() {
        return AppError::BadRequest("payment method id is required".to_string()).into_response();
    }
    let amount = match u64::try_from(request.amount) {
        Ok(amount) if amount > 0 => amount,
        _ => {
            return AppError::BadRequest("amount must be positive".to_string()).into_response();
        }
    };

    let charge = Charge {
        payment_method: request.id,
        amount,
        description: request.description,
    };

    match state.stripe().create_and_confirm(&charge).await {
        Ok(intent) => {
            tracing::info!(payment_intent = %intent.id, status = %intent.status, "Payment confirmed");
            add_breadcrumb("checkout", "Payment confirmed", Some(&[("payment_intent", intent.id.as_str())]));
            (StatusCode::OK, Json(CheckoutResponse { message: "Success" })).into_response()
        }
        Err(err) => payment_failure(&err),
    }
}

/// Render a payment failure with a status matching its cause.
fn payment_failure(err: &PaymentError) -> Response {
    let (status, body) = match err {
        PaymentError::Stripe { error, .. } if err.is_card_error() => {
            (StatusCode::PAYMENT_REQUIRED, error.clone())
        }
        PaymentError::Stripe { error, .. } if err.is_invalid_request() => {
            (StatusCode::BAD_REQUEST, error.clone())
        }
        PaymentError::Stripe { error, .. } => (StatusCode::BAD_GATEWAY, error.clone()),
        PaymentError::Http(_) => (
            StatusCode::BAD_GATEWAY,
            upstream_error("api_connection_error", "Payment provider unreachable"),
        ),
        PaymentError::Parse(_) => (
            StatusCode::BAD_GATEWAY,
            upstream_error("api_error", "Unexpected payment provider response"),
        ),
    };

    if status.is_server_error() {
        let event_id = sentry::capture_error(err);
        tracing::error!(error = %err, sentry_event_id = %event_id, "Payment failed");
    } else {
        tracing::warn!(error = %err, "Payment rejected");
    }

    (status, Json(json!({ "message": body }))).into_response()
}

fn upstream_error(kind: &str, message: &str) -> StripeErrorBody {
    StripeErrorBody {
        kind: kind.to_string(),
        code: None,
        decline_code: None,
        message: Some(message.to_string()),
        param: None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::routes::{routes, test_support};

    async fn post_checkout(server: &MockServer, body: Value) -> (StatusCode, Value) {
        let app = routes().with_state(test_support::state(&server.uri()));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/checkout")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_checkout_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "pi_1",
                "status": "succeeded",
                "amount": 1500,
                "currency": "usd"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (status, body) = post_checkout(
            &server,
            json!({ "id": "pm_card_visa", "amount": 1500, "description": "Pedido" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Success" }));
    }

    #[tokio::test]
    async fn test_checkout_card_declined_is_402() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .respond_with(ResponseTemplate::new(402).set_body_json(json!({
                "error": { "type": "card_error", "code": "card_declined", "message": "Declined" }
            })))
            .mount(&server)
            .await;

        let (status, body) =
            post_checkout(&server, json!({ "id": "pm_x", "amount": 100, "description": "" })).await;

        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(body["message"]["type"], "card_error");
        assert_eq!(body["message"]["code"], "card_declined");
    }

    #[tokio::test]
    async fn test_checkout_invalid_request_is_400() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "type": "invalid_request_error", "param": "payment_method" }
            })))
            .mount(&server)
            .await;

        let (status, body) =
            post_checkout(&server, json!({ "id": "bogus", "amount": 100 })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"]["param"], "payment_method");
    }

    #[tokio::test]
    async fn test_checkout_rejects_non_positive_amount() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (status, _) =
            post_checkout(&server, json!({ "id": "pm_x", "amount": 0, "description": "" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) =
            post_checkout(&server, json!({ "id": "pm_x", "amount": -5, "description": "" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_checkout_stripe_outage_is_502() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": { "type": "api_error", "message": "Something went wrong" }
            })))
            .mount(&server)
            .await;

        let (status, body) =
            post_checkout(&server, json!({ "id": "pm_x", "amount": 100 })).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["message"]["type"], "api_error");
    }
}
