//! Third-party services used by the storefront.
//!
//! # Services
//!
//! - `payments` - Stripe card payments for the checkout route

pub mod payments;

pub use payments::{Charge, PaymentError, PaymentIntent, StripeClient};
