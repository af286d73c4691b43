//! Payment provider seam.

pub mod stripe;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::utils::numeric::leading_float;

pub use stripe::StripeClient;

/// Currency every intent is created in.
pub const CURRENCY: &str = "usd";

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment provider key is not configured")]
    MissingKey,
    #[error("payment provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("payment provider rejected the request ({status}): {message}")]
    Api { status: u16, message: String },
}

/// A created payment intent. Only `client_secret` is handed to the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn create_payment_intent(
        &self,
        amount_cents: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError>;
}

/// Amount in cents for a client-supplied `price`, or `None` when no intent
/// should be created.
///
/// `None` covers a missing or falsy price (`null`, `0`, `""`, `false`), a
/// price with no readable number, and anything under one cent.
pub fn price_to_cents(price: Option<&Value>) -> Option<i64> {
    let price = price?;
    let falsy = match price {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    };
    if falsy {
        return None;
    }

    let cents = leading_float(price)? * 100.0;
    if !cents.is_finite() || cents < 1.0 {
        return None;
    }
    Some(cents.round() as i64)
}
