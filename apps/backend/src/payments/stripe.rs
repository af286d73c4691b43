use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{PaymentError, PaymentIntent, PaymentProvider};

pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Stripe `PaymentIntents` API client.
#[derive(Clone)]
pub struct StripeClient {
    http: Client,
    api_base: String,
    secret_key: Option<String>,
}

#[derive(Deserialize)]
struct IntentResponse {
    id: String,
    client_secret: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

impl StripeClient {
    pub fn new(secret_key: Option<String>, api_base: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            secret_key: secret_key.filter(|k| !k.is_empty()),
        }
    }

    /// `STRIPE_SECRET_KEY` and `STRIPE_API_BASE` (defaults to the public API).
    pub fn from_env() -> Self {
        let api_base =
            std::env::var("STRIPE_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self::new(std::env::var("STRIPE_SECRET_KEY").ok(), api_base)
    }

    pub fn has_key(&self) -> bool {
        self.secret_key.is_some()
    }
}

impl std::fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeClient")
            .field("api_base", &self.api_base)
            .field("has_key", &self.has_key())
            .finish()
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    async fn create_payment_intent(
        &self,
        amount_cents: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        let key = self.secret_key.as_deref().ok_or(PaymentError::MissingKey)?;
        let amount = amount_cents.to_string();

        let response = self
            .http
            .post(format!("{}/v1/payment_intents", self.api_base))
            .bearer_auth(key)
            .form(&[
                ("amount", amount.as_str()),
                ("currency", currency),
                ("automatic_payment_methods[enabled]", "true"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorEnvelope>()
                .await
                .ok()
                .and_then(|envelope| envelope.error.message)
                .unwrap_or_else(|| status.to_string());
            warn!(status = status.as_u16(), %message, "payment intent rejected");
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let intent: IntentResponse = response.json().await?;
        debug!(intent_id = %intent.id, amount_cents, "payment intent created");

        Ok(PaymentIntent {
            id: intent.id,
            client_secret: intent.client_secret,
        })
    }
}
