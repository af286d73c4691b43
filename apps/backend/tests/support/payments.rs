use async_trait::async_trait;
use meal_lounge::payments::{PaymentError, PaymentIntent, PaymentProvider};
use parking_lot::Mutex;

/// Payment provider double: records every call and answers with a
/// deterministic client secret, or fails when built with [`failing`].
///
/// [`failing`]: RecordingPayments::failing
#[derive(Default)]
pub struct RecordingPayments {
    calls: Mutex<Vec<(i64, String)>>,
    fail_with: Option<String>,
}

impl RecordingPayments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(i64, String)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl PaymentProvider for RecordingPayments {
    async fn create_payment_intent(
        &self,
        amount_cents: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        self.calls.lock().push((amount_cents, currency.to_string()));

        if let Some(message) = &self.fail_with {
            return Err(PaymentError::Api {
                status: 402,
                message: message.clone(),
            });
        }

        Ok(PaymentIntent {
            id: format!("pi_test_{amount_cents}"),
            client_secret: format!("pi_test_{amount_cents}_secret"),
        })
    }
}
