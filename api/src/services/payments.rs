use common::config::Config;
use serde::Deserialize;
use services::{WorkflowError, WorkflowResult};

#[derive(Deserialize)]
struct IntentResponse {
    client_secret: String,
}

/// Thin client for the payment collaborator.
///
/// The backend never finalizes charges; it only creates intents and hands
/// the opaque client secret back to the frontend.
#[derive(Clone)]
pub struct PaymentGateway {
    client: reqwest::Client,
    base_url: Option<String>,
    api_key: Option<String>,
}

impl PaymentGateway {
    pub fn from_config() -> Self {
        let config = Config::get();
        Self {
            client: reqwest::Client::new(),
            base_url: config.payment_api_url.clone(),
            api_key: config.payment_api_key.clone(),
        }
    }

    /// Creates a payment intent and returns the client secret.
    pub async fn create_intent(&self, amount_cents: u64, currency: &str) -> WorkflowResult<String> {
        let (Some(base), Some(key)) = (&self.base_url, &self.api_key) else {
            return Err(WorkflowError::bad_request(
                "Payment gateway is not configured",
            ));
        };

        let url = format!("{}/v1/payment_intents", base.trim_end_matches('/'));
        let resp = self
            .client
            .post(&url)
            .bearer_auth(key)
            .form(&[
                ("amount", amount_cents.to_string()),
                ("currency", currency.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "payment gateway request failed");
                WorkflowError::bad_request("Payment gateway unreachable")
            })?;

        if !resp.status().is_success() {
            tracing::error!(status = %resp.status(), "payment gateway rejected intent");
            return Err(WorkflowError::bad_request(
                "Payment gateway rejected the request",
            ));
        }

        let intent: IntentResponse = resp.json().await.map_err(|e| {
            tracing::error!(error = %e, "malformed payment gateway response");
            WorkflowError::bad_request("Malformed payment gateway response")
        })?;
        Ok(intent.client_secret)
    }
}
