use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::app::Result;
use crate::config::DeliveryConfig;
use crate::notifier::{DeliveryError, DeliveryReceipt, Notifier, OutboundMessage};

/// Client for `POST /emails` on the Resend API.
pub struct ResendNotifier {
    client: Client,
    api_key: String,
    endpoint: String,
}

#[derive(Deserialize)]
struct SendResponse {
    id: String,
}

#[derive(Deserialize, Default)]
struct ErrorResponse {
    #[serde(default)]
    name: String,
    #[serde(default)]
    message: String,
}

impl ResendNotifier {
    pub fn new(api_key: impl Into<String>, config: &DeliveryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("trendmail/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(DeliveryError::Transport)?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: format!("{}/emails", config.api_base.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn send(
        &self,
        message: &OutboundMessage,
    ) -> std::result::Result<DeliveryReceipt, DeliveryError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body: SendResponse = response.json().await?;
            tracing::info!(id = %body.id, recipients = message.to.len(), "Email accepted");
            return Ok(DeliveryReceipt {
                id: body.id,
                recipients: message.to.clone(),
            });
        }

        let text = response.text().await.unwrap_or_default();
        Err(classify(status, &text))
    }
}

/// Map a failed API response onto the delivery error taxonomy.
fn classify(status: StatusCode, body: &str) -> DeliveryError {
    let error: ErrorResponse = serde_json::from_str(body).unwrap_or_default();
    let message = if error.message.is_empty() {
        body.trim().to_string()
    } else {
        error.message
    };
    let lowered = message.to_lowercase();

    if status == StatusCode::UNAUTHORIZED || error.name.to_ascii_lowercase().ends_with("api_key") {
        DeliveryError::InvalidCredential(message)
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        DeliveryError::RateLimited(message)
    } else if lowered.contains("testing emails") {
        DeliveryError::Restricted(message)
    } else if lowered.contains("not verified") || lowered.contains("verify a domain") {
        DeliveryError::SenderUnverified(message)
    } else if status == StatusCode::UNPROCESSABLE_ENTITY {
        DeliveryError::RecipientRejected(message)
    } else {
        DeliveryError::Rejected {
            status: status.as_u16(),
            message,
        }
    }
}
