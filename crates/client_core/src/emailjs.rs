use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::EmailJsRequest;
use tracing::warn;

use crate::form::{EmailSender, SendError};

pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// [`EmailSender`] backed by the provider's HTTP API.
pub struct EmailJsSender {
    client: Client,
    endpoint: String,
}

impl EmailJsSender {
    pub fn new() -> Self {
        Self::with_endpoint(EMAILJS_ENDPOINT)
    }

    /// Overridable endpoint, used by tests to point at a local stub.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl Default for EmailJsSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailSender for EmailJsSender {
    async fn send(&self, request: &EmailJsRequest) -> Result<(), SendError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let text = response.text().await.unwrap_or_default();
        warn!(%status, "email provider rejected send");
        Err(SendError::Provider(text))
    }
}
