use folio_schema::ContactMessage;
use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("form relay unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("form relay rejected submission ({code})")]
    Rejected { code: StatusCode },
}

/// Third-party contact-form relay: a single JSON POST, 2xx means delivered.
#[derive(Debug, Clone)]
pub struct FormRelay {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct RelayPayload<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
    #[serde(rename = "_subject")]
    subject: String,
    #[serde(rename = "_replyto")]
    reply_to: &'a str,
}

impl FormRelay {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub async fn submit(&self, message: &ContactMessage) -> Result<(), RelayError> {
        let payload = RelayPayload {
            name: &message.name,
            email: &message.email,
            message: &message.message,
            subject: format!("Portfolio Contact - {}", message.name),
            reply_to: &message.email,
        };
        let resp = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(&payload)
            .send()
            .await?;

        let code = resp.status();
        if code.is_success() {
            Ok(())
        } else {
            Err(RelayError::Rejected { code })
        }
    }
}
