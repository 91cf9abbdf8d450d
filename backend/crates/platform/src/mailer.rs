//! Mail Dispatch
//!
//! Outbound mail is best-effort everywhere in this system: callers log
//! failures and move on, they never fail the request over a missed mail.
//!
//! Two transports are provided:
//! - [`TracingMailer`] writes the mail to the log (development default)
//! - [`WebhookMailer`] posts JSON to an HTTP mail gateway

use thiserror::Error;

/// Mail dispatch errors
#[derive(Debug, Error)]
pub enum MailError {
    /// Transport-level failure (network, gateway)
    #[error("Mail transport failed: {0}")]
    Transport(String),

    /// Gateway rejected the message
    #[error("Mail gateway rejected message: status {0}")]
    Rejected(u16),
}

/// Outbound mail transport
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    /// Send a plain-text mail. Best-effort; callers decide whether
    /// a failure matters.
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

/// Development transport that logs the mail instead of sending it
#[derive(Debug, Clone, Default)]
pub struct TracingMailer;

impl Mailer for TracingMailer {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        tracing::info!(to = %to, subject = %subject, body = %body, "Mail (not sent, logging transport)");
        Ok(())
    }
}

/// Transport that posts the mail as JSON to an HTTP gateway
#[derive(Debug, Clone)]
pub struct WebhookMailer {
    client: reqwest::Client,
    endpoint: String,
    from: String,
}

impl WebhookMailer {
    pub fn new(endpoint: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            from: from.into(),
        }
    }
}

impl Mailer for WebhookMailer {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        let payload = serde_json::json!({
            "from": self.from,
            "to": to,
            "subject": subject,
            "body": body,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MailError::Rejected(response.status().as_u16()));
        }

        Ok(())
    }
}

/// Transport chosen at startup from the environment
#[derive(Debug, Clone)]
pub enum MailTransport {
    Tracing(TracingMailer),
    Webhook(WebhookMailer),
}

impl Mailer for MailTransport {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        // Qualified calls: the trait_variant blanket impl makes a plain
        // method call ambiguous here
        match self {
            MailTransport::Tracing(m) => Mailer::send_mail(m, to, subject, body).await,
            MailTransport::Webhook(m) => Mailer::send_mail(m, to, subject, body).await,
        }
    }
}
