use serde_json::json;
use thiserror::Error;

use crate::config::NotifyConfig;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Webhook transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Webhook rejected message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Chat webhook that announces new contact-form submissions.
#[derive(Debug, Clone)]
pub struct Notifier {
    client: reqwest::Client,
    endpoint: String,
    chat_id: String,
}

impl Notifier {
    pub fn new(api_base: &str, bot_token: &str, chat_id: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/bot{}/sendMessage", api_base.trim_end_matches('/'), bot_token),
            chat_id: chat_id.to_string(),
        }
    }

    /// `None` when disabled or missing credentials.
    pub fn from_config(config: &NotifyConfig) -> Option<Self> {
        if !config.enabled || config.bot_token.is_empty() || config.chat_id.is_empty() {
            return None;
        }
        Some(Self::new(&config.api_base, &config.bot_token, &config.chat_id))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "chat_id": self.chat_id, "text": text }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(enabled: bool, token: &str) -> NotifyConfig {
        NotifyConfig {
            enabled,
            api_base: "https://api.telegram.org/".to_string(),
            bot_token: token.to_string(),
            chat_id: "42".to_string(),
        }
    }

    #[test]
    fn endpoint_includes_bot_token() {
        let notifier = Notifier::from_config(&config(true, "abc:123")).unwrap();
        assert_eq!(notifier.endpoint(), "https://api.telegram.org/botabc:123/sendMessage");
    }

    #[test]
    fn disabled_or_unconfigured_is_none() {
        assert!(Notifier::from_config(&config(false, "abc")).is_none());
        assert!(Notifier::from_config(&config(true, "")).is_none());
    }

    #[tokio::test]
    async fn unreachable_webhook_is_an_error() {
        let notifier = Notifier::new("http://127.0.0.1:9", "t", "1");
        assert!(matches!(notifier.send("hi").await, Err(NotifyError::Transport(_))));
    }
}
