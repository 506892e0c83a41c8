//! SMS through the Twilio REST API.

use async_trait::async_trait;
use reqwest::Client;

use super::{Message, Notifier, NotifyError};

const TWILIO_API_URL: &str = "https://api.twilio.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
}

impl TwilioConfig {
    /// `None` unless SID, token and sender number are all set.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Some(Self {
            account_sid: lookup("TWILIO_ACCOUNT_SID")?,
            auth_token: lookup("TWILIO_AUTH_TOKEN")?,
            from_number: lookup("TWILIO_FROM_NUMBER")?,
        })
    }
}

pub struct TwilioNotifier {
    client: Client,
    config: TwilioConfig,
    base_url: String,
}

impl TwilioNotifier {
    pub fn new(config: TwilioConfig) -> Self {
        Self::with_base_url(config, TWILIO_API_URL)
    }

    pub fn with_base_url(config: TwilioConfig, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            config,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.config.account_sid
        )
    }
}

#[async_trait]
impl Notifier for TwilioNotifier {
    async fn send(&self, message: &Message) -> Result<(), NotifyError> {
        let Message::Sms { to, body } = message else {
            return Err(NotifyError::WrongChannel("sms"));
        };

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("To", to.as_str()),
                ("From", self.config.from_number.as_str()),
                ("Body", body.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NotifyError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        tracing::info!(to = %to, "Campaign SMS sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TwilioConfig {
        TwilioConfig {
            account_sid: "AC123".to_string(),
            auth_token: "secret".to_string(),
            from_number: "+15550000".to_string(),
        }
    }

    #[test]
    fn test_config_needs_all_three_values() {
        assert_eq!(
            TwilioConfig::from_lookup(|k| (k != "TWILIO_FROM_NUMBER").then(|| "x".to_string())),
            None
        );
        assert!(TwilioConfig::from_lookup(|_| Some("x".to_string())).is_some());
    }

    #[test]
    fn test_messages_url() {
        let notifier = TwilioNotifier::with_base_url(config(), "http://localhost:9999/");
        assert_eq!(
            notifier.messages_url(),
            "http://localhost:9999/2010-04-01/Accounts/AC123/Messages.json"
        );
    }
}
