//! Push notifications through the Pusher Channels REST API.
//!
//! Requests are signed as Pusher expects: the body's MD5 goes into the
//! query string, and the method, path and sorted query are signed with
//! HMAC-SHA256 using the app secret.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use reqwest::Client;
use serde_json::json;
use sha2::Sha256;

use super::{Message, Notifier, NotifyError};

const EVENT_NAME: &str = "campaign";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PusherConfig {
    pub app_id: String,
    pub key: String,
    pub secret: String,
    pub cluster: String,
}

impl PusherConfig {
    /// `None` unless app id, key and secret are set; cluster defaults to mt1.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Some(Self {
            app_id: lookup("PUSHER_APP_ID")?,
            key: lookup("PUSHER_KEY")?,
            secret: lookup("PUSHER_SECRET")?,
            cluster: lookup("PUSHER_CLUSTER").unwrap_or_else(|| "mt1".to_string()),
        })
    }
}

pub struct PusherNotifier {
    client: Client,
    config: PusherConfig,
}

impl PusherNotifier {
    pub fn new(config: PusherConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn events_path(&self) -> String {
        format!("/apps/{}/events", self.config.app_id)
    }

    /// Full query string, signature included, for posting `body`.
    fn signed_query(&self, body: &str, timestamp: i64) -> Result<String, NotifyError> {
        let mut params = BTreeMap::new();
        params.insert("auth_key", self.config.key.clone());
        params.insert("auth_timestamp", timestamp.to_string());
        params.insert("auth_version", "1.0".to_string());
        params.insert("body_md5", hex::encode(Md5::digest(body.as_bytes())));

        let query = join_query(&params);
        let signature = sign(&self.config.secret, "POST", &self.events_path(), &query)?;
        Ok(format!("{}&auth_signature={}", query, signature))
    }
}

fn join_query(params: &BTreeMap<&str, String>) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Hex HMAC-SHA256 of `METHOD\npath\nquery`.
fn sign(secret: &str, method: &str, path: &str, query: &str) -> Result<String, NotifyError> {
    let to_sign = format!("{}\n{}\n{}", method, path, query);
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .map_err(|e| NotifyError::Signing(e.to_string()))?;
    mac.update(to_sign.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[async_trait]
impl Notifier for PusherNotifier {
    async fn send(&self, message: &Message) -> Result<(), NotifyError> {
        let Message::Push {
            channel,
            title,
            body,
            url,
        } = message
        else {
            return Err(NotifyError::WrongChannel("push"));
        };

        let data = json!({"title": title, "body_text": body, "url": url}).to_string();
        let payload = json!({
            "name": EVENT_NAME,
            "channels": [channel],
            "data": data,
        })
        .to_string();

        let url = format!(
            "https://api-{}.pusher.com{}?{}",
            self.config.cluster,
            self.events_path(),
            self.signed_query(&payload, Utc::now().timestamp())?
        );
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload)
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

        tracing::info!(channel = %channel, "Campaign push sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Worked example from the Pusher REST API documentation
    fn notifier() -> PusherNotifier {
        PusherNotifier::new(PusherConfig {
            app_id: "3".to_string(),
            key: "278d425bdf160c739803".to_string(),
            secret: "7ad3773142a6692b25b8".to_string(),
            cluster: "mt1".to_string(),
        })
    }

    #[test]
    fn test_signed_query_matches_reference() {
        let body = r#"{"name":"foo","channels":["project-3"],"data":"{\"some\":\"data\"}"}"#;
        let query = notifier().signed_query(body, 1353088179).unwrap();
        assert_eq!(
            query,
            "auth_key=278d425bdf160c739803&auth_timestamp=1353088179&auth_version=1.0\
             &body_md5=ec365a775a4cd0599faeb73354201b6f\
             &auth_signature=da454824c97ba181a32ccc17a72625ba02771f50b50e1e7430e47a1f3f457e6c"
        );
    }

    #[test]
    fn test_config_defaults_cluster() {
        let config = PusherConfig::from_lookup(|k| match k {
            "PUSHER_CLUSTER" => None,
            _ => Some("x".to_string()),
        })
        .unwrap();
        assert_eq!(config.cluster, "mt1");
    }
}
