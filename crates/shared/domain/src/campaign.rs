//! Email / SMS / push campaigns and their per-candidate sends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum CampaignChannel {
    Email,
    Sms,
    Push,
}

impl CampaignChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignChannel::Email => "email",
            CampaignChannel::Sms => "sms",
            CampaignChannel::Push => "push",
        }
    }
}

impl std::fmt::Display for CampaignChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CampaignChannel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(CampaignChannel::Email),
            "sms" => Ok(CampaignChannel::Sms),
            "push" => Ok(CampaignChannel::Push),
            other => Err(DomainError::validation(format!(
                "Unknown campaign channel: {}",
                other
            ))),
        }
    }
}

/// Campaign domain entity. `content` holds the channel-specific payload
/// exactly as validated on creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Campaign {
    pub id: Uuid,
    pub domain_id: Uuid,
    pub user_id: Uuid,
    pub channel: CampaignChannel,
    pub name: String,
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub content: Value,
    pub created_at: DateTime<Utc>,
}

impl Campaign {
    /// String field of the content payload, if present.
    pub fn content_str(&self, key: &str) -> Option<&str> {
        self.content.get(key).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum SendStatus {
    Sent,
    Failed,
}

impl SendStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SendStatus::Sent => "sent",
            SendStatus::Failed => "failed",
        }
    }
}

impl From<&str> for SendStatus {
    fn from(s: &str) -> Self {
        match s {
            "sent" => SendStatus::Sent,
            _ => SendStatus::Failed,
        }
    }
}

/// Outcome of delivering one campaign to one candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CampaignSend {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub candidate_id: Uuid,
    pub status: SendStatus,
    pub error: Option<String>,
    pub sent_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_parse() {
        assert_eq!("sms".parse::<CampaignChannel>().unwrap(), CampaignChannel::Sms);
        assert!("fax".parse::<CampaignChannel>().is_err());
        assert_eq!(CampaignChannel::Push.to_string(), "push");
    }

    #[test]
    fn test_send_status_parse() {
        assert_eq!(SendStatus::from("sent"), SendStatus::Sent);
        assert_eq!(SendStatus::from("anything"), SendStatus::Failed);
    }
}
