//! Outbound delivery of campaign messages.
//!
//! Each channel has one [`Notifier`]. A provider without configuration is
//! replaced by [`LogNotifier`], which writes the message to the log.

mod log;
mod pusher;
mod smtp;
mod twilio;

use std::env;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use domain::CampaignChannel;

pub use self::log::LogNotifier;
pub use pusher::{PusherConfig, PusherNotifier};
pub use smtp::{SmtpConfig, SmtpNotifier};
pub use twilio::{TwilioConfig, TwilioNotifier};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Email {
        to: String,
        subject: String,
        body_text: String,
        body_html: Option<String>,
        from_name: Option<String>,
        reply_to: Option<String>,
    },
    Sms {
        to: String,
        body: String,
    },
    Push {
        channel: String,
        title: String,
        body: String,
        url: Option<String>,
    },
}

impl Message {
    pub fn recipient(&self) -> &str {
        match self {
            Message::Email { to, .. } | Message::Sms { to, .. } => to,
            Message::Push { channel, .. } => channel,
        }
    }
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider rejected message (status {status}): {message}")]
    Provider { status: u16, message: String },

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Could not build email: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("Could not sign request: {0}")]
    Signing(String),

    #[error("{0} notifier cannot send this message")]
    WrongChannel(&'static str),
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &Message) -> Result<(), NotifyError>;
}

/// One notifier per channel.
#[derive(Clone)]
pub struct Notifiers {
    pub email: Arc<dyn Notifier>,
    pub sms: Arc<dyn Notifier>,
    pub push: Arc<dyn Notifier>,
}

impl Notifiers {
    /// Build from `SMTP_*`, `TWILIO_*` and `PUSHER_*` variables.
    pub fn from_env() -> Result<Self, NotifyError> {
        let email: Arc<dyn Notifier> = match SmtpConfig::from_lookup(|k| env::var(k).ok()) {
            Some(config) => Arc::new(SmtpNotifier::new(&config)?),
            None => Arc::new(LogNotifier::new("email")),
        };
        let sms: Arc<dyn Notifier> = match TwilioConfig::from_lookup(|k| env::var(k).ok()) {
            Some(config) => Arc::new(TwilioNotifier::new(config)),
            None => Arc::new(LogNotifier::new("sms")),
        };
        let push: Arc<dyn Notifier> = match PusherConfig::from_lookup(|k| env::var(k).ok()) {
            Some(config) => Arc::new(PusherNotifier::new(config)),
            None => Arc::new(LogNotifier::new("push")),
        };
        Ok(Self { email, sms, push })
    }

    pub fn for_channel(&self, channel: CampaignChannel) -> &Arc<dyn Notifier> {
        match channel {
            CampaignChannel::Email => &self.email,
            CampaignChannel::Sms => &self.sms,
            CampaignChannel::Push => &self.push,
        }
    }
}
