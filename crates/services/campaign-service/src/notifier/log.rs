use async_trait::async_trait;
use tracing::{info, warn};

use super::{Message, Notifier, NotifyError};

/// Stand-in for an unconfigured provider.
pub struct LogNotifier {
    channel: &'static str,
}

impl LogNotifier {
    pub fn new(channel: &'static str) -> Self {
        Self { channel }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, message: &Message) -> Result<(), NotifyError> {
        warn!(channel = self.channel, "Provider not configured, logging message instead of sending");
        info!(
            channel = self.channel,
            recipient = message.recipient(),
            "=== CAMPAIGN MESSAGE (not sent) ===\n{:#?}",
            message
        );
        Ok(())
    }
}
