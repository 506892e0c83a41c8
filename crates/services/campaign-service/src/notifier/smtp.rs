//! Email over SMTP (the SES SMTP endpoint in deployed environments).

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message as Email, Tokio1Executor,
};

use super::{Message, Notifier, NotifyError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub from: String,
}

impl SmtpConfig {
    /// `None` unless `SMTP_HOST` is set.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("SMTP_HOST").filter(|h| !h.trim().is_empty())?;
        Some(Self {
            host,
            port: lookup("SMTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            user: lookup("SMTP_USER"),
            pass: lookup("SMTP_PASS"),
            from: lookup("SMTP_FROM").unwrap_or_else(|| "noreply@gettalent.com".to_string()),
        })
    }
}

pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    pub fn new(config: &SmtpConfig) -> Result<Self, NotifyError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?.port(config.port);
        if let (Some(user), Some(pass)) = (&config.user, &config.pass) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            mailer: builder.build(),
            from: config.from.parse()?,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, message: &Message) -> Result<(), NotifyError> {
        let Message::Email {
            to,
            subject,
            body_text,
            body_html,
            from_name,
            reply_to,
        } = message
        else {
            return Err(NotifyError::WrongChannel("email"));
        };

        let from = match from_name {
            Some(name) => Mailbox::new(Some(name.clone()), self.from.email.clone()),
            None => self.from.clone(),
        };
        let mut builder = Email::builder()
            .from(from)
            .to(to.parse()?)
            .subject(subject.as_str());
        if let Some(reply_to) = reply_to {
            builder = builder.reply_to(reply_to.parse()?);
        }

        let email = match body_html {
            Some(html) => builder.multipart(MultiPart::alternative_plain_html(
                body_text.clone(),
                html.clone(),
            ))?,
            None => builder
                .header(ContentType::TEXT_PLAIN)
                .body(body_text.clone())?,
        };

        self.mailer.send(email).await?;
        tracing::info!(to = %to, "Campaign email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_requires_host() {
        assert_eq!(SmtpConfig::from_lookup(|_| None), None);

        let vars: HashMap<&str, &str> = [
            ("SMTP_HOST", "email-smtp.us-east-1.amazonaws.com"),
            ("SMTP_PORT", "2587"),
            ("SMTP_FROM", "Talent <talent@example.com>"),
        ]
        .into_iter()
        .collect();
        let config = SmtpConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.port, 2587);
        assert_eq!(config.user, None);
    }

    #[tokio::test]
    async fn test_rejects_other_channels() {
        let config = SmtpConfig {
            host: "localhost".to_string(),
            port: 2525,
            user: None,
            pass: None,
            from: "talent@example.com".to_string(),
        };
        let notifier = SmtpNotifier::new(&config).unwrap();
        let result = notifier
            .send(&Message::Sms {
                to: "+15550001".to_string(),
                body: "hi".to_string(),
            })
            .await;
        assert!(matches!(result, Err(NotifyError::WrongChannel("email"))));
    }
}
