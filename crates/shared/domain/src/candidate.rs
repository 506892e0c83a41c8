//! Candidate entity and its contact details.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{EMAIL_LABEL_PRIMARY, PHONE_LABEL_MOBILE};
use crate::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CandidateEmail {
    pub id: Uuid,
    pub label: String,
    pub address: String,
    pub is_default: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CandidatePhone {
    pub id: Uuid,
    pub label: String,
    pub value: String,
    pub is_default: bool,
}

/// Candidate domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Candidate {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub objective: Option<String>,
    pub summary: Option<String>,
    /// Where the candidate came from ("web", "widget")
    pub source: String,
    pub added_time: DateTime<Utc>,
    pub updated_time: DateTime<Utc>,
    #[serde(default)]
    pub emails: Vec<CandidateEmail>,
    #[serde(default)]
    pub phones: Vec<CandidatePhone>,
}

impl Candidate {
    pub fn formatted_name(&self) -> String {
        format_name(self.first_name.as_deref(), self.last_name.as_deref())
    }

    /// Default email, else the one labelled Primary, else the first.
    pub fn primary_email(&self) -> Option<&str> {
        self.emails
            .iter()
            .find(|e| e.is_default)
            .or_else(|| self.emails.iter().find(|e| e.label == EMAIL_LABEL_PRIMARY))
            .or_else(|| self.emails.first())
            .map(|e| e.address.as_str())
    }

    /// Default phone if it is a mobile, else any mobile number.
    pub fn mobile_phone(&self) -> Option<&str> {
        self.phones
            .iter()
            .find(|p| p.is_default && p.label == PHONE_LABEL_MOBILE)
            .or_else(|| self.phones.iter().find(|p| p.label == PHONE_LABEL_MOBILE))
            .map(|p| p.value.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewCandidateEmail {
    pub label: Option<String>,
    pub address: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewCandidatePhone {
    pub label: Option<String>,
    pub value: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Candidate creation data
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateCandidate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub objective: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub emails: Vec<NewCandidateEmail>,
    #[serde(default)]
    pub phones: Vec<NewCandidatePhone>,
}

impl CreateCandidate {
    /// Checks the rules that need no database access.
    pub fn validate(&self) -> DomainResult<()> {
        let has_name = [&self.first_name, &self.last_name]
            .iter()
            .any(|n| n.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false));
        if !has_name && self.emails.is_empty() {
            return Err(DomainError::validation(
                "Candidate requires a name or an email address",
            ));
        }

        for email in &self.emails {
            validate_email(&email.address)?;
        }
        if self.emails.iter().filter(|e| e.is_default).count() > 1 {
            return Err(DomainError::validation("Only one email may be the default"));
        }

        for phone in &self.phones {
            if phone.value.trim().is_empty() {
                return Err(DomainError::validation("Phone value cannot be empty"));
            }
        }
        if self.phones.iter().filter(|p| p.is_default).count() > 1 {
            return Err(DomainError::validation("Only one phone may be the default"));
        }

        Ok(())
    }

    /// Emails lower-cased and trimmed, in submission order.
    pub fn normalized_addresses(&self) -> Vec<String> {
        self.emails
            .iter()
            .map(|e| e.address.trim().to_lowercase())
            .collect()
    }
}

/// Candidate update data; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateCandidate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub objective: Option<String>,
    pub summary: Option<String>,
}

impl UpdateCandidate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.objective.is_none()
            && self.summary.is_none()
    }
}

/// Shallow email check: one `@`, a local part, and a dotted host.
pub fn validate_email(address: &str) -> DomainResult<()> {
    let address = address.trim();
    let invalid = || DomainError::validation(format!("Invalid email address: {}", address));

    let (local, host) = address.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || host.contains('@') || address.contains(char::is_whitespace) {
        return Err(invalid());
    }
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }
    Ok(())
}

/// Joins the non-blank name parts with a single space.
pub fn format_name(first: Option<&str>, last: Option<&str>) -> String {
    [first, last]
        .iter()
        .filter_map(|part| part.map(str::trim))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(address: &str, label: &str, is_default: bool) -> CandidateEmail {
        CandidateEmail {
            id: Uuid::new_v4(),
            label: label.to_string(),
            address: address.to_string(),
            is_default,
        }
    }

    fn candidate() -> Candidate {
        Candidate {
            id: Uuid::new_v4(),
            owner_user_id: Uuid::new_v4(),
            first_name: Some("Grace".to_string()),
            last_name: Some("Hopper".to_string()),
            objective: None,
            summary: None,
            source: "web".to_string(),
            added_time: Utc::now(),
            updated_time: Utc::now(),
            emails: vec![],
            phones: vec![],
        }
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("grace@navy.mil").is_ok());
        assert!(validate_email("  grace@navy.mil ").is_ok());
        assert!(validate_email("grace").is_err());
        assert!(validate_email("@navy.mil").is_err());
        assert!(validate_email("grace@localhost").is_err());
        assert!(validate_email("grace@navy..mil").is_err());
        assert!(validate_email("grace@a@b.com").is_err());
        assert!(validate_email("gr ace@navy.mil").is_err());
    }

    #[test]
    fn test_format_name() {
        assert_eq!(format_name(Some("Grace"), Some("Hopper")), "Grace Hopper");
        assert_eq!(format_name(Some(" Grace "), None), "Grace");
        assert_eq!(format_name(None, Some("")), "");
    }

    #[test]
    fn test_primary_email_preference() {
        let mut c = candidate();
        assert_eq!(c.primary_email(), None);

        c.emails = vec![email("a@x.com", "Work", false), email("b@x.com", "Primary", false)];
        assert_eq!(c.primary_email(), Some("b@x.com"));

        c.emails.push(email("c@x.com", "Home", true));
        assert_eq!(c.primary_email(), Some("c@x.com"));
    }

    #[test]
    fn test_mobile_phone() {
        let mut c = candidate();
        c.phones = vec![CandidatePhone {
            id: Uuid::new_v4(),
            label: "Home".to_string(),
            value: "+15550001".to_string(),
            is_default: true,
        }];
        assert_eq!(c.mobile_phone(), None);

        c.phones.push(CandidatePhone {
            id: Uuid::new_v4(),
            label: "Mobile".to_string(),
            value: "+15550002".to_string(),
            is_default: false,
        });
        assert_eq!(c.mobile_phone(), Some("+15550002"));
    }

    #[test]
    fn test_create_requires_name_or_email() {
        assert!(CreateCandidate::default().validate().is_err());

        let named = CreateCandidate {
            first_name: Some("Grace".to_string()),
            ..Default::default()
        };
        assert!(named.validate().is_ok());
    }

    #[test]
    fn test_create_rejects_two_default_emails() {
        let payload = CreateCandidate {
            emails: vec![
                NewCandidateEmail {
                    label: None,
                    address: "a@x.com".to_string(),
                    is_default: true,
                },
                NewCandidateEmail {
                    label: None,
                    address: "b@x.com".to_string(),
                    is_default: true,
                },
            ],
            ..Default::default()
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_normalized_addresses() {
        let payload = CreateCandidate {
            emails: vec![NewCandidateEmail {
                label: None,
                address: " Grace@Navy.MIL ".to_string(),
                is_default: false,
            }],
            ..Default::default()
        };
        assert_eq!(payload.normalized_addresses(), vec!["grace@navy.mil"]);
    }
}
