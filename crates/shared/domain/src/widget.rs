//! Public-facing widget entities: banners, widget pages, job openings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Site-wide announcement banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Banner {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub link: Option<String>,
    pub style: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Public sign-up form owned by a user; `widget_key` is what the form posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetPage {
    pub id: Uuid,
    pub domain_id: Uuid,
    pub user_id: Uuid,
    pub widget_key: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub id: Uuid,
    pub domain_id: Uuid,
    pub name: String,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobOpening {
    pub id: Uuid,
    pub domain_id: Uuid,
    pub venue_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub is_open: bool,
    pub created_at: DateTime<Utc>,
}
