//! Activity timeline entries and their human-readable messages.
//!
//! Every activity carries a numeric type code (stable, stored in the
//! database) and a JSON object of parameters. The readable text is rendered
//! from a per-type template where `{name}` placeholders are replaced by the
//! matching parameter. `{username}` and `{count}` are supplied by the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum ActivityType {
    CandidateCreateWeb,
    CandidateUpdate,
    CandidateDelete,
    CandidateCreateWidget,
    CampaignCreate,
    CampaignSend,
    UserCreate,
}

impl ActivityType {
    pub const ALL: [ActivityType; 7] = [
        ActivityType::CandidateCreateWeb,
        ActivityType::CandidateUpdate,
        ActivityType::CandidateDelete,
        ActivityType::CandidateCreateWidget,
        ActivityType::CampaignCreate,
        ActivityType::CampaignSend,
        ActivityType::UserCreate,
    ];

    pub fn code(self) -> i32 {
        match self {
            ActivityType::CandidateCreateWeb => 1,
            ActivityType::CandidateUpdate => 2,
            ActivityType::CandidateDelete => 3,
            ActivityType::CandidateCreateWidget => 4,
            ActivityType::CampaignCreate => 10,
            ActivityType::CampaignSend => 11,
            ActivityType::UserCreate => 20,
        }
    }

    /// (single, aggregated) message templates
    fn templates(self) -> (&'static str, &'static str) {
        match self {
            ActivityType::CandidateCreateWeb => (
                "{username} added candidate {formattedName}",
                "{username} added {count} candidates",
            ),
            ActivityType::CandidateUpdate => (
                "{username} updated candidate {formattedName}",
                "{username} updated {count} candidates",
            ),
            ActivityType::CandidateDelete => (
                "{username} deleted candidate {formattedName}",
                "{username} deleted {count} candidates",
            ),
            ActivityType::CandidateCreateWidget => (
                "{formattedName} joined via widget {widgetName}",
                "{count} candidates joined via widget {widgetName}",
            ),
            ActivityType::CampaignCreate => (
                "{username} created {channel} campaign {name}",
                "{username} created {count} campaigns",
            ),
            ActivityType::CampaignSend => (
                "{username} sent campaign {name} to {num_candidates} candidates",
                "{username} sent {count} campaigns",
            ),
            ActivityType::UserCreate => (
                "{username} added user {newUser}",
                "{username} added {count} users",
            ),
        }
    }

    /// Render the readable text. `count > 1` selects the aggregated form.
    pub fn render(self, params: &Value, username: &str, count: usize) -> String {
        let (single, aggregated) = self.templates();
        let template = if count > 1 { aggregated } else { single };
        let empty = Map::new();
        let params = params.as_object().unwrap_or(&empty);
        render_template(template, params, username, count)
    }
}

impl TryFrom<i32> for ActivityType {
    type Error = DomainError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        ActivityType::ALL
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or_else(|| DomainError::validation(format!("Unknown activity type: {}", code)))
    }
}

impl From<ActivityType> for i32 {
    fn from(t: ActivityType) -> Self {
        t.code()
    }
}

fn render_template(template: &str, params: &Map<String, Value>, username: &str, count: usize) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                let key = &after[..end];
                match key {
                    "username" => out.push_str(username),
                    "count" => out.push_str(&count.to_string()),
                    _ => match params.get(key) {
                        Some(Value::String(s)) => out.push_str(s),
                        Some(Value::Null) | None => {}
                        Some(other) => out.push_str(&other.to_string()),
                    },
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Activity domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub source_table: String,
    pub source_id: Option<Uuid>,
    pub params: Value,
    pub added_time: DateTime<Utc>,
}

/// Activity as returned to clients, with its rendered message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ActivityResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    #[cfg_attr(feature = "openapi", schema(value_type = i32))]
    pub activity_type: ActivityType,
    pub source_table: String,
    pub source_id: Option<Uuid>,
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub params: Value,
    pub added_time: DateTime<Utc>,
    pub readable_text: String,
}

impl ActivityResponse {
    pub fn new(activity: Activity, username: &str) -> Self {
        let readable_text = activity.activity_type.render(&activity.params, username, 1);
        Self {
            id: activity.id,
            user_id: activity.user_id,
            activity_type: activity.activity_type,
            source_table: activity.source_table,
            source_id: activity.source_id,
            params: activity.params,
            added_time: activity.added_time,
            readable_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_codes_round_trip() {
        for t in ActivityType::ALL {
            assert_eq!(ActivityType::try_from(t.code()).unwrap(), t);
        }
        assert!(ActivityType::try_from(999).is_err());
    }

    #[test]
    fn test_render_single() {
        let text = ActivityType::CandidateCreateWeb.render(
            &json!({"formattedName": "Grace Hopper"}),
            "Ada",
            1,
        );
        assert_eq!(text, "Ada added candidate Grace Hopper");
    }

    #[test]
    fn test_render_aggregated() {
        let text = ActivityType::CandidateCreateWeb.render(&json!({}), "Ada", 4);
        assert_eq!(text, "Ada added 4 candidates");
    }

    #[test]
    fn test_render_missing_and_numeric_params() {
        let text = ActivityType::CampaignSend.render(&json!({"num_candidates": 12}), "Ada", 1);
        assert_eq!(text, "Ada sent campaign  to 12 candidates");
    }

    #[test]
    fn test_render_non_object_params() {
        let text = ActivityType::UserCreate.render(&Value::Null, "Ada", 1);
        assert_eq!(text, "Ada added user ");
    }

    #[test]
    fn test_unterminated_placeholder_is_literal() {
        let params = Map::new();
        assert_eq!(render_template("hi {name", &params, "u", 1), "hi {name");
    }

    #[test]
    fn test_serializes_as_code() {
        assert_eq!(serde_json::to_value(ActivityType::CampaignCreate).unwrap(), json!(10));
        let t: ActivityType = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(t, ActivityType::CandidateDelete);
    }
}
