//! Writing activity timeline entries.
//!
//! Services record activities inline with the change they describe, so the
//! helper accepts any connection, including an open transaction.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
use serde_json::Value;
use uuid::Uuid;

use common::AppResult;
use domain::{Activity, ActivityType};

use crate::entities::activity;

/// Append one entry to the activity timeline.
pub async fn record_activity<C>(
    db: &C,
    user_id: Uuid,
    activity_type: ActivityType,
    source_table: &str,
    source_id: Option<Uuid>,
    params: Value,
) -> AppResult<Activity>
where
    C: ConnectionTrait,
{
    let model = activity::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        activity_type: Set(activity_type.code()),
        source_table: Set(source_table.to_string()),
        source_id: Set(source_id),
        params: Set(params),
        added_time: Set(Utc::now()),
    }
    .insert(db)
    .await?;

    tracing::debug!(
        user_id = %user_id,
        activity_type = activity_type.code(),
        source_table,
        "Activity recorded"
    );

    Ok(Activity::try_from(model)?)
}
