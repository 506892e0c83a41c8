//! Collapsing runs of similar activities into single timeline items.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use domain::ActivityType;

use crate::repository::NamedActivity;

#[derive(Debug, Clone, Serialize)]
pub struct AggregatedActivity {
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub user_id: Uuid,
    pub count: usize,
    pub readable_text: String,
    /// Oldest entry of the group
    pub start_time: DateTime<Utc>,
    /// Newest entry of the group
    pub end_time: DateTime<Utc>,
}

/// Group consecutive entries (newest first) that share a type and user and
/// fall within `window` of the group's first entry.
pub fn aggregate(entries: &[NamedActivity], window: Duration) -> Vec<AggregatedActivity> {
    let mut groups: Vec<AggregatedActivity> = Vec::new();
    let mut current: Option<(&NamedActivity, usize, DateTime<Utc>)> = None;

    for entry in entries {
        if let Some((first, count, oldest)) = current.as_mut() {
            let head = &first.activity;
            let same_kind = head.activity_type == entry.activity.activity_type
                && head.user_id == entry.activity.user_id;
            if same_kind && head.added_time - entry.activity.added_time <= window {
                *count += 1;
                *oldest = entry.activity.added_time;
                continue;
            }
        }
        if let Some(done) = current.take() {
            groups.push(finish(done));
        }
        current = Some((entry, 1, entry.activity.added_time));
    }
    if let Some(done) = current {
        groups.push(finish(done));
    }
    groups
}

fn finish((first, count, oldest): (&NamedActivity, usize, DateTime<Utc>)) -> AggregatedActivity {
    let activity = &first.activity;
    AggregatedActivity {
        activity_type: activity.activity_type,
        user_id: activity.user_id,
        count,
        readable_text: activity
            .activity_type
            .render(&activity.params, &first.username, count),
        start_time: oldest,
        end_time: activity.added_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Activity;
    use serde_json::json;

    const WINDOW: i64 = 30;

    fn at(user_id: Uuid, activity_type: ActivityType, minutes_ago: i64) -> NamedActivity {
        let base = "2024-05-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        NamedActivity {
            activity: Activity {
                id: Uuid::new_v4(),
                user_id,
                activity_type,
                source_table: "candidates".to_string(),
                source_id: None,
                params: json!({"formattedName": "Grace Hopper"}),
                added_time: base - Duration::minutes(minutes_ago),
            },
            username: "Ada".to_string(),
        }
    }

    #[test]
    fn test_run_within_window_collapses() {
        let user = Uuid::new_v4();
        let entries = vec![
            at(user, ActivityType::CandidateCreateWeb, 0),
            at(user, ActivityType::CandidateCreateWeb, 10),
            at(user, ActivityType::CandidateCreateWeb, 30),
        ];

        let groups = aggregate(&entries, Duration::minutes(WINDOW));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].count, 3);
        assert_eq!(groups[0].readable_text, "Ada added 3 candidates");
        assert_eq!(groups[0].end_time, entries[0].activity.added_time);
        assert_eq!(groups[0].start_time, entries[2].activity.added_time);
    }

    #[test]
    fn test_window_measured_from_first_entry() {
        let user = Uuid::new_v4();
        let entries = vec![
            at(user, ActivityType::CandidateCreateWeb, 0),
            at(user, ActivityType::CandidateCreateWeb, 20),
            at(user, ActivityType::CandidateCreateWeb, 40),
        ];

        let groups = aggregate(&entries, Duration::minutes(WINDOW));
        assert_eq!(groups.iter().map(|g| g.count).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(groups[1].readable_text, "Ada added candidate Grace Hopper");
    }

    #[test]
    fn test_type_or_user_change_breaks_run() {
        let ada = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let entries = vec![
            at(ada, ActivityType::CandidateCreateWeb, 0),
            at(ada, ActivityType::CandidateUpdate, 1),
            at(bob, ActivityType::CandidateUpdate, 2),
            at(ada, ActivityType::CandidateCreateWeb, 3),
        ];

        let groups = aggregate(&entries, Duration::minutes(WINDOW));
        assert_eq!(groups.len(), 4);
        assert!(groups.iter().all(|g| g.count == 1));
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[], Duration::minutes(WINDOW)).is_empty());
    }
}
