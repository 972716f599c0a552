//! Change events and per-issue snapshots.
//!
//! An [`IssueSnapshot`] is everything reconstruction needs for one issue:
//! creation instant, initial status, and the raw change events exactly as
//! the source delivered them. Snapshots are rebuilt fresh on every report
//! run; nothing here is cached across runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::Status;

/// The one changelog field reconstruction cares about. Events for any other
/// field are carried along but ignored.
pub const STATUS_FIELD: &str = "status";

/// One recorded field transition on an issue.
///
/// Immutable once retrieved. `from`/`to` are opaque tokens; the source omits
/// them for some field kinds, hence `Option`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// When the transition happened (second precision, UTC).
    pub at: DateTime<Utc>,
    /// Name of the changed field.
    pub field: String,
    /// Value before the transition.
    pub from: Option<String>,
    /// Value after the transition.
    pub to: Option<String>,
}

impl ChangeEvent {
    /// Whether this event transitions the `status` field.
    #[must_use]
    pub fn is_status(&self) -> bool {
        self.field == STATUS_FIELD
    }
}

/// An issue plus its full change history, as received from the source system.
///
/// The source does not guarantee delivery order of `events`; reconstruction
/// sorts internally and must never rely on the order stored here beyond
/// using it as the tie-break for equal timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSnapshot {
    /// Tracker key, e.g. `DP-1042`.
    pub key: String,
    /// Creation instant of the issue.
    pub created_at: DateTime<Utc>,
    /// Status the issue held immediately after creation. The first recorded
    /// transition already moves away from this value, and the event list has
    /// no "created" pseudo-event.
    pub initial_status: Status,
    /// Priority name as reported by the tracker, when present.
    pub priority: Option<String>,
    /// Change events in receipt order.
    pub events: Vec<ChangeEvent>,
}

impl IssueSnapshot {
    /// Build a snapshot with the default initial status and no history.
    #[must_use]
    pub fn new(key: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            created_at,
            initial_status: Status::none(),
            priority: None,
            events: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChangeEvent, IssueSnapshot};
    use crate::status::Status;
    use chrono::{TimeZone, Utc};

    #[test]
    fn is_status_matches_field_name_exactly() {
        let mut event = ChangeEvent {
            at: Utc.with_ymd_and_hms(2025, 10, 1, 10, 0, 0).unwrap(),
            field: "status".to_string(),
            from: Some("None".to_string()),
            to: Some("In Progress".to_string()),
        };
        assert!(event.is_status());

        event.field = "assignee".to_string();
        assert!(!event.is_status());

        // Jira field names are case-sensitive; "Status" is a different field.
        event.field = "Status".to_string();
        assert!(!event.is_status());
    }

    #[test]
    fn new_snapshot_starts_empty_with_none_status() {
        let created = Utc.with_ymd_and_hms(2025, 9, 30, 8, 0, 0).unwrap();
        let snapshot = IssueSnapshot::new("DP-1", created);
        assert_eq!(snapshot.key, "DP-1");
        assert_eq!(snapshot.created_at, created);
        assert_eq!(snapshot.initial_status, Status::none());
        assert!(snapshot.priority.is_none());
        assert!(snapshot.events.is_empty());
    }

    #[test]
    fn snapshot_json_roundtrips() {
        let created = Utc.with_ymd_and_hms(2025, 9, 30, 8, 0, 0).unwrap();
        let mut snapshot = IssueSnapshot::new("DP-7", created);
        snapshot.priority = Some("High".to_string());
        snapshot.events.push(ChangeEvent {
            at: Utc.with_ymd_and_hms(2025, 10, 1, 10, 0, 0).unwrap(),
            field: "status".to_string(),
            from: Some("None".to_string()),
            to: Some("In Progress".to_string()),
        });

        let json = serde_json::to_string(&snapshot).expect("serialize");
        let back: IssueSnapshot = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, snapshot);
    }
}
