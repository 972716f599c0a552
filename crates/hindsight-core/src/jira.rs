//! Raw Jira changelog payload shapes and their conversion into [`ChangeEvent`]s.
//!
//! The fetch layer (out of scope here) drains pagination and hands over the
//! `changelog.histories[]` JSON as-is. This module only reshapes it: one
//! [`RawHistory`] fans out into one [`ChangeEvent`] per item, all stamped
//! with the history's `created` timestamp.
//!
//! # Timestamps
//!
//! Jira renders `2025-10-01T10:00:00.000+0300`. Both that full form and the
//! bare `%Y-%m-%dT%H:%M:%S` prefix (assumed UTC) are accepted; sub-second
//! precision is truncated, because the source only guarantees seconds and
//! reconstruction ties are broken by receipt order anyway.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use serde::Deserialize;

use crate::error::DataError;
use crate::event::{ChangeEvent, IssueSnapshot};
use crate::status::Status;

/// A full issue payload as handed over by the fetch layer.
#[derive(Debug, Clone, Deserialize)]
pub struct RawIssue {
    /// Tracker key, e.g. `DP-1042`.
    pub key: String,
    /// Creation timestamp string, Jira form.
    pub created: String,
    /// Status the issue held at creation; defaults to `None` when absent,
    /// which is what the tracker reports for freshly filed bugs.
    #[serde(default)]
    pub initial_status: Option<String>,
    /// Priority name, when the tracker reports one.
    #[serde(default)]
    pub priority: Option<String>,
    /// The expanded changelog.
    #[serde(default)]
    pub changelog: RawChangelog,
}

/// The `changelog` object of an issue fetched with `expand=changelog`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawChangelog {
    /// History entries, in whatever order the API returned them.
    #[serde(default)]
    pub histories: Vec<RawHistory>,
}

/// One changelog history entry: a timestamp plus the items changed together.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHistory {
    /// Timestamp string of this change, Jira form.
    pub created: String,
    #[serde(default)]
    pub items: Vec<RawItem>,
}

/// One changed field inside a history entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    /// Changed field name (`status`, `assignee`, ...).
    pub field: String,
    /// Rendered value before the change.
    #[serde(rename = "fromString")]
    pub from: Option<String>,
    /// Rendered value after the change.
    #[serde(rename = "toString")]
    pub to: Option<String>,
}

/// Parse a Jira timestamp string into a second-precision UTC instant.
///
/// # Errors
///
/// [`DataError::MalformedTimestamp`] when neither accepted form matches.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DataError> {
    if let Ok(ts) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Ok(ts.with_timezone(&Utc).trunc_subsecs(0));
    }

    // Zone-less prefix, as truncated by upstream exports. Assumed UTC.
    if let Some(prefix) = raw.get(..19) {
        if let Ok(naive) = NaiveDateTime::parse_from_str(prefix, "%Y-%m-%dT%H:%M:%S") {
            return Ok(naive.and_utc());
        }
    }

    Err(DataError::MalformedTimestamp {
        raw: raw.to_string(),
    })
}

/// Flatten a raw changelog into change events, receipt order preserved.
///
/// # Errors
///
/// [`DataError::MalformedTimestamp`] for an unparseable history timestamp,
/// [`DataError::MissingField`] for a `status` item with no `toString`. Either
/// condemns this one issue's payload, not the batch.
pub fn changelog_events(changelog: &RawChangelog) -> Result<Vec<ChangeEvent>, DataError> {
    let mut events = Vec::new();
    for history in &changelog.histories {
        let at = parse_timestamp(&history.created)?;
        for item in &history.items {
            if item.field == crate::event::STATUS_FIELD && item.to.is_none() {
                return Err(DataError::MissingField { field: "toString" });
            }
            events.push(ChangeEvent {
                at,
                field: item.field.clone(),
                from: item.from.clone(),
                to: item.to.clone(),
            });
        }
    }
    Ok(events)
}

/// Convert one raw issue payload into a reconstruction-ready snapshot.
///
/// # Errors
///
/// Any [`DataError`] from the creation timestamp or the changelog; the error
/// is attributable to this single issue.
pub fn snapshot_from_raw(raw: &RawIssue) -> Result<IssueSnapshot, DataError> {
    let created_at = parse_timestamp(&raw.created)?;
    let events = changelog_events(&raw.changelog)?;
    Ok(IssueSnapshot {
        key: raw.key.clone(),
        created_at,
        initial_status: raw
            .initial_status
            .as_deref()
            .map_or_else(Status::none, Status::from),
        priority: raw.priority.clone(),
        events,
    })
}
