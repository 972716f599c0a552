//! Weekly trend series and acceptance-window scans.
//!
//! A trend walks 7-day boundaries from release start (the earliest creation
//! date in the batch) to the report date, bucketing every issue at each
//! boundary. Severity filtering and "accepted this week" detection are thin
//! scans on top of the same snapshots.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use hindsight_core::bucket::Bucket;
use hindsight_core::event::IssueSnapshot;
use hindsight_core::status::Status;

use crate::batch::{BucketCounts, bucket_counts};

/// Priority names treated as high severity in filtered trend reports.
pub const HIGH_SEVERITY: &[&str] = &["High", "Highest", "Critical"];

/// One weekly data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    /// The boundary this point was evaluated at.
    pub at: DateTime<Utc>,
    /// Bucketed counts at the boundary.
    pub counts: BucketCounts,
}

/// The earliest creation instant across the batch, if any.
///
/// The original reports anchor their trend at this "release start" rather
/// than at a configured date.
#[must_use]
pub fn release_start(snapshots: &[IssueSnapshot]) -> Option<DateTime<Utc>> {
    snapshots.iter().map(|s| s.created_at).min()
}

/// Bucket the batch at weekly boundaries from `start` through `end`
/// inclusive (7-day step; the final partial week still gets a point).
#[must_use]
pub fn trend_series(
    snapshots: &[IssueSnapshot],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<TrendPoint> {
    let mut points = Vec::new();
    let mut boundary = start;
    while boundary <= end {
        points.push(TrendPoint {
            at: boundary,
            counts: bucket_counts(snapshots, boundary),
        });
        boundary += Duration::days(7);
    }
    points
}

/// Whether a priority name counts as high severity.
#[must_use]
pub fn is_high_severity(priority: Option<&str>) -> bool {
    priority.is_some_and(|p| HIGH_SEVERITY.iter().any(|name| p.eq_ignore_ascii_case(name)))
}

/// Whether the issue transitioned into a closed-bucket status inside
/// `[start, end]` (both ends inclusive).
///
/// Drives the "Accepted This Week" column: the transition instant matters,
/// not the status at the window edges — an issue accepted and reopened
/// within the same week still counts.
#[must_use]
pub fn accepted_within(
    snapshot: &IssueSnapshot,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> bool {
    snapshot.events.iter().any(|event| {
        event.is_status()
            && event.at >= start
            && event.at <= end
            && event
                .to
                .as_deref()
                .is_some_and(|to| Bucket::for_status(&Status::from(to)) == Bucket::Closed)
    })
}
