//! Batch snapshot building and point-in-time bucket counts.
//!
//! A report run hands over every raw issue payload it fetched; a payload
//! with bad data condemns only that issue. The survivors are bucketed per
//! report boundary ("start of week", "now") into the dev / qa / closed
//! columns, with issues that did not exist yet counted separately.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use hindsight_core::bucket::Bucket;
use hindsight_core::error::DataError;
use hindsight_core::event::IssueSnapshot;
use hindsight_core::jira::{RawIssue, snapshot_from_raw};
use hindsight_core::reconstruct::status_at;
use hindsight_core::status::Status;

/// A data-quality failure pinned to one issue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("issue {key}: {error}")]
pub struct IssueError {
    /// The offending issue's tracker key.
    pub key: String,
    /// What was wrong with its payload.
    #[source]
    pub error: DataError,
}

/// Convert raw payloads into snapshots, collecting per-issue failures.
///
/// Failed issues are reported and skipped; the batch always completes.
#[must_use]
pub fn build_snapshots(raws: &[RawIssue]) -> (Vec<IssueSnapshot>, Vec<IssueError>) {
    let mut snapshots = Vec::with_capacity(raws.len());
    let mut errors = Vec::new();
    for raw in raws {
        match snapshot_from_raw(raw) {
            Ok(snapshot) => snapshots.push(snapshot),
            Err(error) => {
                warn!(issue = %raw.key, %error, "skipping issue with bad payload");
                errors.push(IssueError {
                    key: raw.key.clone(),
                    error,
                });
            }
        }
    }
    (snapshots, errors)
}

/// One issue's reconstructed status at a report boundary, ready for table
/// rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRow {
    /// The issue's tracker key.
    pub key: String,
    /// The status it held at the boundary.
    pub status: Status,
    /// The report column that status maps into.
    pub bucket: Bucket,
}

/// Reconstruct every issue's status at `as_of`, one row per issue that
/// existed at the boundary. Input order is preserved.
#[must_use]
pub fn statuses_at(snapshots: &[IssueSnapshot], as_of: DateTime<Utc>) -> Vec<StatusRow> {
    snapshots
        .iter()
        .filter(|snapshot| snapshot.created_at <= as_of)
        .filter_map(|snapshot| {
            status_at(snapshot, as_of).ok().map(|status| StatusRow {
                key: snapshot.key.clone(),
                bucket: Bucket::for_status(&status),
                status,
            })
        })
        .collect()
}

/// Bucketed issue counts at one report boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketCounts {
    /// Issues still with development.
    pub dev: usize,
    /// Issues awaiting QA verification.
    pub qa: usize,
    /// Accepted / closed issues.
    pub closed: usize,
    /// Issues not yet created at the boundary.
    pub not_created: usize,
}

impl BucketCounts {
    /// Issues that existed at the boundary.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.dev + self.qa + self.closed
    }

    /// Issues that existed and were not yet closed.
    #[must_use]
    pub const fn open(&self) -> usize {
        self.dev + self.qa
    }
}

/// Bucket a batch of issues at `as_of`.
///
/// Issues created after `as_of` count as `not_created` rather than erroring:
/// a trend boundary legitimately predates part of the batch.
#[must_use]
pub fn bucket_counts(snapshots: &[IssueSnapshot], as_of: DateTime<Utc>) -> BucketCounts {
    let mut counts = BucketCounts::default();
    for snapshot in snapshots {
        if snapshot.created_at > as_of {
            counts.not_created += 1;
            continue;
        }
        match status_at(snapshot, as_of) {
            Ok(status) => match Bucket::for_status(&status) {
                Bucket::Dev => counts.dev += 1,
                Bucket::Qa => counts.qa += 1,
                Bucket::Closed => counts.closed += 1,
            },
            Err(error) => {
                // Unreachable given the created_at guard above.
                warn!(issue = %snapshot.key, %error, "issue skipped in bucket counts");
            }
        }
    }
    counts
}
