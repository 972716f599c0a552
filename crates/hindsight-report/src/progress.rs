//! Execution-progress rollups for sub-test-execution issues.
//!
//! These issues carry workflow statuses of their own (Done, Executing, In
//! Review, ...) and only need a completed / in-progress / not-started
//! headline. Like buckets, the mapping is a pair of rule tables; `Trash`
//! entries are discarded work and excluded from every count.

use serde::Serialize;

use hindsight_core::status::Status;

/// Statuses that count as finished, matched case-insensitively.
const COMPLETED: &[&str] = &["done", "completed", "passed", "failed", "closed", "accepted"];

/// Statuses that count as started but unfinished.
const IN_PROGRESS: &[&str] = &["in progress", "executing", "in review"];

/// Status marking discarded executions; skipped entirely.
const TRASH: &str = "trash";

/// Progress classification for one execution issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Completed,
    InProgress,
    NotStarted,
}

impl Progress {
    /// Classify one status; `None` for trashed entries.
    #[must_use]
    pub fn for_status(status: &Status) -> Option<Self> {
        let token = status.as_str();
        if token.eq_ignore_ascii_case(TRASH) {
            return None;
        }
        if COMPLETED.iter().any(|name| token.eq_ignore_ascii_case(name)) {
            return Some(Self::Completed);
        }
        if IN_PROGRESS.iter().any(|name| token.eq_ignore_ascii_case(name)) {
            return Some(Self::InProgress);
        }
        Some(Self::NotStarted)
    }
}

/// Counted progress over a batch of execution statuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressRollup {
    /// Entries that were counted (trash excluded).
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
}

impl ProgressRollup {
    /// Completed share in percent of counted entries; 0 for an empty batch.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn completion_ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }
}

/// Roll up progress over a batch of execution statuses.
#[must_use]
pub fn progress_rollup<'a, I>(statuses: I) -> ProgressRollup
where
    I: IntoIterator<Item = &'a Status>,
{
    let mut rollup = ProgressRollup::default();
    for status in statuses {
        let Some(progress) = Progress::for_status(status) else {
            continue;
        };
        rollup.total += 1;
        match progress {
            Progress::Completed => rollup.completed += 1,
            Progress::InProgress => rollup.in_progress += 1,
            Progress::NotStarted => rollup.not_started += 1,
        }
    }
    rollup
}
