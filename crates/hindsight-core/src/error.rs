use chrono::{DateTime, Utc};

/// Data-quality error attributable to a single issue's raw payload.
///
/// Batch callers record the failing issue and continue; one malformed
/// changelog must never abort reporting for the rest of the batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataError {
    /// A changelog timestamp did not parse in any accepted form.
    #[error("malformed changelog timestamp '{raw}'")]
    MalformedTimestamp {
        /// The unparseable input string.
        raw: String,
    },

    /// A required field was absent from a changelog entry.
    #[error("changelog entry is missing required field '{field}'")]
    MissingField {
        /// Name of the absent field.
        field: &'static str,
    },
}

/// The query instant precedes the issue's creation: the issue did not exist
/// yet, so it had no status.
///
/// This signals caller misuse (a wrongly computed report boundary) and is
/// surfaced immediately, never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("query instant {as_of} precedes issue creation at {created_at}")]
pub struct BeforeCreation {
    /// The requested query instant.
    pub as_of: DateTime<Utc>,
    /// When the issue was created.
    pub created_at: DateTime<Utc>,
}
