//! Status-to-bucket categorization for report rollups.
//!
//! Every report groups issues into the same three columns: still with
//! development, waiting on QA verification, or closed. The mapping is a rule
//! table, not a cascade of conditionals, so a workflow growing a new status
//! name means touching one slice here and nothing in reconstruction.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::status::Status;

/// The three report columns an issue status maps into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// With development: In Progress, To-Do, None, Open, or anything unknown.
    Dev,
    /// Completed by development, awaiting QA verification.
    Qa,
    /// Accepted / closed.
    Closed,
}

/// Ordered categorization rules: the first needle contained in the
/// lowercased status wins.
///
/// Order matters: "accepted" outranks "completed", so a status like
/// "Completed & Accepted" lands in [`Bucket::Closed`].
const RULES: &[(&str, Bucket)] = &[
    ("accepted", Bucket::Closed),
    ("completed", Bucket::Qa),
    ("in progress", Bucket::Dev),
    ("to do", Bucket::Dev),
    ("to-do", Bucket::Dev),
    ("none", Bucket::Dev),
    ("open", Bucket::Dev),
];

impl Bucket {
    /// Categorize a status token.
    ///
    /// Unrecognized statuses fall back to [`Bucket::Dev`]: a status nobody
    /// taught the table about is work that is at best still in flight.
    #[must_use]
    pub fn for_status(status: &Status) -> Self {
        let lowered = status.as_str().to_lowercase();
        for (needle, bucket) in RULES {
            if lowered.contains(needle) {
                return *bucket;
            }
        }
        debug!(status = %status, "unrecognized status, defaulting to dev bucket");
        Self::Dev
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Qa => "qa",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Bucket;
    use crate::status::Status;

    #[test]
    fn known_statuses_map_to_documented_buckets() {
        let expected = [
            ("Accepted", Bucket::Closed),
            ("Completed", Bucket::Qa),
            ("In Progress", Bucket::Dev),
            ("To-Do", Bucket::Dev),
            ("To Do", Bucket::Dev),
            ("None", Bucket::Dev),
            ("Open", Bucket::Dev),
        ];
        for (name, bucket) in expected {
            assert_eq!(Bucket::for_status(&Status::from(name)), bucket, "{name}");
        }
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        assert_eq!(Bucket::for_status(&Status::from("ACCEPTED")), Bucket::Closed);
        assert_eq!(
            Bucket::for_status(&Status::from("Reopened")),
            Bucket::Dev,
            "'reOPENed' contains 'open'"
        );
    }

    #[test]
    fn accepted_outranks_completed() {
        assert_eq!(
            Bucket::for_status(&Status::from("Completed & Accepted")),
            Bucket::Closed
        );
    }

    #[test]
    fn unknown_status_defaults_to_dev() {
        assert_eq!(
            Bucket::for_status(&Status::from("Pending Triage")),
            Bucket::Dev
        );
    }

    #[test]
    fn display_matches_as_str() {
        for bucket in [Bucket::Dev, Bucket::Qa, Bucket::Closed] {
            assert_eq!(bucket.to_string(), bucket.as_str());
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Bucket::Qa).unwrap(), "\"qa\"");
        assert_eq!(
            serde_json::from_str::<Bucket>("\"closed\"").unwrap(),
            Bucket::Closed
        );
    }
}
