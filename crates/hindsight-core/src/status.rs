use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque status token as reported by the tracker ("To-Do", "In Progress",
/// "Completed", "Accepted", ...).
///
/// Statuses are workflow-specific strings, not a closed enum: trackers grow
/// new statuses without notice, so comparisons against known names happen in
/// the [`crate::bucket`] rule table instead of here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Status(String);

impl Status {
    /// The placeholder status a freshly created bug holds before its first
    /// recorded transition.
    #[must_use]
    pub fn none() -> Self {
        Self("None".to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Status {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        Self(s)
    }
}
