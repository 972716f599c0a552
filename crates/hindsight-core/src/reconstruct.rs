//! Status-at-date reconstruction by changelog replay.
//!
//! Given an issue's full change history, determine the status it held at an
//! arbitrary past instant. The source system delivers history in no
//! particular order, so the sort here is mandatory, not defensive: scanning
//! unsorted history silently produces wrong answers whenever the API pages
//! arrive shuffled, and comparing dates instead of full timestamps collapses
//! same-day transitions. Both were real failure modes upstream.
//!
//! # Algorithm
//!
//! 1. Keep only `status` events.
//! 2. Stable-sort by timestamp ascending; equal timestamps keep receipt
//!    order (the source has second precision, so same-second transitions
//!    happen).
//! 3. `as_of` before creation is a domain error.
//! 4. No event at or before `as_of` → the issue's initial status.
//! 5. Otherwise the `to` value of the last event with `at <= as_of`
//!    (boundary inclusive).

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::BeforeCreation;
use crate::event::{ChangeEvent, IssueSnapshot};
use crate::status::Status;

/// Filter to `status` events and stable-sort them by timestamp ascending.
///
/// `Vec::sort_by_key` is stable, which is exactly the tie-break the contract
/// requires: events sharing a second stay in receipt order.
#[must_use]
pub fn sorted_status_events(events: &[ChangeEvent]) -> Vec<&ChangeEvent> {
    let mut status_events: Vec<&ChangeEvent> =
        events.iter().filter(|event| event.is_status()).collect();
    status_events.sort_by_key(|event| event.at);
    status_events
}

/// Reconstruct the status an issue held at `as_of`.
///
/// Pure and deterministic: identical inputs always yield the identical
/// answer, and any permutation of `snapshot.events` with distinct timestamps
/// yields the same answer.
///
/// # Errors
///
/// [`BeforeCreation`] when `as_of` precedes `snapshot.created_at` — the
/// issue did not exist yet, so the question has no answer and the caller's
/// report boundary is wrong.
pub fn status_at(snapshot: &IssueSnapshot, as_of: DateTime<Utc>) -> Result<Status, BeforeCreation> {
    if as_of < snapshot.created_at {
        return Err(BeforeCreation {
            as_of,
            created_at: snapshot.created_at,
        });
    }

    let mut current = snapshot.initial_status.clone();
    let mut replayed = 0usize;
    for event in sorted_status_events(&snapshot.events) {
        if event.at > as_of {
            break;
        }
        if let Some(to) = event.to.as_deref() {
            current = Status::from(to);
        }
        replayed += 1;
    }
    debug!(issue = %snapshot.key, %as_of, replayed, status = %current, "replayed changelog");
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::{sorted_status_events, status_at};
    use crate::error::BeforeCreation;
    use crate::event::{ChangeEvent, IssueSnapshot};
    use crate::status::Status;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn status_event(ts: DateTime<Utc>, from: &str, to: &str) -> ChangeEvent {
        ChangeEvent {
            at: ts,
            field: "status".to_string(),
            from: Some(from.to_string()),
            to: Some(to.to_string()),
        }
    }

    /// Issue created 2025-09-30T08:00:00 as "None"; three transitions
    /// supplied out of order.
    fn sample_issue() -> IssueSnapshot {
        let mut snapshot = IssueSnapshot::new("DP-1042", at(2025, 9, 30, 8, 0, 0));
        snapshot.events = vec![
            status_event(at(2025, 12, 10, 9, 0, 0), "Completed", "Accepted"),
            status_event(at(2025, 10, 1, 10, 0, 0), "None", "In Progress"),
            status_event(at(2025, 12, 5, 9, 0, 0), "In Progress", "Completed"),
        ];
        snapshot
    }

    #[test]
    fn between_two_events_returns_the_earlier_transition() {
        let status = status_at(&sample_issue(), at(2025, 12, 6, 0, 0, 0)).expect("status");
        assert_eq!(status, Status::from("Completed"));
    }

    #[test]
    fn at_creation_instant_returns_initial_status() {
        let status = status_at(&sample_issue(), at(2025, 9, 30, 8, 0, 0)).expect("status");
        assert_eq!(status, Status::from("None"));
    }

    #[test]
    fn exact_event_boundary_selects_that_event() {
        let status = status_at(&sample_issue(), at(2025, 12, 10, 9, 0, 0)).expect("status");
        assert_eq!(status, Status::from("Accepted"));
    }

    #[test]
    fn after_the_last_event_returns_the_latest_status() {
        let status = status_at(&sample_issue(), at(2026, 1, 1, 0, 0, 0)).expect("status");
        assert_eq!(status, Status::from("Accepted"));
    }

    #[test]
    fn before_creation_is_a_domain_error() {
        let err = status_at(&sample_issue(), at(2025, 9, 29, 23, 59, 59)).unwrap_err();
        assert_eq!(
            err,
            BeforeCreation {
                as_of: at(2025, 9, 29, 23, 59, 59),
                created_at: at(2025, 9, 30, 8, 0, 0),
            }
        );
    }

    #[test]
    fn empty_history_returns_initial_status() {
        let snapshot = IssueSnapshot::new("DP-2", at(2025, 9, 30, 8, 0, 0));
        let status = status_at(&snapshot, at(2025, 12, 1, 0, 0, 0)).expect("status");
        assert_eq!(status, Status::none());
    }

    #[test]
    fn non_status_events_are_ignored() {
        let mut snapshot = sample_issue();
        snapshot.events.push(ChangeEvent {
            at: at(2025, 12, 7, 12, 0, 0),
            field: "assignee".to_string(),
            from: None,
            to: Some("dana".to_string()),
        });
        let status = status_at(&snapshot, at(2025, 12, 8, 0, 0, 0)).expect("status");
        assert_eq!(status, Status::from("Completed"));
    }

    #[test]
    fn same_day_transitions_resolve_by_full_timestamp() {
        // Opened, fixed, and verified all on the same day. Date-granularity
        // comparison collapses these; full timestamps must not.
        let mut snapshot = IssueSnapshot::new("DP-3", at(2025, 11, 3, 8, 0, 0));
        snapshot.events = vec![
            status_event(at(2025, 11, 3, 9, 0, 0), "None", "In Progress"),
            status_event(at(2025, 11, 3, 14, 30, 0), "In Progress", "Completed"),
            status_event(at(2025, 11, 3, 17, 45, 0), "Completed", "Accepted"),
        ];

        let mid_day = status_at(&snapshot, at(2025, 11, 3, 12, 0, 0)).expect("status");
        assert_eq!(mid_day, Status::from("In Progress"));

        let afternoon = status_at(&snapshot, at(2025, 11, 3, 15, 0, 0)).expect("status");
        assert_eq!(afternoon, Status::from("Completed"));
    }

    #[test]
    fn same_second_transitions_keep_receipt_order() {
        // Second-level precision means a bulk workflow update can land two
        // transitions on the same instant; receipt order decides.
        let ts = at(2025, 11, 3, 9, 0, 0);
        let mut snapshot = IssueSnapshot::new("DP-4", at(2025, 11, 1, 0, 0, 0));
        snapshot.events = vec![
            status_event(ts, "None", "In Progress"),
            status_event(ts, "In Progress", "Completed"),
        ];

        let status = status_at(&snapshot, ts).expect("status");
        assert_eq!(status, Status::from("Completed"));
    }

    #[test]
    fn presorting_does_not_change_the_answer() {
        let shuffled = sample_issue();
        let mut presorted = shuffled.clone();
        presorted.events.sort_by_key(|event| event.at);

        for as_of in [
            at(2025, 9, 30, 8, 0, 0),
            at(2025, 10, 2, 0, 0, 0),
            at(2025, 12, 6, 0, 0, 0),
            at(2026, 1, 1, 0, 0, 0),
        ] {
            assert_eq!(
                status_at(&shuffled, as_of).expect("status"),
                status_at(&presorted, as_of).expect("status"),
            );
        }
    }

    #[test]
    fn sorted_status_events_filters_and_orders() {
        let mut snapshot = sample_issue();
        snapshot.events.push(ChangeEvent {
            at: at(2025, 10, 15, 0, 0, 0),
            field: "priority".to_string(),
            from: Some("Medium".to_string()),
            to: Some("High".to_string()),
        });

        let sorted = sorted_status_events(&snapshot.events);
        assert_eq!(sorted.len(), 3);
        assert!(sorted.windows(2).all(|pair| pair[0].at <= pair[1].at));
        assert!(sorted.iter().all(|event| event.is_status()));
    }
}
