//! hindsight-report library.
//!
//! Pure aggregations over reconstructed statuses: build snapshots from raw
//! payloads while collecting per-issue errors, bucket a batch at a report
//! boundary, produce weekly trend series, scan acceptance windows, and roll
//! up test-execution progress. Rendering (HTML/CSV), fetching, and delivery
//! live elsewhere; everything here computes over already-materialized data.

pub mod batch;
pub mod progress;
pub mod trend;

pub use batch::{BucketCounts, IssueError, StatusRow, bucket_counts, build_snapshots, statuses_at};
pub use progress::{Progress, ProgressRollup, progress_rollup};
pub use trend::{TrendPoint, accepted_within, is_high_severity, release_start, trend_series};
