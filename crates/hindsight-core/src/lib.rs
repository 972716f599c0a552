//! hindsight-core library.
//!
//! Data model and pure computation for answering "what status did this issue
//! hold at time T?" from a Jira-style changelog. The change history arrives
//! unordered from the source system; reconstruction always sorts it itself.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums/structs; data-quality errors are
//!   attributable to a single issue and never abort a batch.
//! - **Logging**: `tracing` macros (`warn!`, `debug!`).

pub mod bucket;
pub mod error;
pub mod event;
pub mod jira;
pub mod reconstruct;
pub mod status;

pub use bucket::Bucket;
pub use error::{BeforeCreation, DataError};
pub use event::{ChangeEvent, IssueSnapshot, STATUS_FIELD};
pub use reconstruct::status_at;
pub use status::Status;
