//! # domains
//!
//! The moment entity, its moderation rules, and the storage port the rest of
//! the workspace is written against.

pub mod errors;
pub mod models;
pub mod moderation;
pub mod ports;

pub use errors::{DomainError, DomainResult};
pub use models::{FeedFilter, Mood, Post, PostDraft, PostId, PostStatus};
pub use moderation::{KeepResolution, ReportInput, ReportOutcome, ESCALATION_THRESHOLD};
pub use ports::PostRepository;

#[cfg(any(test, feature = "testing"))]
pub use ports::MockPostRepository;
