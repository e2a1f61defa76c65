//! # services
//!
//! Application logic over the `PostRepository` port: submission, the public
//! feed, report escalation, and moderator resolution.

pub mod moderation;
pub mod posts;
pub mod validation;
pub mod visibility;

pub use moderation::ModerationService;
pub use posts::PostService;
