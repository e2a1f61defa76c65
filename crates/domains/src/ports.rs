//! # Ports
//!
//! Any storage backend must implement these traits to be wired into the
//! services.

use async_trait::async_trait;

use crate::errors::DomainResult;
use crate::models::{FeedFilter, Post, PostId};
use crate::moderation::KeepResolution;

/// Persistence contract for posts and their moderation metadata.
///
/// Each method is a single-document operation; the backend provides whatever
/// atomicity it naturally has for one record and nothing across records.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn insert(&self, post: &Post) -> DomainResult<()>;
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>>;

    /// Active posts matching `filter`, newest first.
    async fn find_visible(&self, filter: &FeedFilter) -> DomainResult<Vec<Post>>;
    /// Posts with `is_reported` set, whatever their status, newest first.
    async fn find_reported(&self) -> DomainResult<Vec<Post>>;

    /// Atomically records one report: sets the flag, increments the count,
    /// appends `reason`, and escalates at the threshold.
    /// Returns `None` when no post has this id.
    async fn record_report(&self, id: PostId, reason: &str) -> DomainResult<Option<Post>>;
    async fn resolve_keep(&self, id: PostId, resolution: KeepResolution) -> DomainResult<Option<Post>>;

    /// Returns `false` when no post had this id.
    async fn delete(&self, id: PostId) -> DomainResult<bool>;
}
