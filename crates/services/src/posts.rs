//! # PostService
//!
//! Submission and public reads of moments.

use std::sync::Arc;

use domains::{DomainError, DomainResult, FeedFilter, Post, PostDraft, PostId, PostRepository};
use tracing::{debug, info};

use crate::validation::{self, DEFAULT_SENDER};
use crate::visibility;

pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Validates a submission and stores it as a new, active post.
    pub async fn create(&self, draft: PostDraft) -> DomainResult<Post> {
        let image_url = validation::required("imageURL", draft.image_url)?;
        let caption = validation::caption(draft.caption)?;
        let mood = validation::mood(draft.mood.as_deref())?;
        let location = validation::non_blank(draft.location);
        let sender = validation::non_blank(draft.sender).unwrap_or_else(|| DEFAULT_SENDER.to_string());

        let post = Post::new(image_url, caption, mood, location, sender);
        self.repo.insert(&post).await?;

        info!(post_id = %post.id, mood = %post.mood, "post created");
        Ok(post)
    }

    /// The public feed: active posts only, newest first.
    pub async fn feed(&self, filter: &FeedFilter) -> DomainResult<Vec<Post>> {
        let posts = visibility::public_only(self.repo.find_visible(filter).await?);
        debug!(count = posts.len(), mood = ?filter.mood, "feed read");
        Ok(posts)
    }

    pub async fn get(&self, id: PostId) -> DomainResult<Post> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }
}
