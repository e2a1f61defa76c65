//! # MemoryPostRepository
//!
//! In-process `PostRepository` backed by a `DashMap`. Used for development and
//! tests. Per-post mutations run under the map's entry lock, so concurrent
//! reports on the same post serialize instead of losing updates.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use domains::{DomainError, DomainResult, FeedFilter, KeepResolution, Post, PostId, PostRepository};

#[derive(Default)]
pub struct MemoryPostRepository {
    posts: DashMap<PostId, Post>,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_newest_first(&self, keep: impl Fn(&Post) -> bool) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        posts
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn insert(&self, post: &Post) -> DomainResult<()> {
        match self.posts.entry(post.id) {
            Entry::Occupied(_) => Err(DomainError::storage(format!("duplicate post id {}", post.id))),
            Entry::Vacant(slot) => {
                slot.insert(post.clone());
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>> {
        Ok(self.posts.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_visible(&self, filter: &FeedFilter) -> DomainResult<Vec<Post>> {
        Ok(self.collect_newest_first(|post| post.is_public() && filter.matches(post)))
    }

    async fn find_reported(&self) -> DomainResult<Vec<Post>> {
        Ok(self.collect_newest_first(|post| post.is_reported))
    }

    async fn record_report(&self, id: PostId, reason: &str) -> DomainResult<Option<Post>> {
        Ok(self.posts.get_mut(&id).map(|mut entry| {
            entry.record_report(reason.to_string());
            entry.value().clone()
        }))
    }

    async fn resolve_keep(&self, id: PostId, resolution: KeepResolution) -> DomainResult<Option<Post>> {
        Ok(self.posts.get_mut(&id).map(|mut entry| {
            entry.resolve_keep(resolution);
            entry.value().clone()
        }))
    }

    async fn delete(&self, id: PostId) -> DomainResult<bool> {
        Ok(self.posts.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use domains::{Mood, PostStatus, ESCALATION_THRESHOLD};
    use std::sync::Arc;

    fn post_at(caption: &str, mood: Mood, minutes_ago: i64) -> Post {
        let mut post = Post::new("u".into(), caption.into(), mood, None, "Anonymous".into());
        post.created_at = Utc::now() - Duration::minutes(minutes_ago);
        post
    }

    #[tokio::test]
    async fn feed_is_filtered_and_newest_first() {
        let repo = MemoryPostRepository::new();
        let old = post_at("old regret", Mood::Regret, 30);
        let new = post_at("new regret", Mood::Regret, 1);
        let joy = post_at("sunny", Mood::Joy, 5);
        for post in [&old, &new, &joy] {
            repo.insert(post).await.unwrap();
        }

        let filter = FeedFilter { mood: Some(Mood::Regret), search: None };
        let feed = repo.find_visible(&filter).await.unwrap();
        assert_eq!(feed.iter().map(|p| p.id).collect::<Vec<_>>(), vec![new.id, old.id]);

        let filter = FeedFilter { mood: None, search: Some("SUNNY".into()) };
        assert_eq!(repo.find_visible(&filter).await.unwrap(), vec![joy]);
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let repo = MemoryPostRepository::new();
        let post = post_at("x", Mood::Joy, 0);
        repo.insert(&post).await.unwrap();
        assert!(matches!(repo.insert(&post).await, Err(DomainError::Storage(_))));
    }

    #[tokio::test]
    async fn escalated_post_leaves_feed_but_stays_in_queue() {
        let repo = MemoryPostRepository::new();
        let post = post_at("x", Mood::Joy, 0);
        repo.insert(&post).await.unwrap();

        for _ in 0..ESCALATION_THRESHOLD {
            repo.record_report(post.id, "spam").await.unwrap();
        }
        assert!(repo.find_visible(&FeedFilter::default()).await.unwrap().is_empty());
        let queue = repo.find_reported().await.unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].status, PostStatus::Reported);
    }

    #[tokio::test]
    async fn concurrent_reports_are_not_lost() {
        let repo = Arc::new(MemoryPostRepository::new());
        let post = post_at("x", Mood::Joy, 0);
        repo.insert(&post).await.unwrap();
        let id = post.id;

        let tasks: Vec<_> = (0..32)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.record_report(id, &format!("r{i}")).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let stored = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.report_count, 32);
        assert_eq!(stored.report_reasons.len(), 32);
    }

    #[tokio::test]
    async fn missing_ids_yield_none() {
        let repo = MemoryPostRepository::new();
        let id = PostId::generate();
        assert!(repo.record_report(id, "x").await.unwrap().is_none());
        assert!(repo.resolve_keep(id, KeepResolution::ClearFlag).await.unwrap().is_none());
        assert!(!repo.delete(id).await.unwrap());
    }
}
