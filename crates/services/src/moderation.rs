//! # ModerationService
//!
//! Report escalation on the public side and the two administrator
//! resolutions on the admin side.

use std::sync::Arc;

use domains::{
    DomainError, DomainResult, KeepResolution, Post, PostId, PostRepository, ReportInput, ReportOutcome,
};
use tracing::{info, warn};

pub struct ModerationService {
    repo: Arc<dyn PostRepository>,
    keep: KeepResolution,
}

impl ModerationService {
    pub fn new(repo: Arc<dyn PostRepository>, keep: KeepResolution) -> Self {
        Self { repo, keep }
    }

    /// Records one report against a post and tells whether it is now hidden.
    pub async fn report(&self, id: PostId, input: ReportInput) -> DomainResult<ReportOutcome> {
        let reason = input.compose();
        let post = self
            .repo
            .record_report(id, &reason)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        let outcome = ReportOutcome::from(post);
        if outcome.hidden {
            warn!(post_id = %id, reports = outcome.post.report_count, "post hidden pending review");
        } else {
            info!(post_id = %id, reports = outcome.post.report_count, "post reported");
        }
        Ok(outcome)
    }

    /// The review queue: every flagged post regardless of status.
    pub async fn reported(&self) -> DomainResult<Vec<Post>> {
        self.repo.find_reported().await
    }

    /// Permanently removes a post. No record of it is kept.
    pub async fn resolve_delete(&self, id: PostId) -> DomainResult<()> {
        if !self.repo.delete(id).await? {
            return Err(DomainError::post_not_found(id));
        }
        info!(post_id = %id, "post deleted by moderator");
        Ok(())
    }

    /// Dismisses the reports on a post, according to the configured policy.
    pub async fn resolve_keep(&self, id: PostId) -> DomainResult<Post> {
        let post = self
            .repo
            .resolve_keep(id, self.keep)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;
        info!(post_id = %id, resolution = ?self.keep, status = %post.status, "post kept by moderator");
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{MockPostRepository, Mood, PostStatus, ESCALATION_THRESHOLD};

    fn post() -> Post {
        Post::new("u".into(), "c".into(), Mood::Joy, None, "Anonymous".into())
    }

    fn service(repo: MockPostRepository) -> ModerationService {
        ModerationService::new(Arc::new(repo), KeepResolution::ClearFlag)
    }

    #[tokio::test]
    async fn report_passes_composed_reason_to_storage() {
        let stored = post();
        let id = stored.id;
        let mut repo = MockPostRepository::new();
        repo.expect_record_report()
            .withf(move |pid, reason| *pid == id && reason.to_string() == "spam: bot account")
            .times(1)
            .returning(move |_, reason| {
                let mut post = stored.clone();
                post.record_report(reason.to_string());
                Ok(Some(post))
            });

        let input = ReportInput { reason: Some("spam".into()), detail: Some("bot account".into()) };
        let outcome = service(repo).report(id, input).await.unwrap();
        assert!(!outcome.hidden);
        assert_eq!(outcome.post.report_count, 1);
        assert_eq!(outcome.post.report_reasons, vec!["spam: bot account".to_string()]);
    }

    #[tokio::test]
    async fn report_flags_hidden_at_threshold() {
        let mut stored = post();
        for _ in 1..ESCALATION_THRESHOLD {
            stored.record_report("spam".into());
        }
        let mut repo = MockPostRepository::new();
        repo.expect_record_report().returning(move |_, reason| {
            let mut post = stored.clone();
            post.record_report(reason.to_string());
            Ok(Some(post))
        });

        let outcome = service(repo).report(PostId::generate(), ReportInput::default()).await.unwrap();
        assert!(outcome.hidden);
        assert_eq!(outcome.post.status, PostStatus::Reported);
    }

    #[tokio::test]
    async fn report_on_unknown_post_is_not_found() {
        let mut repo = MockPostRepository::new();
        repo.expect_record_report().returning(|_, _| Ok(None));

        let err = service(repo).report(PostId::generate(), ReportInput::default()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_of_missing_post_is_not_found() {
        let mut repo = MockPostRepository::new();
        repo.expect_delete().times(1).returning(|_| Ok(false));

        let err = service(repo).resolve_delete(PostId::generate()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn keep_uses_configured_resolution() {
        let stored = post();
        let mut repo = MockPostRepository::new();
        repo.expect_resolve_keep()
            .withf(|_, resolution| *resolution == KeepResolution::Restore)
            .times(1)
            .returning(move |_, resolution| {
                let mut post = stored.clone();
                post.resolve_keep(resolution);
                Ok(Some(post))
            });

        let service = ModerationService::new(Arc::new(repo), KeepResolution::Restore);
        let kept = service.resolve_keep(PostId::generate()).await.unwrap();
        assert!(!kept.is_reported);
    }

    #[tokio::test]
    async fn storage_failures_propagate() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_reported().returning(|| Err(DomainError::storage("connection reset")));

        let err = service(repo).reported().await.unwrap_err();
        assert_eq!(err, DomainError::Storage("connection reset".into()));
    }
}
