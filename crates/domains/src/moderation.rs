//! # Moderation transitions
//!
//! The only ways a post changes after creation: a report ratchets it toward
//! `Reported`, and an administrator keeping it clears the report flag.
//! Storage adapters apply these functions (or an equivalent atomic statement)
//! so the rules live in one place.

use crate::models::{Post, PostStatus};

/// Number of reports after which a post leaves the public feed.
pub const ESCALATION_THRESHOLD: u32 = 5;

/// A user's flag against a post. Both parts are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportInput {
    pub reason: Option<String>,
    pub detail: Option<String>,
}

impl ReportInput {
    /// The single reason line recorded for this report.
    ///
    /// `"<reason>: <detail>"` when both are present, otherwise whichever one
    /// is. A report with neither records an empty line.
    pub fn compose(&self) -> String {
        let reason = self.reason.as_deref().filter(|r| !r.is_empty());
        let detail = self.detail.as_deref().filter(|d| !d.trim().is_empty());

        match (reason, detail) {
            (Some(reason), Some(detail)) => format!("{reason}: {detail}"),
            (Some(reason), None) => reason.to_string(),
            (None, _) => self.detail.clone().unwrap_or_default(),
        }
    }
}

/// Result of recording a report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutcome {
    pub post: Post,
    /// The post is (now) withheld from the public feed.
    pub hidden: bool,
}

impl From<Post> for ReportOutcome {
    fn from(post: Post) -> Self {
        let hidden = post.status == PostStatus::Reported;
        Self { post, hidden }
    }
}

/// What "keep" does to a reported post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeepResolution {
    /// Clear `is_reported` only. Count, reasons and status are untouched, so
    /// an escalated post stays out of the feed and out of the review queue.
    #[default]
    ClearFlag,
    /// Clear the flag and return the post to the feed with a clean record.
    Restore,
}

impl Post {
    /// Records one report. Returns `true` when the post is hidden afterwards.
    ///
    /// `Active -> Reported` is one-way; nothing here ever re-activates a post.
    pub fn record_report(&mut self, reason: String) -> bool {
        self.is_reported = true;
        self.report_count += 1;
        self.report_reasons.push(reason);
        if self.report_count >= ESCALATION_THRESHOLD {
            self.status = PostStatus::Reported;
        }
        self.status == PostStatus::Reported
    }

    pub fn resolve_keep(&mut self, resolution: KeepResolution) {
        self.is_reported = false;
        if resolution == KeepResolution::Restore {
            self.status = PostStatus::Active;
            self.report_count = 0;
            self.report_reasons.clear();
        }
    }
}
