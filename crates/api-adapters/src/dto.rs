//! Request and response bodies, shaped the way the web clients send and read
//! them.

use domains::{Post, PostDraft, ReportInput, ReportOutcome};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct CreatePostRequest {
    #[serde(rename = "imageURL")]
    pub image_url: Option<String>,
    pub caption: Option<String>,
    pub mood: Option<String>,
    pub location: Option<String>,
    pub sender: Option<String>,
}

impl From<CreatePostRequest> for PostDraft {
    fn from(req: CreatePostRequest) -> Self {
        PostDraft {
            image_url: req.image_url,
            caption: req.caption,
            mood: req.mood,
            location: req.location,
            sender: req.sender,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportRequest {
    pub reason: Option<String>,
    pub detail: Option<String>,
}

impl From<ReportRequest> for ReportInput {
    fn from(req: ReportRequest) -> Self {
        ReportInput { reason: req.reason, detail: req.detail }
    }
}

/// `GET /posts/feed` query string.
#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    pub mood: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// `{ message, place }`; `place` is a single post or a list of them.
#[derive(Debug, Serialize)]
pub struct PlaceResponse<T> {
    pub message: String,
    pub place: T,
}

impl<T> PlaceResponse<T> {
    pub fn new(message: impl Into<String>, place: T) -> Self {
        Self { message: message.into(), place }
    }
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    pub place: Post,
}

impl From<ReportOutcome> for ReportResponse {
    fn from(outcome: ReportOutcome) -> Self {
        if outcome.hidden {
            Self {
                message: "Post has been hidden for admin review due to multiple reports".into(),
                hidden: Some(true),
                place: outcome.post,
            }
        } else {
            Self { message: "Post reported successfully".into(), hidden: None, place: outcome.post }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{Mood, PostStatus};

    #[test]
    fn create_request_reads_client_field_names() {
        let req: CreatePostRequest = serde_json::from_str(
            r#"{"imageURL":"https://img.example/a.png","caption":"hi","mood":"Hope","sender":"K"}"#,
        )
        .unwrap();
        let draft = PostDraft::from(req);
        assert_eq!(draft.image_url.as_deref(), Some("https://img.example/a.png"));
        assert_eq!(draft.mood.as_deref(), Some("Hope"));
        assert_eq!(draft.location, None);
    }

    #[test]
    fn empty_report_body_is_accepted() {
        let req: ReportRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(ReportInput::from(req), ReportInput::default());
    }

    #[test]
    fn hidden_flag_only_appears_when_hidden() {
        let mut post = Post::new("u".into(), "c".into(), Mood::Joy, None, "Anonymous".into());
        let visible = serde_json::to_value(ReportResponse::from(ReportOutcome::from(post.clone()))).unwrap();
        assert!(visible.get("hidden").is_none());

        post.status = PostStatus::Reported;
        let hidden = serde_json::to_value(ReportResponse::from(ReportOutcome::from(post))).unwrap();
        assert_eq!(hidden["hidden"], true);
        assert_eq!(hidden["place"]["status"], "Reported");
    }
}
