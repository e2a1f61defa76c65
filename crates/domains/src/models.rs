//! # Domain Models
//!
//! A moment is the only entity: an image reference, a caption, a mood, and
//! the moderation metadata accumulated from reports.
//! Ids are UUID v7 so that they sort in creation order.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

/// Opaque, immutable identifier of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub Uuid);

impl PostId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PostId {
    type Err = DomainError;

    /// A malformed id can never name a stored post, so it reads as not-found.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self).map_err(|_| DomainError::post_not_found(s))
    }
}

/// The fixed set of moods a moment can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mood {
    #[default]
    Joy,
    Love,
    Peace,
    Gratitude,
    Hope,
    Nostalgia,
    Longing,
    Bittersweet,
    Sadness,
    Grief,
    Regret,
    Heartbreak,
    Confession,
    Healing,
    Anger,
    Closure,
}

impl Mood {
    pub const ALL: [Mood; 16] = [
        Mood::Joy,
        Mood::Love,
        Mood::Peace,
        Mood::Gratitude,
        Mood::Hope,
        Mood::Nostalgia,
        Mood::Longing,
        Mood::Bittersweet,
        Mood::Sadness,
        Mood::Grief,
        Mood::Regret,
        Mood::Heartbreak,
        Mood::Confession,
        Mood::Healing,
        Mood::Anger,
        Mood::Closure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Joy => "Joy",
            Mood::Love => "Love",
            Mood::Peace => "Peace",
            Mood::Gratitude => "Gratitude",
            Mood::Hope => "Hope",
            Mood::Nostalgia => "Nostalgia",
            Mood::Longing => "Longing",
            Mood::Bittersweet => "Bittersweet",
            Mood::Sadness => "Sadness",
            Mood::Grief => "Grief",
            Mood::Regret => "Regret",
            Mood::Heartbreak => "Heartbreak",
            Mood::Confession => "Confession",
            Mood::Healing => "Healing",
            Mood::Anger => "Anger",
            Mood::Closure => "Closure",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown mood '{s}'")))
    }
}

/// Public visibility state of a post.
///
/// There is no `Hidden` state: nothing in the moderation flow ever produces
/// one, so it is not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PostStatus {
    /// Shown in the public feed.
    #[default]
    Active,
    /// Escalated by reports; withheld from the public feed.
    Reported,
}

impl PostStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PostStatus::Active => "Active",
            PostStatus::Reported => "Reported",
        }
    }

    pub fn is_public(self) -> bool {
        self == PostStatus::Active
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(PostStatus::Active),
            "Reported" => Ok(PostStatus::Reported),
            other => Err(DomainError::storage(format!("unrecognised post status '{other}'"))),
        }
    }
}

/// One submitted moment and its moderation metadata.
///
/// Serialized with the field names the web clients read (`_id`, `imageURL`,
/// camelCase elsewhere).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: PostId,
    /// Reference to an externally hosted image
    #[serde(rename = "imageURL")]
    pub image_url: String,
    pub caption: String,
    pub mood: Mood,
    pub location: Option<String>,
    pub sender: String,
    pub status: PostStatus,
    /// Set by the first report; cleared only by an administrator keeping the post
    pub is_reported: bool,
    pub report_count: u32,
    /// One entry per report, in arrival order
    pub report_reasons: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Builds a fresh, unreported post with a new id and creation time.
    pub fn new(
        image_url: String,
        caption: String,
        mood: Mood,
        location: Option<String>,
        sender: String,
    ) -> Self {
        Self {
            id: PostId::generate(),
            image_url,
            caption,
            mood,
            location,
            sender,
            status: PostStatus::Active,
            is_reported: false,
            report_count: 0,
            report_reasons: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_public(&self) -> bool {
        self.status.is_public()
    }
}

/// Unvalidated submission fields, exactly as a client sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub image_url: Option<String>,
    pub caption: Option<String>,
    pub mood: Option<String>,
    pub location: Option<String>,
    pub sender: Option<String>,
}

/// Narrowing applied to the public feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedFilter {
    pub mood: Option<Mood>,
    /// Raw search text; split into keywords by [`FeedFilter::search_terms`]
    pub search: Option<String>,
}

impl FeedFilter {
    /// Lowercased, whitespace-separated keywords of the search text.
    pub fn search_terms(&self) -> Vec<String> {
        self.search
            .as_deref()
            .map(|s| s.split_whitespace().map(str::to_lowercase).collect())
            .unwrap_or_default()
    }

    /// Mood and keyword match only; status is the visibility policy's concern.
    pub fn matches(&self, post: &Post) -> bool {
        if self.mood.is_some_and(|mood| mood != post.mood) {
            return false;
        }
        let terms = self.search_terms();
        if terms.is_empty() {
            return true;
        }
        let caption = post.caption.to_lowercase();
        terms.iter().any(|term| caption.contains(term.as_str()))
    }
}
