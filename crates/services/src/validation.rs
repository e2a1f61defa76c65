//! Input checks applied before anything reaches storage.

use domains::{DomainError, DomainResult, FeedFilter, Mood};

pub const MAX_CAPTION_CHARS: usize = 255;
pub const DEFAULT_SENDER: &str = "Anonymous";

/// Blank strings count as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn required(field: &str, value: Option<String>) -> DomainResult<String> {
    non_blank(value).ok_or_else(|| DomainError::validation(format!("{field} is required")))
}

pub fn caption(value: Option<String>) -> DomainResult<String> {
    let caption = required("caption", value)?;
    let len = caption.chars().count();
    if len > MAX_CAPTION_CHARS {
        return Err(DomainError::validation(format!(
            "caption must be at most {MAX_CAPTION_CHARS} characters (got {len})"
        )));
    }
    Ok(caption)
}

pub fn mood(value: Option<&str>) -> DomainResult<Mood> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => raw.parse(),
        None => Ok(Mood::default()),
    }
}

pub fn feed_filter(mood: Option<&str>, search: Option<&str>) -> DomainResult<FeedFilter> {
    let mood = match mood.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => Some(raw.parse()?),
        None => None,
    };
    let search = non_blank(search.map(str::to_owned));
    Ok(FeedFilter { mood, search })
}
