//! Shared fixtures for the cross-crate tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use domains::{Mood, Post, PostRepository};
use serde_json::Value;
use storage_adapters::{MemoryPostRepository, SqlitePostRepository};
use tower::ServiceExt;

pub fn memory_repo() -> Arc<dyn PostRepository> {
    Arc::new(MemoryPostRepository::new())
}

pub async fn sqlite_repo() -> Arc<dyn PostRepository> {
    Arc::new(
        SqlitePostRepository::connect("sqlite::memory:", 1)
            .await
            .expect("in-memory sqlite"),
    )
}

/// Both backends, for tests that must hold regardless of storage.
pub async fn all_repos() -> Vec<(&'static str, Arc<dyn PostRepository>)> {
    vec![("memory", memory_repo()), ("sqlite", sqlite_repo().await)]
}

/// A post created `minutes_ago` minutes in the past.
pub fn post_at(caption: &str, mood: Mood, minutes_ago: i64) -> Post {
    let mut post = Post::new(
        format!("https://img.example/{}.jpg", caption.replace(' ', "-")),
        caption.to_string(),
        mood,
        None,
        "Anonymous".to_string(),
    );
    post.created_at = Utc::now() - Duration::minutes(minutes_ago);
    post
}

/// Sends one request through `router` and decodes the JSON body (or `Null`).
pub async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(request.body(body).expect("valid request"))
        .await
        .expect("infallible router");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub fn ids(posts: &Value) -> Vec<String> {
    posts
        .as_array()
        .expect("array of posts")
        .iter()
        .map(|p| p["_id"].as_str().expect("post id").to_string())
        .collect()
}
