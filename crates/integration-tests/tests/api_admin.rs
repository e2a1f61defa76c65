use api_adapters::web::{admin_router, public_router, AppState};
use axum::http::{Method, StatusCode};
use domains::{KeepResolution, Mood, PostId};
use integration_tests::{ids, post_at, send, sqlite_repo};
use serde_json::json;

async fn report_times(app: &axum::Router, id: PostId, times: usize) {
    for _ in 0..times {
        let (status, _) = send(app, Method::POST, &format!("/place/{id}/report"), Some(json!({ "reason": "spam" }))).await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn reported_lists_flagged_posts_newest_first() {
    let repo = sqlite_repo().await;
    let older = post_at("older", Mood::Joy, 30);
    let newer = post_at("newer", Mood::Joy, 10);
    let clean = post_at("clean", Mood::Joy, 1);
    for post in [&older, &newer, &clean] {
        repo.insert(post).await.unwrap();
    }
    let state = AppState::new(repo, KeepResolution::ClearFlag);
    let public = public_router(state.clone());
    let admin = admin_router(state);

    report_times(&public, older.id, 5).await;
    report_times(&public, newer.id, 1).await;

    let (status, body) = send(&admin, Method::GET, "/reported", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![newer.id.to_string(), older.id.to_string()]);
    assert_eq!(body[1]["status"], "Reported");
    assert_eq!(body[1]["reportReasons"].as_array().unwrap().len(), 5);
    assert_eq!(body[0]["status"], "Active");
}

#[tokio::test]
async fn delete_removes_post_and_second_delete_is_404() {
    let repo = sqlite_repo().await;
    let post = post_at("doomed", Mood::Anger, 0);
    repo.insert(&post).await.unwrap();
    let state = AppState::new(repo.clone(), KeepResolution::ClearFlag);
    let public = public_router(state.clone());
    let admin = admin_router(state);
    report_times(&public, post.id, 5).await;

    let uri = format!("/{}/delete", post.id);
    let (status, body) = send(&admin, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());
    assert!(repo.find_by_id(post.id).await.unwrap().is_none());

    let (status, body) = send(&admin, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Post not found");
}

#[tokio::test]
async fn keep_clears_flag_only() {
    let repo = sqlite_repo().await;
    let post = post_at("contested", Mood::Confession, 0);
    repo.insert(&post).await.unwrap();
    let state = AppState::new(repo, KeepResolution::ClearFlag);
    let public = public_router(state.clone());
    let admin = admin_router(state);
    report_times(&public, post.id, 5).await;

    let (status, body) = send(&admin, Method::PUT, &format!("/{}/keep", post.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["place"]["isReported"], false);
    assert_eq!(body["place"]["reportCount"], 5);
    assert_eq!(body["place"]["status"], "Reported");

    let (_, queue) = send(&admin, Method::GET, "/reported", None).await;
    assert!(ids(&queue).is_empty());
}

#[tokio::test]
async fn keep_on_unknown_id_is_404() {
    let admin = admin_router(AppState::new(sqlite_repo().await, KeepResolution::ClearFlag));
    let (status, _) = send(&admin, Method::PUT, &format!("/{}/keep", PostId::generate()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
