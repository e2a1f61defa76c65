//! Handlers for the public API consumed by the frontend.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use domains::{Post, PostId};
use services::validation;

use crate::dto::{CreatePostRequest, FeedQuery, PlaceResponse, ReportRequest, ReportResponse};
use crate::web::error::ApiError;
use crate::web::AppState;

/// `GET /posts/feed?mood=&search=`
pub async fn feed(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<PlaceResponse<Vec<Post>>>, ApiError> {
    let filter = validation::feed_filter(query.mood.as_deref(), query.search.as_deref())?;
    let posts = state.posts.feed(&filter).await?;
    Ok(Json(PlaceResponse::new("Feed fetched successfully", posts)))
}

/// `POST /create/post`
pub async fn create_post(
    State(state): State<AppState>,
    Json(body): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PlaceResponse<Post>>), ApiError> {
    let post = state.posts.create(body.into()).await?;
    state.metrics.posts_created.inc();
    Ok((StatusCode::CREATED, Json(PlaceResponse::new("Post created successfully", post))))
}

/// `POST /place/{id}/report`
pub async fn report_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ReportRequest>,
) -> Result<Json<ReportResponse>, ApiError> {
    let id: PostId = id.parse()?;
    let outcome = state.moderation.report(id, body.into()).await?;

    state.metrics.reports.inc();
    if outcome.hidden {
        state.metrics.escalations.inc();
    }
    Ok(Json(outcome.into()))
}
