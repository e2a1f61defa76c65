//! Handlers for the moderator dashboard.

use axum::extract::{Path, State};
use axum::Json;
use domains::{Post, PostId};

use crate::dto::{MessageResponse, PlaceResponse};
use crate::metrics::Resolution;
use crate::web::error::ApiError;
use crate::web::AppState;

/// `GET /reported`
pub async fn reported(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    Ok(Json(state.moderation.reported().await?))
}

/// `DELETE /{id}/delete`
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id: PostId = id.parse()?;
    state.moderation.resolve_delete(id).await?;
    state.metrics.record_resolution(Resolution::Delete);
    Ok(Json(MessageResponse::new("Post deleted successfully")))
}

/// `PUT /{id}/keep`
pub async fn keep_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PlaceResponse<Post>>, ApiError> {
    let id: PostId = id.parse()?;
    let post = state.moderation.resolve_keep(id).await?;
    state.metrics.record_resolution(Resolution::Keep);
    Ok(Json(PlaceResponse::new("Report dismissed", post)))
}
