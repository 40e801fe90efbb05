use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppError,
    types::{new_id, CreatePostitRequest, Postit},
    AppState,
};

/// `GET /api/boards/{id}/postits` — the postits attached to one board.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Postit>>, AppError> {
    Ok(Json(state.store.postits_for_board(&id).await?))
}

/// `POST /api/boards/{id}/postits` — creates a postit on the board named
/// by the path. The id is generated and `board_id` comes from the path;
/// whatever the client sent for either is ignored. The referenced board is
/// not checked to exist.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Postit>, AppError> {
    let request: CreatePostitRequest = serde_json::from_slice(&body)?;

    let postit = Postit {
        id: new_id(),
        board_id: id,
        title: request.title,
        coords: request.coords,
        size: request.size,
        angle: request.angle,
        color: request.color,
    };
    state.store.insert_postit(&postit).await?;
    tracing::info!(postit_id = %postit.id, board_id = %postit.board_id, "postit created");

    Ok(Json(postit))
}
