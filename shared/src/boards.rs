use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppError,
    types::{new_id, Board, CreateBoardRequest},
    AppState,
};

/// `GET /api/boards` — every board, unfiltered.
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Board>>, AppError> {
    Ok(Json(state.store.all_boards().await?))
}

/// `POST /api/boards` — creates a board with a server-generated id; any
/// client-supplied `_id` is ignored.
pub async fn create(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Board>, AppError> {
    let request: CreateBoardRequest = serde_json::from_slice(&body)?;

    let board = Board {
        id: new_id(),
        title: request.title,
    };
    state.store.insert_board(&board).await?;
    tracing::info!(board_id = %board.id, "board created");

    Ok(Json(board))
}

/// `GET /api/boards/{id}` — one board or 404.
pub async fn show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Board>, AppError> {
    state
        .store
        .board_by_id(&id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}
