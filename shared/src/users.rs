use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::{auth::SESSION_COOKIE, error::AppError, types::SignInRequest, AppState};

/// `POST /api/user` — exchanges an identity assertion for a session cookie.
///
/// On success the response carries the verifier's identity JSON and sets
/// the signed `email` cookie the gate checks on every other route.
pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, AppError> {
    let request: SignInRequest = serde_json::from_slice(&body)?;

    let identity = state
        .verifier
        .verify(&request.assertion, &state.config.origin)
        .await?;
    tracing::info!(email = %identity.email, "user signed in");

    let token = state.codec.encode(SESSION_COOKIE, &identity.email);
    let cookie = format!("{SESSION_COOKIE}={token}; Path=/");

    Ok(([(header::SET_COOKIE, cookie)], Json(identity)).into_response())
}
