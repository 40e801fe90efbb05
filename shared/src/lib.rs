pub mod auth;
pub mod boards;
pub mod config;
pub mod error;
pub mod postits;
pub mod session;
pub mod store;
pub mod types;
pub mod users;
pub mod verifier;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use config::Config;
use session::SessionCodec;
use store::Store;
use verifier::IdentityVerifier;

/// Shared application state, built once at startup and handed to every
/// handler. Everything in here is read-only after construction.
pub struct AppState {
    pub config: Config,
    pub store: Store,
    pub codec: SessionCodec,
    pub verifier: IdentityVerifier,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Store,
        codec: SessionCodec,
        verifier: IdentityVerifier,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            store,
            codec,
            verifier,
        })
    }
}

/// Builds the API router. Every route except `POST /api/user` sits behind
/// the session gate.
pub fn router(state: Arc<AppState>) -> Router {
    let gated = Router::new()
        .route("/api/boards", get(boards::list).post(boards::create))
        .route("/api/boards/{id}", get(boards::show))
        .route(
            "/api/boards/{id}/postits",
            get(postits::list).post(postits::create),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ));

    Router::new()
        .route("/api/user", post(users::sign_in))
        .merge(gated)
        .with_state(state)
}
