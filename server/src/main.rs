use std::time::Duration;

use anyhow::Context;
use axum::http::{header::CONTENT_TYPE, Method};
use tokio::{
    net::TcpListener,
    signal::{
        ctrl_c,
        unix::{signal, SignalKind},
    },
};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use corkboard_shared::{
    config::Config,
    session::{self, SessionCodec},
    store::Store,
    verifier::IdentityVerifier,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load();

    let secret = session::load_or_generate_secret(&config.secret_file)
        .with_context(|| format!("can't read or write {}", config.secret_file.display()))?;

    info!("Connecting to MongoDB at {}", config.mongo_url);
    let store = Store::connect(&config.mongo_url, &config.database)
        .await
        .context("can't connect to MongoDB")?;

    let verifier =
        IdentityVerifier::new(&config.verifier_url).context("can't build the verifier client")?;

    let addr = config.addr.clone();
    let state = AppState::new(config, store, SessionCodec::new(secret), verifier);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = corkboard_shared::router(state).layer(cors);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("can't bind to {addr}"))?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
