use std::{env, path::PathBuf};

use tracing::info;

/// Startup configuration, read once from the environment. Every knob has a
/// development default so the server runs out of the box.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address for the HTTP listener.
    pub addr: String,
    /// Public origin of this deployment, sent to the identity verifier as
    /// the audience.
    pub origin: String,
    /// MongoDB connection string.
    pub mongo_url: String,
    /// Database name holding the boards/lines/postits collections.
    pub database: String,
    /// Path of the raw session-secret file.
    pub secret_file: PathBuf,
    /// Remote identity verification endpoint.
    pub verifier_url: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            addr: load_var("CORKBOARD_ADDR", "127.0.0.1:8080"),
            origin: load_var("CORKBOARD_ORIGIN", "http://corkboard.lo"),
            mongo_url: load_var("CORKBOARD_MONGO_URL", "mongodb://localhost:27017"),
            database: load_var("CORKBOARD_DB", "corkboard"),
            secret_file: load_var("CORKBOARD_SECRET_FILE", ".secret").into(),
            verifier_url: load_var(
                "CORKBOARD_VERIFIER_URL",
                "https://verifier.login.persona.org/verify",
            ),
        }
    }
}

fn load_var(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}
