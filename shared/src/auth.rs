//! Session gate.
//!
//! Middleware wrapping every resource route: a request either carries a
//! valid signed session cookie or is turned away with a 403 before the
//! inner handler runs. The gate never inspects or alters what the handler
//! does on success.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::AppState;

/// Name of the session cookie carrying the signed email.
pub const SESSION_COOKIE: &str = "email";

/// Email recovered from the session cookie, attached to the request for
/// handlers and logging.
#[derive(Debug, Clone)]
pub struct SessionEmail(pub String);

pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = cookie_value(request.headers(), SESSION_COOKIE) else {
        tracing::warn!("request without session cookie");
        return forbidden();
    };

    match state.codec.decode(SESSION_COOKIE, &token) {
        Ok(email) => {
            request.extensions_mut().insert(SessionEmail(email));
            next.run(request).await
        }
        Err(_) => {
            tracing::warn!("invalid session cookie");
            forbidden()
        }
    }
}

fn forbidden() -> Response {
    (StatusCode::FORBIDDEN, "Authentication required").into_response()
}

/// Pulls a single cookie out of the `Cookie` header, if present.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let header = headers.get(header::COOKIE)?.to_str().ok()?;
    header.split(';').map(str::trim).find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Config, session::SessionCodec, store::Store, verifier::IdentityVerifier,
    };
    use axum::{body::Body, middleware, routing::get, Router};
    use mongodb::Client;
    use tower::ServiceExt;

    async fn test_state() -> Arc<AppState> {
        // The driver connects lazily, so no MongoDB is needed as long as
        // the gate short-circuits before any query.
        let client = Client::with_uri_str("mongodb://127.0.0.1:27017")
            .await
            .unwrap();
        AppState::new(
            Config::load(),
            Store::new(client.database("corkboard-test")),
            SessionCodec::new(b"test-secret-key-32-bytes-long!!!".to_vec()),
            IdentityVerifier::new("http://127.0.0.1:1/verify").unwrap(),
        )
    }

    fn gated_router(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/gated", get(|| async { "ok" }))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_session,
            ))
            .with_state(state)
    }

    fn request(cookie: Option<&str>) -> axum::http::Request<Body> {
        let mut builder = axum::http::Request::builder().uri("/gated");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn missing_cookie_is_rejected() {
        use http_body_util::BodyExt;

        let state = test_state().await;
        let response = gated_router(state).oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"Authentication required");
    }

    #[tokio::test]
    async fn forged_cookie_is_rejected() {
        let state = test_state().await;
        let mut token = state.codec.encode(SESSION_COOKIE, "a@b.com");
        token.replace_range(0..1, "z");

        let response = gated_router(state)
            .oneshot(request(Some(&format!("email={token}"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn valid_cookie_passes_through() {
        let state = test_state().await;
        let token = state.codec.encode(SESSION_COOKIE, "a@b.com");

        let response = gated_router(state)
            .oneshot(request(Some(&format!("other=1; email={token}"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn cookie_header_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "a=1; email=tok.en; b=2".parse().unwrap(),
        );
        assert_eq!(cookie_value(&headers, "email").as_deref(), Some("tok.en"));
        assert_eq!(cookie_value(&headers, "missing"), None);
        assert_eq!(cookie_value(&HeaderMap::new(), "email"), None);
    }
}
