//! HTTP routes
//!
//! Three surfaces: the `/env.js` runtime configuration script, a health
//! probe, and the static page bundle. The bundle and the script are both
//! served uncacheable so credential rotation and redeploys take effect on
//! the next page load; `Service-Worker-Allowed` lets the worker script
//! claim the root scope even when bundled under a subdirectory.

use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

const NO_STORE: &str = "no-cache, no-store, must-revalidate";

/// Build the full application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_assets = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static(NO_STORE),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("service-worker-allowed"),
            HeaderValue::from_static("/"),
        ))
        .service(ServeDir::new(&state.config.assets.root));

    Router::new()
        .route("/env.js", get(env_script))
        .route("/health", get(health))
        .fallback_service(static_assets)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::new()))
        .with_state(state)
}

/// Runtime configuration script.
///
/// Generated per request rather than baked into the bundle, so one built
/// bundle serves every deployment. Empty values are injected as-is; the
/// page treats them as "unconfigured" and falls back to demo content.
async fn env_script(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let env = json!({
        "CATALOG_URL": state.config.catalog.url,
        "CATALOG_ANON_KEY": state.config.catalog.anon_key,
    });
    let body = format!("window.env = {env};\n");

    (
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/javascript"),
            ),
            (header::CACHE_CONTROL, HeaderValue::from_static(NO_STORE)),
        ],
        body,
    )
}

/// Health probe for deployment orchestration.
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
