//! API routes.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, header::ACCESS_CONTROL_ALLOW_ORIGIN},
    middleware,
    routing::{get, post},
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::{
    handlers::{home, method_not_allowed, preflight, request_logging, store_video_data, summarize},
    state::AppState,
};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/summarize",
            post(summarize)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/store-video-data",
            post(store_video_data)
                .options(preflight)
                .fallback(method_not_allowed),
        );

    Router::new()
        .route("/", get(home))
        .nest("/api", api_routes)
        // oversized bodies surface as a JSON rejection, mapped to 413 `{error}`
        .layer(DefaultBodyLimit::max(state.config.max_body_size))
        .layer(middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        // every response, errors included, is readable from any origin
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .with_state(state)
}
