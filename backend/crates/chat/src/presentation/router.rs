//! Chat Router

use crate::presentation::handlers::{self, ChatAppState};
use axum::{
    Router,
    http::{Method, header},
    routing::get,
};
use platform::client::FINGERPRINT_HEADER;
use tower_http::cors::{AllowHeaders, AllowMethods, Any, CorsLayer};

/// Create the chat router
///
/// Known paths answer GET and POST; every other path routes through the
/// fallback, which still accepts POST. OPTIONS on any path is answered by
/// the CORS layer as a preflight.
pub fn chat_router(state: ChatAppState) -> Router {
    Router::new()
        .route(
            "/messages",
            get(handlers::list_messages).post(handlers::post_message),
        )
        .route(
            "/online",
            get(handlers::online).post(handlers::post_message),
        )
        .route(
            "/debug/fp",
            get(handlers::debug_fingerprint).post(handlers::post_message),
        )
        .fallback(handlers::fallback)
        .with_state(state)
        .layer(cors_layer())
}

/// CORS policy: any origin, the chat methods, and the fingerprint headers
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::USER_AGENT,
            header::ACCEPT_LANGUAGE,
            FINGERPRINT_HEADER,
        ]))
}
