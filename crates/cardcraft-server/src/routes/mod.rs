//! Router assembly.

pub mod cards;
pub mod feedback;
pub mod templates;
pub mod uploads;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};

use crate::state::AppState;

/// All API routes, without middleware.
pub fn router(state: AppState) -> Router {
    let upload_limit =
        DefaultBodyLimit::max(state.config.max_upload_bytes + uploads::MULTIPART_OVERHEAD);

    Router::new()
        .route("/health", get(health))
        .route("/api/cards", get(cards::list_cards).post(cards::create_card))
        .route("/api/cards/showcase", get(cards::showcase))
        .route("/api/cards/share/{share_id}", get(cards::get_shared_card))
        .route(
            "/api/cards/{id}",
            get(cards::get_card)
                .put(cards::update_card)
                .delete(cards::delete_card),
        )
        .route("/api/cards/{id}/image.svg", get(cards::card_image))
        .route("/api/cards/{id}/share-links", get(cards::share_links))
        .route("/api/upload", post(uploads::upload_image).layer(upload_limit))
        .route("/uploads/{name}", get(uploads::get_upload))
        .route(
            "/api/feedback",
            get(feedback::list_feedback).post(feedback::create_feedback),
        )
        .route("/api/feedback/{id}", get(feedback::get_feedback))
        .route("/api/templates", get(templates::list_templates))
        .route("/api/templates/{id}", get(templates::get_template))
        .with_state(state)
}

/// Health check
async fn health() -> &'static str {
    "ok"
}
