//! CardCraft REST Server
//!
//! Stores cards and feedback in memory and serves them to the web editor
//! as JSON. Shared by the binary and the integration tests.
//!
//! ## Routes
//!
//! - `/api/cards` with share, showcase, SVG export and share-link lookups
//! - `/api/upload` and `/uploads/{name}` for card images
//! - `/api/feedback`
//! - `/api/templates`

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod validation;

pub use config::Config;
pub use error::ApiError;
pub use state::AppState;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// The full application with middleware.
pub fn app(state: AppState) -> Router {
    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
