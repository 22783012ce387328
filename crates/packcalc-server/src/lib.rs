//! packcalc-server - HTTP surface for the pack calculator
//!
//! Routes:
//! - `GET /health` - liveness, always `200 ok`
//! - `GET /packs?quantity=N` - allocation as `{"packs": {"<size>": <count>}}`
//! - `OPTIONS /packs` - CORS preflight
//!
//! Quantities are validated against the configured maximum before the
//! allocator runs; the allocation itself runs on a blocking worker.

pub mod cors;
pub mod handlers;
pub mod serve;
pub mod state;

use axum::Router;
use axum::routing::get;

pub use serve::{serve, serve_on, shutdown_signal};
pub use state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/packs",
            get(handlers::packs).options(handlers::packs_preflight),
        )
        .with_state(state)
}
