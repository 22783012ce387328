use std::time::Instant;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use packcalc_allocator::{Allocation, allocate};
use packcalc_utils::error::QuantityError;
use packcalc_utils::quantity::{format_thousands, parse_quantity};

use crate::cors;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PacksQuery {
    pub quantity: Option<String>,
}

/// Body of a successful `/packs` response.
#[derive(Debug, Serialize)]
pub struct PacksResponse {
    pub packs: Allocation,
}

/// Liveness probe; independent of the allocator.
pub async fn health() -> &'static str {
    "ok"
}

/// `GET /packs?quantity=N`
pub async fn packs(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PacksQuery>,
) -> Response {
    let mut response = match parse_quantity(query.quantity.as_deref(), Some(state.max_quantity))
    {
        Ok(quantity) => allocate_response(&state, quantity).await,
        Err(err) => reject(&err, state.max_quantity),
    };

    cors::apply(
        state.allowed_origin.as_deref(),
        &headers,
        response.headers_mut(),
    );
    response
}

/// `OPTIONS /packs`
pub async fn packs_preflight(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    let allowed = cors::apply(
        state.allowed_origin.as_deref(),
        &headers,
        response.headers_mut(),
    );
    debug!(allowed, "CORS preflight");
    response
}

async fn allocate_response(state: &AppState, quantity: i64) -> Response {
    let catalog = state.catalog.clone();
    let started = Instant::now();

    match tokio::task::spawn_blocking(move || allocate(quantity, &catalog)).await {
        Ok(packs) => {
            info!(
                quantity,
                total_items = packs.total_items(),
                total_packs = packs.total_packs(),
                duration_ms = started.elapsed().as_millis() as u64,
                "Allocated packs"
            );
            Json(PacksResponse { packs }).into_response()
        }
        Err(join_err) => {
            error!(quantity, error = %join_err, "Allocation task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Allocation failed").into_response()
        }
    }
}

fn reject(err: &QuantityError, max_quantity: i64) -> Response {
    warn!(reason = %err, "Rejected quantity");
    let message = match err {
        QuantityError::Missing => "Quantity not specified".to_string(),
        QuantityError::NotAnInteger { .. }
        | QuantityError::OutOfRange { .. }
        | QuantityError::TooLarge { .. } => format!(
            "Provide quantity between 1 and {}",
            format_thousands(max_quantity)
        ),
    };
    (StatusCode::BAD_REQUEST, message).into_response()
}
