mod checkout;
mod notify;
mod pages;

pub use checkout::*;
pub use notify::*;
pub use pages::*;

use std::net::SocketAddr;

use axum::{
    body::Bytes,
    extract::{ConnectInfo, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::ipn;
use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dispatch).post(dispatch))
        .route("/health", get(health))
}

/// One virtual page serving four behaviors, selected by the `action` query
/// parameter: `process` (the default), `complete`, `cancel`, `ipn`.
pub async fn dispatch(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Response {
    let query = query.unwrap_or_default();
    let mut params = ipn::parse_pairs(&query);
    let action = params
        .shift_remove("action")
        .unwrap_or_else(|| "process".to_string());
    let client = addr.ip().to_string();

    match action.as_str() {
        "process" => process_checkout(&state, &client, &body).into_response(),
        "complete" => display_completed(&state, &client, &params).into_response(),
        "cancel" => display_cancelled(&state, &client).into_response(),
        "ipn" => handle_ipn(&state, &client, &body).await.into_response(),
        _ => (StatusCode::NOT_FOUND, "Unknown action").into_response(),
    }
}
