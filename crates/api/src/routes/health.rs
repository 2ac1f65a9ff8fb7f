//! `GET /health`: liveness plus a database round-trip, for load balancers.

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthReport {
    /// `"ok"`, or `"unavailable"` when the database cannot be reached.
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseHealth,
}

#[derive(Serialize)]
pub struct DatabaseHealth {
    pub reachable: bool,
    /// Round-trip time of the `SELECT 1` ping.
    pub latency_ms: u128,
}

/// Answers 503 when the database ping fails so that an orchestrator stops
/// routing traffic to this instance.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let started = Instant::now();
    let ping = haven_db::health_check(&state.pool).await;
    let database = DatabaseHealth {
        reachable: ping.is_ok(),
        latency_ms: started.elapsed().as_millis(),
    };

    let (code, status) = match ping {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unreachable");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    (
        code,
        Json(HealthReport {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
        }),
    )
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
