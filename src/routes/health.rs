use axum::{ Json, extract::State, http::StatusCode };
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthData {
    status: u16,
    database: &'static str,
}

/// Liveness plus a round trip to the store.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthData>) {
    let status = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "health check could not reach the database");
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    let health_data = HealthData {
        status: status.as_u16(),
        database: if status.is_success() { "ok" } else { "unreachable" },
    };
    (status, Json(health_data))
}
