//! Liveness and readiness endpoints

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, health_router, run_health_checks};
use database::mongodb::check_health_detailed;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// `/ready`: 200 when MongoDB answers a ping, 503 otherwise
async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let client = state.mongo_client.clone();
    let checks: Vec<(&str, HealthCheckFuture<'static>)> = vec![(
        "mongodb",
        Box::pin(async move {
            let status = check_health_detailed(&client).await;
            if status.healthy {
                Ok(())
            } else {
                Err(status.message.unwrap_or_default())
            }
        }),
    )];

    run_health_checks(checks).await
}

/// `/health`, `/ready` and read-only `/uploads`
pub fn router(state: AppState) -> Router {
    let uploads = ServeDir::new(&state.config.uploads.dir);

    Router::new()
        .route("/ready", get(ready))
        .with_state(state.clone())
        .merge(health_router(state.config.app))
        .nest_service("/uploads", uploads)
}
