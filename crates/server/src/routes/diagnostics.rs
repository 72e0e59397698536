use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::types::Health;
use tracing::error;

use crate::{errors::ProblemDetails, state::ServerState};

pub async fn root() -> &'static str {
    "Hello World!"
}

/// Process liveness; never touches the store.
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Store connectivity probe.
pub async fn db_test(State(state): State<ServerState>) -> Response {
    match state.time_entries.ping().await {
        Ok(()) => (StatusCode::OK, Json("Connected to the database successfully!")).into_response(),
        Err(e) => {
            error!(err = %e, "database connectivity probe failed");
            ProblemDetails::internal(format!("Connection failed: {e}")).into_response()
        }
    }
}
