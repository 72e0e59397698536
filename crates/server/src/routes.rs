use axum::{routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::ServerState;

pub mod diagnostics;
pub mod time_entries;

/// Build the full application router: diagnostics plus the time entry collection.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let diagnostics = Router::new()
        .route("/", get(diagnostics::root))
        .route("/health", get(diagnostics::health))
        .route("/db-test", get(diagnostics::db_test));

    let entries = Router::new()
        .route("/time-entries", get(time_entries::list).post(time_entries::create))
        .route(
            "/time-entries/:id",
            get(time_entries::get)
                .put(time_entries::update)
                .delete(time_entries::delete),
        );

    diagnostics
        .merge(entries)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时记录状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
