use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::net::error;
use crate::net::layer::{self, trace};
use crate::state::ArcShared;

mod api;
mod guard;
mod handle;

async fn ping() -> (StatusCode, &'static str) {
    (StatusCode::OK, "pong")
}

pub fn routes(state: &ArcShared, timeout: Duration) -> Router {
    Router::new()
        .nest("/api", api::routes(state))
        .route("/ping", get(ping))
        .fallback(api::not_found)
        .layer(ServiceBuilder::new()
            .layer(layer::RIDLayer::new())
            .layer(TraceLayer::new_for_http()
                .make_span_with(trace::make_span_with)
                .on_request(trace::on_request)
                .on_response(trace::on_response)
                .on_failure(trace::on_failure))
            .layer(HandleErrorLayer::new(error::handle_error))
            .layer(layer::TimeoutLayer::new(timeout)))
        .with_state(state.clone())
}
