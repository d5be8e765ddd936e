use axum::Router;

use crate::net::error;
use crate::state::ArcShared;

mod auth;

pub async fn not_found() -> error::Error {
    error::Error::api(error::GeneralKind::NotFound)
}

pub fn routes(state: &ArcShared) -> Router<ArcShared> {
    Router::new()
        .nest("/auth", auth::routes(state))
        .fallback(not_found)
}
