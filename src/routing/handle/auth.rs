use axum::{debug_handler, Json};
use axum::http::StatusCode;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use trivia_api::Payload;
use trivia_api::auth::{Signup, Login, User};

use crate::net::error;
use crate::sec::authn::Initiator;
use crate::state::ArcShared;

#[debug_handler]
pub async fn signup(
    State(state): State<ArcShared>,
    body: Result<Json<Signup>, JsonRejection>,
) -> error::Result<impl IntoResponse> {
    let Json(body) = body?;

    let created = state.auth().signup(body).await?;

    Ok((StatusCode::CREATED, Payload::new(created)))
}

#[debug_handler]
pub async fn login(
    State(state): State<ArcShared>,
    body: Result<Json<Login>, JsonRejection>,
) -> error::Result<impl IntoResponse> {
    let Json(body) = body?;

    let authenticated = state.auth().login(body).await?;

    Ok(Payload::new(authenticated))
}

#[debug_handler]
pub async fn me(
    State(state): State<ArcShared>,
    initiator: Initiator,
) -> error::Result<Payload<User>> {
    let user = state.auth().me(initiator).await?;

    Ok(Payload::new(user))
}
