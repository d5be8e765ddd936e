use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::MethodRouter;

use crate::net::error;
use crate::sec::authn::initiator;
use crate::state::ArcShared;

/// who may call a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Session,
}

/// resolves the bearer token into an [`Initiator`](crate::sec::authn::Initiator)
/// for the handler or rejects the request before the handler runs
pub async fn require_session(
    State(state): State<ArcShared>,
    mut request: Request,
    next: Next,
) -> error::Result<Response> {
    let initiator = initiator::lookup_header_map(state.sec(), request.headers())?;

    request.extensions_mut().insert(initiator);

    Ok(next.run(request).await)
}

pub fn apply(
    access: Access,
    handler: MethodRouter<ArcShared>,
    state: &ArcShared
) -> MethodRouter<ArcShared> {
    match access {
        Access::Public => handler,
        Access::Session => handler.route_layer(
            middleware::from_fn_with_state(state.clone(), require_session)
        ),
    }
}
