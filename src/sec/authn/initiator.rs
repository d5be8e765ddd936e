use std::pin::Pin;
use std::future::Future;

use trivia_lib::ids;
use axum::http::header::{HeaderMap, AUTHORIZATION};
use axum::http::request::Parts;
use axum::extract::FromRequestParts;

use crate::net::error;
use crate::sec::state;

use super::session;

/// the authenticated caller of a request
#[derive(Debug, Clone)]
pub struct Initiator {
    pub session: session::Session,
}

impl Initiator {
    pub fn user_id(&self) -> &ids::UserId {
        &self.session.user_id
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("session was not found")]
    SessionNotFound,

    #[error("session has expired")]
    SessionExpired(session::Session),

    #[error("no authentication mechanism was found")]
    MechanismNotFound,

    #[error("authorization scheme is not supported")]
    InvalidAuthScheme,

    #[error(transparent)]
    SessionDecode(#[from] session::DecodeError),

    #[error(transparent)]
    HeaderToStr(#[from] axum::http::header::ToStrError),
}

impl From<LookupError> for error::Error {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::SessionNotFound => error::Error::api(error::AuthKind::SessionNotFound),
            LookupError::SessionExpired(_session) => error::Error::api(error::AuthKind::SessionExpired),
            LookupError::MechanismNotFound => error::Error::api(error::AuthKind::MechanismNotFound),
            LookupError::InvalidAuthScheme => error::Error::api(error::AuthKind::InvalidAuthScheme),
            LookupError::SessionDecode(_err) => error::Error::api(error::AuthKind::InvalidSession),
            LookupError::HeaderToStr(e) => e.into(),
        }
    }
}

pub fn lookup_token<S>(auth: &state::Sec, encoded: S) -> Result<Initiator, LookupError>
where
    S: AsRef<[u8]>
{
    let token = session::decode_base64(auth, encoded)?;

    let Some(session) = auth.session_info().cache().get(&token) else {
        return Err(LookupError::SessionNotFound);
    };

    if session.is_expired(&chrono::Utc::now()) {
        return Err(LookupError::SessionExpired(session));
    }

    Ok(Initiator { session })
}

pub fn lookup_header_map(auth: &state::Sec, headers: &HeaderMap) -> Result<Initiator, LookupError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Err(LookupError::MechanismNotFound);
    };

    let value = value.to_str()?;
    let (scheme, token) = value.split_once(' ')
        .unwrap_or((value, ""));

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(LookupError::InvalidAuthScheme);
    }

    lookup_token(auth, token.trim())
}

/// only available on routes behind the session guard, which places the
/// resolved initiator in the request extensions
impl<S> FromRequestParts<S> for Initiator
where
    S: Sync,
{
    type Rejection = error::Error;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> Pin<Box<dyn Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>>
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait
    {
        Box::pin(async move {
            parts.extensions.remove::<Initiator>()
                .ok_or_else(|| error::Error::new()
                    .context("Initiator requested on a route without the session guard"))
        })
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use axum::http::HeaderValue;

    use super::*;

    fn headers(value: &'static str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, HeaderValue::from_static(value));
        map
    }

    #[test]
    fn resolves_bearer_tokens() {
        let auth = state::Sec::new([1; 32], Duration::from_secs(60), 10);
        let user_id = ids::UserId::gen();
        let (_session, encoded) = auth.create_session(user_id.clone())
            .expect("failed to create session");

        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, format!("Bearer {encoded}").parse().unwrap());

        let initiator = lookup_header_map(&auth, &map).expect("lookup failed");

        assert_eq!(initiator.user_id(), &user_id);
    }

    #[test]
    fn lookup_failures() {
        let auth = state::Sec::new([1; 32], Duration::from_secs(60), 10);

        assert!(matches!(
            lookup_header_map(&auth, &HeaderMap::new()),
            Err(LookupError::MechanismNotFound)
        ));
        assert!(matches!(
            lookup_header_map(&auth, &headers("Basic dXNlcjpwYXNz")),
            Err(LookupError::InvalidAuthScheme)
        ));
        assert!(matches!(
            lookup_header_map(&auth, &headers("Bearer garbage")),
            Err(LookupError::SessionDecode(_))
        ));

        let unknown = session::token::SessionToken::from([5; session::token::SESSION_ID_BYTES]);
        let encoded = session::encode_base64(&unknown, session::create_hash(&auth, &unknown));

        assert!(matches!(lookup_token(&auth, &encoded), Err(LookupError::SessionNotFound)));
    }

    #[test]
    fn expired_sessions() {
        let auth = state::Sec::new([1; 32], Duration::ZERO, 10);
        let (_session, encoded) = auth.create_session(ids::UserId::gen())
            .expect("failed to create session");

        assert!(matches!(lookup_token(&auth, &encoded), Err(LookupError::SessionExpired(_))));
    }
}
