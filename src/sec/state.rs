use std::time::Duration;

use trivia_lib::ids;

use crate::error;
use crate::config;

use super::authn::session::{self, Session, BuilderError};
use super::authn::session::token::SessionToken;

pub const SESSION_KEY_INFO: &[u8] = b"trivia_session_key";

/// how long an expired session is remembered so it can be reported as
/// expired instead of unknown
const EXPIRED_GRACE: Duration = Duration::from_secs(60 * 60 * 24);
const MAX_CACHE_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 100);

pub type SessionCache = moka::sync::Cache<SessionToken, Session>;

#[derive(Debug)]
pub struct SessionInfo {
    key: [u8; blake3::KEY_LEN],
    ttl: Duration,
    cache: SessionCache,
}

impl SessionInfo {
    pub fn key(&self) -> &[u8; blake3::KEY_LEN] {
        &self.key
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }
}

#[derive(Debug)]
pub struct Sec {
    session_info: SessionInfo,
}

impl Sec {
    pub fn new(key: [u8; blake3::KEY_LEN], ttl: Duration, capacity: u64) -> Self {
        let cache_ttl = ttl.saturating_add(EXPIRED_GRACE).min(MAX_CACHE_TTL);

        let cache = SessionCache::builder()
            .name("session_cache")
            .max_capacity(capacity)
            .time_to_live(cache_ttl)
            .build();

        Sec {
            session_info: SessionInfo {
                key,
                ttl,
                cache,
            }
        }
    }

    pub fn from_config(config: &config::Config) -> error::Result<Sec> {
        tracing::debug!("creating Sec state");

        let mut key = [0u8; blake3::KEY_LEN];

        config.kdf.expand(SESSION_KEY_INFO, &mut key)?;

        let session = &config.settings.sec.session;

        Ok(Sec::new(key, session.ttl, session.capacity))
    }

    pub fn session_info(&self) -> &SessionInfo {
        &self.session_info
    }

    /// creates and stores a new session returning it with its bearer token
    pub fn create_session(&self, user_id: ids::UserId) -> Result<(Session, String), BuilderError> {
        let session = Session::new(user_id, self.session_info.ttl)?;
        let hash = session::create_hash(self, &session.token);
        let encoded = session::encode_base64(&session.token, hash);

        self.session_info.cache.insert(session.token.clone(), session.clone());

        Ok((session, encoded))
    }
}
