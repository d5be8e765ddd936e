use std::time::Duration;

use trivia_lib::ids;
use chrono::{DateTime, Utc};
use base64::{Engine, engine::general_purpose::URL_SAFE};

use crate::net::error::Error as NetError;
use crate::sec::state;

pub mod token;

#[derive(Debug)]
pub enum BuilderError {
    UtcOverflow,
    Rand(rand::Error),
}

impl From<rand::Error> for BuilderError {
    fn from(err: rand::Error) -> Self {
        BuilderError::Rand(err)
    }
}

impl From<BuilderError> for NetError {
    fn from(err: BuilderError) -> NetError {
        match err {
            BuilderError::UtcOverflow => NetError::new()
                .source("date time value overflowed"),
            BuilderError::Rand(err) => err.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub token: token::SessionToken,
    pub user_id: ids::UserId,
    pub expires: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: ids::UserId, ttl: Duration) -> Result<Self, BuilderError> {
        let token = token::SessionToken::gen()?;
        let now = Utc::now();

        let duration = chrono::Duration::from_std(ttl)
            .map_err(|_| BuilderError::UtcOverflow)?;

        let Some(expires) = now.checked_add_signed(duration) else {
            return Err(BuilderError::UtcOverflow);
        };

        Ok(Session {
            token,
            user_id,
            expires,
        })
    }

    pub fn is_expired(&self, now: &DateTime<Utc>) -> bool {
        self.expires <= *now
    }
}

pub type Hash = blake3::Hash;

pub fn create_hash<T>(auth: &state::Sec, token: T) -> Hash
where
    T: AsRef<[u8]>
{
    blake3::keyed_hash(auth.session_info().key(), token.as_ref())
}

/// bearer form of a token, `base64url(token || keyed_hash(token))`
pub fn encode_base64<T>(token: T, hash: Hash) -> String
where
    T: AsRef<[u8]>
{
    let token_ref = token.as_ref();

    let slice = hash.as_bytes();

    let mut joined = Vec::with_capacity(token_ref.len() + slice.len());
    joined.extend_from_slice(token_ref);
    joined.extend_from_slice(slice);

    URL_SAFE.encode(joined)
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("session token is not valid base64")]
    InvalidString,

    #[error("session token has an invalid length")]
    InvalidLength,

    #[error("session token hash does not match")]
    InvalidHash,
}

pub fn decode_base64<S>(
    auth: &state::Sec,
    encoded: S
) -> Result<token::SessionToken, DecodeError>
where
    S: AsRef<[u8]>
{
    let Ok(bytes) = URL_SAFE.decode(encoded) else {
        return Err(DecodeError::InvalidString);
    };

    if bytes.len() != token::SESSION_ID_BYTES + blake3::OUT_LEN {
        return Err(DecodeError::InvalidLength);
    }

    let (token_bytes, hash_bytes) = bytes.split_at(token::SESSION_ID_BYTES);

    let token = token::SessionToken::try_from(token_bytes)
        .map_err(|_| DecodeError::InvalidLength)?;
    let hash: [u8; blake3::OUT_LEN] = hash_bytes.try_into()
        .map_err(|_| DecodeError::InvalidLength)?;

    // blake3::Hash equality is constant time
    if Hash::from(hash) != create_hash(auth, &token) {
        return Err(DecodeError::InvalidHash);
    }

    Ok(token)
}

#[cfg(test)]
mod test {
    use super::*;

    fn sec() -> state::Sec {
        state::Sec::new([3; 32], Duration::from_secs(60), 10)
    }

    #[test]
    fn encode_decode() {
        let auth = sec();
        let token = token::SessionToken::from([9; token::SESSION_ID_BYTES]);
        let hash = create_hash(&auth, &token);

        let encoded = encode_base64(&token, hash);
        let decoded = decode_base64(&auth, &encoded).expect("failed to decode token");

        assert_eq!(token, decoded);
    }

    #[test]
    fn rejects_tampered_tokens() {
        let auth = sec();
        let token = token::SessionToken::from([9; token::SESSION_ID_BYTES]);

        let other = state::Sec::new([4; 32], Duration::from_secs(60), 10);
        let foreign = encode_base64(&token, create_hash(&other, &token));

        assert!(matches!(decode_base64(&auth, &foreign), Err(DecodeError::InvalidHash)));
        assert!(matches!(decode_base64(&auth, "not base64!"), Err(DecodeError::InvalidString)));
        assert!(matches!(decode_base64(&auth, URL_SAFE.encode([1u8; 8])), Err(DecodeError::InvalidLength)));
    }

    #[test]
    fn zero_ttl_is_expired() {
        let session = Session::new(ids::UserId::gen(), Duration::ZERO)
            .expect("failed to create session");

        assert!(session.is_expired(&Utc::now()));
    }
}
