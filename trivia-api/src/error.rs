use http::StatusCode;
use axum_core::response::{Response, IntoResponse};
use serde::{Serialize, Deserialize};
use strum::{AsRefStr as StrumAsRefStr};

use crate::response::{serialize_json, error_json};

/// declares a group of error kinds along with the status each one maps to.
/// the group is wrapped by [`ApiErrorKind`] under the given variant name
macro_rules! error_kinds {
    ($group:ident => $name:ident {
        $($variant:ident => $status:ident),* $(,)?
    }) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq,
            StrumAsRefStr,
            Serialize, Deserialize
        )]
        pub enum $name {
            $($variant),*
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<&$name> for StatusCode {
            fn from(kind: &$name) -> Self {
                match kind {
                    $($name::$variant => StatusCode::$status),*
                }
            }
        }

        impl From<$name> for ApiErrorKind {
            fn from(v: $name) -> Self {
                ApiErrorKind::$group(v)
            }
        }
    };
}

error_kinds!(Auth => AuthKind {
    InvalidCredentials => UNAUTHORIZED,
    InvalidAuthScheme => BAD_REQUEST,

    InvalidSession => UNAUTHORIZED,
    SessionExpired => UNAUTHORIZED,
    SessionNotFound => UNAUTHORIZED,

    MechanismNotFound => UNAUTHORIZED,
});

error_kinds!(User => UserKind {
    NotFound => NOT_FOUND,
});

error_kinds!(General => GeneralKind {
    InternalFailure => INTERNAL_SERVER_ERROR,
    Timeout => REQUEST_TIMEOUT,

    AlreadyExists => CONFLICT,
    NotFound => NOT_FOUND,

    ValidationFailed => BAD_REQUEST,
    InvalidData => BAD_REQUEST,

    InvalidHeaderValue => BAD_REQUEST,
    InvalidMethod => METHOD_NOT_ALLOWED,
});

/// top level error kind sent over the wire as `{"<group>": "<kind>"}`
#[derive(
    Debug, Clone, PartialEq, Eq,
    Serialize, Deserialize
)]
pub enum ApiErrorKind {
    General(GeneralKind),
    Auth(AuthKind),
    User(UserKind),
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiErrorKind::General(v) => std::fmt::Display::fmt(v, f),
            ApiErrorKind::Auth(v) => std::fmt::Display::fmt(v, f),
            ApiErrorKind::User(v) => std::fmt::Display::fmt(v, f),
        }
    }
}

impl From<&ApiErrorKind> for StatusCode {
    fn from(kind: &ApiErrorKind) -> Self {
        match kind {
            ApiErrorKind::General(v) => v.into(),
            ApiErrorKind::Auth(v) => v.into(),
            ApiErrorKind::User(v) => v.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Detail {
    Keys(Vec<String>),
}

impl Detail {
    pub fn with_key(key: impl Into<String>) -> Self {
        Detail::Keys(vec![key.into()])
    }

    pub fn mult_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>
    {
        Detail::Keys(keys.into_iter().map(Into::into).collect())
    }
}

impl std::fmt::Display for Detail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Detail::Keys(list) => f.write_str(&list.join(",")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    kind: ApiErrorKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    detail: Option<Detail>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    msg: Option<String>,
}

impl ApiError {
    pub fn new() -> Self {
        ApiError {
            kind: ApiErrorKind::General(GeneralKind::InternalFailure),
            detail: None,
            msg: None
        }
    }

    pub fn with_kind<K>(mut self, kind: K) -> Self
    where
        K: Into<ApiErrorKind>
    {
        self.kind = kind.into();
        self
    }

    pub fn with_detail(mut self, detail: Detail) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn with_message<M>(mut self, msg: M) -> Self
    where
        M: Into<String>
    {
        self.msg = Some(msg.into());
        self
    }

    pub fn kind(&self) -> &ApiErrorKind {
        &self.kind
    }

    pub fn detail(&self) -> Option<&Detail> {
        self.detail.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.msg.as_deref()
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from(&self.kind)
    }
}

impl std::default::Default for ApiError {
    fn default() -> Self {
        ApiError::new()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;

        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }

        if let Some(msg) = &self.msg {
            write!(f, ": {}", msg)?;
        }

        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match serialize_json(self.status(), &self) {
            Ok(res) => res,
            Err(err) => {
                tracing::error!("ApiError serialization error {:?}", err);
                error_json()
            }
        }
    }
}

impl<K> From<K> for ApiError
where
    K: Into<ApiErrorKind>
{
    fn from(kind: K) -> Self {
        ApiError {
            kind: kind.into(),
            detail: None,
            msg: None
        }
    }
}

impl<K,M> From<(K, M)> for ApiError
where
    K: Into<ApiErrorKind>,
    M: Into<String>,
{
    fn from((kind, msg): (K, M)) -> Self {
        ApiError {
            kind: kind.into(),
            detail: None,
            msg: Some(msg.into())
        }
    }
}

impl<K> From<(K, Detail)> for ApiError
where
    K: Into<ApiErrorKind>
{
    fn from((kind, detail): (K, Detail)) -> Self {
        ApiError {
            kind: kind.into(),
            detail: Some(detail),
            msg: None
        }
    }
}
