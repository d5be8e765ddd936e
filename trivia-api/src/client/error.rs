use std::error::Error;
use std::fmt;

use bytes::Bytes;

use crate::ApiError;

#[derive(Debug)]
pub enum ApiClientError {
    InvalidUrl(url::ParseError),
    TokenFile(serde_json::Error),
    Reqwest(reqwest::Error),
    StdIo(std::io::Error),
}

impl fmt::Display for ApiClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiClientError::InvalidUrl(_) => write!(f, "ApiClientError::InvalidUrl"),
            ApiClientError::TokenFile(_) => write!(f, "ApiClientError::TokenFile"),
            ApiClientError::Reqwest(_) => write!(f, "ApiClientError::Reqwest"),
            ApiClientError::StdIo(_) => write!(f, "ApiClientError::StdIo"),
        }
    }
}

impl Error for ApiClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiClientError::InvalidUrl(v) => Some(v),
            ApiClientError::TokenFile(v) => Some(v),
            ApiClientError::Reqwest(v) => Some(v),
            ApiClientError::StdIo(v) => Some(v),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// the server responded with an error body it knows how to describe.
    /// `status` is the status line as received
    #[error("{status}: {error}")]
    Api {
        status: reqwest::StatusCode,
        error: ApiError,
    },

    /// the request body was rejected before anything was sent
    #[error(transparent)]
    Invalid(#[from] ApiError),

    /// non-success response that did not carry an [`ApiError`]
    #[error("unexpected response status {status}")]
    Status {
        status: reqwest::StatusCode,
        body: Bytes,
    },

    #[error(transparent)]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}

impl RequestError {
    /// consumes a non-success response. the body is decoded as an
    /// [`ApiError`] when possible and kept raw otherwise
    pub(crate) async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status();

        let body = match res.bytes().await {
            Ok(body) => body,
            Err(err) => return RequestError::Reqwest(err),
        };

        match serde_json::from_slice::<ApiError>(&body) {
            Ok(error) => RequestError::Api { status, error },
            Err(_) => RequestError::Status { status, body }
        }
    }

    pub fn as_api(self) -> Result<ApiError, Self> {
        match self {
            RequestError::Api { error, .. } |
            RequestError::Invalid(error) => Ok(error),
            v => Err(v)
        }
    }

    /// status of the response if the server was reached
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            RequestError::Api { status, .. } |
            RequestError::Status { status, .. } => Some(*status),
            RequestError::Reqwest(v) => v.status(),
            RequestError::Invalid(_) |
            RequestError::Url(_) => None,
        }
    }
}
