use axum::extract::rejection::JsonRejection;
use axum::response::{Response, IntoResponse};

pub use trivia_api::error::{
    Detail,
    ApiErrorKind,
    ApiError,
    GeneralKind,
    AuthKind,
    UserKind,
};

type BoxDynError = Box<dyn std::error::Error + Send + Sync>;

/// converts errors from the service stack into a response
pub async fn handle_error<E>(error: E) -> Response
where
    E: Into<Error>
{
    error.into().into_response()
}

/// request error. only the inner [`ApiError`] is sent to the client, the
/// context and source are logged
#[derive(Debug)]
pub struct Error {
    inner: ApiError,
    context: Option<String>,
    src: Option<BoxDynError>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn new() -> Self {
        Error {
            inner: Default::default(),
            context: None,
            src: None,
        }
    }

    pub fn api<T>(value: T) -> Self
    where
        T: Into<ApiError>
    {
        Error {
            inner: value.into(),
            context: None,
            src: None
        }
    }

    pub fn kind<K>(mut self, kind: K) -> Self
    where
        K: Into<ApiErrorKind>
    {
        self.inner = self.inner.with_kind(kind);
        self
    }

    pub fn context<C>(mut self, ctx: C) -> Self
    where
        C: Into<String>
    {
        self.context = Some(ctx.into());
        self
    }

    pub fn source<S>(mut self, src: S) -> Self
    where
        S: Into<BoxDynError>
    {
        self.src = Some(src.into());
        self
    }

    #[cfg(test)]
    pub fn inner(&self) -> &ApiError {
        &self.inner
    }
}

impl Default for Error {
    fn default() -> Self {
        Error::new()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)?;

        if let Some(cxt) = &self.context {
            write!(f, " ({cxt})")?;
        }

        if let Some(err) = &self.src {
            write!(f, ": {err}")?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.src.as_ref().map(|v| & **v as _)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if let Some(err) = &self.src {
            tracing::error!(
                kind = %self.inner.kind(),
                context = self.context.as_deref(),
                "request failed with unhandled error: {err:#?}"
            );
        } else if let Some(cxt) = &self.context {
            tracing::debug!(kind = %self.inner.kind(), "request failed: {cxt}");
        }

        self.inner.into_response()
    }
}

impl From<ApiError> for Error {
    fn from(inner: ApiError) -> Self {
        Error::api(inner)
    }
}

impl From<std::convert::Infallible> for Error {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::api((GeneralKind::InvalidData, rejection.body_text()))
    }
}

impl From<rand::Error> for Error {
    fn from(err: rand::Error) -> Self {
        Error::new()
            .context("failed to gather random bytes")
            .source(err)
    }
}

impl From<axum::http::header::ToStrError> for Error {
    fn from(err: axum::http::header::ToStrError) -> Self {
        Error::new()
            .kind(GeneralKind::InvalidHeaderValue)
            .source(err)
    }
}
