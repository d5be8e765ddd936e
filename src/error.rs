//! errors that prevent the server from starting. once listeners are running
//! failures are reported through [`crate::net::error`] instead

use trivia_lib::context_trait;

type BoxDynError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Default)]
pub struct Error {
    msg: Option<String>,
    src: Option<BoxDynError>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn new() -> Error {
        Error::default()
    }

    pub fn message<M>(mut self, msg: M) -> Error
    where
        M: Into<String>
    {
        self.msg = Some(msg.into());
        self
    }

    pub fn source<S>(mut self, src: S) -> Error
    where
        S: Into<BoxDynError>
    {
        self.src = Some(src.into());
        self
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("startup failed")?;

        if let Some(msg) = &self.msg {
            write!(f, ": {msg}")?;
        }

        if let Some(src) = &self.src {
            write!(f, "\n  caused by: {src}")?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.src.as_ref().map(|v| & **v as _)
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::new().message(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::new().message(msg)
    }
}

impl From<hkdf::InvalidLength> for Error {
    fn from(_err: hkdf::InvalidLength) -> Self {
        Error::new().message("invalid output length when deriving a key from master_key")
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::new().source(err)
    }
}

context_trait!(Error);

impl<T, E> Context<T, E> for std::result::Result<T, E>
where
    E: Into<BoxDynError>
{
    fn context<C>(self, cxt: C) -> std::result::Result<T, Error>
    where
        C: Into<String>
    {
        self.map_err(|err| Error::new().message(cxt).source(err))
    }
}

impl<T> Context<T, ()> for std::option::Option<T> {
    fn context<C>(self, cxt: C) -> std::result::Result<T, Error>
    where
        C: Into<String>
    {
        self.ok_or_else(|| Error::new().message(cxt))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_includes_cause() {
        let err: Result<()> = Err(std::io::Error::other("denied"))
            .context("failed to open config file");

        let Err(err) = err else {
            panic!("expected an error");
        };

        assert_eq!(
            err.to_string(),
            "startup failed: failed to open config file\n  caused by: denied"
        );
    }
}
