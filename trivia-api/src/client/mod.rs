use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::time::Duration;

use reqwest::{Url, RequestBuilder};
use serde::{Serialize, Deserialize};
use serde::de::DeserializeOwned;

pub mod error;
pub mod auth;
pub mod singleplayer;

use error::{ApiClientError, RequestError};

pub struct Info {
    pub url: Url
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenFile {
    token: String,
}

pub struct ApiClient {
    pub(crate) token_file: Option<Box<Path>>,
    pub(crate) token: RwLock<Option<String>>,
    pub(crate) client: reqwest::Client,
    pub(crate) info: Info
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder {
            secure: false,
            host: String::from("localhost"),
            port: None,
            file: None,
            agent: None,
            timeout: None,
            token: None,
        }
    }

    pub fn url(&self) -> &Url {
        &self.info.url
    }

    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        let token = self.token.read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(token) = token.as_ref() {
            builder.bearer_auth(token)
        } else {
            builder
        }
    }

    pub(crate) fn get<U>(&self, path: U) -> Result<RequestBuilder, RequestError>
    where
        U: AsRef<str>,
    {
        let url = self.info.url.join(path.as_ref())?;

        Ok(self.with_auth(self.client.get(url)))
    }

    pub(crate) fn post<U>(&self, path: U) -> Result<RequestBuilder, RequestError>
    where
        U: AsRef<str>
    {
        let url = self.info.url.join(path.as_ref())?;

        Ok(self.with_auth(self.client.post(url)))
    }

    pub fn token(&self) -> Option<String> {
        self.token.read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn set_token<T>(&self, token: T)
    where
        T: Into<String>
    {
        let mut current = self.token.write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        *current = Some(token.into());
    }

    pub fn clear_token(&self) {
        let mut current = self.token.write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        *current = None;
    }

    /// writes the current token to the token file. with no token the file is
    /// removed. returns false when no token file was configured
    pub fn save_token(&self) -> Result<bool, ApiClientError> {
        let Some(token_file) = &self.token_file else {
            return Ok(false);
        };

        let Some(token) = self.token() else {
            if let Err(err) = std::fs::remove_file(token_file) {
                if err.kind() != std::io::ErrorKind::NotFound {
                    return Err(ApiClientError::StdIo(err));
                }
            }

            return Ok(true);
        };

        let file = std::fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(token_file)
            .map_err(ApiClientError::StdIo)?;
        let writer = std::io::BufWriter::new(file);

        serde_json::to_writer(writer, &TokenFile { token })
            .map_err(ApiClientError::TokenFile)?;

        Ok(true)
    }
}

/// decodes a successful response as `T`, anything else becomes a
/// [`RequestError`]
pub(crate) async fn json_response<T>(res: reqwest::Response) -> Result<T, RequestError>
where
    T: DeserializeOwned
{
    if res.status().is_success() {
        Ok(res.json().await?)
    } else {
        Err(RequestError::from_response(res).await)
    }
}

fn load_token(path: &Path) -> Result<Option<String>, ApiClientError> {
    match std::fs::OpenOptions::new().read(true).open(path) {
        Ok(file) => {
            let reader = std::io::BufReader::new(file);
            let loaded: TokenFile = serde_json::from_reader(reader)
                .map_err(ApiClientError::TokenFile)?;

            Ok(Some(loaded.token))
        },
        Err(err) => match err.kind() {
            std::io::ErrorKind::NotFound => Ok(None),
            _ => Err(ApiClientError::StdIo(err))
        }
    }
}

pub struct ApiClientBuilder {
    secure: bool,
    host: String,
    port: Option<u16>,
    file: Option<PathBuf>,
    agent: Option<String>,
    timeout: Option<Duration>,
    token: Option<String>,
}

impl ApiClientBuilder {
    pub fn secure(&mut self, is_secure: bool) {
        self.secure = is_secure;
    }

    pub fn host<H>(&mut self, host: H)
    where
        H: Into<String>
    {
        self.host = host.into();
    }

    pub fn port(&mut self, port: Option<u16>) {
        self.port = port;
    }

    pub fn token_file(&mut self, path: PathBuf) {
        self.file = Some(path);
    }

    pub fn token<T>(&mut self, token: T)
    where
        T: Into<String>
    {
        self.token = Some(token.into());
    }

    pub fn user_agent<U>(&mut self, user_agent: U)
    where
        U: Into<String>
    {
        self.agent = Some(user_agent.into());
    }

    pub fn timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    fn base_url(&self) -> Result<Url, ApiClientError> {
        let scheme = if self.secure { "https" } else { "http" };
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };

        let base = if let Some(port) = self.port {
            format!("{scheme}://{host}:{port}/")
        } else {
            format!("{scheme}://{host}/")
        };

        Url::parse(&base).map_err(ApiClientError::InvalidUrl)
    }

    pub fn build(self) -> Result<ApiClient, ApiClientError> {
        let url = self.base_url()?;
        let user_agent = self.agent.unwrap_or(
            concat!("trivia-api-client/", env!("CARGO_PKG_VERSION")).into()
        );

        let token = match (self.token, &self.file) {
            (Some(token), _) => Some(token),
            (None, Some(path)) => load_token(path)?,
            (None, None) => None,
        };

        let mut builder = reqwest::Client::builder()
            .user_agent(user_agent);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build()
            .map_err(ApiClientError::Reqwest)?;

        Ok(ApiClient {
            token_file: self.file.map(|v| v.into_boxed_path()),
            token: RwLock::new(token),
            client,
            info: Info { url }
        })
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builder_forms_base_url() {
        let mut builder = ApiClient::builder();
        builder.secure(true);
        builder.host("trivia.example");
        builder.port(Some(8443));

        let client = builder.build().expect("failed to build client");

        assert_eq!(client.url().as_str(), "https://trivia.example:8443/");

        let mut builder = ApiClient::builder();
        builder.host("::1");
        builder.port(Some(8080));

        let client = builder.build().expect("failed to build client");

        assert_eq!(client.url().as_str(), "http://[::1]:8080/");
    }

    #[test]
    fn token_file_round_trip() {
        let path = std::env::temp_dir()
            .join(format!("trivia_token_{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let mut builder = ApiClient::builder();
        builder.token_file(path.clone());

        let client = builder.build().expect("failed to build client");

        assert!(client.token().is_none());

        client.set_token("abc123");
        assert!(client.save_token().expect("failed to save token"));

        let mut builder = ApiClient::builder();
        builder.token_file(path.clone());

        let reloaded = builder.build().expect("failed to build client");

        assert_eq!(reloaded.token().as_deref(), Some("abc123"));

        reloaded.clear_token();
        assert!(reloaded.save_token().expect("failed to remove token"));
        assert!(!path.exists());
    }
}
