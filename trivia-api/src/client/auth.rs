use crate::client::error::RequestError;
use crate::client::{ApiClient, json_response};
use crate::{Payload, Validator};
use crate::auth::{
    Signup as SignupBody,
    Login as LoginBody,
    Authenticated,
    User,
};

/// creates an account. the returned token is stored on the client
pub struct Signup {
    body: SignupBody
}

impl Signup {
    pub fn new<U, P>(username: U, password: P) -> Self
    where
        U: Into<String>,
        P: Into<String>,
    {
        Signup {
            body: SignupBody {
                username: username.into(),
                password: password.into(),
                email: None,
            }
        }
    }

    pub fn email<E>(mut self, email: E) -> Self
    where
        E: Into<String>
    {
        self.body.email = Some(email.into());
        self
    }

    pub async fn send(self, client: &ApiClient) -> Result<User, RequestError> {
        self.body.validate()?;

        let res = client.post("/api/auth/signup")?
            .json(&self.body)
            .send()
            .await?;

        let result: Payload<Authenticated> = json_response(res).await?;
        let Authenticated { token, user } = result.into_payload();

        client.set_token(token);

        Ok(user)
    }
}

pub struct Login {
    body: LoginBody
}

impl Login {
    pub fn new<U, P>(username: U, password: P) -> Self
    where
        U: Into<String>,
        P: Into<String>,
    {
        Login {
            body: LoginBody {
                username: username.into(),
                password: password.into(),
            }
        }
    }

    pub async fn send(self, client: &ApiClient) -> Result<User, RequestError> {
        self.body.validate()?;

        let res = client.post("/api/auth/login")?
            .json(&self.body)
            .send()
            .await?;

        let result: Payload<Authenticated> = json_response(res).await?;
        let Authenticated { token, user } = result.into_payload();

        client.set_token(token);

        Ok(user)
    }
}

pub struct Me {}

impl Me {
    pub fn new() -> Self {
        Me {}
    }

    pub async fn send(self, client: &ApiClient) -> Result<User, RequestError> {
        let res = client.get("/api/auth/me")?
            .send()
            .await?;

        let result: Payload<User> = json_response(res).await?;

        Ok(result.into_payload())
    }
}

impl Default for Me {
    fn default() -> Self {
        Me::new()
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::client::mock::MockServer;
    use crate::ApiErrorKind;
    use crate::error::{GeneralKind, AuthKind};

    #[tokio::test]
    async fn login_stores_token() {
        let server = MockServer::start(
            StatusCode::OK,
            r#"{"payload":{"token":"tok-1","user":{"id":"u1","username":"player"}}}"#
        ).await;
        let client = server.client();

        let user = Login::new("player", "password123")
            .send(&client)
            .await
            .expect("login failed");

        assert_eq!(user.username, "player");
        assert_eq!(client.token().as_deref(), Some("tok-1"));

        let requests = server.requests();

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/api/auth/login");
        assert_eq!(requests[0].json(), json!({"username": "player", "password": "password123"}));
        assert!(requests[0].authorization.is_none());
    }

    #[tokio::test]
    async fn invalid_signup_is_not_sent() {
        let server = MockServer::start(StatusCode::CREATED, "{}").await;
        let client = server.client();

        let err = Signup::new("x", "short")
            .send(&client)
            .await
            .expect_err("signup succeeded");

        assert!(matches!(err, RequestError::Invalid(_)), "unexpected error {:?}", err);
        assert!(err.status().is_none());

        let api = err.as_api().expect("error was not an api error");

        assert_eq!(api.kind(), &ApiErrorKind::General(GeneralKind::ValidationFailed));
        assert!(server.requests().is_empty());
    }

    #[tokio::test]
    async fn me_sends_bearer_token() {
        let server = MockServer::start(
            StatusCode::UNAUTHORIZED,
            r#"{"kind":{"Auth":"SessionExpired"}}"#
        ).await;
        let client = server.client();
        client.set_token("stale");

        let err = Me::new().send(&client).await.expect_err("me succeeded");
        let api = err.as_api().expect("error was not an api error");

        assert_eq!(api.kind(), &ApiErrorKind::Auth(AuthKind::SessionExpired));

        let requests = server.requests();

        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].path, "/api/auth/me");
        assert_eq!(requests[0].authorization.as_deref(), Some("Bearer stale"));
    }
}
