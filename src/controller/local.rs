use std::sync::Arc;

use futures::future::BoxFuture;
use trivia_lib::ids;
use trivia_api::Validator;
use trivia_api::auth::{Signup, Login, Authenticated, User};

use crate::net::error::{self, GeneralKind, AuthKind, UserKind, Detail};
use crate::sec::authn::{Initiator, password};
use crate::sec::state::Sec;
use crate::user;

use super::AuthController;

/// keeps users in memory and issues sessions from the shared [`Sec`] state
pub struct LocalController {
    sec: Arc<Sec>,
    users: user::Store,
}

impl LocalController {
    pub fn new(sec: Arc<Sec>) -> Self {
        LocalController {
            sec,
            users: user::Store::new(),
        }
    }

    fn username_taken() -> error::Error {
        error::Error::api((GeneralKind::AlreadyExists, Detail::with_key("username")))
    }

    fn authenticated(&self, user: &user::User) -> error::Result<Authenticated> {
        let (_session, token) = self.sec.create_session(user.id.clone())?;

        Ok(Authenticated {
            token,
            user: user.to_api(),
        })
    }

    async fn create_user(&self, body: Signup) -> error::Result<Authenticated> {
        body.validate()?;

        if self.users.username_exists(&body.username) {
            return Err(Self::username_taken());
        }

        let hash = password::hash(body.password).await?;

        let user = user::User {
            id: ids::UserId::gen(),
            username: body.username,
            email: body.email,
            hash,
        };

        if self.users.insert(user.clone()).is_err() {
            return Err(Self::username_taken());
        }

        tracing::info!(user_id = %user.id, "created user");

        self.authenticated(&user)
    }

    async fn verify_login(&self, body: Login) -> error::Result<Authenticated> {
        body.validate()?;

        let Some(user) = self.users.find_username(&body.username) else {
            return Err(error::Error::api(AuthKind::InvalidCredentials));
        };

        if !password::verify(user.hash.clone(), body.password).await? {
            return Err(error::Error::api(AuthKind::InvalidCredentials));
        }

        self.authenticated(&user)
    }

    async fn current_user(&self, initiator: Initiator) -> error::Result<User> {
        let Some(user) = self.users.get(initiator.user_id()) else {
            return Err(error::Error::api(UserKind::NotFound));
        };

        Ok(user.to_api())
    }
}

impl AuthController for LocalController {
    fn signup(&self, body: Signup) -> BoxFuture<'_, error::Result<Authenticated>> {
        Box::pin(self.create_user(body))
    }

    fn login(&self, body: Login) -> BoxFuture<'_, error::Result<Authenticated>> {
        Box::pin(self.verify_login(body))
    }

    fn me(&self, initiator: Initiator) -> BoxFuture<'_, error::Result<User>> {
        Box::pin(self.current_user(initiator))
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use axum::http::StatusCode;

    use super::*;
    use crate::sec::authn::initiator;

    fn controller() -> (Arc<Sec>, LocalController) {
        let sec = Arc::new(Sec::new([8; 32], Duration::from_secs(60), 100));

        (sec.clone(), LocalController::new(sec))
    }

    fn signup(username: &str) -> Signup {
        Signup {
            username: username.into(),
            password: "a long enough password".into(),
            email: None,
        }
    }

    #[tokio::test]
    async fn signup_login_me() {
        let (sec, controller) = controller();

        let created = controller.signup(signup("player")).await
            .expect("signup failed");

        assert_eq!(created.user.username, "player");

        let logged_in = controller.login(Login {
            username: "player".into(),
            password: "a long enough password".into(),
        }).await.expect("login failed");

        assert_eq!(logged_in.user.id, created.user.id);
        assert_ne!(logged_in.token, created.token);

        let initiator = initiator::lookup_token(&sec, &logged_in.token)
            .expect("token lookup failed");
        let me = controller.me(initiator).await.expect("me failed");

        assert_eq!(me, created.user);
    }

    #[tokio::test]
    async fn duplicate_username() {
        let (_sec, controller) = controller();

        controller.signup(signup("player")).await.expect("signup failed");

        let err = controller.signup(signup("player")).await
            .expect_err("duplicate signup succeeded");

        assert_eq!(err.inner().status(), StatusCode::CONFLICT);
        assert_eq!(err.inner().detail(), Some(&Detail::with_key("username")));
    }

    #[tokio::test]
    async fn bad_credentials() {
        let (_sec, controller) = controller();

        controller.signup(signup("player")).await.expect("signup failed");

        let wrong_password = controller.login(Login {
            username: "player".into(),
            password: "not the password".into(),
        }).await.expect_err("login succeeded");

        let unknown_user = controller.login(Login {
            username: "nobody".into(),
            password: "a long enough password".into(),
        }).await.expect_err("login succeeded");

        for err in [wrong_password, unknown_user] {
            assert_eq!(
                err.inner().kind(),
                &error::ApiErrorKind::Auth(AuthKind::InvalidCredentials)
            );
        }
    }

    #[tokio::test]
    async fn invalid_signup() {
        let (_sec, controller) = controller();

        let err = controller.signup(Signup {
            username: "no spaces allowed".into(),
            password: "short".into(),
            email: None,
        }).await.expect_err("invalid signup succeeded");

        assert_eq!(err.inner().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.inner().detail(),
            Some(&Detail::mult_keys(["username", "password"]))
        );
    }
}
