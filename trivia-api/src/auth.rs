use trivia_lib::ids;
use serde::{Serialize, Deserialize};

use crate::{Validator, ApiError, Detail};
use crate::error::GeneralKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: ids::UserId,
    pub username: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signup {
    pub username: String,
    pub password: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Validator for Signup {
    fn validate(&self) -> Result<(), ApiError> {
        let mut invalid = Vec::new();

        if !trivia_lib::users::username_valid(&self.username) {
            invalid.push("username");
        }

        if !trivia_lib::sec::password_valid(&self.password) {
            invalid.push("password");
        }

        if let Some(email) = &self.email {
            if !trivia_lib::users::email_valid(email) {
                invalid.push("email");
            }
        }

        if !invalid.is_empty() {
            Err(ApiError::from((
                GeneralKind::ValidationFailed,
                Detail::mult_keys(invalid)
            )))
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Login {
    pub username: String,
    pub password: String,
}

impl Validator for Login {
    fn validate(&self) -> Result<(), ApiError> {
        let mut invalid = Vec::new();

        if self.username.is_empty() {
            invalid.push("username");
        }

        if self.password.is_empty() {
            invalid.push("password");
        }

        if !invalid.is_empty() {
            Err(ApiError::from((
                GeneralKind::ValidationFailed,
                Detail::mult_keys(invalid)
            )))
        } else {
            Ok(())
        }
    }
}

/// returned by signup and login. the token is sent back as a bearer
/// credential on requests that require a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Authenticated {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ApiErrorKind;

    #[test]
    fn signup_validation_reports_keys() {
        let body = Signup {
            username: "a b".into(),
            password: "short".into(),
            email: Some("nope".into()),
        };

        let err = body.validate().expect_err("invalid signup passed validation");

        assert_eq!(err.kind(), &ApiErrorKind::General(GeneralKind::ValidationFailed));
        assert_eq!(err.detail(), Some(&Detail::mult_keys(["username", "password", "email"])));

        let body = Signup {
            username: "player_one".into(),
            password: "long enough password".into(),
            email: None,
        };

        assert!(body.validate().is_ok());
    }

    #[test]
    fn login_requires_both_fields() {
        let body = Login {
            username: String::new(),
            password: "something".into(),
        };

        let err = body.validate().expect_err("empty username passed validation");

        assert_eq!(err.detail(), Some(&Detail::with_key("username")));
    }
}
