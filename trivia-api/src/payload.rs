use http::StatusCode;
use axum_core::response::{Response, IntoResponse};
use serde::{Serialize, Deserialize};

use crate::response::{serialize_json, error_json};

/// success envelope for the auth endpoints, `{"payload": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload<T> {
    payload: T
}

impl<T> Payload<T> {
    pub fn new(payload: T) -> Self {
        Self { payload }
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn into_payload(self) -> T {
        self.payload
    }
}

impl<T> IntoResponse for Payload<T>
where
    T: Serialize
{
    fn into_response(self) -> Response {
        serialize_json(StatusCode::OK, &self).unwrap_or_else(|err| {
            tracing::error!("failed to serialize payload: {err}");

            error_json()
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn envelope_shape() {
        let wrapped = Payload::new(vec![1, 2]);

        assert_eq!(
            serde_json::to_value(&wrapped).unwrap(),
            serde_json::json!({"payload": [1, 2]})
        );

        let parsed: Payload<String> = serde_json::from_str(r#"{"payload":"ok"}"#).unwrap();

        assert_eq!(parsed.payload(), "ok");
    }
}
