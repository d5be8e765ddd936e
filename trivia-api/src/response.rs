use http::StatusCode;
use axum_core::body::Body;
use axum_core::response::{Response, IntoResponse};
use serde::Serialize;
use bytes::{BytesMut, BufMut};

pub fn serialize_json(
    status: StatusCode,
    data: &impl Serialize
) -> Result<Response, serde_json::Error> {
    let froze = {
        let mut buf = BytesMut::with_capacity(128).writer();
        serde_json::to_writer(&mut buf, data)?;

        buf.into_inner().freeze()
    };

    let mut response = (status, Body::from(froze)).into_response();
    response.headers_mut().insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("application/json")
    );

    Ok(response)
}

pub fn error_json() -> Response {
    let body = r#"{"kind":{"General":"InternalFailure"}}"#;

    let mut response = (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
    response.headers_mut().insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("application/json")
    );

    response
}
