use serde::de::DeserializeOwned;

use crate::client::error::RequestError;
use crate::client::{ApiClient, json_response};
use crate::singleplayer::{
    Mode,
    SessionId,
    Answer,
    Start,
    AnswerSubmission,
    TimerQuery,
    Started,
    Answered,
    TimerState,
};

pub struct StartSession {
    body: Start
}

impl StartSession {
    pub fn new() -> Self {
        StartSession {
            body: Start {
                mode: Mode::default()
            }
        }
    }

    pub fn mode<M>(mut self, mode: M) -> Self
    where
        M: Into<Mode>
    {
        self.body.mode = mode.into();
        self
    }

    pub async fn send(self, client: &ApiClient) -> Result<Started, RequestError> {
        self.send_as(client).await
    }

    /// same request as [`send`](Self::send) decoded into a caller provided type
    pub async fn send_as<T>(self, client: &ApiClient) -> Result<T, RequestError>
    where
        T: DeserializeOwned
    {
        let res = client.post("/api/singleplayer/start")?
            .json(&self.body)
            .send()
            .await?;

        json_response(res).await
    }
}

impl Default for StartSession {
    fn default() -> Self {
        StartSession::new()
    }
}

pub struct SubmitAnswer {
    body: AnswerSubmission
}

impl SubmitAnswer {
    pub fn new<S, A>(session_id: S, answer: A) -> Self
    where
        S: Into<SessionId>,
        A: Into<Answer>,
    {
        SubmitAnswer {
            body: AnswerSubmission {
                session_id: session_id.into(),
                answer: answer.into(),
            }
        }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Answered, RequestError> {
        self.send_as(client).await
    }

    pub async fn send_as<T>(self, client: &ApiClient) -> Result<T, RequestError>
    where
        T: DeserializeOwned
    {
        let res = client.post("/api/singleplayer/answer")?
            .json(&self.body)
            .send()
            .await?;

        json_response(res).await
    }
}

pub struct GetTimer {
    query: TimerQuery
}

impl GetTimer {
    pub fn new<S>(session_id: S) -> Self
    where
        S: Into<SessionId>
    {
        GetTimer {
            query: TimerQuery {
                session_id: session_id.into()
            }
        }
    }

    pub async fn send(self, client: &ApiClient) -> Result<TimerState, RequestError> {
        self.send_as(client).await
    }

    pub async fn send_as<T>(self, client: &ApiClient) -> Result<T, RequestError>
    where
        T: DeserializeOwned
    {
        let res = client.get("/api/singleplayer/timer")?
            .query(&self.query)
            .send()
            .await?;

        json_response(res).await
    }
}

impl ApiClient {
    /// starts a session in the given mode, or mode 1 when none is given
    pub async fn start_session(&self, mode: Option<Mode>) -> Result<Started, RequestError> {
        let mut req = StartSession::new();

        if let Some(mode) = mode {
            req = req.mode(mode);
        }

        req.send(self).await
    }

    pub async fn submit_answer<S, A>(&self, session_id: S, answer: A) -> Result<Answered, RequestError>
    where
        S: Into<SessionId>,
        A: Into<Answer>,
    {
        SubmitAnswer::new(session_id, answer).send(self).await
    }

    pub async fn get_timer<S>(&self, session_id: S) -> Result<TimerState, RequestError>
    where
        S: Into<SessionId>
    {
        GetTimer::new(session_id).send(self).await
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::client::mock::MockServer;
    use crate::{ApiErrorKind, error::GeneralKind};

    #[tokio::test]
    async fn start_defaults_to_mode_one() {
        let server = MockServer::start(StatusCode::OK, r#"{"sessionId":"s1"}"#).await;
        let client = server.client();

        let started = client.start_session(None).await.expect("start failed");

        assert_eq!(started.session_id(), Some(SessionId::from("s1")));

        let requests = server.requests();

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path, "/api/singleplayer/start");
        assert_eq!(requests[0].body.as_ref(), br#"{"mode":1}"#);
    }

    #[tokio::test]
    async fn start_returns_payload_unchanged() {
        let reply = r#"{"sessionId":7,"question":{"text":"capital of France?","choices":["Paris","Rome"]},"round":1}"#;
        let server = MockServer::start(StatusCode::OK, reply).await;
        let client = server.client();

        let value: serde_json::Value = StartSession::new()
            .mode(3u32)
            .send_as(&client)
            .await
            .expect("start failed");

        assert_eq!(value, serde_json::from_str::<serde_json::Value>(reply).unwrap());

        let requests = server.requests();

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].json(), json!({"mode": 3}));
    }

    #[tokio::test]
    async fn answer_posts_session_and_answer() {
        let server = MockServer::start(StatusCode::OK, r#"{"correct":true,"score":10,"next":null}"#).await;
        let client = server.client();

        let answered = client.submit_answer(SessionId::Number(7), "Paris")
            .await
            .expect("answer failed");

        assert_eq!(answered.correct(), Some(true));
        assert_eq!(answered.score().and_then(serde_json::Number::as_i64), Some(10));
        assert_eq!(answered.get("next"), Some(&serde_json::Value::Null));

        let requests = server.requests();

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path, "/api/singleplayer/answer");
        assert_eq!(requests[0].json(), json!({"sessionId": 7, "answer": "Paris"}));
    }

    #[tokio::test]
    async fn timer_uses_query_without_body() {
        let server = MockServer::start(StatusCode::OK, r#"{"remaining":12.5}"#).await;
        let client = server.client();

        let timer = client.get_timer("abc").await.expect("timer failed");

        assert_eq!(timer.remaining().and_then(serde_json::Number::as_f64), Some(12.5));
        assert_eq!(timer.expired(), None);

        let requests = server.requests();

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].path, "/api/singleplayer/timer");
        assert_eq!(requests[0].query.as_deref(), Some("sessionId=abc"));
        assert!(requests[0].body.is_empty());
    }

    #[tokio::test]
    async fn api_errors_surface() {
        let server = MockServer::start(
            StatusCode::NOT_FOUND,
            r#"{"kind":{"General":"NotFound"},"msg":"session not found"}"#
        ).await;
        let client = server.client();

        let err = client.get_timer(1i64).await.expect_err("timer succeeded");

        assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));

        let api = err.as_api().expect("error was not an api error");

        assert_eq!(api.kind(), &ApiErrorKind::General(GeneralKind::NotFound));
        assert_eq!(api.message(), Some("session not found"));
        assert_eq!(server.requests().len(), 1);
    }

    #[tokio::test]
    async fn api_errors_keep_the_received_status() {
        let server = MockServer::start(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"kind":{"General":"NotFound"}}"#
        ).await;
        let client = server.client();

        let err = client.get_timer("abc").await.expect_err("timer succeeded");

        assert_eq!(err.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));

        match err {
            RequestError::Api { status, error } => {
                assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(error.kind(), &ApiErrorKind::General(GeneralKind::NotFound));
            },
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn unexpected_success_bodies_are_returned() {
        let reply = r#"{"session":{"id":"s1"},"question":"2+2?"}"#;
        let server = MockServer::start(StatusCode::OK, reply).await;
        let client = server.client();

        let started = client.start_session(None).await.expect("start failed");

        assert_eq!(started.session_id(), None);
        assert_eq!(started.as_value(), &serde_json::from_str::<serde_json::Value>(reply).unwrap());

        let server = MockServer::start(StatusCode::OK, r#"{"correct":"yes"}"#).await;
        let client = server.client();

        let answered = client.submit_answer("s1", "4").await.expect("answer failed");

        assert_eq!(answered.correct(), None);
        assert_eq!(answered.get("correct"), Some(&json!("yes")));

        let server = MockServer::start(StatusCode::OK, r#"{"remaining":"soon"}"#).await;
        let client = server.client();

        let timer = client.get_timer("s1").await.expect("timer failed");

        assert_eq!(timer.remaining(), None);
        assert_eq!(timer.into_value(), json!({"remaining": "soon"}));
    }

    #[tokio::test]
    async fn unknown_error_bodies_surface_as_status() {
        let server = MockServer::start(StatusCode::BAD_GATEWAY, "upstream unavailable").await;
        let client = server.client();

        let err = client.start_session(None).await.expect_err("start succeeded");

        match err {
            RequestError::Status { status, body } => {
                assert_eq!(status, reqwest::StatusCode::BAD_GATEWAY);
                assert_eq!(body.as_ref(), b"upstream unavailable");
            },
            other => panic!("unexpected error {:?}", other),
        }

        assert_eq!(server.requests().len(), 1);
    }

    #[tokio::test]
    async fn transport_errors_surface() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let mut builder = ApiClient::builder();
        builder.host("127.0.0.1");
        builder.port(Some(port));

        let client = builder.build().unwrap();
        let err = client.submit_answer("s1", 1i64).await.expect_err("answer succeeded");

        assert!(matches!(err, RequestError::Reqwest(_)), "unexpected error {:?}", err);
    }

    #[tokio::test]
    async fn bearer_token_is_attached() {
        let server = MockServer::start(StatusCode::OK, r#"{"sessionId":"s1"}"#).await;
        let client = server.client();
        client.set_token("tok");

        client.start_session(Some(Mode(2))).await.expect("start failed");

        let requests = server.requests();

        assert_eq!(requests[0].authorization.as_deref(), Some("Bearer tok"));
    }
}
