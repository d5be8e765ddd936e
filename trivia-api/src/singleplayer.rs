//! wire types for the single player quiz service.
//!
//! the service owns the meaning of every value here. the response types hold
//! the decoded body untouched and only offer typed views of the fields callers
//! commonly read, so a response can be handed back exactly as it was received.
//! a field that is missing or has an unexpected type reads as `None`.

use std::str::FromStr;

use serde::{Serialize, Deserialize};
use serde_json::{Number, Value};

pub const DEFAULT_MODE: u32 = 1;

/// game mode variant. the remote service decides what each value means
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mode(pub u32);

impl Default for Mode {
    fn default() -> Self {
        Mode(DEFAULT_MODE)
    }
}

impl From<u32> for Mode {
    fn from(v: u32) -> Self {
        Mode(v)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// opaque session identifier, kept in whatever form the service issued it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SessionId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionId::Number(v) => write!(f, "{}", v),
            SessionId::Text(v) => f.write_str(v),
        }
    }
}

impl From<String> for SessionId {
    fn from(v: String) -> Self {
        SessionId::Text(v)
    }
}

impl From<&str> for SessionId {
    fn from(v: &str) -> Self {
        SessionId::Text(v.to_owned())
    }
}

impl From<i64> for SessionId {
    fn from(v: i64) -> Self {
        SessionId::Number(v)
    }
}

/// integers become `Number`, anything else is kept as text
impl FromStr for SessionId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i64>() {
            Ok(v) => Ok(SessionId::Number(v)),
            Err(_) => Ok(SessionId::Text(s.to_owned())),
        }
    }
}

/// opaque answer value, validity is decided by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answer(pub serde_json::Value);

impl From<serde_json::Value> for Answer {
    fn from(v: serde_json::Value) -> Self {
        Answer(v)
    }
}

impl From<String> for Answer {
    fn from(v: String) -> Self {
        Answer(serde_json::Value::String(v))
    }
}

impl From<&str> for Answer {
    fn from(v: &str) -> Self {
        Answer(serde_json::Value::String(v.to_owned()))
    }
}

impl From<i64> for Answer {
    fn from(v: i64) -> Self {
        Answer(serde_json::Value::from(v))
    }
}

impl From<u32> for Answer {
    fn from(v: u32) -> Self {
        Answer(serde_json::Value::from(v))
    }
}

impl From<bool> for Answer {
    fn from(v: bool) -> Self {
        Answer(serde_json::Value::Bool(v))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Start {
    pub mode: Mode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmission {
    pub session_id: SessionId,
    pub answer: Answer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerQuery {
    pub session_id: SessionId,
}

fn bool_field(body: &Value, key: &str) -> Option<bool> {
    body.get(key).and_then(Value::as_bool)
}

fn number_field<'a>(body: &'a Value, key: &str) -> Option<&'a Number> {
    match body.get(key) {
        Some(Value::Number(num)) => Some(num),
        _ => None
    }
}

/// declares a response type wrapping the raw body
macro_rules! raw_response {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Value);

        impl $name {
            /// top level field of the body if the body is an object
            pub fn get(&self, key: &str) -> Option<&Value> {
                self.0.get(key)
            }

            pub fn as_value(&self) -> &Value {
                &self.0
            }

            pub fn into_value(self) -> Value {
                self.0
            }
        }

        impl From<Value> for $name {
            fn from(v: Value) -> Self {
                $name(v)
            }
        }
    };
}

raw_response!(
    /// body returned when a session starts
    Started
);

impl Started {
    pub fn session_id(&self) -> Option<SessionId> {
        match self.get("sessionId")? {
            Value::Number(num) => num.as_i64().map(SessionId::Number),
            Value::String(text) => Some(SessionId::Text(text.clone())),
            _ => None
        }
    }
}

raw_response!(
    /// body returned after an answer is submitted
    Answered
);

impl Answered {
    pub fn correct(&self) -> Option<bool> {
        bool_field(&self.0, "correct")
    }

    pub fn score(&self) -> Option<&Number> {
        number_field(&self.0, "score")
    }

    pub fn finished(&self) -> Option<bool> {
        bool_field(&self.0, "finished")
    }
}

raw_response!(
    /// timer state of a session
    TimerState
);

impl TimerState {
    /// seconds left on the current question
    pub fn remaining(&self) -> Option<&Number> {
        number_field(&self.0, "remaining")
    }

    pub fn expired(&self) -> Option<bool> {
        bool_field(&self.0, "expired")
    }
}
