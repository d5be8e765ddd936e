use clap::Args;
use serde_json::Value;
use trivia_api::client::ApiClient;
use trivia_api::client::singleplayer::{StartSession, SubmitAnswer, GetTimer};
use trivia_api::singleplayer::{Answer, SessionId};

use crate::error;

#[derive(Debug, Args)]
pub struct StartArgs {
    /// game mode to request, defaults to 1
    #[arg(short, long)]
    pub mode: Option<u32>,
}

#[derive(Debug, Args)]
pub struct AnswerArgs {
    /// id of the session returned by start
    pub session_id: String,

    /// answer to submit. parsed as json if possible, otherwise sent as text
    pub answer: String,
}

#[derive(Debug, Args)]
pub struct TimerArgs {
    pub session_id: String,
}

fn parse_session_id(given: &str) -> SessionId {
    match given.parse() {
        Ok(v) => v,
        Err(never) => match never {}
    }
}

fn parse_answer(given: String) -> Answer {
    match serde_json::from_str::<Value>(&given) {
        Ok(v) => Answer(v),
        Err(_) => Answer(Value::String(given)),
    }
}

fn print_json<T>(value: &T) -> error::Result
where
    T: serde::Serialize
{
    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

pub async fn start(client: &ApiClient, args: StartArgs) -> error::Result {
    let mut builder = StartSession::new();

    if let Some(mode) = args.mode {
        builder = builder.mode(mode);
    }

    let started = builder.send(client).await?;

    print_json(&started)
}

pub async fn answer(client: &ApiClient, args: AnswerArgs) -> error::Result {
    let session_id = parse_session_id(&args.session_id);
    let answer = parse_answer(args.answer);

    let answered = SubmitAnswer::new(session_id, answer)
        .send(client)
        .await?;

    print_json(&answered)
}

pub async fn timer(client: &ApiClient, args: TimerArgs) -> error::Result {
    let timer = GetTimer::new(parse_session_id(&args.session_id))
        .send(client)
        .await?;

    print_json(&timer)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn answers_fall_back_to_text() {
        assert_eq!(parse_answer("2".into()), Answer(Value::from(2)));
        assert_eq!(parse_answer("\"Paris\"".into()), Answer(Value::from("Paris")));
        assert_eq!(parse_answer("true".into()), Answer(Value::Bool(true)));
        assert_eq!(parse_answer("Paris".into()), Answer(Value::from("Paris")));
    }

    #[test]
    fn session_ids() {
        assert_eq!(parse_session_id("42"), SessionId::Number(42));
        assert_eq!(parse_session_id("abc-1"), SessionId::Text("abc-1".into()));
    }
}
