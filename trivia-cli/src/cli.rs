use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::runtime::{Builder, Runtime};
use trivia_api::client::ApiClient;

use crate::error::{self, Context};
use crate::input;

mod auth;
mod play;

/// a cli for interacting with a trivia server.
///
/// covers account access as well as playing single player sessions. if no
/// command is provided then it will enter interactive mode.
#[derive(Debug, Parser)]
struct Cli {
    /// file that stores the session token
    ///
    /// if a file is not specified then it will attempt to load
    /// "trivia_token.json" in the current working directory
    #[arg(long)]
    token_file: Option<PathBuf>,

    /// host name of server
    ///
    /// will be used in a url so the value must be valid for the hostname part
    /// of a url. examples: example.com | 10.0.0.2 | fd34::2
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// port of server
    ///
    /// if no port is provided it will default to 80 (http) or 443 (https)
    #[arg(short, long)]
    port: Option<u16>,

    /// to use https
    #[arg(short, long)]
    secure: bool,

    #[command(subcommand)]
    command: Option<BaseCmds>
}

pub fn start() -> error::Result {
    let args = Cli::parse();

    let token_file = if let Some(arg) = args.token_file {
        arg
    } else {
        let mut current_dir = std::env::current_dir()?;
        current_dir.push("trivia_token.json");
        current_dir
    };

    let mut client_builder = ApiClient::builder();
    client_builder.token_file(token_file);
    client_builder.secure(args.secure);
    client_builder.port(args.port);

    if let Some(host) = args.host {
        client_builder.host(host);
    }

    let client = client_builder.build().context("failed to create api client")?;

    let rt = Builder::new_current_thread()
        .enable_io()
        .enable_time()
        .build()
        .context("failed to start tokio runtime")?;

    tracing::debug!("server url: {}", client.url());

    match args.command {
        Some(cmd) => rt.block_on(handle(&client, cmd)),
        None => Interactive::handle(&rt, &client)
    }
}

#[derive(Debug, Parser)]
#[command(no_binary_name = true)]
enum Interactive {
    #[command(flatten)]
    Base(BaseCmds),

    /// exits interactive mode
    #[command(alias = "exit")]
    Quit
}

impl Interactive {
    fn handle(rt: &Runtime, client: &ApiClient) -> error::Result {
        loop {
            let given = input::read_stdin("> ")?;

            if given.is_empty() {
                // stdin closed
                break;
            }

            let Ok(args_list) = shell_words::split(given.trim()) else {
                println!("failed to parse command line args");
                continue;
            };

            if args_list.is_empty() {
                continue;
            }

            let cmd = match Interactive::try_parse_from(args_list) {
                Ok(c) => c,
                Err(err) => {
                    println!("{}", err);
                    continue;
                }
            };

            let result = match cmd {
                Interactive::Base(cmd) => rt.block_on(handle(client, cmd)),
                Interactive::Quit => break,
            };

            if let Err(err) = result {
                println!("{}", err);
            }
        }

        Ok(())
    }
}

#[derive(Debug, Subcommand)]
enum BaseCmds {
    /// creates a new account and logs in with it
    Signup(auth::SignupArgs),

    /// logs in to the specified server
    Login(auth::LoginArgs),

    /// forgets the stored session token
    Logout,

    /// shows the currently logged in user
    Me,

    /// starts a new single player session
    Start(play::StartArgs),

    /// submits an answer for a session
    Answer(play::AnswerArgs),

    /// shows the timer state of a session
    Timer(play::TimerArgs),
}

async fn handle(client: &ApiClient, cmd: BaseCmds) -> error::Result {
    match cmd {
        BaseCmds::Signup(given) => auth::signup(client, given).await,
        BaseCmds::Login(given) => auth::login(client, given).await,
        BaseCmds::Logout => auth::logout(client),
        BaseCmds::Me => auth::me(client).await,
        BaseCmds::Start(given) => play::start(client, given).await,
        BaseCmds::Answer(given) => play::answer(client, given).await,
        BaseCmds::Timer(given) => play::timer(client, given).await,
    }
}
