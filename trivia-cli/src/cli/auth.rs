use clap::Args;
use trivia_api::ApiErrorKind;
use trivia_api::auth::User;
use trivia_api::client::ApiClient;
use trivia_api::client::auth::{Signup, Login, Me};
use trivia_api::error::AuthKind;

use crate::error::{self, Context};
use crate::input;

#[derive(Debug, Args)]
pub struct SignupArgs {
    /// username of the new account. will prompt if not provided
    #[arg(short, long)]
    username: Option<String>,

    /// optional email for the new account
    #[arg(short, long)]
    email: Option<String>,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// will prompt if not provided
    #[arg(short, long)]
    username: Option<String>,
}

fn username_or_prompt(given: Option<String>) -> error::Result<String> {
    match given {
        Some(v) => Ok(v),
        None => Ok(input::read_required("username: ")?)
    }
}

fn print_user(user: &User) {
    print!("{} ({})", user.username, user.id);

    if let Some(email) = &user.email {
        print!(" <{}>", email);
    }

    println!();
}

pub async fn signup(client: &ApiClient, args: SignupArgs) -> error::Result {
    let username = username_or_prompt(args.username)?;
    let password = input::read_password()?;

    let mut builder = Signup::new(username, password);

    if let Some(email) = args.email {
        builder = builder.email(email);
    }

    let user = builder.send(client).await?;

    client.save_token().context("failed saving session token")?;

    print_user(&user);

    Ok(())
}

pub async fn login(client: &ApiClient, args: LoginArgs) -> error::Result {
    let username = username_or_prompt(args.username)?;

    loop {
        let password = input::read_password()?;

        match Login::new(username.clone(), password).send(client).await {
            Ok(user) => {
                client.save_token().context("failed saving session token")?;

                print_user(&user);

                return Ok(());
            }
            Err(err) => {
                let api = err.as_api()?;

                match api.kind() {
                    ApiErrorKind::Auth(AuthKind::InvalidCredentials) => {
                        println!("invalid username or password");
                        continue;
                    }
                    _ => return Err(error::Error::from(api))
                }
            }
        }
    }
}

pub fn logout(client: &ApiClient) -> error::Result {
    client.clear_token();

    if !client.save_token().context("failed removing session token")? {
        tracing::debug!("no token file to update");
    }

    Ok(())
}

pub async fn me(client: &ApiClient) -> error::Result {
    if client.token().is_none() {
        return Err(error::Error::from("not logged in"));
    }

    match Me::new().send(client).await {
        Ok(user) => {
            print_user(&user);

            Ok(())
        }
        Err(err) => {
            let api = err.as_api()?;

            match api.kind() {
                ApiErrorKind::Auth(AuthKind::SessionExpired) |
                ApiErrorKind::Auth(AuthKind::SessionNotFound) => {
                    client.clear_token();
                    client.save_token().context("failed removing session token")?;

                    Err(error::Error::from("session is no longer valid. login again"))
                }
                _ => Err(error::Error::from(api))
            }
        }
    }
}
