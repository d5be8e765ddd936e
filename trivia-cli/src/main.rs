mod error;
mod input;
mod cli;

fn main() {
    use tracing_subscriber::{FmtSubscriber, EnvFilter};

    if let Err(err) = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init() {
        eprintln!("failed to initialize global tracing subscriber: {err}");
        std::process::exit(1);
    }

    if let Err(err) = cli::start() {
        println!("{}", err);
        std::process::exit(1);
    }
}
