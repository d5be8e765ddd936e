use std::sync::Arc;

use tracing_subscriber::{FmtSubscriber, EnvFilter};
use futures::StreamExt;
use futures::stream::FuturesUnordered;

use error::Context;

mod error;
mod config;
mod net;
mod sec;
mod user;
mod controller;
mod state;
mod routing;

fn main() {
    use tokio::runtime::Builder;

    if let Err(err) = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init() {
        eprintln!("failed to initialize global tracing subscriber: {err}");
        std::process::exit(1);
    }

    let rt = match Builder::new_multi_thread()
        .enable_io()
        .enable_time()
        .max_blocking_threads(4)
        .build() {
        Ok(rt) => rt,
        Err(err) => {
            tracing::error!("failed to start tokio runtime. {err}");
            std::process::exit(1);
        }
    };

    tracing::event!(
        tracing::Level::INFO,
        "started tokio runtime"
    );

    if let Err(err) = rt.block_on(init()) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

async fn init() -> error::Result<()> {
    let config = config::get_config()?;
    let state = Arc::new(state::Shared::from_config(&config)?);
    let router = routing::routes(&state, config.settings.timeout);

    let mut all_futs = config.settings.listeners
        .into_iter()
        .map(|(key, listener)| tokio::spawn(serve(key, listener, router.clone())))
        .collect::<FuturesUnordered<_>>();

    while let Some(result) = all_futs.next().await {
        match result {
            Ok(Ok(())) => {}
            Ok(Err(err)) => tracing::error!("{err}"),
            Err(err) => tracing::error!("listener task failed: {err}"),
        }
    }

    Ok(())
}

async fn serve(key: String, listener: config::Listener, router: axum::Router) -> error::Result<()> {
    let tcp_listener = std::net::TcpListener::bind(listener.addr)
        .context(format!("\"{key}\" failed to bind to {}", listener.addr))?;

    tcp_listener.set_nonblocking(true)
        .context(format!("\"{key}\" failed to set listener to non-blocking"))?;

    let addr = tcp_listener.local_addr()
        .context(format!("\"{key}\" failed to retrieve listener address"))?;

    tracing::info!(listener = %key, "accepting connections on {addr}");

    axum_server::from_tcp(tcp_listener)
        .serve(router.into_make_service())
        .await
        .context(format!("\"{key}\" server error"))
}
