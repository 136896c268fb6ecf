#![forbid(unsafe_code)]

mod config;
mod router;

use std::sync::Arc;

use dotenvy::dotenv;
use env_logger::Env;
use listenfd::ListenFd;
use metadata::MetadataFetcher;
use tower::make::Shared;
use web::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut listenfd = ListenFd::from_env();

    let tcp_socket: Option<std::net::TcpListener> = match listenfd.take_tcp_listener(0) {
        Ok(socket) => socket,
        Err(_) => None,
    };

    let config = config::process_config()?;
    let db_pool = db::pool(&config.database.uri, config.database.pool_size)?;
    {
        let mut connection = db_pool.get().await?;
        db::migrations::run_migrations(&mut connection).await?; // run all pending migrations
    }

    let state = Arc::new(AppState {
        db_pool,
        metadata: MetadataFetcher::new(config.fetch_timeout())?,
    });

    let app = Shared::new(router::app(state));

    match tcp_socket {
        // cargo-watch thing
        Some(listener) => {
            log::info!("Listening on inherited socket {}", listener.local_addr()?);
            axum::Server::from_tcp(listener)?.serve(app).await?
        }
        None => {
            let addr = config.bind_addr()?;
            log::info!("Listening on {}", addr);
            axum::Server::bind(&addr).serve(app).await?
        }
    };

    Ok(())
}
