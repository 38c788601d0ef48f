use std::{net::SocketAddr, path::Path, sync::Arc};

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod content;
mod hot_reload;
mod markdown;
mod models;
mod routes;
mod state;
mod templates;

use config::BlogConfig;
use state::{AppState, RouterState};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BlogConfig::load(Path::new("blog.toml"));
    let is_development = std::env::var("RUST_ENV")
        .map(|v| v == "development")
        .unwrap_or(false);
    info!(?config, is_development, "starting");

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(config.port);

    let app_state = Arc::new(AppState {
        config,
        is_development,
    });

    let (tx, _rx) = tokio::sync::broadcast::channel(16);
    if is_development {
        hot_reload::start_content_watcher(tx.clone(), app_state.config.content_dir.clone());
    }

    let app = routes::router(RouterState {
        app_state,
        broadcaster: tx,
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "listening");
    let listener = TcpListener::bind(addr)
        .await
        .expect("failed to bind listen address");
    axum::serve(listener, app)
        .await
        .expect("server exited with an error");
}
