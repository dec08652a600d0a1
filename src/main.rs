use std::time::Duration;

use axum::http::{self, HeaderValue, Method};
use dotenvy::dotenv;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use impostor_arena::app;
use impostor_arena::state::AppState;
use impostor_arena::utils::config::ServerConfig;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,impostor_arena=debug,tower_http=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Abandoned sessions are swept out on a fixed cadence so the registry
/// never accumulates dead weight.
fn spawn_idle_sweeper(state: AppState) {
    let config = state.config.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(config.sweep_interval_secs));
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let max_idle = chrono::Duration::seconds(config.idle_timeout_secs as i64);
            for session_id in state.store.prune_idle(max_idle) {
                state.net.drop_session(&session_id);
                info!(%session_id, "idle session pruned");
            }
        }
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    let state = AppState::from_config(config);
    let config = state.config.clone();

    let mut origins = Vec::new();
    for origin in &config.allowed_origins {
        origins.push(origin.parse::<HeaderValue>()?);
    }
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([http::header::CONTENT_TYPE]);

    let app = app::create_app(state.clone()).layer(cors).layer(
        TraceLayer::new_for_http().make_span_with(|request: &http::Request<_>| {
            tracing::info_span!(
                "http request",
                method = %request.method(),
                uri = %request.uri()
            )
        }),
    );

    spawn_idle_sweeper(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "impostor arena listening");
    axum::serve(listener, app).await?;
    Ok(())
}
