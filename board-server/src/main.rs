use board_server::config::AppConfig;
use board_server::feed::FeedClient;
use board_server::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("board_server=info,tower_http=info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let feed = match FeedClient::new(config.feed.clone()) {
        Ok(feed) => feed,
        Err(e) => {
            error!(error = %e, "failed to create feed client");
            std::process::exit(1);
        }
    };

    info!(
        station = config.station.station_id(),
        feed = feed.url(),
        "starting departure board"
    );

    let state = AppState::new(feed, config.station, config.layout, config.refresh_secs);
    let app = create_router(state);

    let addr = config.bind_addr;
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!("listening on http://{addr}");
    info!("  GET  /            - Auto-refreshing page for the e-reader");
    info!("  GET  /kindle.png  - Board image");
    info!("  GET  /departures  - Board as JSON");
    info!("  GET  /health      - Health check");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        std::process::exit(1);
    }
}
