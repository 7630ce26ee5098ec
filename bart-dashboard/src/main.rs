use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use bart_dashboard::bart::BartClient;
use bart_dashboard::cache::TransitData;
use bart_dashboard::config::AppConfig;
use bart_dashboard::density::generate_density;
use bart_dashboard::metrics::RecentMetrics;
use bart_dashboard::poll::{LiveBoard, spawn_pollers};
use bart_dashboard::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bart_dashboard=info,tower_http=info".into()),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    if config.uses_demo_key() {
        warn!("using BART's shared demo key; set BART_API_KEY for your own quota");
    }

    let client = match BartClient::new(config.bart.clone()) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to create BART client");
            return ExitCode::FAILURE;
        }
    };

    let metrics = Arc::new(RecentMetrics::default());
    let data = Arc::new(TransitData::with_metrics(
        client,
        &config.cache,
        metrics.clone(),
    ));

    // Live data is refreshed in the background; pages read the latest snapshot
    let board = Arc::new(LiveBoard::new(config.poll.watch_ttl));
    let _pollers = spawn_pollers(data.clone(), board.clone(), &config.poll);

    let density = generate_density(&mut rand::rng());
    info!(points = density.len(), "generated density overlay");

    let state = AppState::new(data, board, metrics, density);
    let app = create_router(state, &config.static_dir);

    let addr = config.bind_addr;
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!("BART dashboard listening on http://{addr}");
    info!("  GET  /                  - Dashboard");
    info!("  GET  /trip-planner      - Trip planner");
    info!("  GET  /api/map           - Map render model");
    info!("  GET  /api/trains        - Live train positions");
    info!("  GET  /api/status        - Train count and advisories");
    info!("  POST /trip/plan         - Plan a trip");
    info!("  GET  /debug/metrics     - Recent API call timings");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
