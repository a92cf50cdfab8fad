//! Base Station Manager - provisioning service entry point

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use base_station_manager::config::ManagerConfig;
use base_station_manager::db;
use base_station_manager::docker::DockerManager;
use base_station_manager::routes::{create_router, AppState};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(num_cpus::get())
        .enable_all()
        .thread_name("bsm-worker")
        .build()
        .expect("Failed to create Tokio runtime");

    runtime.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing; compact by default, JSON when
    // RUST_LOG_FORMAT=json.
    let use_json = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    if use_json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }

    info!("Base Station Manager starting...");

    // Load configuration
    let config = ManagerConfig::from_env();
    info!("Configuration loaded:");
    info!("  Host: {}:{}", config.host, config.port);
    info!("  Station image: {}", config.station_image);
    info!("  Default network: {}", config.network_name);
    info!("  Kafka broker: {}", config.kafka_broker);

    // Connect to Docker
    let docker = Arc::new(
        DockerManager::new()
            .await
            .expect("Failed to connect to Docker"),
    );

    // Open the record store and apply the schema
    let db = db::connect(&config.database_url)
        .await
        .expect("Failed to open record store");

    let state = AppState {
        config: config.clone(),
        docker,
        db,
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    let shutdown_signal = async {
        let ctrl_c = async {
            signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C handler");
        };

        #[cfg(unix)]
        let terminate = async {
            signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                info!("Received Ctrl+C, shutting down...");
            }
            _ = terminate => {
                info!("Received SIGTERM, shutting down...");
            }
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server stopped");

    Ok(())
}
