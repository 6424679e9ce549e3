use axum::extract::Request;
use axum::ServiceExt;
use server_http::{telemetry, AppState};
use shared::config::Config;
use tracing::info;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load environment variables from .env file (if exists) before reading config
    let dotenv = dotenvy::dotenv();

    // Load configuration from environment variables
    let config = Config::from_env();

    // Initialize tracing
    telemetry::init(config.log_level)?;

    match dotenv {
        Ok(path) => info!("Loaded environment variables from {}", path.display()),
        Err(_) => info!("No .env file found, using system environment variables"),
    }

    info!(
        "Starting {} v{} ({} environment)",
        config.app_name,
        env!("CARGO_PKG_VERSION"),
        config.environment
    );
    info!(
        "Cache backend: {} (default TTL {}s)",
        config.cache.backend, config.cache.default_ttl.0
    );

    // Initialize state
    let state = AppState::from_config(&config).await?;

    // Build router
    let app = server_http::app(state);

    // Start server
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!("HTTP Server listening on http://{}", address);
    info!("Try: curl http://{}/health/ready", address);

    // Graceful shutdown handler
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }

    info!("Shutting down gracefully...");
}
