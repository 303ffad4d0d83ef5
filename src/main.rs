use coursehub::logging::{init_tracing, shutdown_tracer};
use coursehub::metrics::{init_metrics, metrics_app};
use coursehub::router::init_router;
use coursehub::state::AppState;
use coursehub::store::PgStore;
use coursehub_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
use coursehub_db::{init_db_pool, run_migrations};
use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let server_config = ServerConfig::from_env();
    init_tracing(&server_config)?;

    if let Some(handle) = init_metrics(server_config.observability_enabled)? {
        let metrics_address = server_config.metrics_address();
        let metrics_listener = tokio::net::TcpListener::bind(&metrics_address).await?;
        info!("Metrics server listening on http://{}/metrics", metrics_address);
        tokio::spawn(async move {
            if let Err(e) = axum::serve(metrics_listener, metrics_app(handle)).await {
                error!(error = %e, "Metrics server stopped");
            }
        });
    }

    let db_config = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&db_config).await?;
    if db_config.run_migrations {
        run_migrations(&pool).await?;
    }

    let state = AppState::new(
        Arc::new(PgStore::new(pool)),
        JwtConfig::from_env(),
        CorsConfig::from_env(),
    );
    let app = init_router(state);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Server running on http://{}", address);
    info!("Swagger UI available at http://{}/swagger-ui", address);
    info!("Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tracer().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => error!(error = %e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
