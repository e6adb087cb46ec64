use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{info, warn};

use rolekeeper::logging::init_tracing;
use rolekeeper::metrics::{init_metrics, spawn_upkeep};
use rolekeeper::modules::users::service::build_user_operations;
use rolekeeper::router::init_router;
use rolekeeper::shutdown::shutdown_signal;
use rolekeeper::state::AppState;
use rolekeeper_config::{
    AccessConfig, CorsConfig, DatabaseConfig, JwtConfig, LoggingConfig, ServerConfig,
};
use rolekeeper_db::{init_db_pool, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _guards = init_tracing(&LoggingConfig::from_env());

    let server_config = ServerConfig::from_env();
    let database_config = DatabaseConfig::from_env();
    let access_config = AccessConfig::from_env();

    let (request_metrics, metrics_handle) =
        init_metrics().context("Failed to build metrics recorder")?;
    spawn_upkeep(metrics_handle.clone());

    let pool = init_db_pool(&database_config)
        .await
        .context("Failed to connect to database")?;
    if database_config.run_migrations {
        run_migrations(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    let state = AppState {
        operations: build_user_operations(pool, access_config.default_role_id, request_metrics),
        jwt_config: JwtConfig::from_env(),
        access_config,
        cors_config: CorsConfig::from_env(),
        metrics_handle,
    };
    let app = init_router(state);

    let listener = TcpListener::bind(&server_config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", server_config.listen_addr))?;
    info!(addr = %server_config.listen_addr, "Server listening");

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.await;
            })
            .await
    });

    tokio::select! {
        _ = shutdown_signal() => {}
        joined = &mut server => {
            joined.context("Server task panicked")?.context("Server error")?;
            return Ok(());
        }
    }
    let _ = stop_tx.send(());

    match tokio::time::timeout(server_config.shutdown_grace, server).await {
        Ok(joined) => joined
            .context("Server task panicked")?
            .context("Server error")?,
        Err(_) => warn!(
            grace_secs = server_config.shutdown_grace.as_secs(),
            "In-flight requests did not finish within the grace period"
        ),
    }

    info!("Server stopped");
    Ok(())
}
