use surfs_up::config::{Config, REQUIRED_VARIABLES};
use surfs_up::db::Database;

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::env().inspect_err(|e| {
        log::error!(
            "config: {e}. Check all required environment variables ({}) are set.",
            REQUIRED_VARIABLES.join(", ")
        );
    })?;

    config.log();

    let database = Database::connect(&config.database_url, config.max_connections).await?;
    log::info!("Connected to database ({})", config.database_url);

    database.verify_schema().await?;
    log::info!("Schema verified");

    let summary = database.summary().await?;
    log::info!(
        "Dataset: {} stations, {} measurements, {} to {}",
        summary.stations,
        summary.measurements,
        summary.first_date.as_deref().unwrap_or("-"),
        summary.last_date.as_deref().unwrap_or("-"),
    );

    let state = surfs_up::api::service::State::new(database.clone(), config.query_timeout);

    let listen_addr = format!("0.0.0.0:{}", config.listen_port);
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;

    let router = surfs_up::api::service::router::router(state);

    log::info!("Listening on {listen_addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    database.close().await;
    log::info!("Shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log::info!("Shutdown signal received");
}
