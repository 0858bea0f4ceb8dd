use std::{sync::Arc, time::Duration};

use anyhow::Result;
use gurudev_enquiry::{Command, InFlight, SubmitEnquiry};
use gurudev_notification::EmailService;
use tokio::sync::mpsc;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::routes::AppState;

/// Pending forwards get this long to drain after the listener stops.
const SUBSCRIBER_DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

pub async fn serve(
    config: crate::config::Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting gurudev server...");

    let host = host_override.unwrap_or(config.server.host.to_owned());
    let port = port_override.unwrap_or(config.server.port);

    // Write pool first: it creates the database file and switches it to WAL.
    let write_pool = crate::db::create_write_pool(&config.database.url).await?;
    crate::db::run_migrations(&write_pool).await?;

    let read_pool =
        crate::db::create_read_pool(&config.database.url, config.database.max_connections)
            .await?;

    let mut command = Command::new(write_pool.clone());

    let subscriber = if config.email.enabled {
        tracing::info!(
            smtp.host = %config.email.smtp_host,
            smtp.port = config.email.smtp_port,
            "Starting enquiry forwarding..."
        );

        let (sender, receiver) = mpsc::unbounded_channel();
        command = command.with_subscriber(sender);

        Some(gurudev_notification::subscribe_enquiry(
            receiver,
            EmailService::new(&config.email)?,
            Command::new(write_pool.clone()),
            config.email.contact_address.to_owned(),
        ))
    } else {
        tracing::warn!("Email disabled, enquiries are stored but not forwarded");

        None
    };

    let submitter: Arc<dyn SubmitEnquiry> = Arc::new(command);

    let state = AppState {
        config,
        submitter,
        in_flight: InFlight::default(),
        pool: read_pool.clone(),
    };

    let app = crate::routes::router(state)
        .layer(axum::middleware::from_fn(
            crate::middleware::cache_control_middleware,
        ))
        // Minify before compression
        .layer(axum::middleware::map_response(
            crate::middleware::minify_html_middleware,
        ))
        .layer(CompressionLayer::new().br(true).gzip(true))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    // Serving consumes the router, so the last enquiry sender is gone once this returns.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(subscriber) = subscriber {
        tracing::info!("Waiting for pending enquiry forwards...");

        match tokio::time::timeout(SUBSCRIBER_DRAIN_TIMEOUT, subscriber).await {
            Ok(Err(e)) => tracing::error!("Enquiry subscriber failed: {e}"),
            Err(_) => tracing::warn!("Enquiry subscriber did not drain in time"),
            Ok(Ok(())) => {}
        }
    }

    tracing::info!("Closing database pools...");
    read_pool.close().await;
    write_pool.close().await;

    tracing::info!("Graceful shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
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
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Starting graceful shutdown...");
}
