use crate::app::{
    cli::Cli,
    points::{PointSet, load_points},
    server::{ServerOptions, start_server},
};
use dotenvy::dotenv;
use std::{net::SocketAddr, process::ExitCode, sync::Arc};
use tokio::signal;
#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal as unix_signal};
use tokio::sync::broadcast;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub(crate) fn start() -> ExitCode {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse_checked();

    let records = match load_points(&cli.points_csv, cli.point_columns()) {
        Ok(records) => records,
        Err(err) => {
            error!("Loading points from {} failed: {err}", cli.points_csv.display());

            return ExitCode::FAILURE;
        }
    };

    let points = Arc::new(PointSet::new(&records));

    info!(
        points = points.len(),
        species = points.species_count(),
        "points loaded"
    );

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("tokio");

    let (shutdown_tx, _) = broadcast::channel(1);

    rt.spawn(shutdown_signal(shutdown_tx.clone()));

    let result = rt.block_on(start_server(
        points,
        ServerOptions {
            tile_url_path: cli.tile_url_path.as_str().to_string(),
            extent: cli.extent,
            max_concurrent_connections: cli.max_concurrent_connections,
            addr: SocketAddr::from((cli.host, cli.port)),
        },
        shutdown_tx.subscribe(),
    ));

    match result {
        Ok(()) => {
            info!("Server stopped.");

            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Server stopped with error: {err}");

            ExitCode::FAILURE
        }
    }
}

async fn shutdown_signal(shutdown_tx: broadcast::Sender<()>) {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        let mut sigterm = unix_signal(SignalKind::terminate()).expect("install SIGTERM handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down.");

    if let Err(err) = shutdown_tx.send(()) {
        error!("Error sending shutdown signal: {err}");
    }
}
