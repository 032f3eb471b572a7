use crate::app::{
    points::PointSet,
    server::{app_state::AppState, tile_route},
};
use axum::{
    Router,
    http::{Method, header},
    routing::get,
    serve,
};
use std::{io, net::SocketAddr, sync::Arc};
use tokio::sync::broadcast;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub(crate) struct ServerOptions {
    pub(crate) tile_url_path: String,
    pub(crate) extent: u32,
    pub(crate) max_concurrent_connections: usize,
    pub(crate) addr: SocketAddr,
}

pub(crate) fn router(points: Arc<PointSet>, tile_url_path: &str, extent: u32) -> Router {
    let app_state = AppState { points, extent };

    Router::new()
        .route(
            &format!("{tile_url_path}/{{*tile}}"),
            get(tile_route::get),
        )
        .with_state(app_state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
}

pub(crate) async fn start_server(
    points: Arc<PointSet>,
    options: ServerOptions,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> io::Result<()> {
    let router = router(points, &options.tile_url_path, options.extent)
        .layer(ConcurrencyLimitLayer::new(options.max_concurrent_connections));

    let listener = tokio::net::TcpListener::bind(options.addr).await?;

    info!(addr = %options.addr, tile_url_path = %options.tile_url_path, "listening");

    serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
        })
        .await
}
