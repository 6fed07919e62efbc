use std::io;

use axum::{Router, routing::get};
use tokio::net::TcpListener;

/// Minimal liveness server for the hosting platform's health checks.
pub async fn serve(port: u16) -> io::Result<()> {
    let app = Router::new()
        .route("/", get(|| async { "It works" }))
        .route("/health", get(|| async { "OK" }));

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    log::info!("HTTP server listening on :{}", port);
    axum::serve(listener, app).await
}
