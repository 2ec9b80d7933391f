//! Streamable HTTP transport for MCP
//!
//! rmcp's `StreamableHttpService` nested at `/mcp`, with in-memory sessions.

use crate::mcp::OdinServer;
use crate::transport::{status_router, TransportMode};
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::StreamableHttpService;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;

pub const MCP_PATH: &str = "/mcp";

/// Serves `server` over streamable HTTP on `0.0.0.0:port` until Ctrl+C
pub async fn run_streamable_server(
    server: OdinServer,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let app = status_router(TransportMode::Streamable)
        .nest_service(MCP_PATH, service)
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Streamable HTTP server listening on {}", addr);
    tracing::info!("Endpoint: http://{}{}", addr, MCP_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("Received shutdown signal (Ctrl+C)"),
                Err(err) => tracing::error!("Failed to listen for shutdown signal: {}", err),
            }
        })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
