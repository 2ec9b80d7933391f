//! SSE (Server-Sent Events) transport for MCP
//!
//! rmcp's SSE server mounted on an axum router next to the status route.

use crate::mcp::OdinServer;
use crate::transport::{status_router, TransportMode};
use rmcp::transport::sse_server::{SseServer, SseServerConfig};
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;

pub const SSE_PATH: &str = "/sse";
pub const POST_PATH: &str = "/message";

/// Serves `server` over SSE on `0.0.0.0:port` until Ctrl+C
pub async fn run_sse_server(
    server: OdinServer,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;
    let ct = CancellationToken::new();

    let config = SseServerConfig {
        bind: addr,
        sse_path: SSE_PATH.to_string(),
        post_path: POST_PATH.to_string(),
        ct: ct.clone(),
        sse_keep_alive: None,
    };

    let (sse_server, sse_router) = SseServer::new(config);
    let app = sse_router
        .merge(status_router(TransportMode::Sse))
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("SSE server ready on {}", addr);
    tracing::info!("  SSE endpoint: http://{}{}", addr, SSE_PATH);
    tracing::info!("  POST endpoint: http://{}{}", addr, POST_PATH);

    let shutdown = ct.clone();
    let http = tokio::spawn(async move {
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await;
        if let Err(e) = result {
            tracing::error!("SSE server error: {}", e);
        }
    });

    let service_ct = sse_server.with_service(move || server.clone());

    tokio::signal::ctrl_c().await?;
    tracing::info!("Received shutdown signal (Ctrl+C)");
    service_ct.cancel();
    ct.cancel();
    http.await?;

    tracing::info!("Server stopped");
    Ok(())
}
