use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use pipewatch_kafka::StatusSink;

use crate::handlers::{handle_pipeline_status, health_check, HandlerState};

/// Create the gateway routes
pub fn create_router(sink: Arc<dyn StatusSink>) -> Router {
    let state = HandlerState { sink };

    Router::new()
        .route("/pipeline-status", post(handle_pipeline_status))
        // Health endpoints
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        // Add state and middleware
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub struct GatewayServer {
    bind_addr: SocketAddr,
    sink: Arc<dyn StatusSink>,
}

impl GatewayServer {
    pub fn new(bind_addr: SocketAddr, sink: Arc<dyn StatusSink>) -> Self {
        Self { bind_addr, sink }
    }

    pub fn bind_address(&self) -> &SocketAddr {
        &self.bind_addr
    }

    pub async fn start(self) -> anyhow::Result<()> {
        let app = create_router(self.sink);

        let listener = TcpListener::bind(&self.bind_addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", self.bind_addr, e))?;

        info!("Pipewatch gateway listening on {}", self.bind_addr);

        axum::serve(listener, app)
            .await
            .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))?;

        Ok(())
    }
}
