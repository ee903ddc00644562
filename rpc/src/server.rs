//! Axum-based HTTP server.

use std::future::Future;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;
use witness_service::Notifier;
use witness_store::{CertificateProviderStore, RecordStore};

use crate::error::RpcError;
use crate::handlers;
use crate::state::RpcState;

/// Build the router with all handlers.
pub fn router<R, C, N>(state: RpcState<R, C, N>) -> Router
where
    R: RecordStore + Send + Sync + 'static,
    C: CertificateProviderStore + Send + Sync + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route(
            "/records/:id/witnessing/:role",
            post(handlers::witness_as_role::<R, C, N>),
        )
        .route(
            "/records/:id/witnessing",
            get(handlers::witnessing_status::<R, C, N>),
        )
        .route("/stats", get(handlers::stats::<R, C, N>))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct RpcServer {
    pub bind_address: String,
    pub port: u16,
}

impl RpcServer {
    pub fn new(bind_address: impl Into<String>, port: u16) -> Self {
        Self {
            bind_address: bind_address.into(),
            port,
        }
    }

    /// Serve until `shutdown` resolves.
    pub async fn start<R, C, N>(
        &self,
        state: RpcState<R, C, N>,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), RpcError>
    where
        R: RecordStore + Send + Sync + 'static,
        C: CertificateProviderStore + Send + Sync + 'static,
        N: Notifier + 'static,
    {
        let app = router(state);

        let addr = format!("{}:{}", self.bind_address, self.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| RpcError::Server(format!("bind {addr}: {e}")))?;
        info!("HTTP server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| RpcError::Server(e.to_string()))?;
        info!("HTTP server stopped");
        Ok(())
    }
}
