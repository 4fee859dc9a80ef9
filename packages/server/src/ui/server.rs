//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tegaki_shared::time::Clock;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    domain::ConnectionRegistry,
    usecase::{
        ConnectUseCase, DisconnectUseCase, DispatchEventUseCase, GetConnectionsUseCase,
        RelayClearUseCase, RelayStrokeUseCase,
    },
};

use super::{
    error::ServerError,
    handler::{debug_connections, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Drawing relay server
///
/// Each instance owns its own connection registry, so several servers can run
/// side by side in one process.
///
/// # Example
///
/// ```ignore
/// let registry = Arc::new(InMemoryConnectionRegistry::new());
/// let server = Server::new(registry, Arc::new(SystemClock));
/// server.run("0.0.0.0".to_string(), 5000).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance, wiring the use cases around `registry`
    ///
    /// # Arguments
    ///
    /// * `registry` - Connection registry shared by all use cases of this server
    /// * `clock` - Source of connection timestamps
    pub fn new(registry: Arc<dyn ConnectionRegistry>, clock: Arc<dyn Clock>) -> Self {
        let relay_stroke_usecase = Arc::new(RelayStrokeUseCase::new(registry.clone()));
        let relay_clear_usecase = Arc::new(RelayClearUseCase::new(registry.clone()));

        let state = Arc::new(AppState {
            connect_usecase: Arc::new(ConnectUseCase::new(registry.clone(), clock)),
            disconnect_usecase: Arc::new(DisconnectUseCase::new(registry.clone())),
            dispatch_event_usecase: Arc::new(DispatchEventUseCase::new(
                relay_stroke_usecase,
                relay_clear_usecase,
            )),
            get_connections_usecase: Arc::new(GetConnectionsUseCase::new(registry)),
        });

        Self { state }
    }

    /// Build the router: WebSocket relay endpoint, HTTP API, permissive CORS
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/debug/connections", get(debug_connections))
            .with_state(self.state.clone())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the relay server until Ctrl+C / SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "0.0.0.0")
    /// * `port` - The port number to bind to (e.g., 5000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), ServerError> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: bind_addr.clone(),
                source,
            })?;

        tracing::info!("Drawing relay listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
