//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router hosting the actuator endpoints
//! - Wire up middleware (tracing, request ID, timeout)
//! - Bind server to listener and stop on the shutdown signal

use axum::{body::Body, http::Request, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::actuator::setup_actuator_router;
use crate::config::{ActuatorConfig, ManagementConfig};
use crate::container::ConfigContainer;
use crate::http::request::{request_id_of, MakeRequestUuid, X_REQUEST_ID};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct ActuatorState {
    pub container: Arc<ConfigContainer>,
    pub management: Arc<ManagementConfig>,
}

/// HTTP server for the actuator endpoints.
pub struct ActuatorServer {
    router: Router,
    config: ActuatorConfig,
}

impl ActuatorServer {
    /// Create a new server over the given container.
    pub fn new(config: ActuatorConfig, container: Arc<ConfigContainer>) -> Self {
        let state = ActuatorState {
            container,
            management: Arc::new(config.management.clone()),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ActuatorConfig, state: ActuatorState) -> Router {
        setup_actuator_router(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.server.request_timeout_secs)))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "actuator_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id_of(request),
                )
            }))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            base_path = %self.config.management.base_path,
            "Actuator server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Actuator server shutting down");
            })
            .await?;

        tracing::info!("Actuator server stopped");
        Ok(())
    }
}
