//! Management endpoints.
//!
//! # Endpoints
//! ```text
//! GET  {base}                 → links to the enabled endpoints
//! GET  {base}/dubboconfigs    → configs.rs (read operation)
//! POST {base}/dubboshutdown   → shutdown.rs (write operation)
//! ```
//!
//! Disabled endpoints are not routed. Authentication is applied to every
//! actuator route when an api key is configured.

pub mod auth;
pub mod configs;
pub mod error;
pub mod shutdown;

use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::http::server::ActuatorState;
use self::auth::actuator_auth_middleware;
use self::configs::get_configs;
use self::shutdown::post_shutdown;

pub use configs::{collect_configs, ConfigsReport};
pub use error::EndpointError;
pub use shutdown::{shutdown_runtime, ShutdownCount, ShutdownReport};

pub const CONFIGS_ENDPOINT_ID: &str = "dubboconfigs";
pub const SHUTDOWN_ENDPOINT_ID: &str = "dubboshutdown";

#[derive(Debug, Serialize)]
pub struct EndpointLink {
    pub href: String,
    pub method: &'static str,
}

#[derive(Debug, Serialize)]
pub struct EndpointLinks {
    #[serde(rename = "_links")]
    pub links: BTreeMap<&'static str, EndpointLink>,
}

/// Enabled endpoints and where to reach them.
pub fn endpoint_links(state: &ActuatorState) -> EndpointLinks {
    let base = state.management.base_path.trim_end_matches('/');
    let endpoints = &state.management.endpoints;
    let mut links = BTreeMap::new();

    if endpoints.dubboconfigs.enabled {
        links.insert(
            CONFIGS_ENDPOINT_ID,
            EndpointLink { href: format!("{base}/{CONFIGS_ENDPOINT_ID}"), method: "GET" },
        );
    }
    if endpoints.dubboshutdown.enabled {
        links.insert(
            SHUTDOWN_ENDPOINT_ID,
            EndpointLink { href: format!("{base}/{SHUTDOWN_ENDPOINT_ID}"), method: "POST" },
        );
    }
    EndpointLinks { links }
}

async fn get_links(State(state): State<ActuatorState>) -> Json<EndpointLinks> {
    Json(endpoint_links(&state))
}

pub fn setup_actuator_router(state: ActuatorState) -> Router {
    let base = state.management.base_path.trim_end_matches('/').to_string();
    let endpoints = state.management.endpoints.clone();

    let mut router = Router::new().route(&base, get(get_links));

    if endpoints.dubboconfigs.enabled {
        router = router.route(&format!("{base}/{CONFIGS_ENDPOINT_ID}"), get(get_configs));
    }
    if endpoints.dubboshutdown.enabled {
        router = router.route(&format!("{base}/{SHUTDOWN_ENDPOINT_ID}"), post(post_shutdown));
    }

    router
        .route_layer(middleware::from_fn_with_state(state.clone(), actuator_auth_middleware))
        .with_state(state)
}
