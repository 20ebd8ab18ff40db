//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the actuator.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dubbo::{
    ApplicationConfig, ConsumerConfig, MethodConfig, ModuleConfig, MonitorConfig, ProtocolConfig,
    ProviderConfig, ReferenceConfig, RegistryConfig, ServiceConfig,
};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ActuatorConfig {
    /// Management HTTP server settings.
    pub server: ServerConfig,

    /// Endpoint exposure and authentication.
    pub management: ManagementConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,

    /// RPC runtime configuration objects, keyed by instance name.
    pub dubbo: DubboSettings,
}

/// Management HTTP server settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8081").
    pub bind_address: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8081".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Endpoint exposure settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ManagementConfig {
    /// URL prefix of every actuator route.
    pub base_path: String,

    /// Bearer token required on every actuator route when set.
    pub api_key: Option<String>,

    pub endpoints: EndpointsConfig,
}

impl Default for ManagementConfig {
    fn default() -> Self {
        Self {
            base_path: "/actuator".to_string(),
            api_key: None,
            endpoints: EndpointsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub dubboconfigs: EndpointToggle,
    pub dubboshutdown: EndpointToggle,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            dubboconfigs: EndpointToggle { enabled: true },
            // Irreversible; must be turned on explicitly.
            dubboshutdown: EndpointToggle { enabled: false },
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct EndpointToggle {
    pub enabled: bool,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default log filter; `RUST_LOG` takes precedence.
    pub log_filter: String,

    /// Expose Prometheus metrics.
    pub metrics_enabled: bool,

    /// Metrics listener address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "dubbo_actuator=info,tower_http=info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9464".to_string(),
        }
    }
}

/// RPC runtime configuration objects, one table per kind.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DubboSettings {
    pub applications: BTreeMap<String, ApplicationConfig>,
    pub consumers: BTreeMap<String, ConsumerConfig>,
    pub methods: BTreeMap<String, MethodConfig>,
    pub modules: BTreeMap<String, ModuleConfig>,
    pub monitors: BTreeMap<String, MonitorConfig>,
    pub protocols: BTreeMap<String, ProtocolConfig>,
    pub providers: BTreeMap<String, ProviderConfig>,
    pub references: BTreeMap<String, ReferenceConfig>,
    pub registries: BTreeMap<String, RegistryConfig>,
    pub services: BTreeMap<String, ServiceConfig>,
}
