//! Configuration object definitions.
//!
//! Each struct covers one aspect of the RPC framework. They are plain data:
//! the runtime objects built from them live in `crate::runtime`.

use serde::{Deserialize, Serialize};

/// Application identity.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Application name, used by registries to group providers and consumers.
    pub name: String,
    pub version: Option<String>,
    pub owner: Option<String>,
    pub organization: Option<String>,
    pub architecture: Option<String>,
    /// Deployment environment (e.g. "develop", "test", "product").
    pub environment: Option<String>,
    pub logger: Option<String>,
    pub qos_enable: Option<bool>,
    pub qos_port: Option<u16>,
    pub default: Option<bool>,
}

/// Module identity within an application.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ModuleConfig {
    pub name: String,
    pub version: Option<String>,
    pub owner: Option<String>,
    pub organization: Option<String>,
    pub default: Option<bool>,
}

/// Registry endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RegistryConfig {
    /// Registry address, e.g. `zookeeper://127.0.0.1:2181`.
    pub address: String,
    pub protocol: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub group: Option<String>,
    pub timeout: Option<u64>,
    pub session: Option<u64>,
    pub file: Option<String>,
    pub check: Option<bool>,
    pub dynamic: Option<bool>,
    pub register: Option<bool>,
    pub subscribe: Option<bool>,
    pub default: Option<bool>,
}

/// Monitor center endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct MonitorConfig {
    pub protocol: Option<String>,
    pub address: Option<String>,
    pub username: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub group: Option<String>,
    pub version: Option<String>,
    /// Statistics upload interval in milliseconds.
    pub interval: Option<u64>,
    pub default: Option<bool>,
}

/// Protocol listener settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Protocol name, e.g. "dubbo".
    pub name: String,
    /// Host to bind. Defaults to 0.0.0.0 when the listener starts.
    pub host: Option<String>,
    /// Port to bind. 0 picks an ephemeral port.
    pub port: Option<u16>,
    pub threadpool: Option<String>,
    pub threads: Option<u32>,
    pub iothreads: Option<u32>,
    /// Maximum concurrent connections accepted by the listener.
    pub accepts: Option<usize>,
    /// Maximum request payload in bytes.
    pub payload: Option<usize>,
    pub serialization: Option<String>,
    pub server: Option<String>,
    pub client: Option<String>,
    pub register: Option<bool>,
    pub default: Option<bool>,
}

/// Defaults applied to every exposed service.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub threads: Option<u32>,
    pub timeout: Option<u64>,
    pub retries: Option<u32>,
    pub loadbalance: Option<String>,
    pub version: Option<String>,
    pub group: Option<String>,
    pub delay: Option<i64>,
    pub export: Option<bool>,
    pub default: Option<bool>,
}

/// Defaults applied to every consumed reference.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ConsumerConfig {
    pub timeout: Option<u64>,
    pub retries: Option<u32>,
    pub loadbalance: Option<String>,
    pub check: Option<bool>,
    pub connections: Option<u32>,
    pub generic: Option<String>,
    pub default: Option<bool>,
}

/// Per-method overrides of a service or reference.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct MethodConfig {
    pub name: String,
    pub timeout: Option<u64>,
    pub retries: Option<u32>,
    pub loadbalance: Option<String>,
    #[serde(rename = "async")]
    pub async_call: Option<bool>,
    pub sent: Option<bool>,
    pub actives: Option<u32>,
    pub executes: Option<u32>,
}

/// A service exposed by this process.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Fully qualified interface name.
    pub interface: String,
    pub version: Option<String>,
    pub group: Option<String>,
    /// Ids of the protocols to export over. Empty means every protocol.
    pub protocols: Vec<String>,
    /// Ids of the registries to register with. Empty means every registry.
    pub registries: Vec<String>,
    pub path: Option<String>,
    pub timeout: Option<u64>,
    pub retries: Option<u32>,
    pub weight: Option<u32>,
    pub delay: Option<i64>,
    pub export: Option<bool>,
    #[serde(skip_serializing)]
    pub token: Option<String>,
}

/// A remote service consumed by this process.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Fully qualified interface name.
    pub interface: String,
    pub version: Option<String>,
    pub group: Option<String>,
    /// Point-to-point URL, bypassing the registry.
    pub url: Option<String>,
    pub protocol: Option<String>,
    pub registries: Vec<String>,
    pub check: Option<bool>,
    pub timeout: Option<u64>,
    pub retries: Option<u32>,
    pub lazy: Option<bool>,
    pub init: Option<bool>,
}
