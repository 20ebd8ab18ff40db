//! Management endpoints for an RPC framework runtime.

pub mod actuator;
pub mod config;
pub mod container;
pub mod dubbo;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod runtime;

pub use config::schema::ActuatorConfig;
pub use container::ConfigContainer;
pub use http::ActuatorServer;
pub use lifecycle::Shutdown;
