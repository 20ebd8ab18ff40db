//! Lifecycle-bearing RPC runtime objects.
//!
//! # Data Flow
//! ```text
//! startup:  config objects → StaticRegistry / TcpProtocol / ServiceExporter / ReferenceProxy
//!           → registered in the ConfigContainer
//! shutdown: registries → protocols → exposed services → references
//! ```
//!
//! The traits are the seam the actuator works against. The concrete types in
//! the submodules are what the binary wires up; tests plug in their own.

pub mod protocol;
pub mod reference;
pub mod registry;
pub mod service;

use thiserror::Error;

pub use protocol::TcpProtocol;
pub use reference::{ReferenceManager, ReferenceProxy};
pub use registry::{RegistryDirectory, StaticRegistry};
pub use service::ServiceExporter;

/// Error raised when a runtime object cannot be torn down.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("{component} '{name}' is already destroyed")]
    AlreadyDestroyed { component: &'static str, name: String },
    #[error("failed to destroy {component} '{name}': {reason}")]
    Destroy {
        component: &'static str,
        name: String,
        reason: String,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A connection to a registry.
pub trait Registry: Send + Sync {
    /// Registry address, unique per registry.
    fn address(&self) -> &str;

    /// Unregister everything and disconnect.
    fn destroy(&self) -> Result<(), LifecycleError>;
}

/// A protocol instance serving exported services.
pub trait Protocol: Send + Sync {
    fn name(&self) -> &str;

    /// Close the listener and every connection it owns.
    fn destroy(&self) -> Result<(), LifecycleError>;
}

/// A service published by this process.
pub trait ExposedService: Send + Sync {
    fn interface(&self) -> &str;

    fn is_exported(&self) -> bool;

    /// Unexport the service.
    fn destroy(&self) -> Result<(), LifecycleError>;
}

/// A client-side proxy to a remote service.
pub trait Reference: Send + Sync {
    fn interface(&self) -> &str;

    /// Release the proxy and its invokers.
    fn destroy(&self) -> Result<(), LifecycleError>;
}
