//! Exported services.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::dubbo::ServiceConfig;
use crate::runtime::{ExposedService, LifecycleError};

/// A service exported over one or more protocols.
#[derive(Debug)]
pub struct ServiceExporter {
    interface: String,
    protocols: Vec<String>,
    exported: AtomicBool,
}

impl ServiceExporter {
    /// Export `config` over the given protocol names.
    pub fn export(config: &ServiceConfig, protocols: Vec<String>) -> Self {
        tracing::info!(
            interface = %config.interface,
            protocols = ?protocols,
            "Service exported"
        );
        Self {
            interface: config.interface.clone(),
            protocols,
            exported: AtomicBool::new(true),
        }
    }

    pub fn protocols(&self) -> &[String] {
        &self.protocols
    }
}

impl ExposedService for ServiceExporter {
    fn interface(&self) -> &str {
        &self.interface
    }

    fn is_exported(&self) -> bool {
        self.exported.load(Ordering::Acquire)
    }

    fn destroy(&self) -> Result<(), LifecycleError> {
        if !self.exported.swap(false, Ordering::AcqRel) {
            return Err(LifecycleError::AlreadyDestroyed {
                component: "service",
                name: self.interface.clone(),
            });
        }
        tracing::info!(interface = %self.interface, "Service unexported");
        Ok(())
    }
}
