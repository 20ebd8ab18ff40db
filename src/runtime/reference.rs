//! Client-side references and their manager.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::dubbo::ReferenceConfig;
use crate::runtime::{LifecycleError, Reference};

/// A proxy to a remote service.
#[derive(Debug)]
pub struct ReferenceProxy {
    interface: String,
    url: Option<String>,
    destroyed: AtomicBool,
}

impl ReferenceProxy {
    pub fn new(config: &ReferenceConfig) -> Self {
        tracing::debug!(interface = %config.interface, url = ?config.url, "Reference created");
        Self {
            interface: config.interface.clone(),
            url: config.url.clone(),
            destroyed: AtomicBool::new(false),
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::Acquire)
    }
}

impl Reference for ReferenceProxy {
    fn interface(&self) -> &str {
        &self.interface
    }

    fn destroy(&self) -> Result<(), LifecycleError> {
        if self.destroyed.swap(true, Ordering::AcqRel) {
            return Err(LifecycleError::AlreadyDestroyed {
                component: "reference",
                name: self.interface.clone(),
            });
        }
        tracing::info!(interface = %self.interface, "Reference destroyed");
        Ok(())
    }
}

/// Tracks every reference proxy created by the process.
#[derive(Default)]
pub struct ReferenceManager {
    references: DashMap<String, Arc<dyn Reference>>,
}

impl ReferenceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a reference. Returns false when the name is already taken.
    pub fn insert(&self, name: impl Into<String>, reference: Arc<dyn Reference>) -> bool {
        let name = name.into();
        if self.references.contains_key(&name) {
            return false;
        }
        self.references.insert(name, reference);
        true
    }

    pub fn reference_count(&self) -> usize {
        self.references.len()
    }

    /// Snapshot of the managed references, sorted by name.
    pub fn references(&self) -> BTreeMap<String, Arc<dyn Reference>> {
        self.references
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect()
    }

    /// Destroy every managed reference in name order.
    ///
    /// Each reference is forgotten once destroyed. Stops at the first failure.
    pub fn destroy(&self) -> Result<(), LifecycleError> {
        for (name, reference) in self.references() {
            reference.destroy()?;
            self.references.remove(&name);
        }
        tracing::debug!(remaining = self.references.len(), "Reference manager destroyed");
        Ok(())
    }
}
