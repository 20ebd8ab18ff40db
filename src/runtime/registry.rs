//! Registry connections.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::dubbo::RegistryConfig;
use crate::runtime::{LifecycleError, Registry};

/// A registry connection described only by its address.
#[derive(Debug)]
pub struct StaticRegistry {
    address: String,
    connected: AtomicBool,
}

impl StaticRegistry {
    pub fn connect(config: &RegistryConfig) -> Self {
        tracing::info!(address = %config.address, "Registry connected");
        Self {
            address: config.address.clone(),
            connected: AtomicBool::new(true),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }
}

impl Registry for StaticRegistry {
    fn address(&self) -> &str {
        &self.address
    }

    fn destroy(&self) -> Result<(), LifecycleError> {
        if self.connected.swap(false, Ordering::AcqRel) {
            tracing::info!(address = %self.address, "Registry disconnected");
        }
        Ok(())
    }
}

/// All registry connections of the process, keyed by address.
#[derive(Default)]
pub struct RegistryDirectory {
    registries: DashMap<String, Arc<dyn Registry>>,
}

impl RegistryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a registry. Returns false when the address is already known.
    pub fn insert(&self, registry: Arc<dyn Registry>) -> bool {
        let address = registry.address().to_string();
        if self.registries.contains_key(&address) {
            return false;
        }
        self.registries.insert(address, registry);
        true
    }

    pub fn len(&self) -> usize {
        self.registries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }

    /// Destroy every registry, removing each one once destroyed.
    ///
    /// Stops at the first failure; registries not yet reached stay registered.
    pub fn destroy_all(&self) -> Result<(), LifecycleError> {
        let mut addresses: Vec<String> = self.registries.iter().map(|r| r.key().clone()).collect();
        addresses.sort();

        for address in addresses {
            let Some(registry) = self.registries.get(&address).map(|r| r.value().clone()) else {
                continue;
            };
            registry.destroy()?;
            self.registries.remove(&address);
        }
        Ok(())
    }
}
