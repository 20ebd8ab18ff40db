//! Service locator for configuration objects and runtime components.
//!
//! # Data Flow
//! ```text
//! startup:   register_* calls → refresh()
//! endpoints: find_* lookups (fail with NotInitialized before refresh)
//! ```
//!
//! # Design Decisions
//! - Registration happens once at startup; lookups are read-mostly
//! - Instance names are unique per kind
//! - Lookups return sorted snapshots so callers never hold map guards

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;

use crate::dubbo::{ConfigKind, Describable, MetadataError, PropertyMap};
use crate::runtime::{
    ExposedService, LifecycleError, Protocol, Reference, ReferenceManager, Registry,
    RegistryDirectory,
};

/// Error raised by container lookups and registration.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("container is not initialized")]
    NotInitialized,
    #[error("duplicate {component} name '{name}'")]
    Duplicate { component: String, name: String },
}

/// Holds every configuration object and runtime component of the process.
#[derive(Default)]
pub struct ConfigContainer {
    ready: AtomicBool,
    beans: DashMap<ConfigKind, BTreeMap<String, Arc<dyn Describable>>>,
    registries: RegistryDirectory,
    protocols: DashMap<String, Arc<dyn Protocol>>,
    services: DashMap<String, Arc<dyn ExposedService>>,
    references: Arc<ReferenceManager>,
}

impl ConfigContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a configuration object under `name`.
    pub fn register_config<D: Describable>(
        &self,
        name: impl Into<String>,
        bean: D,
    ) -> Result<(), ContainerError> {
        let name = name.into();
        let kind = bean.kind();
        let mut entry = self.beans.entry(kind).or_default();
        if entry.contains_key(&name) {
            return Err(ContainerError::Duplicate {
                component: kind.simple_name().to_string(),
                name,
            });
        }
        entry.insert(name, Arc::new(bean));
        Ok(())
    }

    pub fn register_registry(&self, registry: Arc<dyn Registry>) -> Result<(), ContainerError> {
        let address = registry.address().to_string();
        if !self.registries.insert(registry) {
            return Err(ContainerError::Duplicate {
                component: "registry".into(),
                name: address,
            });
        }
        Ok(())
    }

    pub fn register_protocol(
        &self,
        name: impl Into<String>,
        protocol: Arc<dyn Protocol>,
    ) -> Result<(), ContainerError> {
        insert_unique(&self.protocols, "protocol", name.into(), protocol)
    }

    pub fn register_service(
        &self,
        name: impl Into<String>,
        service: Arc<dyn ExposedService>,
    ) -> Result<(), ContainerError> {
        insert_unique(&self.services, "service", name.into(), service)
    }

    pub fn register_reference(
        &self,
        name: impl Into<String>,
        reference: Arc<dyn Reference>,
    ) -> Result<(), ContainerError> {
        let name = name.into();
        if !self.references.insert(name.clone(), reference) {
            return Err(ContainerError::Duplicate {
                component: "reference".into(),
                name,
            });
        }
        Ok(())
    }

    /// Mark registration complete and open the container for lookups.
    pub fn refresh(&self) {
        self.ready.store(true, Ordering::Release);
        tracing::info!(
            registries = self.registries.len(),
            protocols = self.protocols.len(),
            services = self.services.len(),
            references = self.references.reference_count(),
            "Container refreshed"
        );
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    fn ensure_ready(&self) -> Result<(), ContainerError> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(ContainerError::NotInitialized)
        }
    }

    /// All configuration objects of `kind`, sorted by instance name.
    pub fn find_instances_by_type(
        &self,
        kind: ConfigKind,
    ) -> Result<BTreeMap<String, Arc<dyn Describable>>, ContainerError> {
        self.ensure_ready()?;
        Ok(self.beans.get(&kind).map(|b| b.value().clone()).unwrap_or_default())
    }

    /// Flat property map of a configuration object.
    pub fn to_property_map(&self, bean: &dyn Describable) -> Result<PropertyMap, MetadataError> {
        bean.to_fields()
    }

    /// Number of live registry connections.
    pub fn registry_count(&self) -> Result<usize, ContainerError> {
        self.ensure_ready()?;
        Ok(self.registries.len())
    }

    /// Protocol instances not yet destroyed, sorted by name.
    pub fn find_protocol_instances(
        &self,
    ) -> Result<BTreeMap<String, Arc<dyn Protocol>>, ContainerError> {
        self.ensure_ready()?;
        Ok(snapshot(&self.protocols))
    }

    /// Services still exported, sorted by name.
    pub fn find_exposed_services(
        &self,
    ) -> Result<BTreeMap<String, Arc<dyn ExposedService>>, ContainerError> {
        self.ensure_ready()?;
        let mut services = snapshot(&self.services);
        services.retain(|_, service| service.is_exported());
        Ok(services)
    }

    pub fn find_reference_manager(&self) -> Result<Arc<ReferenceManager>, ContainerError> {
        self.ensure_ready()?;
        Ok(self.references.clone())
    }

    /// Destroy every registry, then every protocol instance.
    ///
    /// Destroyed components are removed from the container. Stops at the first
    /// failure.
    pub fn destroy_all_protocols(&self) -> Result<(), LifecycleError> {
        self.registries.destroy_all()?;

        for (name, protocol) in snapshot(&self.protocols) {
            protocol.destroy()?;
            self.protocols.remove(&name);
        }
        Ok(())
    }
}

fn insert_unique<T: ?Sized>(
    map: &DashMap<String, Arc<T>>,
    component: &str,
    name: String,
    value: Arc<T>,
) -> Result<(), ContainerError> {
    match map.entry(name) {
        dashmap::mapref::entry::Entry::Occupied(entry) => Err(ContainerError::Duplicate {
            component: component.to_string(),
            name: entry.key().clone(),
        }),
        dashmap::mapref::entry::Entry::Vacant(entry) => {
            entry.insert(value);
            Ok(())
        }
    }
}

fn snapshot<T: ?Sized>(map: &DashMap<String, Arc<T>>) -> BTreeMap<String, Arc<T>> {
    map.iter().map(|r| (r.key().clone(), r.value().clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dubbo::{ApplicationConfig, ServiceConfig};
    use crate::runtime::ServiceExporter;

    fn service(interface: &str) -> ServiceConfig {
        ServiceConfig {
            interface: interface.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_lookup_before_refresh_fails() {
        let container = ConfigContainer::new();
        assert!(matches!(
            container.find_instances_by_type(ConfigKind::Application),
            Err(ContainerError::NotInitialized)
        ));
        assert!(container.registry_count().is_err());
        assert!(container.find_reference_manager().is_err());

        container.refresh();
        assert!(container.find_instances_by_type(ConfigKind::Application).unwrap().is_empty());
    }

    #[test]
    fn test_instances_sorted_by_name() {
        let container = ConfigContainer::new();
        container.register_config("svcB", service("org.demo.B")).unwrap();
        container.register_config("svcA", service("org.demo.A")).unwrap();
        container
            .register_config("app", ApplicationConfig { name: "demo".into(), ..Default::default() })
            .unwrap();
        container.refresh();

        let services = container.find_instances_by_type(ConfigKind::Service).unwrap();
        let names: Vec<_> = services.keys().cloned().collect();
        assert_eq!(names, ["svcA", "svcB"]);
        assert_eq!(container.find_instances_by_type(ConfigKind::Application).unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let container = ConfigContainer::new();
        container.register_config("svc", service("org.demo.A")).unwrap();
        let err = container.register_config("svc", service("org.demo.B")).unwrap_err();
        assert!(matches!(err, ContainerError::Duplicate { .. }));

        let exporter = Arc::new(ServiceExporter::export(&service("org.demo.A"), vec![]));
        container.register_service("svc", exporter.clone()).unwrap();
        assert!(container.register_service("svc", exporter).is_err());
    }

    #[test]
    fn test_unexported_services_are_hidden() {
        let container = ConfigContainer::new();
        let a = Arc::new(ServiceExporter::export(&service("org.demo.A"), vec![]));
        let b = Arc::new(ServiceExporter::export(&service("org.demo.B"), vec![]));
        container.register_service("a", a.clone()).unwrap();
        container.register_service("b", b).unwrap();
        container.refresh();

        a.destroy().unwrap();

        let services = container.find_exposed_services().unwrap();
        assert_eq!(services.keys().collect::<Vec<_>>(), ["b"]);
    }
}
