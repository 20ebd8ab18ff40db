//! Startup orchestration.
//!
//! Builds the RPC runtime described by the `[dubbo]` tables and registers
//! everything in a `ConfigContainer`.

use std::sync::Arc;

use thiserror::Error;

use crate::config::DubboSettings;
use crate::container::{ConfigContainer, ContainerError};
use crate::runtime::{
    LifecycleError, ReferenceProxy, ServiceExporter, StaticRegistry, TcpProtocol,
};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Container(#[from] ContainerError),
    #[error("failed to start protocol '{name}': {source}")]
    Protocol {
        name: String,
        #[source]
        source: LifecycleError,
    },
}

/// Start the runtime and return the refreshed container.
pub async fn start_runtime(settings: &DubboSettings) -> Result<Arc<ConfigContainer>, StartupError> {
    let container = ConfigContainer::new();
    register_configs(&container, settings)?;

    for config in settings.registries.values() {
        container.register_registry(Arc::new(StaticRegistry::connect(config)))?;
    }

    for (name, config) in &settings.protocols {
        let protocol = TcpProtocol::bind(config)
            .await
            .map_err(|source| StartupError::Protocol { name: name.clone(), source })?;
        container.register_protocol(name.clone(), Arc::new(protocol))?;
    }

    for (name, config) in &settings.services {
        let protocols = if config.protocols.is_empty() {
            settings.protocols.keys().cloned().collect()
        } else {
            config.protocols.clone()
        };
        container.register_service(name.clone(), Arc::new(ServiceExporter::export(config, protocols)))?;
    }

    for (name, config) in &settings.references {
        container.register_reference(name.clone(), Arc::new(ReferenceProxy::new(config)))?;
    }

    container.refresh();
    Ok(Arc::new(container))
}

fn register_configs(container: &ConfigContainer, settings: &DubboSettings) -> Result<(), ContainerError> {
    for (name, config) in &settings.applications {
        container.register_config(name.clone(), config.clone())?;
    }
    for (name, config) in &settings.consumers {
        container.register_config(name.clone(), config.clone())?;
    }
    for (name, config) in &settings.methods {
        container.register_config(name.clone(), config.clone())?;
    }
    for (name, config) in &settings.modules {
        container.register_config(name.clone(), config.clone())?;
    }
    for (name, config) in &settings.monitors {
        container.register_config(name.clone(), config.clone())?;
    }
    for (name, config) in &settings.protocols {
        container.register_config(name.clone(), config.clone())?;
    }
    for (name, config) in &settings.providers {
        container.register_config(name.clone(), config.clone())?;
    }
    for (name, config) in &settings.references {
        container.register_config(name.clone(), config.clone())?;
    }
    for (name, config) in &settings.registries {
        container.register_config(name.clone(), config.clone())?;
    }
    for (name, config) in &settings.services {
        container.register_config(name.clone(), config.clone())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dubbo::{ApplicationConfig, ConfigKind, ProtocolConfig, ReferenceConfig, RegistryConfig, ServiceConfig};

    fn settings() -> DubboSettings {
        let mut settings = DubboSettings::default();
        settings.applications.insert(
            "demo".into(),
            ApplicationConfig { name: "demo-provider".into(), ..Default::default() },
        );
        settings.registries.insert(
            "zk".into(),
            RegistryConfig { address: "zookeeper://127.0.0.1:2181".into(), ..Default::default() },
        );
        settings.protocols.insert(
            "dubbo".into(),
            ProtocolConfig {
                name: "dubbo".into(),
                host: Some("127.0.0.1".into()),
                port: Some(0),
                ..Default::default()
            },
        );
        settings.services.insert(
            "greeter".into(),
            ServiceConfig { interface: "org.demo.Greeter".into(), ..Default::default() },
        );
        settings.references.insert(
            "weather".into(),
            ReferenceConfig { interface: "org.demo.Weather".into(), ..Default::default() },
        );
        settings
    }

    #[tokio::test]
    async fn test_start_runtime_registers_everything() {
        let container = start_runtime(&settings()).await.unwrap();

        assert!(container.is_ready());
        assert_eq!(container.registry_count().unwrap(), 1);
        assert_eq!(container.find_protocol_instances().unwrap().len(), 1);
        assert_eq!(container.find_exposed_services().unwrap().len(), 1);
        assert_eq!(container.find_reference_manager().unwrap().reference_count(), 1);

        for kind in [ConfigKind::Application, ConfigKind::Registry, ConfigKind::Protocol, ConfigKind::Service, ConfigKind::Reference] {
            assert_eq!(container.find_instances_by_type(kind).unwrap().len(), 1, "{kind}");
        }
        assert!(container.find_instances_by_type(ConfigKind::Monitor).unwrap().is_empty());

        container.destroy_all_protocols().unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_registry_address_fails() {
        let mut settings = DubboSettings::default();
        for name in ["a", "b"] {
            settings.registries.insert(
                name.into(),
                RegistryConfig { address: "zookeeper://127.0.0.1:2181".into(), ..Default::default() },
            );
        }

        let err = start_runtime(&settings).await.err().unwrap();
        assert!(matches!(err, StartupError::Container(ContainerError::Duplicate { .. })));
    }
}
