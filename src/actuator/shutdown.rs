//! `dubboshutdown` write operation.
//!
//! # Sequence
//! ```text
//! 1. count registries
//! 2. count protocols → destroy registries and protocols
//! 3. snapshot exported services → destroy each
//! 4. count references → destroy the reference manager
//! 5. report counts under "shutdown.count"
//! ```
//!
//! Counts are always read before the matching destroy. A failing step ends
//! the operation; later steps do not run.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::actuator::EndpointError;
use crate::container::ConfigContainer;
use crate::http::server::ActuatorState;
use crate::observability::metrics;
use crate::runtime::ExposedService;

/// Number of components torn down, per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShutdownCount {
    pub registries: usize,
    pub protocols: usize,
    pub services: usize,
    pub references: usize,
}

/// Result of the shutdown operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShutdownReport {
    #[serde(rename = "shutdown.count")]
    pub count: ShutdownCount,
}

/// Tear down the RPC runtime held by `container`.
pub fn shutdown_runtime(container: &ConfigContainer) -> Result<ShutdownReport, EndpointError> {
    let registries = container.registry_count()?;

    let protocols = container.find_protocol_instances()?.len();
    container.destroy_all_protocols()?;
    tracing::info!(registries, protocols, "Registries and protocols destroyed");

    let services = container.find_exposed_services()?;
    for (name, service) in &services {
        tracing::debug!(service = %name, interface = %service.interface(), "Destroying service");
        service.destroy()?;
    }
    tracing::info!(services = services.len(), "Services destroyed");

    let manager = container.find_reference_manager()?;
    let references = manager.reference_count();
    manager.destroy()?;
    tracing::info!(references, "References destroyed");

    Ok(ShutdownReport {
        count: ShutdownCount {
            registries,
            protocols,
            services: services.len(),
            references,
        },
    })
}

/// POST {base}/dubboshutdown
pub async fn post_shutdown(
    State(state): State<ActuatorState>,
) -> Result<Json<ShutdownReport>, EndpointError> {
    tracing::warn!("Shutdown requested through the actuator");

    let result = shutdown_runtime(&state.container);
    metrics::record_endpoint_request("dubboshutdown", result.is_ok());
    let report = result?;

    metrics::record_shutdown(&report.count);
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use crate::runtime::{LifecycleError, Protocol, Reference, Registry};

    type Journal = Arc<Mutex<Vec<String>>>;

    struct Recorder {
        label: String,
        journal: Journal,
        fail: bool,
    }

    impl Recorder {
        fn new(label: &str, journal: &Journal) -> Arc<Self> {
            Arc::new(Self { label: label.into(), journal: journal.clone(), fail: false })
        }

        fn failing(label: &str, journal: &Journal) -> Arc<Self> {
            Arc::new(Self { label: label.into(), journal: journal.clone(), fail: true })
        }

        fn record(&self) -> Result<(), LifecycleError> {
            if self.fail {
                return Err(LifecycleError::Destroy {
                    component: "test",
                    name: self.label.clone(),
                    reason: "boom".into(),
                });
            }
            self.journal.lock().unwrap().push(self.label.clone());
            Ok(())
        }
    }

    impl Registry for Recorder {
        fn address(&self) -> &str {
            &self.label
        }
        fn destroy(&self) -> Result<(), LifecycleError> {
            self.record()
        }
    }

    impl Protocol for Recorder {
        fn name(&self) -> &str {
            &self.label
        }
        fn destroy(&self) -> Result<(), LifecycleError> {
            self.record()
        }
    }

    impl ExposedService for Recorder {
        fn interface(&self) -> &str {
            &self.label
        }
        fn is_exported(&self) -> bool {
            true
        }
        fn destroy(&self) -> Result<(), LifecycleError> {
            self.record()
        }
    }

    impl Reference for Recorder {
        fn interface(&self) -> &str {
            &self.label
        }
        fn destroy(&self) -> Result<(), LifecycleError> {
            self.record()
        }
    }

    #[test]
    fn test_teardown_order_and_counts() {
        let journal = Journal::default();
        let container = ConfigContainer::new();
        container.register_registry(Recorder::new("registry", &journal)).unwrap();
        container.register_protocol("dubbo", Recorder::new("protocol", &journal)).unwrap();
        container.register_service("svc", Recorder::new("service", &journal)).unwrap();
        container.register_reference("ref", Recorder::new("reference", &journal)).unwrap();
        container.refresh();

        let report = shutdown_runtime(&container).unwrap();

        assert_eq!(
            report.count,
            ShutdownCount { registries: 1, protocols: 1, services: 1, references: 1 }
        );
        assert_eq!(
            *journal.lock().unwrap(),
            ["registry", "protocol", "service", "reference"]
        );
    }

    #[test]
    fn test_failing_protocol_stops_shutdown() {
        let journal = Journal::default();
        let container = ConfigContainer::new();
        container.register_protocol("dubbo", Recorder::failing("protocol", &journal)).unwrap();
        container.register_service("svc", Recorder::new("service", &journal)).unwrap();
        container.register_reference("ref", Recorder::new("reference", &journal)).unwrap();
        container.refresh();

        let err = shutdown_runtime(&container).unwrap_err();

        assert!(matches!(err, EndpointError::Lifecycle(_)));
        assert!(journal.lock().unwrap().is_empty());
        assert_eq!(container.find_reference_manager().unwrap().reference_count(), 1);
    }

    #[test]
    fn test_failing_registry_leaves_protocols() {
        let journal = Journal::default();
        let container = ConfigContainer::new();
        container.register_registry(Recorder::failing("registry", &journal)).unwrap();
        container.register_protocol("dubbo", Recorder::new("protocol", &journal)).unwrap();
        container.register_service("svc", Recorder::new("service", &journal)).unwrap();
        container.refresh();

        let err = shutdown_runtime(&container).unwrap_err();

        assert!(matches!(err, EndpointError::Lifecycle(_)));
        assert!(journal.lock().unwrap().is_empty());
        assert_eq!(container.registry_count().unwrap(), 1);
        assert_eq!(container.find_protocol_instances().unwrap().len(), 1);
    }

    #[test]
    fn test_failing_service_leaves_references() {
        let journal = Journal::default();
        let container = ConfigContainer::new();
        container.register_registry(Recorder::new("registry", &journal)).unwrap();
        container.register_protocol("dubbo", Recorder::new("protocol", &journal)).unwrap();
        container.register_service("svc", Recorder::failing("service", &journal)).unwrap();
        container.register_reference("ref", Recorder::new("reference", &journal)).unwrap();
        container.refresh();

        let err = shutdown_runtime(&container).unwrap_err();

        assert!(matches!(err, EndpointError::Lifecycle(_)));
        assert_eq!(*journal.lock().unwrap(), ["registry", "protocol"]);
        assert_eq!(container.find_reference_manager().unwrap().reference_count(), 1);
    }

    #[test]
    fn test_report_shape() {
        let report = ShutdownReport {
            count: ShutdownCount { registries: 3, protocols: 2, services: 5, references: 1 },
        };

        assert_eq!(
            serde_json::to_string(&report).unwrap(),
            r#"{"shutdown.count":{"registries":3,"protocols":2,"services":5,"references":1}}"#
        );
    }
}
