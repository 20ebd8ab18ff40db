//! `dubboconfigs` read operation.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::actuator::EndpointError;
use crate::container::ConfigContainer;
use crate::dubbo::{ConfigKind, PropertyMap};
use crate::http::server::ActuatorState;
use crate::observability::metrics;

/// Instance name → properties, for one configuration kind.
pub type InstanceMetadata = BTreeMap<String, PropertyMap>;

/// Every configuration object grouped by kind.
///
/// Serializes as a JSON object whose keys follow `ConfigKind::ALL` order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigsReport {
    entries: Vec<(ConfigKind, InstanceMetadata)>,
}

impl ConfigsReport {
    /// Instances of the kind with the given type name.
    pub fn get(&self, type_name: &str) -> Option<&InstanceMetadata> {
        self.entries
            .iter()
            .find(|(kind, _)| kind.simple_name() == type_name)
            .map(|(_, instances)| instances)
    }

    /// Type names in report order.
    pub fn type_names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(kind, _)| kind.simple_name()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ConfigsReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (kind, instances) in &self.entries {
            map.serialize_entry(kind.simple_name(), instances)?;
        }
        map.end()
    }
}

/// Build the configs report from the container.
///
/// A property-read failure on any instance fails the whole report.
pub fn collect_configs(container: &ConfigContainer) -> Result<ConfigsReport, EndpointError> {
    let mut entries = Vec::with_capacity(ConfigKind::ALL.len());

    for kind in ConfigKind::ALL {
        let beans = container.find_instances_by_type(kind)?;
        let mut instances = InstanceMetadata::new();
        for (name, bean) in beans {
            let properties = container.to_property_map(bean.as_ref())?;
            instances.insert(name, properties);
        }
        entries.push((kind, instances));
    }

    Ok(ConfigsReport { entries })
}

/// GET {base}/dubboconfigs
pub async fn get_configs(
    State(state): State<ActuatorState>,
) -> Result<Json<ConfigsReport>, EndpointError> {
    let result = collect_configs(&state.container);
    metrics::record_endpoint_request("dubboconfigs", result.is_ok());
    let report = result?;

    tracing::debug!(kinds = report.len(), "Configs report built");
    Ok(Json(report))
}
