//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (services reference declared protocols and registries)
//! - Validate addresses and identifying fields
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ActuatorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::BTreeMap;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{ActuatorConfig, DubboSettings};
use crate::dubbo::ConfigKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} '{value}' is not a socket address")]
    InvalidAddress { field: &'static str, value: String },
    #[error("base path '{0}' must start with '/' and not be the root")]
    InvalidBasePath(String),
    #[error("base path '{0}' contains a route parameter or wildcard segment")]
    UnroutableBasePath(String),
    #[error("management api key must not be empty")]
    EmptyApiKey,
    #[error("{kind} '{name}' is missing '{field}'")]
    MissingField {
        kind: ConfigKind,
        name: String,
        field: &'static str,
    },
    #[error("{kind} '{name}' refers to unknown protocol '{protocol}'")]
    UnknownProtocol {
        kind: ConfigKind,
        name: String,
        protocol: String,
    },
    #[error("{kind} '{name}' refers to unknown registry '{registry}'")]
    UnknownRegistry {
        kind: ConfigKind,
        name: String,
        registry: String,
    },
    #[error("protocol '{0}' must accept at least one connection")]
    ZeroAccepts(String),
}

pub fn validate_config(config: &ActuatorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "server.bind_address", &config.server.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    let base_path = config.management.base_path.trim_end_matches('/');
    if !base_path.starts_with('/') {
        errors.push(ValidationError::InvalidBasePath(config.management.base_path.clone()));
    } else if !is_literal_path(base_path) {
        errors.push(ValidationError::UnroutableBasePath(config.management.base_path.clone()));
    }
    if matches!(config.management.api_key.as_deref(), Some(key) if key.trim().is_empty()) {
        errors.push(ValidationError::EmptyApiKey);
    }

    validate_dubbo(&mut errors, &config.dubbo);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// True when every segment is literal text the router will not capture.
fn is_literal_path(path: &str) -> bool {
    !path.contains(['{', '}'])
        && path
            .split('/')
            .all(|segment| !segment.starts_with(':') && !segment.starts_with('*'))
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress { field, value: value.to_string() });
    }
}

fn require<T>(
    errors: &mut Vec<ValidationError>,
    kind: ConfigKind,
    field: &'static str,
    entries: &BTreeMap<String, T>,
    value: impl Fn(&T) -> &str,
) {
    for (name, entry) in entries {
        if value(entry).trim().is_empty() {
            errors.push(ValidationError::MissingField { kind, name: name.clone(), field });
        }
    }
}

fn validate_dubbo(errors: &mut Vec<ValidationError>, dubbo: &DubboSettings) {
    require(errors, ConfigKind::Application, "name", &dubbo.applications, |a| a.name.as_str());
    require(errors, ConfigKind::Module, "name", &dubbo.modules, |m| m.name.as_str());
    require(errors, ConfigKind::Method, "name", &dubbo.methods, |m| m.name.as_str());
    require(errors, ConfigKind::Registry, "address", &dubbo.registries, |r| r.address.as_str());
    require(errors, ConfigKind::Protocol, "name", &dubbo.protocols, |p| p.name.as_str());
    require(errors, ConfigKind::Service, "interface", &dubbo.services, |s| s.interface.as_str());
    require(errors, ConfigKind::Reference, "interface", &dubbo.references, |r| r.interface.as_str());

    for (name, protocol) in &dubbo.protocols {
        if protocol.accepts == Some(0) {
            errors.push(ValidationError::ZeroAccepts(name.clone()));
        }
    }

    for (name, service) in &dubbo.services {
        for protocol in &service.protocols {
            if !dubbo.protocols.contains_key(protocol) {
                errors.push(ValidationError::UnknownProtocol {
                    kind: ConfigKind::Service,
                    name: name.clone(),
                    protocol: protocol.clone(),
                });
            }
        }
        check_registries(errors, ConfigKind::Service, name, &service.registries, dubbo);
    }

    for (name, reference) in &dubbo.references {
        check_registries(errors, ConfigKind::Reference, name, &reference.registries, dubbo);
    }
}

fn check_registries(
    errors: &mut Vec<ValidationError>,
    kind: ConfigKind,
    name: &str,
    registries: &[String],
    dubbo: &DubboSettings,
) {
    for registry in registries {
        if !dubbo.registries.contains_key(registry) {
            errors.push(ValidationError::UnknownRegistry {
                kind,
                name: name.to_string(),
                registry: registry.clone(),
            });
        }
    }
}
