//! Flat property extraction for configuration objects.
//!
//! # Responsibilities
//! - Define the `Describable` capability every config kind implements
//! - Turn a config object into a flat `name → scalar value` map
//!
//! # Design Decisions
//! - Unset properties are omitted rather than reported as null
//! - Nested tables are omitted; lists of scalars become one comma-joined string

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::dubbo::kind::ConfigKind;
use crate::dubbo::model::*;

/// Flat property map of one config object, sorted by property name.
pub type PropertyMap = BTreeMap<String, Value>;

/// Error raised while reading the properties of a config object.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to serialize {kind}: {source}")]
    Serialize {
        kind: ConfigKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("{kind} did not serialize to a property table")]
    NotATable { kind: ConfigKind },
}

/// A configuration object that can report its own properties.
pub trait Describable: Send + Sync + 'static {
    /// The configuration kind this object belongs to.
    fn kind(&self) -> ConfigKind;

    /// Readable properties of this object.
    fn to_fields(&self) -> Result<PropertyMap, MetadataError>;
}

/// Serialize `value` and keep its scalar top-level properties.
pub fn describe_serialized<T: Serialize>(
    kind: ConfigKind,
    value: &T,
) -> Result<PropertyMap, MetadataError> {
    let json = serde_json::to_value(value)
        .map_err(|source| MetadataError::Serialize { kind, source })?;

    let Value::Object(table) = json else {
        return Err(MetadataError::NotATable { kind });
    };

    let mut fields = PropertyMap::new();
    for (name, value) in table {
        match value {
            Value::Null | Value::Object(_) => {}
            Value::Array(items) => {
                if items.is_empty() {
                    continue;
                }
                let joined: Option<Vec<String>> = items.iter().map(scalar_to_string).collect();
                if let Some(parts) = joined {
                    fields.insert(name, Value::String(parts.join(",")));
                }
            }
            scalar => {
                fields.insert(name, scalar);
            }
        }
    }
    Ok(fields)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

macro_rules! impl_describable {
    ($($ty:ty => $kind:expr),* $(,)?) => {
        $(
            impl Describable for $ty {
                fn kind(&self) -> ConfigKind {
                    $kind
                }

                fn to_fields(&self) -> Result<PropertyMap, MetadataError> {
                    describe_serialized($kind, self)
                }
            }
        )*
    };
}

impl_describable! {
    ApplicationConfig => ConfigKind::Application,
    ConsumerConfig => ConfigKind::Consumer,
    MethodConfig => ConfigKind::Method,
    ModuleConfig => ConfigKind::Module,
    MonitorConfig => ConfigKind::Monitor,
    ProtocolConfig => ConfigKind::Protocol,
    ProviderConfig => ConfigKind::Provider,
    ReferenceConfig => ConfigKind::Reference,
    RegistryConfig => ConfigKind::Registry,
    ServiceConfig => ConfigKind::Service,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unset_properties_are_omitted() {
        let app = ApplicationConfig {
            name: "demo-provider".into(),
            qos_enable: Some(false),
            ..Default::default()
        };

        let fields = app.to_fields().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["name"], json!("demo-provider"));
        assert_eq!(fields["qos_enable"], json!(false));
    }

    #[test]
    fn test_secrets_are_never_reported() {
        let registry = RegistryConfig {
            address: "zookeeper://127.0.0.1:2181".into(),
            username: Some("admin".into()),
            password: Some("hunter2".into()),
            ..Default::default()
        };

        let fields = registry.to_fields().unwrap();
        assert!(!fields.contains_key("password"));
        assert_eq!(fields["username"], json!("admin"));

        let service = ServiceConfig {
            interface: "org.demo.Greeter".into(),
            token: Some("secret".into()),
            ..Default::default()
        };
        assert!(!service.to_fields().unwrap().contains_key("token"));
    }

    #[test]
    fn test_lists_are_joined() {
        let service = ServiceConfig {
            interface: "org.demo.Greeter".into(),
            protocols: vec!["dubbo".into(), "rest".into()],
            ..Default::default()
        };

        let fields = service.to_fields().unwrap();
        assert_eq!(fields["protocols"], json!("dubbo,rest"));
        assert!(!fields.contains_key("registries"));
    }

    #[test]
    fn test_renamed_property() {
        let method = MethodConfig {
            name: "sayHello".into(),
            async_call: Some(true),
            ..Default::default()
        };

        let fields = method.to_fields().unwrap();
        assert_eq!(fields["async"], json!(true));
        assert_eq!(method.kind(), ConfigKind::Method);
    }

    #[test]
    fn test_non_table_is_rejected() {
        let err = describe_serialized(ConfigKind::Module, &42u32).unwrap_err();
        assert!(matches!(err, MetadataError::NotATable { kind: ConfigKind::Module }));
    }
}
