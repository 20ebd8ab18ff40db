//! RPC framework configuration object model.
//!
//! # Data Flow
//! ```text
//! [dubbo.*] tables in the config file
//!     → model.rs (one struct per configuration kind)
//!     → registered in the ConfigContainer under their instance name
//!     → describe.rs (Describable → flat PropertyMap)
//!     → reported by the dubboconfigs endpoint
//! ```
//!
//! # Design Decisions
//! - The set of kinds is closed and ordered (see `ConfigKind::ALL`)
//! - Property extraction goes through serde instead of reflection
//! - Secrets are deserialized but never serialized

pub mod describe;
pub mod kind;
pub mod model;

pub use describe::{Describable, MetadataError, PropertyMap};
pub use kind::ConfigKind;
pub use model::{
    ApplicationConfig, ConsumerConfig, MethodConfig, ModuleConfig, MonitorConfig, ProtocolConfig,
    ProviderConfig, ReferenceConfig, RegistryConfig, ServiceConfig,
};
