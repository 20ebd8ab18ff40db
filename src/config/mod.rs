//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ActuatorConfig (validated, immutable)
//!     → lifecycle::startup builds the runtime from the [dubbo] tables
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::ActuatorConfig;
pub use schema::DubboSettings;
pub use schema::EndpointToggle;
pub use schema::EndpointsConfig;
pub use schema::ManagementConfig;
pub use schema::ObservabilityConfig;
pub use schema::ServerConfig;
