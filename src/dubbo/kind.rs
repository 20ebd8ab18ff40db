//! The closed set of configuration kinds.

use std::fmt;

/// A configuration object type known to the actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigKind {
    Application,
    Consumer,
    Method,
    Module,
    Monitor,
    Protocol,
    Provider,
    Reference,
    Registry,
    Service,
}

impl ConfigKind {
    /// Every kind, in the order the configs report lists them.
    pub const ALL: [ConfigKind; 10] = [
        ConfigKind::Application,
        ConfigKind::Consumer,
        ConfigKind::Method,
        ConfigKind::Module,
        ConfigKind::Monitor,
        ConfigKind::Protocol,
        ConfigKind::Provider,
        ConfigKind::Reference,
        ConfigKind::Registry,
        ConfigKind::Service,
    ];

    /// Type name used as the top-level key of the configs report.
    pub fn simple_name(&self) -> &'static str {
        match self {
            ConfigKind::Application => "ApplicationConfig",
            ConfigKind::Consumer => "ConsumerConfig",
            ConfigKind::Method => "MethodConfig",
            ConfigKind::Module => "ModuleConfig",
            ConfigKind::Monitor => "MonitorConfig",
            ConfigKind::Protocol => "ProtocolConfig",
            ConfigKind::Provider => "ProviderConfig",
            ConfigKind::Reference => "ReferenceConfig",
            ConfigKind::Registry => "RegistryConfig",
            ConfigKind::Service => "ServiceConfig",
        }
    }
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.simple_name())
    }
}
