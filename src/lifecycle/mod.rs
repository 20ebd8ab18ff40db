//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → register config objects → connect registries
//!     → bind protocols → export services → create references → refresh
//!
//! Shutdown (shutdown.rs):
//!     Signal received → stop the actuator server
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: protocols before the services exported over them
//! - Any startup error is fatal
//! - Process shutdown does not tear down the RPC runtime; that is the
//!   dubboshutdown endpoint's job

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{start_runtime, StartupError};
