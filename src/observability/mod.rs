//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Endpoints and runtime produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (endpoint and teardown counters)
//!
//! Consumers:
//!     → stdout log lines
//!     → Prometheus scrape listener (optional)
//! ```

pub mod logging;
pub mod metrics;
