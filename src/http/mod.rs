//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → actuator router (auth, endpoint handlers)
//!     → JSON response
//! ```

pub mod request;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{ActuatorServer, ActuatorState};
