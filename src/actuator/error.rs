//! Endpoint error type and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::container::ContainerError;
use crate::dubbo::MetadataError;
use crate::runtime::LifecycleError;

/// Failure of an endpoint operation.
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error(transparent)]
    Container(#[from] ContainerError),
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    #[error("shutdown did not complete: {0}")]
    Lifecycle(#[from] LifecycleError),
}

impl EndpointError {
    pub fn status(&self) -> StatusCode {
        match self {
            EndpointError::Container(ContainerError::NotInitialized) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EndpointError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(status = %status, error = %self, "Endpoint operation failed");
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
