//! Error taxonomy for the client.
//!
//! Four failure classes reach callers:
//!
//! - **Connection error** — no transport could be obtained; never touches
//!   shared state.
//! - **In-place edit error** — the backend rejected an edit; surfaced to
//!   the caller only, never as a modal.
//! - **Modal error** — the backend asks for user attention; the UI modal
//!   slot is swapped and the caller still gets a typed failure for local
//!   cleanup.
//! - **Transport error** — the channel itself failed mid-call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire-shaped error payload surfaced to callers and the error modal.
///
/// This is the exact object a connection failure produces locally and the
/// object a decoded backend error is normalized into. Field names follow
/// the host-facing wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDescriptor {
    /// Human-readable description of what went wrong.
    pub error: String,
    /// Short label suitable for a modal header or inline chip.
    pub short_error: String,
    /// Whether the host must interrupt the user with a blocking modal.
    pub show_error_modal: bool,
    /// Backend error class, when the backend reported one.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Diagnostic trace from the backend, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traceback: Option<String>,
}

impl ErrorDescriptor {
    /// The descriptor produced when no transport could be established.
    ///
    /// The field values are a host contract; callers match on them to show
    /// the "cannot create comm" affordance.
    pub fn connection() -> Self {
        Self {
            error: "Connection error. Unable to establish comm.".to_string(),
            short_error: "Connection error".to_string(),
            show_error_modal: true,
            kind: None,
            traceback: None,
        }
    }

    /// The descriptor synthesized for an in-place edit failure.
    ///
    /// The backend marks these with an absent `data` field and no message
    /// text; callers handle them next to the control that triggered the
    /// edit, so no modal is requested.
    pub fn in_place_edit() -> Self {
        Self {
            error: "The edit could not be applied.".to_string(),
            short_error: "Edit error".to_string(),
            show_error_modal: false,
            kind: None,
            traceback: None,
        }
    }

    /// A modal-surfaced backend error.
    pub fn modal(
        kind: impl Into<String>,
        header: impl Into<String>,
        to_fix: impl Into<String>,
        traceback: Option<String>,
    ) -> Self {
        Self {
            error: to_fix.into(),
            short_error: header.into(),
            show_error_modal: true,
            kind: Some(kind.into()),
            traceback,
        }
    }
}

/// Errors raised by the transport layer itself.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The channel closed before a response arrived.
    #[error("connection closed")]
    ConnectionClosed,

    /// The peer violated the wire contract.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// A message could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TransportError {
    /// Create a protocol violation error.
    pub fn protocol(message: impl Into<String>) -> Self {
        TransportError::Protocol(message.into())
    }
}

/// Failure of one API call, as seen by façade callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend (or the local connection check) rejected the call.
    #[error("{}", .0.error)]
    Backend(ErrorDescriptor),

    /// The transport failed while the call was in flight.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The operation succeeded but its result did not match the expected
    /// shape.
    #[error("malformed {operation} result: {source}")]
    MalformedResult {
        /// Wire name of the operation whose result failed to decode.
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Create a malformed-result error for the named operation.
    pub fn malformed_result(operation: &'static str, source: serde_json::Error) -> Self {
        ApiError::MalformedResult { operation, source }
    }

    /// The error payload, when this failure carries one.
    pub fn descriptor(&self) -> Option<&ErrorDescriptor> {
        match self {
            ApiError::Backend(descriptor) => Some(descriptor),
            _ => None,
        }
    }

    /// Whether this failure requested a blocking error modal.
    pub fn is_modal(&self) -> bool {
        self.descriptor().is_some_and(|d| d.show_error_modal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn connection_descriptor_matches_wire_shape_exactly() {
        let descriptor = ErrorDescriptor::connection();
        assert_eq!(
            serde_json::to_value(&descriptor).unwrap(),
            json!({
                "error": "Connection error. Unable to establish comm.",
                "shortError": "Connection error",
                "showErrorModal": true
            })
        );
    }

    #[test]
    fn modal_descriptor_keeps_backend_fields() {
        let descriptor = ErrorDescriptor::modal(
            "value_error",
            "Invalid formula",
            "Check the column references and try again.",
            Some("Traceback (most recent call last): ...".to_string()),
        );
        assert!(descriptor.show_error_modal);
        assert_eq!(descriptor.kind.as_deref(), Some("value_error"));
        assert_eq!(descriptor.short_error, "Invalid formula");
    }

    #[test]
    fn in_place_error_never_requests_a_modal() {
        let err = ApiError::Backend(ErrorDescriptor::in_place_edit());
        assert!(!err.is_modal());
        assert!(err.descriptor().is_some());
    }
}
