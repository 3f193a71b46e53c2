use serde::{Deserialize, Serialize};
use serde_json::Value;
use sheetlink_contract::{
    AnalysisData, ErrorDescriptor, RequestId, SheetData, TransportError, UserProfile,
};

// Wire shapes
// ============================================================================

/// Shared-state bundle attached to success responses.
///
/// Each slice arrives double-encoded: a JSON string inside the outer
/// message. A slice the backend did not touch is omitted entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SharedVariables {
    /// Serialized sheet-data array.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_data_json: Option<String>,
    /// Serialized analysis data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_data_json: Option<String>,
    /// Serialized user profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_profile_json: Option<String>,
}

/// Incoming wire message union, tagged by `event`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum WireResponse {
    /// Success, or an in-place edit failure when `data` is absent.
    #[serde(rename = "response")]
    Response {
        /// Correlation id echoed from the request.
        id: RequestId,
        /// Fresh copies of whichever shared-state slices changed.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        shared_variables: Option<SharedVariables>,
        /// Operation-specific result. Absent (or null) marks an in-place
        /// edit failure.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<Value>,
    },
    /// A failure that must interrupt the user with a blocking dialog.
    #[serde(rename = "edit_error")]
    EditError {
        /// Correlation id echoed from the request.
        id: RequestId,
        /// Backend error class.
        #[serde(rename = "type")]
        kind: String,
        /// Human-readable header for the dialog.
        header: String,
        /// Remediation hint shown under the header.
        to_fix: String,
        /// Diagnostic trace, when available.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        traceback: Option<String>,
    },
}

impl WireResponse {
    /// The correlation id this message answers.
    pub fn id(&self) -> &RequestId {
        match self {
            WireResponse::Response { id, .. } => id,
            WireResponse::EditError { id, .. } => id,
        }
    }
}

// Decoded form
// ============================================================================

/// Decoded success payload handed to the reconciler.
#[derive(Debug, Clone, Default)]
pub struct SuccessBody {
    /// Replacement sheet-data array, when the response carried one.
    pub sheet_data_array: Option<Vec<SheetData>>,
    /// Replacement analysis data, when the response carried it.
    pub analysis_data: Option<AnalysisData>,
    /// Replacement user profile, when the response carried it.
    pub user_profile: Option<UserProfile>,
    /// Operation-specific result, unmodified.
    pub result: Value,
}

/// What a transport resolves with for one request.
#[derive(Debug, Clone)]
pub enum ResponseBody {
    /// The operation succeeded; shared state may need updating.
    Success {
        /// Correlation id echoed from the request.
        id: RequestId,
        /// Decoded payload.
        body: SuccessBody,
    },
    /// The operation failed. The id is absent only for failures produced
    /// locally, before any message was sent.
    Error {
        /// Correlation id, when a message was actually sent.
        id: Option<RequestId>,
        /// Normalized error payload.
        descriptor: ErrorDescriptor,
    },
}

impl ResponseBody {
    /// The correlation id this response answers, when one exists.
    pub fn id(&self) -> Option<&RequestId> {
        match self {
            ResponseBody::Success { id, .. } => Some(id),
            ResponseBody::Error { id, .. } => id.as_ref(),
        }
    }
}

/// Decode one wire message into the form the reconciler consumes.
///
/// Shared-state slices are parsed out of their JSON-string encoding here,
/// so a malformed slice fails the whole message instead of corrupting
/// state later. An absent or null `data` on a `response` message is the
/// in-place edit failure marker.
pub fn decode_wire_response(message: WireResponse) -> Result<ResponseBody, TransportError> {
    match message {
        WireResponse::Response {
            id,
            shared_variables,
            data,
        } => match data {
            Some(result) => {
                let shared = shared_variables.unwrap_or_default();
                let body = SuccessBody {
                    sheet_data_array: parse_slice(shared.sheet_data_json, "sheet_data_json")?,
                    analysis_data: parse_slice(shared.analysis_data_json, "analysis_data_json")?,
                    user_profile: parse_slice(shared.user_profile_json, "user_profile_json")?,
                    result,
                };
                Ok(ResponseBody::Success { id, body })
            }
            None => Ok(ResponseBody::Error {
                id: Some(id),
                descriptor: ErrorDescriptor::in_place_edit(),
            }),
        },
        WireResponse::EditError {
            id,
            kind,
            header,
            to_fix,
            traceback,
        } => Ok(ResponseBody::Error {
            id: Some(id),
            descriptor: ErrorDescriptor::modal(kind, header, to_fix, traceback),
        }),
    }
}

fn parse_slice<T: serde::de::DeserializeOwned>(
    encoded: Option<String>,
    field: &str,
) -> Result<Option<T>, TransportError> {
    match encoded {
        Some(text) => serde_json::from_str(&text)
            .map(Some)
            .map_err(|err| TransportError::protocol(format!("invalid {field}: {err}"))),
        None => Ok(None),
    }
}
