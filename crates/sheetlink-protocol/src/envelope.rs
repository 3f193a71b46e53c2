use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sheetlink_contract::{RequestId, StepId};

/// Request category discriminator on the outgoing envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Pure query with no step semantics.
    ApiCall,
    /// Mutation of the document model, identified by a step id.
    EditEvent,
    /// Non-edit state change (undo, redo, settings, feedback).
    UpdateEvent,
    /// Best-effort telemetry; never awaited.
    LogEvent,
}

/// An outgoing request before correlation: everything but the `id`.
///
/// The correlator injects the id at send time via [`RequestBody::into_envelope`];
/// callers never pick their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    /// Request category.
    pub event: EventKind,
    /// Wire operation name, e.g. `get_column_describe` or `add_column_edit`.
    #[serde(rename = "type")]
    pub operation: String,
    /// Step to overwrite or append. Edit events only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_id: Option<StepId>,
    /// Operation-specific payload. Present on every request, possibly empty.
    pub params: Value,
    /// Extra top-level fields beyond the fixed envelope (feedback updates
    /// elevate question/answer pairs here for downstream analytics).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RequestBody {
    fn new(event: EventKind, operation: impl Into<String>, params: Value) -> Self {
        Self {
            event,
            operation: operation.into(),
            step_id: None,
            params,
            extra: Map::new(),
        }
    }

    /// Build a pure query request.
    pub fn api_call(operation: impl Into<String>, params: Value) -> Self {
        Self::new(EventKind::ApiCall, operation, params)
    }

    /// Build an edit request against the given step.
    pub fn edit(operation: impl Into<String>, step_id: StepId, params: Value) -> Self {
        let mut body = Self::new(EventKind::EditEvent, operation, params);
        body.step_id = Some(step_id);
        body
    }

    /// Build a non-edit update request.
    pub fn update(operation: impl Into<String>, params: Value) -> Self {
        Self::new(EventKind::UpdateEvent, operation, params)
    }

    /// Build a fire-and-forget log request.
    pub fn log(operation: impl Into<String>, params: Value) -> Self {
        Self::new(EventKind::LogEvent, operation, params)
    }

    /// Add an extra top-level field to the envelope.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Attach the correlation id, producing the wire envelope.
    pub fn into_envelope(self, id: RequestId) -> RequestEnvelope {
        RequestEnvelope {
            event: self.event,
            operation: self.operation,
            id,
            step_id: self.step_id,
            params: self.params,
            extra: self.extra,
        }
    }
}

/// The correlated outgoing wire message.
///
/// Serializes to `{event, type, id, step_id?, params, ...extra}`. The `id`
/// is unique among outstanding requests; the backend echoes it on whichever
/// response message answers this envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// Request category.
    pub event: EventKind,
    /// Wire operation name.
    #[serde(rename = "type")]
    pub operation: String,
    /// Correlation id, injected at send time.
    pub id: RequestId,
    /// Step to overwrite or append. Edit events only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_id: Option<StepId>,
    /// Operation-specific payload.
    pub params: Value,
    /// Extra top-level fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
