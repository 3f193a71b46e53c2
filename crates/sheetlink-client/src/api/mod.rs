//! Typed operation façade.
//!
//! One method per backend operation, spread across one file per event
//! category. Every method builds its param struct from the operation
//! table, so the wire field names live in exactly one place, and funnels
//! through the three generic senders below.

mod edits;
mod logging;
mod queries;
mod updates;

use crate::client::ApiClient;
use serde_json::Value;
use sheetlink_contract::{ApiError, StepId, TransportError};
use sheetlink_protocol::ops::{EditOp, QueryOp, UpdateOp};
use sheetlink_protocol::RequestBody;

/// Handle to a pending mutation step.
///
/// Every overwrite-capable edit returns the handle it used. Threading the
/// handle into the next call of the same logical edit overwrites that
/// step in place (a slider drag keeps rewriting one step); starting
/// without a handle appends a new step. The choice is the caller's,
/// made explicit by this value instead of a mutable id captured in a
/// closure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepHandle(StepId);

impl StepHandle {
    /// Mint a handle for a brand-new step.
    pub fn fresh() -> Self {
        Self(StepId::generate())
    }

    /// Re-attach to a known step, e.g. one recovered from analysis data.
    pub fn for_step(step_id: StepId) -> Self {
        Self(step_id)
    }

    /// The step id this handle targets.
    pub fn step_id(&self) -> &StepId {
        &self.0
    }
}

impl ApiClient {
    /// Send a query operation and decode its typed result.
    pub async fn query<Q: QueryOp>(&self, op: &Q) -> Result<Q::Output, ApiError> {
        let params = serde_json::to_value(op).map_err(TransportError::from)?;
        let result = self.send(RequestBody::api_call(Q::TYPE, params)).await?;
        serde_json::from_value(result).map_err(|err| ApiError::malformed_result(Q::TYPE, err))
    }

    /// Send an edit operation against the step the handle names.
    ///
    /// An absent (or empty) handle mints a fresh step id; the handle in
    /// use is returned either way so the caller can keep overwriting.
    pub async fn edit<E: EditOp>(
        &self,
        op: &E,
        step: Option<&StepHandle>,
    ) -> Result<StepHandle, ApiError> {
        let handle = match step {
            Some(handle) if !handle.step_id().is_empty() => handle.clone(),
            _ => StepHandle::fresh(),
        };
        let params = serde_json::to_value(op).map_err(TransportError::from)?;
        self.send(RequestBody::edit(E::TYPE, handle.step_id().clone(), params))
            .await?;
        Ok(handle)
    }

    /// Send an update operation, returning its raw result.
    pub async fn update<U: UpdateOp>(&self, op: &U) -> Result<Value, ApiError> {
        let params = serde_json::to_value(op).map_err(TransportError::from)?;
        self.send(RequestBody::update(U::TYPE, params)).await
    }
}
