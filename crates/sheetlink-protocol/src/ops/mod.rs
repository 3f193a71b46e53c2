//! Declarative operation table.
//!
//! One param struct per backend operation. Each struct serializes to the
//! operation's documented snake_case argument names — this boundary is a
//! wire-format contract and must match the backend byte-for-byte — and
//! carries its wire `type` name through one of the three operation traits.
//! The client's façade methods are thin wrappers over this table, so a new
//! backend operation is one struct here plus one method there.

mod edits;
mod queries;
mod updates;

pub use edits::*;
pub use queries::*;
pub use updates::*;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A pure query operation, sent as an `api_call` event.
///
/// No step semantics; the operation result decodes into [`QueryOp::Output`].
pub trait QueryOp: Serialize {
    /// Wire operation name.
    const TYPE: &'static str;
    /// Decoded result payload.
    type Output: DeserializeOwned;
}

/// A document mutation, sent as an `edit_event` with a step id.
///
/// Whether a given call overwrites an existing step or appends a new one
/// is decided by the step id the caller threads in, not by the operation.
pub trait EditOp: Serialize {
    /// Wire operation name.
    const TYPE: &'static str;
}

/// A non-edit state change, sent as an `update_event`.
pub trait UpdateOp: Serialize {
    /// Wire operation name.
    const TYPE: &'static str;
}
