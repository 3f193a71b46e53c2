//! Wire contract between the sheet widget frontend and its backend.
//!
//! Everything in this crate is shaped for interop with an existing
//! backend: field names and envelope layouts must match byte-for-byte.
//!
//! # Core Concepts
//!
//! - **RequestBody / RequestEnvelope**: an outgoing message before and
//!   after correlation-id injection. Four event categories exist
//!   ([`EventKind`]): pure queries, step edits, non-edit updates, and
//!   fire-and-forget log events.
//! - **WireResponse**: the incoming message union, tagged by `event` —
//!   either a `response` (success or in-place edit failure) or an
//!   `edit_error` (modal-surfaced failure).
//! - **ResponseBody**: the decoded form a transport resolves with, ready
//!   for the reconciler: typed state slices plus the operation result, or
//!   a normalized [`ErrorDescriptor`](sheetlink_contract::ErrorDescriptor).
//! - **Operation table** ([`ops`]): one param struct per backend
//!   operation, each carrying its wire `type` name via the
//!   [`QueryOp`](ops::QueryOp) / [`EditOp`](ops::EditOp) /
//!   [`UpdateOp`](ops::UpdateOp) traits. The client's façade is generated
//!   over this table instead of hand-building `params` maps.

mod envelope;
pub mod ops;
mod response;

pub use envelope::{EventKind, RequestBody, RequestEnvelope};
pub use response::{
    decode_wire_response, ResponseBody, SharedVariables, SuccessBody, WireResponse,
};
