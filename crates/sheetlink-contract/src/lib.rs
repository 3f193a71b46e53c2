//! Shared vocabulary for the sheetlink widget client.
//!
//! This crate holds the types every other sheetlink crate speaks in:
//!
//! - **Identifiers**: [`RequestId`] correlates one outstanding request with
//!   its response; [`StepId`] names a mutation step in the backend's ordered
//!   history and supports overwrite semantics.
//! - **State slices**: [`SheetData`], [`AnalysisData`], and [`UserProfile`]
//!   are the three backend-owned documents the client replaces wholesale
//!   when a response carries them.
//! - **UI state**: [`UiState`] with its loading list and modal slot, the
//!   only pieces of presentation state this layer writes.
//! - **Errors**: [`ErrorDescriptor`] (the wire-shaped payload surfaced to
//!   callers and the error modal) and the [`ApiError`]/[`TransportError`]
//!   taxonomy.

mod error;
mod id;
mod state;
mod ui;

pub use error::{ApiError, ErrorDescriptor, TransportError};
pub use id::{RequestId, StepId};
pub use state::{AnalysisData, SheetData, UserProfile};
pub use ui::{LoadingEntry, ModalState, UiState};

/// Identifies a column within one sheet. Stable across renames.
pub type ColumnId = String;

/// Identifies a graph within the analysis.
pub type GraphId = String;
