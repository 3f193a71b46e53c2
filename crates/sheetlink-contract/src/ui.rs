//! UI-visible state written by the client.
//!
//! The client owns exactly two pieces of presentation state: the loading
//! list (requests past the grace window and not yet resolved) and the
//! modal slot (swapped by modal-surfaced backend errors). Everything else
//! in the host's UI state is out of scope here.

use crate::{ErrorDescriptor, RequestId, StepId};
use serde::{Deserialize, Serialize};

/// One request currently surfaced as a loading indicator.
///
/// Created only when a response has not arrived within the grace window;
/// removed by exact id match when the response resolves. The operation
/// name and optional step id let the host render a specific spinner per
/// pending step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingEntry {
    /// Correlation id of the pending request.
    pub id: RequestId,
    /// Step being overwritten or appended, for edit events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_id: Option<StepId>,
    /// Wire operation name, e.g. `add_column_edit`.
    pub operation: String,
}

/// The host's blocking-modal slot.
///
/// Writes are last-wins: a modal error replaces whatever modal was open,
/// with no stacking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModalState {
    /// No modal is open.
    #[default]
    None,
    /// A blocking error modal carrying the triggering payload.
    Error {
        /// The error payload to display.
        error: ErrorDescriptor,
    },
}

/// The slice of UI state this client reads and writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiState {
    /// Requests past the grace window, in registration order.
    pub loading: Vec<LoadingEntry>,
    /// The currently open modal, if any.
    pub modal: ModalState,
}

impl UiState {
    /// Append a loading entry unless one with the same id is already
    /// registered.
    pub fn register_loading(&mut self, entry: LoadingEntry) {
        if !self.loading.iter().any(|e| e.id == entry.id) {
            self.loading.push(entry);
        }
    }

    /// Remove the first loading entry with the given id. No-op when the
    /// entry was never registered (the grace timer was cancelled).
    pub fn clear_loading(&mut self, id: &RequestId) {
        if let Some(index) = self.loading.iter().position(|e| &e.id == id) {
            self.loading.remove(index);
        }
    }

    /// Whether a request is currently surfaced as loading.
    pub fn is_loading(&self, id: &RequestId) -> bool {
        self.loading.iter().any(|e| &e.id == id)
    }

    /// Swap the modal slot to an error modal. Last write wins.
    pub fn open_error_modal(&mut self, error: ErrorDescriptor) {
        self.modal = ModalState::Error { error };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> LoadingEntry {
        LoadingEntry {
            id: RequestId::new(id),
            step_id: None,
            operation: "get_render_count".to_string(),
        }
    }

    #[test]
    fn register_is_idempotent_per_id() {
        let mut ui = UiState::default();
        ui.register_loading(entry("a"));
        ui.register_loading(entry("a"));
        assert_eq!(ui.loading.len(), 1);
    }

    #[test]
    fn clear_removes_only_the_matching_entry() {
        let mut ui = UiState::default();
        ui.register_loading(entry("a"));
        ui.register_loading(entry("b"));
        ui.clear_loading(&RequestId::new("a"));
        assert!(!ui.is_loading(&RequestId::new("a")));
        assert!(ui.is_loading(&RequestId::new("b")));
    }

    #[test]
    fn clear_of_unregistered_id_is_a_no_op() {
        let mut ui = UiState::default();
        ui.clear_loading(&RequestId::new("missing"));
        assert!(ui.loading.is_empty());
    }

    #[test]
    fn error_modal_replaces_previous_modal() {
        let mut ui = UiState::default();
        ui.open_error_modal(ErrorDescriptor::connection());
        ui.open_error_modal(ErrorDescriptor::in_place_edit());
        match &ui.modal {
            ModalState::Error { error } => {
                assert_eq!(error.short_error, "Edit error");
            }
            ModalState::None => panic!("modal should be open"),
        }
    }
}
