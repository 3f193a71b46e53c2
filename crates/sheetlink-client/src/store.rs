//! Shared application state, injected into the client at construction.
//!
//! No module-level singletons: the client writes state only through the
//! [`StateSink`] it was handed, and reads UI state only through the
//! closure form of [`StateSink::update_ui`]. [`StateStore`] is the
//! default sink; hosts with their own state management implement the
//! trait instead.

use sheetlink_contract::{AnalysisData, SheetData, UiState, UserProfile};
use std::sync::Mutex;

/// Where reconciled state lands.
///
/// Each `replace_*` call replaces a whole slice; there is no merging.
/// When two responses carry the same slice concurrently, the last
/// reconciliation to run wins — an accepted race, since every replacement
/// is a complete, self-consistent document.
pub trait StateSink: Send + Sync {
    /// Replace the sheet-data array.
    fn replace_sheet_data(&self, sheets: Vec<SheetData>);

    /// Replace the analysis data.
    fn replace_analysis_data(&self, analysis: AnalysisData);

    /// Replace the user profile.
    fn replace_user_profile(&self, profile: UserProfile);

    /// Mutate UI state in place (loading list, modal slot).
    fn update_ui(&self, apply: &mut dyn FnMut(&mut UiState));
}

/// Default in-process state store with four independently replaceable
/// slots.
#[derive(Debug, Default)]
pub struct StateStore {
    sheet_data: Mutex<Vec<SheetData>>,
    analysis_data: Mutex<AnalysisData>,
    user_profile: Mutex<UserProfile>,
    ui: Mutex<UiState>,
}

impl StateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the sheet-data array.
    pub fn sheet_data(&self) -> Vec<SheetData> {
        self.sheet_data.lock().unwrap().clone()
    }

    /// Snapshot of the analysis data.
    pub fn analysis_data(&self) -> AnalysisData {
        self.analysis_data.lock().unwrap().clone()
    }

    /// Snapshot of the user profile.
    pub fn user_profile(&self) -> UserProfile {
        self.user_profile.lock().unwrap().clone()
    }

    /// Snapshot of the UI state.
    pub fn ui_state(&self) -> UiState {
        self.ui.lock().unwrap().clone()
    }
}

impl StateSink for StateStore {
    fn replace_sheet_data(&self, sheets: Vec<SheetData>) {
        *self.sheet_data.lock().unwrap() = sheets;
    }

    fn replace_analysis_data(&self, analysis: AnalysisData) {
        *self.analysis_data.lock().unwrap() = analysis;
    }

    fn replace_user_profile(&self, profile: UserProfile) {
        *self.user_profile.lock().unwrap() = profile;
    }

    fn update_ui(&self, apply: &mut dyn FnMut(&mut UiState)) {
        apply(&mut self.ui.lock().unwrap());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sheetlink_contract::{ErrorDescriptor, ModalState};

    #[test]
    fn slices_replace_wholesale() {
        let store = StateStore::new();
        store.replace_sheet_data(vec![SheetData::new(json!({"dfName": "a"}))]);
        store.replace_sheet_data(vec![SheetData::new(json!({"dfName": "b"}))]);

        let sheets = store.sheet_data();
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].df_name(), Some("b"));
    }

    #[test]
    fn update_ui_sees_current_state() {
        let store = StateStore::new();
        store.update_ui(&mut |ui| ui.open_error_modal(ErrorDescriptor::connection()));
        store.update_ui(&mut |ui| {
            assert!(matches!(ui.modal, ModalState::Error { .. }));
        });
    }
}
