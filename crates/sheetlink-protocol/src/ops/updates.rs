//! Update operations (`update_event` events): history navigation, replay,
//! settings, and user-profile bookkeeping.

use super::{StepImportData, UpdateOp};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// History
// ============================================================================

/// Remove the most recent step.
#[derive(Debug, Clone, Serialize)]
pub struct Undo {}

impl UpdateOp for Undo {
    const TYPE: &'static str = "undo";
}

/// Re-apply the most recently undone step.
#[derive(Debug, Clone, Serialize)]
pub struct Redo {}

impl UpdateOp for Redo {
    const TYPE: &'static str = "redo";
}

/// Remove every step except the imports.
#[derive(Debug, Clone, Serialize)]
pub struct Clear {}

impl UpdateOp for Clear {
    const TYPE: &'static str = "clear";
}

/// Check out a specific step by position, rewinding the visible state.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutStepByIndex {
    /// Position in the step history.
    pub step_idx: usize,
}

impl UpdateOp for CheckoutStepByIndex {
    const TYPE: &'static str = "checkout_step_by_idx_update";
}

// Replay and arguments
// ============================================================================

/// Replay a saved analysis onto the current one.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayAnalysis {
    /// Saved analysis to replay.
    pub analysis_name: String,
    /// Argument names to replay with.
    pub args: Vec<String>,
    /// Imports to substitute during replay. Empty replays as recorded.
    pub step_import_data_list_to_overwrite: Vec<StepImportData>,
}

impl UpdateOp for ReplayAnalysis {
    const TYPE: &'static str = "replay_analysis_update";
}

/// Update the argument names of the host call that created this widget.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateArgs {
    /// The argument names.
    pub args: Vec<String>,
}

impl UpdateOp for UpdateArgs {
    const TYPE: &'static str = "args_update";
}

/// Replace recorded imports with updated ones.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateExistingImports {
    /// The imports to apply.
    pub updated_step_import_data_list: Vec<StepImportData>,
}

impl UpdateOp for UpdateExistingImports {
    const TYPE: &'static str = "update_existing_import_update";
}

// Settings
// ============================================================================

/// Replace the code-generation options.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateCodeOptions {
    /// The new options document.
    pub code_options: Value,
}

impl UpdateOp for UpdateCodeOptions {
    const TYPE: &'static str = "code_options_update";
}

/// Start the paid-tier upgrade flow.
#[derive(Debug, Clone, Serialize)]
pub struct GoPro {}

impl UpdateOp for GoPro {
    const TYPE: &'static str = "go_pro";
}

/// Report render statistics for the host's usage tracking.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateRenderCount {
    /// Widgets currently rendered in the host document.
    pub number_rendered_sheets: u64,
    /// The host's active theme name.
    pub jupyterlab_theme: String,
}

impl UpdateOp for UpdateRenderCount {
    const TYPE: &'static str = "render_count_update";
}

// User profile
// ============================================================================

/// Keys of the persisted user-profile document the frontend may write.
///
/// Serialized values are the persisted key strings; adding a variant means
/// the backend already persists that key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserField {
    /// The user's sign-in email.
    UserEmail,
    /// Tours the user has completed.
    ReceivedTours,
    /// Checklists the user has completed.
    ReceivedChecklists,
    /// Date the tool was last upgraded, `YYYY-MM-DD`.
    LastUpgradedDate,
    /// Whether the AI privacy policy was accepted.
    AiPrivacyPolicy,
    /// The experiment cohort assigned to this install.
    Experiment,
}

/// Overwrite one user-profile field.
#[derive(Debug, Clone, Serialize)]
pub struct SetUserField {
    /// Field to write.
    pub field: UserField,
    /// The new value.
    pub value: Value,
}

impl UpdateOp for SetUserField {
    const TYPE: &'static str = "set_user_field_update";
}

/// Append values to a list-valued user-profile field.
#[derive(Debug, Clone, Serialize)]
pub struct AppendUserField {
    /// Field to append to.
    pub field: UserField,
    /// Values to append.
    pub value: Value,
}

impl UpdateOp for AppendUserField {
    const TYPE: &'static str = "append_user_field_update";
}

// Feedback
// ============================================================================

/// One answered feedback question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAndAnswer {
    /// The question as shown to the user.
    pub question: String,
    /// The answer (free text or a rating).
    pub answer: Value,
}

/// Record answers to a feedback prompt.
///
/// The façade additionally elevates each question/answer pair to a
/// top-level envelope field so downstream analytics can chart them without
/// unpacking `params`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateFeedback {
    /// Which feedback prompt was answered.
    pub feedback_id: String,
    /// How many times the tool had been used when prompted.
    pub num_usages: u64,
    /// The answers.
    pub questions_and_answers: Vec<QuestionAndAnswer>,
}

impl UpdateOp for UpdateFeedback {
    const TYPE: &'static str = "update_feedback_v2_obj_update";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_fields_serialize_to_persisted_key_strings() {
        assert_eq!(
            serde_json::to_value(UserField::UserEmail).unwrap(),
            json!("user_email")
        );
        assert_eq!(
            serde_json::to_value(UserField::ReceivedTours).unwrap(),
            json!("received_tours")
        );
        assert_eq!(
            serde_json::to_value(UserField::LastUpgradedDate).unwrap(),
            json!("last_upgraded_date")
        );
        assert_eq!(
            serde_json::to_value(UserField::AiPrivacyPolicy).unwrap(),
            json!("ai_privacy_policy")
        );
    }

    #[test]
    fn history_updates_have_empty_params() {
        assert_eq!(serde_json::to_value(Undo {}).unwrap(), json!({}));
        assert_eq!(serde_json::to_value(Redo {}).unwrap(), json!({}));
        assert_eq!(serde_json::to_value(Clear {}).unwrap(), json!({}));
    }

    #[test]
    fn replay_serializes_substituted_imports() {
        let op = ReplayAnalysis {
            analysis_name: "analysis_abc".to_string(),
            args: vec!["df1".to_string()],
            step_import_data_list_to_overwrite: vec![],
        };
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({
                "analysis_name": "analysis_abc",
                "args": ["df1"],
                "step_import_data_list_to_overwrite": []
            })
        );
    }
}
