//! Update façade: history navigation, replay, settings, and user-profile
//! bookkeeping.

use crate::client::ApiClient;
use chrono::Utc;
use serde_json::{json, Value};
use sheetlink_contract::ApiError;
use sheetlink_protocol::ops::{
    AppendUserField, CheckoutStepByIndex, Clear, GoPro, QuestionAndAnswer, Redo, ReplayAnalysis,
    SetUserField, StepImportData, Undo, UpdateArgs, UpdateCodeOptions, UpdateExistingImports,
    UpdateFeedback, UpdateOp, UpdateRenderCount, UserField,
};
use sheetlink_protocol::RequestBody;

impl ApiClient {
    /// Remove the most recent step.
    pub async fn undo(&self) -> Result<(), ApiError> {
        self.update(&Undo {}).await.map(drop)
    }

    /// Re-apply the most recently undone step.
    pub async fn redo(&self) -> Result<(), ApiError> {
        self.update(&Redo {}).await.map(drop)
    }

    /// Remove every step except the imports.
    pub async fn clear(&self) -> Result<(), ApiError> {
        self.update(&Clear {}).await.map(drop)
    }

    /// Check out a specific step by position, rewinding the visible state.
    pub async fn checkout_step_by_index(&self, step_idx: usize) -> Result<(), ApiError> {
        self.update(&CheckoutStepByIndex { step_idx }).await.map(drop)
    }

    /// Replay a saved analysis onto the current one, optionally
    /// substituting its recorded imports.
    pub async fn replay_analysis(
        &self,
        analysis_name: impl Into<String>,
        args: Vec<String>,
        step_import_data_list_to_overwrite: Option<Vec<StepImportData>>,
    ) -> Result<(), ApiError> {
        self.update(&ReplayAnalysis {
            analysis_name: analysis_name.into(),
            args,
            step_import_data_list_to_overwrite: step_import_data_list_to_overwrite
                .unwrap_or_default(),
        })
        .await
        .map(drop)
    }

    /// Update the argument names of the host call that created this
    /// widget. Only sent when there is no analysis to replay.
    pub async fn update_args(&self, args: Vec<String>) -> Result<(), ApiError> {
        self.update(&UpdateArgs { args }).await.map(drop)
    }

    /// Replace recorded imports with updated ones.
    pub async fn update_existing_imports(
        &self,
        updated_step_import_data_list: Vec<StepImportData>,
    ) -> Result<(), ApiError> {
        self.update(&UpdateExistingImports {
            updated_step_import_data_list,
        })
        .await
        .map(drop)
    }

    /// Replace the code-generation options.
    pub async fn update_code_options(&self, code_options: Value) -> Result<(), ApiError> {
        self.update(&UpdateCodeOptions { code_options }).await.map(drop)
    }

    /// Start the paid-tier upgrade flow.
    pub async fn go_pro(&self) -> Result<(), ApiError> {
        self.update(&GoPro {}).await.map(drop)
    }

    /// Report render statistics for the host's usage tracking.
    pub async fn update_render_count(
        &self,
        number_rendered_sheets: u64,
        theme: impl Into<String>,
    ) -> Result<(), ApiError> {
        self.update(&UpdateRenderCount {
            number_rendered_sheets,
            jupyterlab_theme: theme.into(),
        })
        .await
        .map(drop)
    }

    /// Record the user's sign-in email.
    pub async fn sign_up(&self, user_email: impl Into<String>) -> Result<(), ApiError> {
        self.update(&SetUserField {
            field: UserField::UserEmail,
            value: json!(user_email.into()),
        })
        .await
        .map(drop)
    }

    /// Mark the tool as upgraded, backdated ten days.
    ///
    /// The backdating keeps the upgrade prompt from reappearing several
    /// times a day while still resurfacing it in eleven days if the user
    /// never actually upgrades.
    pub async fn mark_upgraded(&self) -> Result<(), ApiError> {
        let backdated = (Utc::now() - chrono::Duration::days(10))
            .format("%Y-%m-%d")
            .to_string();
        self.update(&SetUserField {
            field: UserField::LastUpgradedDate,
            value: json!(backdated),
        })
        .await
        .map(drop)
    }

    /// Record that the user accepted the AI privacy policy.
    pub async fn accept_ai_privacy_policy(&self) -> Result<(), ApiError> {
        self.update(&SetUserField {
            field: UserField::AiPrivacyPolicy,
            value: json!(true),
        })
        .await
        .map(drop)
    }

    /// Record that the user finished tours.
    pub async fn close_tour(&self, tour_names: Vec<String>) -> Result<(), ApiError> {
        self.update(&AppendUserField {
            field: UserField::ReceivedTours,
            value: json!(tour_names),
        })
        .await
        .map(drop)
    }

    /// Record answers to a feedback prompt.
    ///
    /// Each question/answer pair is also elevated to a top-level envelope
    /// field so downstream analytics can chart answers without unpacking
    /// `params`.
    pub async fn update_feedback(
        &self,
        feedback_id: impl Into<String>,
        num_usages: u64,
        questions_and_answers: Vec<QuestionAndAnswer>,
    ) -> Result<(), ApiError> {
        let op = UpdateFeedback {
            feedback_id: feedback_id.into(),
            num_usages,
            questions_and_answers,
        };
        let params = serde_json::to_value(&op)
            .map_err(sheetlink_contract::TransportError::from)?;

        let mut body = RequestBody::update(UpdateFeedback::TYPE, params);
        for qa in &op.questions_and_answers {
            body = body.with_extra(qa.question.clone(), qa.answer.clone());
        }

        self.send(body).await.map(drop)
    }
}
