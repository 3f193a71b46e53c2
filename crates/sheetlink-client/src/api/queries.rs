//! Query façade: pure lookups with no step semantics.

use crate::api::StepHandle;
use crate::client::ApiClient;
use serde_json::Value;
use sheetlink_contract::{ApiError, ColumnId};
use sheetlink_protocol::ops::{
    AiCompletion, CodeSnippetsResult, ExcelFileMetadata, GetAiCompletion,
    GetAvailableSnowflakeOptionsAndDefaults, GetCodeSnippets, GetColumnDescribe,
    GetColumnSummaryGraph, GetCsvFilesMetadata, GetDataframeAsCsv, GetDataframesAsExcel,
    GetDefinedDfNames, GetExcelFileMetadata,
    GetImportedFilesAndDataframesFromAnalysisName,
    GetImportedFilesAndDataframesFromCurrentSteps, GetParameterizableParams, GetParams,
    GetPathContents, GetPathJoined, GetRenderCount, GetSplitTextToColumnsPreview,
    GetTestImports, GetUniqueValueCounts, GraphOutput, PathContents, QueryOp,
    SplitTextToColumnsPreview, StepImportData, UniqueValueCounts, UniqueValueCountsPayload,
    UniqueValueSort, ValidateSnowflakeCredentials,
};
use std::collections::HashMap;

impl ApiClient {
    /// List a directory for the file-import taskpane.
    pub async fn path_contents(&self, path_parts: Vec<String>) -> Result<PathContents, ApiError> {
        self.query(&GetPathContents { path_parts }).await
    }

    /// Join path parts into a single path string, useful for sending a
    /// browsed selection through an import edit.
    pub async fn path_joined(&self, path_parts: Vec<String>) -> Result<String, ApiError> {
        self.query(&GetPathJoined { path_parts }).await
    }

    /// One sheet rendered as a CSV string for download.
    pub async fn dataframe_as_csv(&self, sheet_index: usize) -> Result<String, ApiError> {
        self.query(&GetDataframeAsCsv { sheet_index }).await
    }

    /// Sheets rendered as a base64-encoded Excel workbook. Decode from
    /// base64 into bytes before offering the download.
    pub async fn dataframes_as_excel(
        &self,
        sheet_indexes: Vec<usize>,
    ) -> Result<String, ApiError> {
        self.query(&GetDataframesAsExcel { sheet_indexes }).await
    }

    /// Summary graph for one column.
    pub async fn column_summary_graph(
        &self,
        sheet_index: usize,
        column_id: ColumnId,
        height: Option<String>,
        width: Option<String>,
        include_plotlyjs: bool,
    ) -> Result<GraphOutput, ApiError> {
        self.query(&GetColumnSummaryGraph {
            sheet_index,
            column_id,
            height,
            width,
            include_plotlyjs,
        })
        .await
    }

    /// Key/value description of one column (dtype, count, quartiles).
    pub async fn column_describe(
        &self,
        sheet_index: usize,
        column_id: ColumnId,
    ) -> Result<HashMap<String, String>, ApiError> {
        self.query(&GetColumnDescribe {
            sheet_index,
            column_id,
        })
        .await
    }

    /// Parameters of an existing step, matched by step id or by
    /// execution data. `None` when no step matches.
    pub async fn step_params(
        &self,
        step_type: impl Into<String>,
        step: Option<&StepHandle>,
        execution_data_to_match: HashMap<String, Value>,
    ) -> Result<Option<Value>, ApiError> {
        self.query(&GetParams {
            step_type: step_type.into(),
            step_id_to_match: step
                .map(|handle| handle.step_id().to_string())
                .unwrap_or_default(),
            execution_data_to_match,
        })
        .await
    }

    /// Parameters of the pivot step targeting a destination sheet, or
    /// `None` when that sheet was not produced by a pivot.
    pub async fn pivot_params(
        &self,
        destination_sheet_index: usize,
    ) -> Result<Option<Value>, ApiError> {
        self.step_params(
            "pivot",
            None,
            HashMap::from([(
                "destination_sheet_index".to_string(),
                Value::from(destination_sheet_index),
            )]),
        )
        .await
    }

    /// Sheet names and size of an Excel file.
    pub async fn excel_file_metadata(
        &self,
        file_path: impl Into<String>,
    ) -> Result<ExcelFileMetadata, ApiError> {
        self.query(&GetExcelFileMetadata {
            file_path: file_path.into(),
        })
        .await
    }

    /// Detected parse options for CSV files.
    pub async fn csv_files_metadata(&self, file_names: Vec<String>) -> Result<Value, ApiError> {
        self.query(&GetCsvFilesMetadata { file_names }).await
    }

    /// Unique values of one column with their frequencies, scaled for
    /// display: `percent_occurence` is already ×100.
    pub async fn unique_value_counts(
        &self,
        sheet_index: usize,
        column_id: ColumnId,
        search_string: impl Into<String>,
        sort: UniqueValueSort,
    ) -> Result<UniqueValueCounts, ApiError> {
        let raw: String = self
            .query(&GetUniqueValueCounts {
                sheet_index,
                column_id,
                search_string: search_string.into(),
                sort,
            })
            .await?;
        let payload: UniqueValueCountsPayload = serde_json::from_str(&raw)
            .map_err(|err| ApiError::malformed_result(GetUniqueValueCounts::TYPE, err))?;
        Ok(payload.into_counts())
    }

    /// Preview rows of a split-text-to-columns edit.
    pub async fn split_text_to_columns_preview(
        &self,
        sheet_index: usize,
        column_id: ColumnId,
        delimiters: Vec<String>,
    ) -> Result<Vec<Vec<Value>>, ApiError> {
        let raw: String = self
            .query(&GetSplitTextToColumnsPreview {
                sheet_index,
                column_id,
                delimiters,
            })
            .await?;
        let preview: SplitTextToColumnsPreview = serde_json::from_str(&raw)
            .map_err(|err| ApiError::malformed_result(GetSplitTextToColumnsPreview::TYPE, err))?;
        Ok(preview.df_preview_row_data_array)
    }

    /// Names of dataframes defined in the host kernel.
    pub async fn defined_df_names(&self) -> Result<Vec<String>, ApiError> {
        self.query(&GetDefinedDfNames {}).await
    }

    /// Imports recorded in the current analysis' steps.
    pub async fn imported_files_and_dataframes_from_current_steps(
        &self,
    ) -> Result<Vec<StepImportData>, ApiError> {
        self.query(&GetImportedFilesAndDataframesFromCurrentSteps {})
            .await
    }

    /// Imports recorded in a saved analysis.
    pub async fn imported_files_and_dataframes_from_analysis_name(
        &self,
        analysis_name: impl Into<String>,
        args: Vec<String>,
    ) -> Result<Vec<StepImportData>, ApiError> {
        self.query(&GetImportedFilesAndDataframesFromAnalysisName {
            analysis_name: analysis_name.into(),
            args,
        })
        .await
    }

    /// Dry-run updated imports; the result maps failing import indexes to
    /// error messages.
    pub async fn test_imports(
        &self,
        updated_step_import_data_list: Vec<StepImportData>,
    ) -> Result<HashMap<String, String>, ApiError> {
        self.query(&GetTestImports {
            updated_step_import_data_list,
        })
        .await
    }

    /// How many times the widget has rendered.
    pub async fn render_count(&self) -> Result<u64, ApiError> {
        self.query(&GetRenderCount {}).await
    }

    /// The code-snippet catalog.
    pub async fn code_snippets(&self) -> Result<CodeSnippetsResult, ApiError> {
        self.query(&GetCodeSnippets {}).await
    }

    /// Options and defaults for a warehouse table location.
    pub async fn available_snowflake_options_and_defaults(
        &self,
        table_loc_and_warehouse: Value,
    ) -> Result<Value, ApiError> {
        self.query(&GetAvailableSnowflakeOptionsAndDefaults {
            table_loc_and_warehouse,
        })
        .await
    }

    /// Validate warehouse credentials without importing anything.
    pub async fn validate_snowflake_credentials(
        &self,
        credentials: ValidateSnowflakeCredentials,
    ) -> Result<Value, ApiError> {
        self.query(&credentials).await
    }

    /// A code completion for a natural-language transformation.
    pub async fn ai_completion(
        &self,
        user_input: impl Into<String>,
        selection: Option<Value>,
        previous_failed_completions: Vec<(String, String)>,
    ) -> Result<AiCompletion, ApiError> {
        self.query(&GetAiCompletion {
            user_input: user_input.into(),
            selection,
            previous_failed_completions,
        })
        .await
    }

    /// Parameters of the analysis that can be parameterized on export.
    pub async fn parameterizable_params(&self) -> Result<Option<Value>, ApiError> {
        self.query(&GetParameterizableParams {}).await
    }
}
