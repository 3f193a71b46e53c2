//! Query operations (`api_call` events) and their result payloads.
//!
//! Result types the backend serves with snake_case keys are parsed
//! directly from its JSON; their field names are part of the contract.

use super::QueryOp;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sheetlink_contract::ColumnId;
use std::collections::HashMap;

// Filesystem browsing
// ============================================================================

/// List a directory for the file-import taskpane.
#[derive(Debug, Clone, Serialize)]
pub struct GetPathContents {
    /// Path split into parts, root first.
    pub path_parts: Vec<String>,
}

impl QueryOp for GetPathContents {
    const TYPE: &'static str = "get_path_contents";
    type Output = PathContents;
}

/// One entry in a browsed directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileElement {
    /// File or directory name.
    pub name: String,
    /// Whether this entry is a directory.
    pub is_directory: bool,
    /// Seconds since epoch of the last modification, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<f64>,
}

/// Contents of one directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathContents {
    /// The browsed path, split into parts.
    pub path_parts: Vec<String>,
    /// Entries in the directory.
    pub elements: Vec<FileElement>,
}

/// Join path parts into a single platform-correct path string.
#[derive(Debug, Clone, Serialize)]
pub struct GetPathJoined {
    /// Path split into parts, root first.
    pub path_parts: Vec<String>,
}

impl QueryOp for GetPathJoined {
    const TYPE: &'static str = "get_path_join";
    type Output = String;
}

// Exports
// ============================================================================

/// Render one sheet as a CSV string for download.
#[derive(Debug, Clone, Serialize)]
pub struct GetDataframeAsCsv {
    /// Sheet to export.
    pub sheet_index: usize,
}

impl QueryOp for GetDataframeAsCsv {
    const TYPE: &'static str = "get_dataframe_as_csv";
    type Output = String;
}

/// Render sheets as a base64-encoded Excel workbook.
///
/// The returned string must be base64-decoded into bytes before download.
#[derive(Debug, Clone, Serialize)]
pub struct GetDataframesAsExcel {
    /// Sheets to export, in workbook order.
    pub sheet_indexes: Vec<usize>,
}

impl QueryOp for GetDataframesAsExcel {
    const TYPE: &'static str = "get_dataframe_as_excel";
    type Output = String;
}

// Column inspection
// ============================================================================

/// Build a summary graph for one column.
#[derive(Debug, Clone, Serialize)]
pub struct GetColumnSummaryGraph {
    /// Sheet the column lives in.
    pub sheet_index: usize,
    /// Column to summarize.
    pub column_id: ColumnId,
    /// Requested render height, e.g. `"100%"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    /// Requested render width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    /// Whether the backend must inline the plotting library.
    pub include_plotlyjs: bool,
}

impl QueryOp for GetColumnSummaryGraph {
    const TYPE: &'static str = "get_column_summary_graph";
    type Output = GraphOutput;
}

/// Rendered graph markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphOutput {
    /// HTML fragment containing the figure.
    pub html: String,
    /// Script that hydrates the figure.
    pub script: String,
    /// Python code that reproduces the figure, when provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_code: Option<String>,
}

/// Describe one column: dtype, count, quartiles, frequencies.
#[derive(Debug, Clone, Serialize)]
pub struct GetColumnDescribe {
    /// Sheet the column lives in.
    pub sheet_index: usize,
    /// Column to describe.
    pub column_id: ColumnId,
}

impl QueryOp for GetColumnDescribe {
    const TYPE: &'static str = "get_column_describe";
    type Output = HashMap<String, String>;
}

// Step parameters
// ============================================================================

/// Look up the parameters of an existing step, by step id or by matching
/// execution data.
#[derive(Debug, Clone, Serialize)]
pub struct GetParams {
    /// Step type to search for, e.g. `pivot`.
    pub step_type: String,
    /// Step id to match; empty to match on execution data instead.
    pub step_id_to_match: String,
    /// Execution-data fields that must match.
    pub execution_data_to_match: HashMap<String, Value>,
}

impl QueryOp for GetParams {
    const TYPE: &'static str = "get_params";
    type Output = Option<Value>;
}

// File metadata
// ============================================================================

/// Inspect an Excel file before import.
#[derive(Debug, Clone, Serialize)]
pub struct GetExcelFileMetadata {
    /// Path of the file on the backend's filesystem.
    pub file_path: String,
}

impl QueryOp for GetExcelFileMetadata {
    const TYPE: &'static str = "get_excel_file_metadata";
    type Output = ExcelFileMetadata;
}

/// Sheet names and size of an Excel file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcelFileMetadata {
    /// Worksheet names, in file order.
    pub sheet_names: Vec<String>,
    /// File size in bytes.
    pub size: u64,
}

/// Inspect CSV files before import.
#[derive(Debug, Clone, Serialize)]
pub struct GetCsvFilesMetadata {
    /// Files to inspect.
    pub file_names: Vec<String>,
}

impl QueryOp for GetCsvFilesMetadata {
    const TYPE: &'static str = "get_csv_files_metadata";
    type Output = Value;
}

// Value counts
// ============================================================================

/// Sort order for unique-value counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UniqueValueSort {
    /// Values ascending.
    #[serde(rename = "Ascending Value")]
    AscendingValue,
    /// Values descending.
    #[serde(rename = "Descending Value")]
    DescendingValue,
    /// Occurrence count ascending.
    #[serde(rename = "Ascending Occurence")]
    AscendingOccurence,
    /// Occurrence count descending.
    #[serde(rename = "Descending Occurence")]
    DescendingOccurence,
}

/// Fetch the unique values of one column with their frequencies.
///
/// The backend answers with a JSON-encoded string; see
/// [`UniqueValueCountsPayload`] for the decode-and-scale step.
#[derive(Debug, Clone, Serialize)]
pub struct GetUniqueValueCounts {
    /// Sheet the column lives in.
    pub sheet_index: usize,
    /// Column to count.
    pub column_id: ColumnId,
    /// Substring filter over the values; empty matches everything.
    pub search_string: String,
    /// Sort order of the returned values.
    pub sort: UniqueValueSort,
}

impl QueryOp for GetUniqueValueCounts {
    const TYPE: &'static str = "get_unique_value_counts";
    type Output = String;
}

/// Raw unique-value-counts payload, as encoded inside the result string.
#[derive(Debug, Clone, Deserialize)]
pub struct UniqueValueCountsPayload {
    /// Rows of `[value, fraction, count]`.
    #[serde(rename = "uniqueValueRowDataArray")]
    pub unique_value_row_data_array: Vec<(Value, f64, u64)>,
    /// Whether the rows cover the full column (false once truncated).
    #[serde(rename = "isAllData")]
    pub is_all_data: bool,
}

impl UniqueValueCountsPayload {
    /// Scale raw fractions into display percentages.
    ///
    /// Consumers receive percentages (×100) and must not re-scale; that
    /// contract is relied on by every values-tab renderer.
    pub fn into_counts(self) -> UniqueValueCounts {
        let counts = self
            .unique_value_row_data_array
            .into_iter()
            .map(|(value, fraction, count)| UniqueValueCount {
                value,
                percent_occurence: fraction * 100.0,
                count_occurence: count,
                is_not_filtered: true,
            })
            .collect();
        UniqueValueCounts {
            unique_value_counts: counts,
            is_all_data: self.is_all_data,
        }
    }
}

/// One unique value and how often it occurs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueValueCount {
    /// The value itself (string, number, or boolean).
    pub value: Value,
    /// Percentage of rows holding this value, already scaled ×100.
    pub percent_occurence: f64,
    /// Absolute number of rows holding this value.
    pub count_occurence: u64,
    /// Whether the value currently passes the column's filters.
    pub is_not_filtered: bool,
}

/// Decoded and scaled unique-value counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueValueCounts {
    /// Counts in the requested sort order.
    pub unique_value_counts: Vec<UniqueValueCount>,
    /// Whether the counts cover the full column.
    pub is_all_data: bool,
}

// Previews
// ============================================================================

/// Preview the result of a split-text-to-columns edit.
///
/// The backend answers with a JSON-encoded string holding
/// `df_preview_row_data_array`.
#[derive(Debug, Clone, Serialize)]
pub struct GetSplitTextToColumnsPreview {
    /// Sheet the column lives in.
    pub sheet_index: usize,
    /// Column to split.
    pub column_id: ColumnId,
    /// Delimiters to split on.
    pub delimiters: Vec<String>,
}

impl QueryOp for GetSplitTextToColumnsPreview {
    const TYPE: &'static str = "get_split_text_to_columns_preview";
    type Output = String;
}

/// Raw split preview payload, as encoded inside the result string.
#[derive(Debug, Clone, Deserialize)]
pub struct SplitTextToColumnsPreview {
    /// Preview rows after the split.
    pub df_preview_row_data_array: Vec<Vec<Value>>,
}

// Analysis introspection
// ============================================================================

/// Names of dataframes defined in the host kernel.
#[derive(Debug, Clone, Serialize)]
pub struct GetDefinedDfNames {}

impl QueryOp for GetDefinedDfNames {
    const TYPE: &'static str = "get_defined_df_names";
    type Output = Vec<String>;
}

/// Imports recorded in the current analysis' steps.
#[derive(Debug, Clone, Serialize)]
pub struct GetImportedFilesAndDataframesFromCurrentSteps {}

impl QueryOp for GetImportedFilesAndDataframesFromCurrentSteps {
    const TYPE: &'static str = "get_imported_files_and_dataframes_from_current_steps";
    type Output = Vec<StepImportData>;
}

/// Imports recorded in a saved analysis.
#[derive(Debug, Clone, Serialize)]
pub struct GetImportedFilesAndDataframesFromAnalysisName {
    /// Saved analysis to inspect.
    pub analysis_name: String,
    /// Argument names the analysis was replayed with.
    pub args: Vec<String>,
}

impl QueryOp for GetImportedFilesAndDataframesFromAnalysisName {
    const TYPE: &'static str = "get_imported_files_and_dataframes_from_analysis_name";
    type Output = Vec<StepImportData>;
}

/// The imports one step performed. Also sent back verbatim when updating
/// imports, so it keeps its wire shape in both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepImportData {
    /// Step that performed the imports.
    pub step_id: String,
    /// Import records, one per imported file or dataframe.
    pub imports: Vec<Value>,
}

/// Dry-run a set of updated imports, returning per-index error messages.
#[derive(Debug, Clone, Serialize)]
pub struct GetTestImports {
    /// The imports to validate.
    pub updated_step_import_data_list: Vec<StepImportData>,
}

impl QueryOp for GetTestImports {
    const TYPE: &'static str = "get_test_imports";
    type Output = HashMap<String, String>;
}

/// How many times the widget has rendered, for the host's usage tracking.
#[derive(Debug, Clone, Serialize)]
pub struct GetRenderCount {}

impl QueryOp for GetRenderCount {
    const TYPE: &'static str = "get_render_count";
    type Output = u64;
}

// Code snippets
// ============================================================================

/// Fetch the code-snippet catalog.
#[derive(Debug, Clone, Serialize)]
pub struct GetCodeSnippets {}

impl QueryOp for GetCodeSnippets {
    const TYPE: &'static str = "get_code_snippets";
    type Output = CodeSnippetsResult;
}

/// One insertable code snippet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeSnippet {
    /// Stable snippet identifier.
    #[serde(rename = "Id")]
    pub id: String,
    /// Display name.
    #[serde(rename = "Name")]
    pub name: String,
    /// One-line description.
    #[serde(rename = "Description")]
    pub description: String,
    /// Snippet lines.
    #[serde(rename = "Code")]
    pub code: Vec<String>,
}

/// Snippet catalog, or the reason it could not be loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CodeSnippetsResult {
    /// The catalog loaded.
    Success {
        /// Available snippets.
        code_snippets: Vec<CodeSnippet>,
    },
    /// The catalog could not be loaded.
    Error {
        /// Human-readable reason.
        error_message: String,
    },
}

// Warehouse connections
// ============================================================================

/// Options and defaults available for a warehouse table location.
#[derive(Debug, Clone, Serialize)]
pub struct GetAvailableSnowflakeOptionsAndDefaults {
    /// Current table location and warehouse selection.
    pub table_loc_and_warehouse: Value,
}

impl QueryOp for GetAvailableSnowflakeOptionsAndDefaults {
    const TYPE: &'static str = "get_available_snowflake_options_and_defaults";
    type Output = Value;
}

/// Validate warehouse credentials without importing anything.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateSnowflakeCredentials {
    /// Credential type discriminator.
    #[serde(rename = "type")]
    pub credential_type: String,
    /// Account identifier.
    pub account: String,
    /// User name.
    pub username: String,
    /// Password.
    pub password: String,
}

impl QueryOp for ValidateSnowflakeCredentials {
    const TYPE: &'static str = "get_validate_snowflake_credentials";
    type Output = Value;
}

// AI completion
// ============================================================================

/// Request a code completion for a natural-language transformation.
#[derive(Debug, Clone, Serialize)]
pub struct GetAiCompletion {
    /// The user's instruction.
    pub user_input: String,
    /// Current grid selection, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<Value>,
    /// Earlier completions that failed, as `(completion, error)` pairs.
    pub previous_failed_completions: Vec<(String, String)>,
}

impl QueryOp for GetAiCompletion {
    const TYPE: &'static str = "get_ai_completion";
    type Output = AiCompletion;
}

/// A generated completion and the prompt that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiCompletion {
    /// The instruction the completion answers.
    pub user_input: String,
    /// Version tag of the prompt template.
    pub prompt_version: String,
    /// The full prompt sent to the model.
    pub prompt: String,
    /// The generated code.
    pub completion: String,
}

/// Parameters of the analysis that can be parameterized on export.
#[derive(Debug, Clone, Serialize)]
pub struct GetParameterizableParams {}

impl QueryOp for GetParameterizableParams {
    const TYPE: &'static str = "get_parameterizable_params";
    type Output = Option<Value>;
}
