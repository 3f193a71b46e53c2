//! Edit operations (`edit_event` events).
//!
//! Every edit targets a step id. The façade decides per call whether to
//! thread an existing id (overwrite) or mint a fresh one (append); the
//! param structs here only carry the operation payload.

use super::EditOp;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sheetlink_contract::{ColumnId, GraphId};

// Columns
// ============================================================================

/// Insert a new column.
#[derive(Debug, Clone, Serialize)]
pub struct AddColumn {
    /// Sheet to edit.
    pub sheet_index: usize,
    /// Header of the new column.
    pub column_header: String,
    /// Position to insert at.
    pub column_header_index: usize,
}

impl EditOp for AddColumn {
    const TYPE: &'static str = "add_column_edit";
}

/// Delete columns from a sheet.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteColumns {
    /// Sheet to edit.
    pub sheet_index: usize,
    /// Columns to remove.
    pub column_ids: Vec<ColumnId>,
}

impl EditOp for DeleteColumns {
    const TYPE: &'static str = "delete_column_edit";
}

/// Rename one column.
#[derive(Debug, Clone, Serialize)]
pub struct RenameColumn {
    /// Sheet to edit.
    pub sheet_index: usize,
    /// Column to rename.
    pub column_id: ColumnId,
    /// The new header.
    pub new_column_header: String,
    /// Header level, for multi-level headers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<usize>,
}

impl EditOp for RenameColumn {
    const TYPE: &'static str = "rename_column_edit";
}

/// Move a column to a new position, shifting the rest right.
#[derive(Debug, Clone, Serialize)]
pub struct ReorderColumn {
    /// Sheet to edit.
    pub sheet_index: usize,
    /// Column to move.
    pub column_id: ColumnId,
    /// Destination index.
    pub new_column_index: usize,
}

impl EditOp for ReorderColumn {
    const TYPE: &'static str = "reorder_column_edit";
}

/// Change the dtype of columns.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeColumnDtype {
    /// Sheet to edit.
    pub sheet_index: usize,
    /// Columns to convert.
    pub column_ids: Vec<ColumnId>,
    /// Target dtype name.
    pub new_dtype: String,
}

impl EditOp for ChangeColumnDtype {
    const TYPE: &'static str = "change_column_dtype_edit";
}

/// Case-transform every column header in a sheet.
#[derive(Debug, Clone, Serialize)]
pub struct TransformColumnHeaders {
    /// Sheet to edit.
    pub sheet_index: usize,
    /// The transformation to apply.
    pub transformation: HeaderTransformation,
}

impl EditOp for TransformColumnHeaders {
    const TYPE: &'static str = "column_headers_transform_edit";
}

/// Supported header transformations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HeaderTransformation {
    /// Uppercase every header.
    Uppercase,
    /// Lowercase every header.
    Lowercase,
}

// Rows and cells
// ============================================================================

/// Delete rows by index label.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteRows {
    /// Sheet to edit.
    pub sheet_index: usize,
    /// Index labels of the rows to remove.
    pub labels: Vec<Value>,
}

impl EditOp for DeleteRows {
    const TYPE: &'static str = "delete_row_edit";
}

/// Promote one row to be the header row.
#[derive(Debug, Clone, Serialize)]
pub struct PromoteRowToHeader {
    /// Sheet to edit.
    pub sheet_index: usize,
    /// Index label of the row to promote.
    pub index: Value,
}

impl EditOp for PromoteRowToHeader {
    const TYPE: &'static str = "promote_row_to_header_edit";
}

/// Write a literal value into one cell.
#[derive(Debug, Clone, Serialize)]
pub struct SetCellValue {
    /// Sheet to edit.
    pub sheet_index: usize,
    /// Column of the cell.
    pub column_id: ColumnId,
    /// Index label of the row.
    pub row_index: Value,
    /// The new value, as the user typed it.
    pub new_value: String,
    /// Where the cell editor was opened from. Logging only.
    pub cell_editor_location: String,
}

impl EditOp for SetCellValue {
    const TYPE: &'static str = "set_cell_value_edit";
}

/// Set the formula of a column.
#[derive(Debug, Clone, Serialize)]
pub struct SetColumnFormula {
    /// Sheet to edit.
    pub sheet_index: usize,
    /// Column the formula writes.
    pub column_id: ColumnId,
    /// Index label the formula was entered at.
    pub formula_label: Value,
    /// The formula text.
    pub new_formula: String,
    /// Which rows the formula applies to.
    pub index_labels_formula_is_applied_to: Value,
    /// Where the cell editor was opened from. Logging only.
    pub cell_editor_location: String,
}

impl EditOp for SetColumnFormula {
    const TYPE: &'static str = "set_column_formula_edit";
}

// Filtering and sorting
// ============================================================================

/// Combinator for a filter group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    /// All conditions must hold.
    And,
    /// Any condition may hold.
    Or,
}

/// Replace the filters on one column.
#[derive(Debug, Clone, Serialize)]
pub struct FilterColumn {
    /// Sheet to edit.
    pub sheet_index: usize,
    /// Column to filter.
    pub column_id: ColumnId,
    /// Combinator across `filters`.
    pub operator: FilterOperator,
    /// Filter conditions and nested groups.
    pub filters: Vec<Value>,
    /// Which control-panel tab issued the filter. Logging only.
    pub filter_location: String,
}

impl EditOp for FilterColumn {
    const TYPE: &'static str = "filter_column_edit";
}

/// Sort direction for a column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
    /// Remove the sort.
    None,
}

/// Sort a sheet by one column.
#[derive(Debug, Clone, Serialize)]
pub struct SortColumn {
    /// Sheet to edit.
    pub sheet_index: usize,
    /// Column to sort by.
    pub column_id: ColumnId,
    /// Direction of the sort.
    pub sort_direction: SortDirection,
}

impl EditOp for SortColumn {
    const TYPE: &'static str = "sort_edit";
}

// Whole-sheet operations
// ============================================================================

/// Transpose a sheet.
#[derive(Debug, Clone, Serialize)]
pub struct Transpose {
    /// Sheet to transpose.
    pub sheet_index: usize,
}

impl EditOp for Transpose {
    const TYPE: &'static str = "transpose_edit";
}

/// One-hot encode a column.
#[derive(Debug, Clone, Serialize)]
pub struct OneHotEncoding {
    /// Sheet to edit.
    pub sheet_index: usize,
    /// Column to encode.
    pub column_id: ColumnId,
}

impl EditOp for OneHotEncoding {
    const TYPE: &'static str = "one_hot_encoding_edit";
}

/// Reset a sheet's index.
#[derive(Debug, Clone, Serialize)]
pub struct ResetIndex {
    /// Sheet to edit.
    pub sheet_index: usize,
    /// Whether to drop the old index instead of keeping it as a column.
    pub drop: bool,
}

impl EditOp for ResetIndex {
    const TYPE: &'static str = "reset_index_edit";
}

/// Apply an AI-generated transformation.
#[derive(Debug, Clone, Serialize)]
pub struct AiTransformation {
    /// The user's instruction.
    pub user_input: String,
    /// Version tag of the prompt template.
    pub prompt_version: String,
    /// The full prompt sent to the model.
    pub prompt: String,
    /// The generated code.
    pub completion: String,
    /// The code as the user edited it before running.
    pub edited_completion: String,
}

impl EditOp for AiTransformation {
    const TYPE: &'static str = "ai_transformation_edit";
}

// Dataframes
// ============================================================================

/// Rename the dataframe behind a sheet.
#[derive(Debug, Clone, Serialize)]
pub struct RenameDataframe {
    /// Sheet to rename.
    pub sheet_index: usize,
    /// The new dataframe name.
    pub new_dataframe_name: String,
}

impl EditOp for RenameDataframe {
    const TYPE: &'static str = "dataframe_rename_edit";
}

/// Duplicate a sheet.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateDataframe {
    /// Sheet to duplicate.
    pub sheet_index: usize,
}

impl EditOp for DuplicateDataframe {
    const TYPE: &'static str = "dataframe_duplicate_edit";
}

/// Delete a sheet.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteDataframe {
    /// Sheet to delete.
    pub sheet_index: usize,
}

impl EditOp for DeleteDataframe {
    const TYPE: &'static str = "dataframe_delete_edit";
}

/// Replace the display format of a sheet.
#[derive(Debug, Clone, Serialize)]
pub struct SetDataframeFormat {
    /// Sheet to format.
    pub sheet_index: usize,
    /// The new format document.
    pub df_format: Value,
}

impl EditOp for SetDataframeFormat {
    const TYPE: &'static str = "set_dataframe_format_edit";
}

// Imports
// ============================================================================

/// Import CSV files with default options.
#[derive(Debug, Clone, Serialize)]
pub struct SimpleImport {
    /// Files to import.
    pub file_names: Vec<String>,
}

impl EditOp for SimpleImport {
    const TYPE: &'static str = "simple_import_edit";
}

/// Import worksheets from an Excel file.
#[derive(Debug, Clone, Serialize)]
pub struct ExcelImport {
    /// File to import.
    pub file_name: String,
    /// Worksheets to import.
    pub sheet_names: Vec<String>,
    /// Whether the first row holds headers.
    pub has_headers: bool,
    /// Rows to skip before reading.
    pub skiprows: u64,
}

impl EditOp for ExcelImport {
    const TYPE: &'static str = "excel_import_edit";
}

// Graphs
// ============================================================================

/// Requested render size for a graph.
#[derive(Debug, Clone, Serialize)]
pub struct GraphRendering {
    /// Render height, e.g. `"100%"`.
    pub height: String,
    /// Render width.
    pub width: String,
}

/// Create or restyle a graph.
///
/// The three param documents mirror the backend's graph pipeline stages;
/// the frontend assembles them from its own graph-params form.
#[derive(Debug, Clone, Serialize)]
pub struct EditGraph {
    /// Graph to create or restyle.
    pub graph_id: GraphId,
    /// Sampling and column selection applied before plotting.
    pub graph_preprocessing: Value,
    /// Chart type and axes.
    pub graph_creation: Value,
    /// Colors, titles, legends.
    pub graph_styling: Value,
    /// Requested render size.
    pub graph_rendering: GraphRendering,
    /// Whether the backend must inline the plotting library.
    pub include_plotlyjs: bool,
}

impl EditOp for EditGraph {
    const TYPE: &'static str = "graph_edit";
}

/// Delete a graph.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteGraph {
    /// Graph to delete.
    pub graph_id: GraphId,
}

impl EditOp for DeleteGraph {
    const TYPE: &'static str = "graph_delete_edit";
}

/// Duplicate a graph under a new id.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGraph {
    /// Graph to copy.
    pub old_graph_id: GraphId,
    /// Id for the copy.
    pub new_graph_id: GraphId,
}

impl EditOp for DuplicateGraph {
    const TYPE: &'static str = "graph_duplicate_edit";
}

/// Rename a graph tab.
#[derive(Debug, Clone, Serialize)]
pub struct RenameGraph {
    /// Graph to rename.
    pub graph_id: GraphId,
    /// The new tab name.
    pub new_graph_tab_name: String,
}

impl EditOp for RenameGraph {
    const TYPE: &'static str = "graph_rename_edit";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_params_match_wire_names() {
        let op = FilterColumn {
            sheet_index: 1,
            column_id: "col_b".to_string(),
            operator: FilterOperator::And,
            filters: vec![json!({"condition": "greater", "value": 3})],
            filter_location: "filter_sort".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({
                "sheet_index": 1,
                "column_id": "col_b",
                "operator": "And",
                "filters": [{"condition": "greater", "value": 3}],
                "filter_location": "filter_sort"
            })
        );
    }

    #[test]
    fn optional_header_level_is_omitted_when_absent() {
        let op = RenameColumn {
            sheet_index: 0,
            column_id: "col_a".to_string(),
            new_column_header: "Revenue".to_string(),
            level: None,
        };
        let encoded = serde_json::to_value(&op).unwrap();
        assert!(encoded.get("level").is_none());
    }

    #[test]
    fn header_transformation_tags_its_type() {
        let op = TransformColumnHeaders {
            sheet_index: 0,
            transformation: HeaderTransformation::Uppercase,
        };
        let encoded = serde_json::to_value(&op).unwrap();
        assert_eq!(encoded["transformation"], json!({"type": "uppercase"}));
    }

    #[test]
    fn sort_direction_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(SortDirection::Ascending).unwrap(),
            json!("ascending")
        );
        assert_eq!(
            serde_json::to_value(SortDirection::None).unwrap(),
            json!("none")
        );
    }
}
