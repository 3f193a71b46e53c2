//! Edit façade: document mutations with step semantics.
//!
//! Methods that return a [`StepHandle`] are overwrite-capable: pass the
//! returned handle back in to keep rewriting the same step while the user
//! refines the same logical edit. Methods returning `()` always append a
//! fresh step; re-running them is a new mutation by design.

use crate::api::StepHandle;
use crate::client::ApiClient;
use serde_json::Value;
use sheetlink_contract::{ApiError, ColumnId};
use sheetlink_protocol::ops::{
    AddColumn, AiTransformation, ChangeColumnDtype, DeleteColumns, DeleteDataframe, DeleteGraph,
    DeleteRows, DuplicateDataframe, DuplicateGraph, EditGraph, ExcelImport, FilterColumn,
    FilterOperator, HeaderTransformation, OneHotEncoding, PromoteRowToHeader, RenameColumn,
    RenameDataframe, RenameGraph, ReorderColumn, ResetIndex, SetCellValue, SetColumnFormula,
    SetDataframeFormat, SimpleImport, SortColumn, SortDirection, TransformColumnHeaders,
    Transpose,
};

impl ApiClient {
    // Columns
    // ========================================================================

    /// Insert a new column. Overwrite-capable.
    pub async fn add_column(
        &self,
        sheet_index: usize,
        column_header: impl Into<String>,
        column_header_index: usize,
        step: Option<&StepHandle>,
    ) -> Result<StepHandle, ApiError> {
        self.edit(
            &AddColumn {
                sheet_index,
                column_header: column_header.into(),
                column_header_index,
            },
            step,
        )
        .await
    }

    /// Delete columns. Appends.
    pub async fn delete_columns(
        &self,
        sheet_index: usize,
        column_ids: Vec<ColumnId>,
    ) -> Result<(), ApiError> {
        self.edit(
            &DeleteColumns {
                sheet_index,
                column_ids,
            },
            None,
        )
        .await
        .map(drop)
    }

    /// Rename one column. Overwrite-capable.
    pub async fn rename_column(
        &self,
        sheet_index: usize,
        column_id: ColumnId,
        new_column_header: impl Into<String>,
        level: Option<usize>,
        step: Option<&StepHandle>,
    ) -> Result<StepHandle, ApiError> {
        self.edit(
            &RenameColumn {
                sheet_index,
                column_id,
                new_column_header: new_column_header.into(),
                level,
            },
            step,
        )
        .await
    }

    /// Move a column to a new position. Appends.
    pub async fn reorder_column(
        &self,
        sheet_index: usize,
        column_id: ColumnId,
        new_column_index: usize,
    ) -> Result<(), ApiError> {
        self.edit(
            &ReorderColumn {
                sheet_index,
                column_id,
                new_column_index,
            },
            None,
        )
        .await
        .map(drop)
    }

    /// Change the dtype of columns. Overwrite-capable.
    pub async fn change_column_dtype(
        &self,
        sheet_index: usize,
        column_ids: Vec<ColumnId>,
        new_dtype: impl Into<String>,
        step: Option<&StepHandle>,
    ) -> Result<StepHandle, ApiError> {
        self.edit(
            &ChangeColumnDtype {
                sheet_index,
                column_ids,
                new_dtype: new_dtype.into(),
            },
            step,
        )
        .await
    }

    /// Case-transform every column header in a sheet. Appends.
    pub async fn transform_column_headers(
        &self,
        sheet_index: usize,
        transformation: HeaderTransformation,
    ) -> Result<(), ApiError> {
        self.edit(
            &TransformColumnHeaders {
                sheet_index,
                transformation,
            },
            None,
        )
        .await
        .map(drop)
    }

    // Rows and cells
    // ========================================================================

    /// Delete rows by index label. Appends.
    pub async fn delete_rows(
        &self,
        sheet_index: usize,
        labels: Vec<Value>,
    ) -> Result<(), ApiError> {
        self.edit(
            &DeleteRows {
                sheet_index,
                labels,
            },
            None,
        )
        .await
        .map(drop)
    }

    /// Promote one row to be the header row. Appends.
    pub async fn promote_row_to_header(
        &self,
        sheet_index: usize,
        index: Value,
    ) -> Result<(), ApiError> {
        self.edit(&PromoteRowToHeader { sheet_index, index }, None)
            .await
            .map(drop)
    }

    /// Write a literal value into one cell. Appends.
    pub async fn set_cell_value(
        &self,
        sheet_index: usize,
        column_id: ColumnId,
        row_index: Value,
        new_value: impl Into<String>,
        cell_editor_location: impl Into<String>,
    ) -> Result<(), ApiError> {
        self.edit(
            &SetCellValue {
                sheet_index,
                column_id,
                row_index,
                new_value: new_value.into(),
                cell_editor_location: cell_editor_location.into(),
            },
            None,
        )
        .await
        .map(drop)
    }

    /// Set the formula of a column. Appends.
    pub async fn set_column_formula(
        &self,
        sheet_index: usize,
        column_id: ColumnId,
        formula_label: Value,
        new_formula: impl Into<String>,
        index_labels_formula_is_applied_to: Value,
        cell_editor_location: impl Into<String>,
    ) -> Result<(), ApiError> {
        self.edit(
            &SetColumnFormula {
                sheet_index,
                column_id,
                formula_label,
                new_formula: new_formula.into(),
                index_labels_formula_is_applied_to,
                cell_editor_location: cell_editor_location.into(),
            },
            None,
        )
        .await
        .map(drop)
    }

    // Filtering and sorting
    // ========================================================================

    /// Replace the filters on one column. Overwrite-capable, so a filter
    /// form keeps refining one step.
    pub async fn filter_column(
        &self,
        sheet_index: usize,
        column_id: ColumnId,
        operator: FilterOperator,
        filters: Vec<Value>,
        filter_location: impl Into<String>,
        step: Option<&StepHandle>,
    ) -> Result<StepHandle, ApiError> {
        self.edit(
            &FilterColumn {
                sheet_index,
                column_id,
                operator,
                filters,
                filter_location: filter_location.into(),
            },
            step,
        )
        .await
    }

    /// Sort a sheet by one column. Overwrite-capable, so flipping the
    /// direction rewrites the same step.
    pub async fn sort_column(
        &self,
        sheet_index: usize,
        column_id: ColumnId,
        sort_direction: SortDirection,
        step: Option<&StepHandle>,
    ) -> Result<StepHandle, ApiError> {
        self.edit(
            &SortColumn {
                sheet_index,
                column_id,
                sort_direction,
            },
            step,
        )
        .await
    }

    // Whole-sheet operations
    // ========================================================================

    /// Transpose a sheet. Appends.
    pub async fn transpose(&self, sheet_index: usize) -> Result<(), ApiError> {
        self.edit(&Transpose { sheet_index }, None).await.map(drop)
    }

    /// One-hot encode a column. Appends.
    pub async fn one_hot_encoding(
        &self,
        sheet_index: usize,
        column_id: ColumnId,
    ) -> Result<(), ApiError> {
        self.edit(
            &OneHotEncoding {
                sheet_index,
                column_id,
            },
            None,
        )
        .await
        .map(drop)
    }

    /// Reset a sheet's index. Appends.
    pub async fn reset_index(&self, sheet_index: usize, drop_index: bool) -> Result<(), ApiError> {
        self.edit(
            &ResetIndex {
                sheet_index,
                drop: drop_index,
            },
            None,
        )
        .await
        .map(drop)
    }

    /// Apply an AI-generated transformation. Appends.
    pub async fn ai_transformation(
        &self,
        user_input: impl Into<String>,
        prompt_version: impl Into<String>,
        prompt: impl Into<String>,
        completion: impl Into<String>,
        edited_completion: impl Into<String>,
    ) -> Result<(), ApiError> {
        self.edit(
            &AiTransformation {
                user_input: user_input.into(),
                prompt_version: prompt_version.into(),
                prompt: prompt.into(),
                completion: completion.into(),
                edited_completion: edited_completion.into(),
            },
            None,
        )
        .await
        .map(drop)
    }

    // Dataframes
    // ========================================================================

    /// Rename the dataframe behind a sheet. Overwrite-capable, so typing
    /// in the rename field rewrites one step.
    pub async fn rename_dataframe(
        &self,
        sheet_index: usize,
        new_dataframe_name: impl Into<String>,
        step: Option<&StepHandle>,
    ) -> Result<StepHandle, ApiError> {
        self.edit(
            &RenameDataframe {
                sheet_index,
                new_dataframe_name: new_dataframe_name.into(),
            },
            step,
        )
        .await
    }

    /// Duplicate a sheet. Appends.
    pub async fn duplicate_dataframe(&self, sheet_index: usize) -> Result<(), ApiError> {
        self.edit(&DuplicateDataframe { sheet_index }, None)
            .await
            .map(drop)
    }

    /// Delete a sheet. Appends.
    pub async fn delete_dataframe(&self, sheet_index: usize) -> Result<(), ApiError> {
        self.edit(&DeleteDataframe { sheet_index }, None)
            .await
            .map(drop)
    }

    /// Replace the display format of a sheet. Appends.
    pub async fn set_dataframe_format(
        &self,
        sheet_index: usize,
        df_format: Value,
    ) -> Result<(), ApiError> {
        self.edit(
            &SetDataframeFormat {
                sheet_index,
                df_format,
            },
            None,
        )
        .await
        .map(drop)
    }

    // Imports
    // ========================================================================

    /// Import CSV files with default options. Appends.
    pub async fn simple_import(&self, file_names: Vec<String>) -> Result<(), ApiError> {
        self.edit(&SimpleImport { file_names }, None)
            .await
            .map(drop)
    }

    /// Import worksheets from an Excel file. Overwrite-capable, so the
    /// import form can keep adjusting one step.
    pub async fn excel_import(
        &self,
        file_name: impl Into<String>,
        sheet_names: Vec<String>,
        has_headers: bool,
        skiprows: u64,
        step: Option<&StepHandle>,
    ) -> Result<StepHandle, ApiError> {
        self.edit(
            &ExcelImport {
                file_name: file_name.into(),
                sheet_names,
                has_headers,
                skiprows,
            },
            step,
        )
        .await
    }

    // Graphs
    // ========================================================================

    /// Create or restyle a graph. Overwrite-capable, so dragging a style
    /// control rewrites one step.
    pub async fn edit_graph(
        &self,
        params: EditGraph,
        step: Option<&StepHandle>,
    ) -> Result<StepHandle, ApiError> {
        self.edit(&params, step).await
    }

    /// Delete a graph. Appends.
    pub async fn delete_graph(&self, graph_id: impl Into<String>) -> Result<(), ApiError> {
        self.edit(
            &DeleteGraph {
                graph_id: graph_id.into(),
            },
            None,
        )
        .await
        .map(drop)
    }

    /// Duplicate a graph under a new id. Appends.
    pub async fn duplicate_graph(
        &self,
        old_graph_id: impl Into<String>,
        new_graph_id: impl Into<String>,
    ) -> Result<(), ApiError> {
        self.edit(
            &DuplicateGraph {
                old_graph_id: old_graph_id.into(),
                new_graph_id: new_graph_id.into(),
            },
            None,
        )
        .await
        .map(drop)
    }

    /// Rename a graph tab. Appends.
    pub async fn rename_graph(
        &self,
        graph_id: impl Into<String>,
        new_graph_tab_name: impl Into<String>,
    ) -> Result<(), ApiError> {
        self.edit(
            &RenameGraph {
                graph_id: graph_id.into(),
                new_graph_tab_name: new_graph_tab_name.into(),
            },
            None,
        )
        .await
        .map(drop)
    }
}
