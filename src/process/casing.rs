use crate::process::utils::{as_string_array, column_index, replace_column};
use anyhow::Result;
use arrow::{
    array::{ArrayRef, StringArray},
    record_batch::RecordBatch,
};
use std::sync::Arc;

/// Uppercase one column. Nulls stay null; non-text columns are rendered as text first.
pub fn uppercase_column(batch: &RecordBatch, column: &str) -> Result<RecordBatch> {
    let idx = column_index(batch, column)?;
    let text = as_string_array(batch.column(idx))?;
    let upper: StringArray = text.iter().map(|opt| opt.map(str::to_uppercase)).collect();
    replace_column(batch, idx, Arc::new(upper) as ArrayRef)
}
