use crate::process::casing::uppercase_column;
use crate::process::date_parser;
use crate::process::utils::{as_string_array, column_index, replace_column};
use anyhow::{Context, Result};
use arrow::{
    array::{Array, ArrayRef, Date32Builder},
    datatypes::Date32Type,
    record_batch::RecordBatch,
};
use std::sync::Arc;
use tracing::debug;

/// Keep exactly `names`, in that order. Any name not in the batch is an error.
pub fn select_columns<S: AsRef<str>>(batch: &RecordBatch, names: &[S]) -> Result<RecordBatch> {
    let indices = names
        .iter()
        .map(|n| column_index(batch, n.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    batch.project(&indices).context("projecting columns")
}

/// Replace `column` with a Date32 column parsed from `dd/MM/yyyy` text.
/// Values that do not match the pattern become null, including columns that
/// were already inferred as dates.
pub fn parse_day_first_dates(batch: &RecordBatch, column: &str) -> Result<RecordBatch> {
    let idx = column_index(batch, column)?;
    let arr = batch.column(idx);

    // every value goes through the text pattern, whatever type was inferred
    let text = as_string_array(arr)?;
    let mut b = Date32Builder::with_capacity(text.len());
    for opt in text.iter() {
        let days = opt
            .and_then(date_parser::parse_day_first_date)
            .map(Date32Type::from_naive_date);
        b.append_option(days);
    }
    let dates: ArrayRef = Arc::new(b.finish());

    debug!(
        column,
        unparsed = dates.null_count().saturating_sub(arr.null_count()),
        "parsed dates"
    );
    replace_column(batch, idx, dates)
}

/// Projection, date parsing and brand normalisation, in that order.
/// Never drops rows.
pub fn clean_occurrences<S: AsRef<str>>(
    batch: &RecordBatch,
    columns: &[S],
    date_column: &str,
    brand_column: &str,
) -> Result<RecordBatch> {
    let selected = select_columns(batch, columns)?;
    let dated = parse_day_first_dates(&selected, date_column)?;
    uppercase_column(&dated, brand_column)
}
