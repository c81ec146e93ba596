// src/load/mod.rs
use anyhow::{Context, Result};
use arrow::{
    compute::concat_batches,
    csv::{reader::Format, ReaderBuilder},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use std::{
    fs::File,
    io::{BufReader, Seek},
    path::Path,
    sync::Arc,
};
use tracing::{debug, info, trace};

/// How the source CSV is laid out.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    pub delimiter: u8,
    pub has_header: bool,
    /// Rows per record batch while reading; batches are concatenated afterwards.
    pub batch_size: usize,
    /// `None` scans every record when inferring column types.
    pub infer_max_records: Option<usize>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            has_header: true,
            batch_size: 64 * 1024,
            infer_max_records: None,
        }
    }
}

impl LoaderOptions {
    // short rows are padded with nulls rather than rejected
    fn format(&self) -> Format {
        Format::default()
            .with_header(self.has_header)
            .with_delimiter(self.delimiter)
            .with_truncated_rows(true)
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("Failed to open CSV file: {:?}", path))
}

/// Infer column types from `file`. Columns with no values at all come back
/// as `Null` from arrow; those are read as text instead.
fn infer_from_file(file: &File, options: &LoaderOptions) -> Result<Schema> {
    let (schema, records) = options
        .format()
        .infer_schema(BufReader::new(file), options.infer_max_records)
        .context("inferring CSV schema")?;
    debug!(records, fields = schema.fields().len(), "inferred schema");

    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .map(|f| match f.data_type() {
            DataType::Null => Field::new(f.name(), DataType::Utf8, true),
            _ => f.as_ref().clone(),
        })
        .collect();
    Ok(Schema::new(fields))
}

/// Infer the schema of the CSV at `path` without loading its rows.
pub fn infer_schema<P: AsRef<Path>>(path: P, options: &LoaderOptions) -> Result<Schema> {
    let file = open(path.as_ref())?;
    infer_from_file(&file, options)
}

/// Load the occurrence CSV at `path` into a single record batch whose schema is
/// inferred from the data. The file is streamed twice: once to infer, once to read.
#[tracing::instrument(level = "info", skip(path, options), fields(path = %path.as_ref().display()))]
pub fn load_occurrences<P: AsRef<Path>>(path: P, options: &LoaderOptions) -> Result<RecordBatch> {
    let path = path.as_ref();
    let mut file = open(path)?;
    let schema = Arc::new(infer_from_file(&file, options)?);
    file.rewind().with_context(|| format!("rewinding {:?}", path))?;

    let reader = ReaderBuilder::new(schema.clone())
        .with_header(options.has_header)
        .with_delimiter(options.delimiter)
        .with_truncated_rows(true)
        .with_batch_size(options.batch_size)
        .build(BufReader::new(file))
        .context("creating CSV reader")?;

    let mut batches = Vec::new();
    for (idx, result) in reader.enumerate() {
        let batch =
            result.with_context(|| format!("CSV parse error in {:?} at batch {}", path, idx))?;
        trace!(batch = idx, rows = batch.num_rows(), "read batch");
        batches.push(batch);
    }

    // a single batch is already the table; only concatenate when there are several
    let table = if batches.len() == 1 {
        batches.remove(0)
    } else {
        concat_batches(&schema, &batches).context("concatenating record batches")?
    };
    info!(
        rows = table.num_rows(),
        columns = table.num_columns(),
        "loaded occurrences"
    );
    Ok(table)
}
