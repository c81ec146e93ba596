use anyhow::{anyhow, Context, Result};
use arrow::{
    array::{Array, ArrayRef, StringArray},
    compute::cast,
    datatypes::{DataType, Field, FieldRef, Schema},
    record_batch::RecordBatch,
};
use std::sync::Arc;

/// Position of `name` in the batch, or an error listing what is there.
pub fn column_index(batch: &RecordBatch, name: &str) -> Result<usize> {
    let schema = batch.schema();
    schema.index_of(name).map_err(|_| {
        let available: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        anyhow!(
            "cannot resolve column `{}` given input columns: [{}]",
            name,
            available.join(", ")
        )
    })
}

/// Render any column as text, the way it would be shown.
pub fn as_string_array(arr: &ArrayRef) -> Result<StringArray> {
    let utf8 = match arr.data_type() {
        DataType::Utf8 => arr.clone(),
        other => cast(arr, &DataType::Utf8)
            .with_context(|| format!("casting {:?} column to text", other))?,
    };
    utf8.as_any()
        .downcast_ref::<StringArray>()
        .cloned()
        .ok_or_else(|| anyhow!("expected StringArray, got {:?}", utf8.data_type()))
}

/// Copy of `batch` with column `idx` swapped for `array`, keeping the name.
pub fn replace_column(batch: &RecordBatch, idx: usize, array: ArrayRef) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut fields: Vec<FieldRef> = schema.fields().iter().cloned().collect();
    let mut columns = batch.columns().to_vec();

    let name = fields[idx].name().clone();
    fields[idx] = Arc::new(Field::new(name, array.data_type().clone(), true));
    columns[idx] = array;

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).map_err(Into::into)
}

/// Copy of `batch` with `array` added as the last column.
pub fn append_column(batch: &RecordBatch, name: &str, array: ArrayRef) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut fields: Vec<FieldRef> = schema.fields().iter().cloned().collect();
    let mut columns = batch.columns().to_vec();

    fields.push(Arc::new(Field::new(
        name,
        array.data_type().clone(),
        array.null_count() > 0,
    )));
    columns.push(array);

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
        .with_context(|| format!("appending column {}", name))
}
