// src/report/mod.rs
use crate::aggregate::View;
use anyhow::{Context, Result};
use arrow::{
    datatypes::{DataType, Schema},
    util::{display::FormatOptions, pretty::pretty_format_batches_with_options},
};
use std::io::Write;

/// Short type name shown in the schema tree.
pub fn type_name(dt: &DataType) -> String {
    match dt {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => "string".into(),
        DataType::Int8 => "byte".into(),
        DataType::Int16 => "short".into(),
        DataType::Int32 => "integer".into(),
        DataType::Int64 => "long".into(),
        DataType::Float32 => "float".into(),
        DataType::Float64 => "double".into(),
        DataType::Boolean => "boolean".into(),
        DataType::Date32 | DataType::Date64 => "date".into(),
        DataType::Timestamp(_, _) => "timestamp".into(),
        DataType::Null => "void".into(),
        other => other.to_string().to_lowercase(),
    }
}

/// Print `schema` as an indented tree, one field per line.
pub fn write_schema<W: Write>(out: &mut W, schema: &Schema) -> Result<()> {
    writeln!(out, "root")?;
    for f in schema.fields() {
        writeln!(
            out,
            " |-- {}: {} (nullable = {})",
            f.name(),
            type_name(f.data_type()),
            f.is_nullable()
        )?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn write_load_summary<W: Write>(out: &mut W, rows: usize, schema: &Schema) -> Result<()> {
    writeln!(out, "Total de registros no arquivo original: {}", rows)?;
    writeln!(out, "Esquema do DataFrame original:")?;
    write_schema(out, schema)
}

pub fn write_clean_summary<W: Write>(
    out: &mut W,
    initial: usize,
    cleaned: usize,
    schema: &Schema,
) -> Result<()> {
    writeln!(out, "\nTotal de registros após a limpeza: {}", cleaned)?;
    writeln!(
        out,
        "Número de registros removidos: {}",
        initial as i64 - cleaned as i64
    )?;
    writeln!(out, "Esquema do DataFrame limpo:")?;
    write_schema(out, schema)
}

/// Print one view as `--- n. title ---` followed by the full table.
pub fn write_view<W: Write>(out: &mut W, number: usize, view: &View) -> Result<()> {
    writeln!(out, "\n--- {}. {} ---", number, view.title)?;
    let options = FormatOptions::default().with_null("null");
    let table = pretty_format_batches_with_options(std::slice::from_ref(&view.table), &options)
        .with_context(|| format!("formatting view {}", view.title))?;
    writeln!(out, "{}", table)?;
    Ok(())
}
