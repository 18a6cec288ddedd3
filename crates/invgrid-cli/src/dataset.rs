//! Dataset and schema loading for the demo CLI.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde_json::Value;

use invgrid_model::{FieldKind, FieldSpec, FilterValue};

/// Load rows from a file: `.csv` goes through the CSV reader, everything
/// else is parsed as a JSON array of objects.
pub fn load_rows(path: &Path) -> Result<Vec<Value>> {
    let file =
        File::open(path).with_context(|| format!("open dataset {}", path.display()))?;
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        rows_from_csv(file)
    } else {
        rows_from_json(file)
    }
}

/// Parse a JSON array of objects.
pub fn rows_from_json(reader: impl Read) -> Result<Vec<Value>> {
    let rows: Vec<Value> = serde_json::from_reader(reader).context("parse JSON dataset")?;
    for (index, row) in rows.iter().enumerate() {
        if !row.is_object() {
            bail!("dataset row {index} is not an object");
        }
    }
    Ok(rows)
}

/// Parse CSV with a header row. Cells that read as numbers or booleans
/// are typed as such; everything else stays a string.
pub fn rows_from_csv(reader: impl Read) -> Result<Vec<Value>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers().context("read CSV header")?.clone();
    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.context("read CSV record")?;
        let mut row = serde_json::Map::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            row.insert(header.to_string(), coerce_cell(cell));
        }
        rows.push(Value::Object(row));
    }
    Ok(rows)
}

fn coerce_cell(cell: &str) -> Value {
    if let Ok(flag) = cell.parse::<bool>() {
        return Value::Bool(flag);
    }
    if let Ok(number) = cell.parse::<f64>()
        && let Some(number) = serde_json::Number::from_f64(number)
    {
        return Value::Number(number);
    }
    Value::String(cell.to_string())
}

/// Load a filter schema: a JSON array of field specs.
pub fn load_schema(path: &Path) -> Result<Vec<FieldSpec>> {
    let file = File::open(path).with_context(|| format!("open schema {}", path.display()))?;
    serde_json::from_reader(file).context("parse filter schema")
}

/// Parse one `--filter KEY=VALUE` argument against the schema. The
/// field's kind decides how the raw text is read; a date range is
/// written `start..end` with either side optional.
pub fn parse_filter_arg(fields: &[FieldSpec], arg: &str) -> Result<(String, FilterValue)> {
    let (key, raw) = arg
        .split_once('=')
        .with_context(|| format!("expected KEY=VALUE, got `{arg}`"))?;
    let field = fields
        .iter()
        .find(|field| field.key == key)
        .with_context(|| format!("schema has no field `{key}`"))?;
    let value = parse_filter_value(field.kind, raw)
        .with_context(|| format!("invalid {} value `{raw}` for `{key}`", field.kind))?;
    Ok((key.to_string(), value))
}

fn parse_filter_value(kind: FieldKind, raw: &str) -> Result<FilterValue> {
    Ok(match kind {
        FieldKind::Text | FieldKind::Select => FilterValue::text(raw),
        FieldKind::Number => FilterValue::Number(Some(raw.parse()?)),
        FieldKind::Boolean => FilterValue::Flag(raw.parse()?),
        FieldKind::Date => FilterValue::Date(Some(parse_day(raw)?)),
        FieldKind::DateRange => {
            let (start, end) = raw
                .split_once("..")
                .with_context(|| format!("expected START..END, got `{raw}`"))?;
            FilterValue::DateRange(parse_bound(start)?, parse_bound(end)?)
        }
    })
}

fn parse_day(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("expected YYYY-MM-DD, got `{raw}`"))
}

fn parse_bound(raw: &str) -> Result<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    parse_day(raw).map(Some)
}
