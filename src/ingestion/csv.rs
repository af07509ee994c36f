//! CSV loading.
//!
//! The selected file inside an archive is loaded here. Callers either pass a [`Schema`] (values are
//! parsed against it) or `None`, in which case column types are inferred from the data.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

use super::ingestor::DataIngestor;

/// Loads a bare `.csv` file. Not registered by default; see
/// [`super::DataIngestorFactory::register`].
#[derive(Debug, Clone, Default)]
pub struct CsvDataIngestor {
    schema: Option<Schema>,
}

impl CsvDataIngestor {
    /// Ingestor with inferred column types.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse against `schema` instead of inferring column types.
    pub fn with_schema(schema: Schema) -> Self {
        Self {
            schema: Some(schema),
        }
    }
}

impl DataIngestor for CsvDataIngestor {
    /// A CSV file is its own single candidate, so `file_name` is ignored.
    fn ingest(&self, path: &Path, _file_name: Option<&str>) -> IngestionResult<DataSet> {
        ingest_csv_from_path(path, self.schema.as_ref())
    }
}

/// Ingest a CSV file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - CSV must have headers. Repeated header names are made unique by suffixing `.1`, `.2`, ...
///   to later occurrences (`a,a` loads as `a`, `a.1`).
/// - With a schema: headers must contain all schema fields (order can differ) and each value is
///   parsed according to the schema field type.
/// - Without a schema: every header becomes a column and its type is inferred
///   (see [`infer_data_type`]).
pub fn ingest_csv_from_path(
    path: impl AsRef<Path>,
    schema: Option<&Schema>,
) -> IngestionResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    match schema {
        Some(schema) => ingest_csv_from_reader(&mut rdr, schema),
        None => ingest_csv_inferred(&mut rdr),
    }
}

/// Ingest CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    schema: &Schema,
) -> IngestionResult<DataSet> {
    let headers = read_headers(rdr)?;

    // Map schema fields -> CSV column indexes (allows re-ordered CSV columns).
    let mut col_idxs = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        match headers.iter().position(|h| *h == field.name) {
            Some(idx) => col_idxs.push(idx),
            None => {
                return Err(IngestionError::SchemaMismatch {
                    message: format!(
                        "missing required column '{field}'. headers={headers:?}",
                        field = field.name
                    ),
                });
            }
        }
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for (field, &csv_idx) in schema.fields.iter().zip(col_idxs.iter()) {
            let raw = record.get(csv_idx).unwrap_or("");
            row.push(parse_typed_value(user_row, &field.name, field.data_type, raw)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

/// Ingest CSV data, inferring one [`DataType`] per column from its non-empty cells.
pub fn ingest_csv_inferred<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> IngestionResult<DataSet> {
    let headers = read_headers(rdr)?;

    let mut raw_rows: Vec<csv::StringRecord> = Vec::new();
    for result in rdr.records() {
        raw_rows.push(result?);
    }

    let fields = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let column = raw_rows.iter().map(|r| r.get(idx).unwrap_or(""));
            Field::new(name.clone(), infer_data_type(column))
        })
        .collect();
    let schema = Schema::new(fields);

    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(raw_rows.len());
    for (row_idx0, record) in raw_rows.iter().enumerate() {
        let user_row = row_idx0 + 2;
        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for (idx, field) in schema.fields.iter().enumerate() {
            let raw = record.get(idx).unwrap_or("");
            row.push(parse_typed_value(user_row, &field.name, field.data_type, raw)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema, rows))
}

/// Pick the narrowest type every non-empty cell parses as.
///
/// Order: `Int64`, `Float64`, `Bool` (`true`/`false`, any case), then `Utf8`. A column with no
/// non-empty cells is `Utf8`.
pub fn infer_data_type<'a>(cells: impl IntoIterator<Item = &'a str>) -> DataType {
    let mut int_ok = true;
    let mut float_ok = true;
    let mut bool_ok = true;
    let mut seen = false;

    for cell in cells {
        let cell = cell.trim();
        if cell.is_empty() {
            continue;
        }
        seen = true;
        int_ok = int_ok && cell.parse::<i64>().is_ok();
        float_ok = float_ok && cell.parse::<f64>().is_ok();
        bool_ok = bool_ok && matches!(cell.to_ascii_lowercase().as_str(), "true" | "false");
        if !(int_ok || float_ok || bool_ok) {
            break;
        }
    }

    match (seen, int_ok, float_ok, bool_ok) {
        (false, ..) => DataType::Utf8,
        (true, true, _, _) => DataType::Int64,
        (true, false, true, _) => DataType::Float64,
        (true, false, false, true) => DataType::Bool,
        _ => DataType::Utf8,
    }
}

fn read_headers<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> IngestionResult<Vec<String>> {
    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_owned()).collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(IngestionError::SchemaMismatch {
            message: "csv has no header columns".to_string(),
        });
    }
    Ok(dedup_headers(headers))
}

/// Rename repeated headers to `name.1`, `name.2`, ..., skipping suffixes already taken.
fn dedup_headers(headers: Vec<String>) -> Vec<String> {
    let mut taken: HashSet<String> = headers.iter().cloned().collect();
    let mut emitted: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut next_suffix: HashMap<String, usize> = HashMap::new();

    let mut out = Vec::with_capacity(headers.len());
    for header in headers {
        if emitted.insert(header.clone()) {
            out.push(header);
            continue;
        }
        let suffix = next_suffix.entry(header.clone()).or_insert(1);
        let mut name = format!("{header}.{suffix}");
        while taken.contains(&name) {
            *suffix += 1;
            name = format!("{header}.{suffix}");
        }
        *suffix += 1;
        taken.insert(name.clone());
        emitted.insert(name.clone());
        out.push(name);
    }
    out
}

fn parse_typed_value(
    row: usize,
    column: &str,
    data_type: DataType,
    raw: &str,
) -> IngestionResult<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }

    let parse_err = |message: String| IngestionError::ParseError {
        row,
        column: column.to_owned(),
        raw: raw.to_owned(),
        message,
    };

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(trimmed.to_owned())),
        DataType::Int64 => trimmed
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(|e| parse_err(e.to_string())),
        DataType::Float64 => trimmed
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(|e| parse_err(e.to_string())),
        DataType::Bool => parse_bool(trimmed).map(Value::Bool).map_err(parse_err),
    }
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Ok(true),
        "false" | "f" | "0" | "no" | "n" => Ok(false),
        _ => Err("expected bool (true/false/1/0/yes/no)".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{dedup_headers, infer_data_type, ingest_csv_inferred};
    use crate::types::{DataType, Value};

    #[test]
    fn infer_prefers_narrowest_type() {
        assert_eq!(infer_data_type(["1", "2", " 3 "]), DataType::Int64);
        assert_eq!(infer_data_type(["1", "2.5"]), DataType::Float64);
        assert_eq!(infer_data_type(["true", "FALSE"]), DataType::Bool);
        assert_eq!(infer_data_type(["1", "abc"]), DataType::Utf8);
    }

    #[test]
    fn infer_skips_empty_cells() {
        assert_eq!(infer_data_type(["", "4", "  "]), DataType::Int64);
        assert_eq!(infer_data_type(["", ""]), DataType::Utf8);
        assert_eq!(infer_data_type(std::iter::empty::<&str>()), DataType::Utf8);
    }

    #[test]
    fn inferred_ingest_maps_empty_cells_to_null() {
        let input = "Name,Age\nAda,36\nGrace,\n";
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(input.as_bytes());

        let ds = ingest_csv_inferred(&mut rdr).unwrap();
        assert_eq!(ds.shape(), (2, 2));
        assert_eq!(ds.schema.fields[1].data_type, DataType::Int64);
        assert_eq!(ds.rows[1][1], Value::Null);
    }

    #[test]
    fn repeated_headers_get_numbered_suffixes() {
        fn names(headers: &[&str]) -> Vec<String> {
            dedup_headers(headers.iter().map(|h| h.to_string()).collect())
        }
        assert_eq!(names(&["a", "a", "b", "a"]), vec!["a", "a.1", "b", "a.2"]);
        assert_eq!(names(&["a", "a.1", "a"]), vec!["a", "a.1", "a.2"]);
        assert_eq!(names(&["x", "y"]), vec!["x", "y"]);
    }

    #[test]
    fn repeated_headers_load_as_distinct_columns() {
        let input = "a,a\nx,10\ny,20\n";
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(input.as_bytes());

        let ds = ingest_csv_inferred(&mut rdr).unwrap();
        let names: Vec<_> = ds.schema.field_names().collect();
        assert_eq!(names, vec!["a", "a.1"]);
        assert_eq!(ds.schema.fields[0].data_type, DataType::Utf8);
        assert_eq!(ds.schema.fields[1].data_type, DataType::Int64);
        assert_eq!(ds.rows[1][1], Value::Int64(20));
    }

    #[test]
    fn inferred_ingest_rejects_headerless_input() {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader("".as_bytes());

        let err = ingest_csv_inferred(&mut rdr).unwrap_err();
        assert!(err.to_string().contains("no header columns"));
    }
}
