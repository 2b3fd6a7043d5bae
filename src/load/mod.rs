use anyhow::{anyhow, bail, Context, Result};
use arrow::{
    array::{ArrayRef, StringArray},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use std::{collections::HashSet, fs, path::Path, sync::Arc};
use tracing::{debug, info, instrument};

mod lines;

use lines::{scan_lines, LineKind};

/// Cell contents that load as null. These are the tokens pandas treats as
/// missing by default; the hotel dataset uses `NULL` for absent agents and
/// companies.
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing(cell: &str) -> bool {
    NA_TOKENS.contains(&cell)
}

/// Read a CSV file into a batch of nullable `Utf8` columns.
#[instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<RecordBatch> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let text = String::from_utf8(bytes)
        .with_context(|| format!("{} is not valid UTF-8", path.display()))?;

    let batch = parse_csv(&text).with_context(|| format!("parsing CSV {}", path.display()))?;
    info!(
        rows = batch.num_rows(),
        columns = batch.num_columns(),
        "loaded csv"
    );
    Ok(batch)
}

/// Parse CSV text. The first non-blank line is the header; every later blank
/// line becomes an all-null row in its file position. Short rows are padded
/// with nulls, long rows are rejected.
pub fn parse_csv(text: &str) -> Result<RecordBatch> {
    let mut kinds = scan_lines(text)
        .into_iter()
        .skip_while(|k| *k == LineKind::Blank);
    if kinds.next().is_none() {
        bail!("no header row");
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV header")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let mut seen = HashSet::new();
    for (idx, name) in headers.iter().enumerate() {
        if name.is_empty() {
            bail!("header at index {} is empty", idx);
        }
        if !seen.insert(name.as_str()) {
            bail!("duplicate column name `{}` in header", name);
        }
    }

    let width = headers.len();
    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); width];
    let mut records = reader.into_records();
    let mut blank_rows = 0usize;

    for kind in kinds {
        match kind {
            LineKind::Blank => {
                blank_rows += 1;
                for col in columns.iter_mut() {
                    col.push(None);
                }
            }
            LineKind::Record => {
                let record = records
                    .next()
                    .ok_or_else(|| anyhow!("CSV reader ended before the last record"))?
                    .context("reading CSV record")?;
                if record.len() > width {
                    let line = record.position().map(|p| p.line()).unwrap_or_default();
                    bail!(
                        "line {}: expected at most {} fields, found {}",
                        line,
                        width,
                        record.len()
                    );
                }
                for (i, col) in columns.iter_mut().enumerate() {
                    let cell = record.get(i).filter(|c| !is_missing(c));
                    col.push(cell.map(str::to_string));
                }
            }
        }
    }
    debug!(blank_rows, "kept blank lines as null rows");

    let fields: Vec<Field> = headers
        .iter()
        .map(|h| Field::new(h, DataType::Utf8, true))
        .collect();
    let arrays: Vec<ArrayRef> = columns
        .into_iter()
        .map(|cells| Arc::new(StringArray::from(cells)) as ArrayRef)
        .collect();

    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).map_err(Into::into)
}
