use anyhow::{anyhow, Result};
use arrow::record_batch::RecordBatch;
use std::path::Path;

/// Destination table: the cleaned batch's column names, all stored as `TEXT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<String>,
}

impl TableSchema {
    pub fn from_batch(name: impl Into<String>, batch: &RecordBatch) -> Self {
        Self {
            name: name.into(),
            columns: batch
                .schema()
                .fields()
                .iter()
                .map(|f| f.name().clone())
                .collect(),
        }
    }

    pub fn drop_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {}", quote_ident(&self.name))
    }

    pub fn create_sql(&self) -> String {
        let cols: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("{} TEXT", quote_ident(c)))
            .collect();
        format!("CREATE TABLE {} ({})", quote_ident(&self.name), cols.join(", "))
    }

    /// Insert statement up to, not including, the `VALUES` list.
    pub fn insert_prefix(&self) -> String {
        let cols: Vec<String> = self.columns.iter().map(|c| quote_ident(c)).collect();
        format!("INSERT INTO {} ({}) ", quote_ident(&self.name), cols.join(", "))
    }

    /// How many rows fit in one insert without binding more than
    /// `max_params` values. Always at least one.
    pub fn rows_per_insert(&self, max_params: usize) -> usize {
        (max_params / self.columns.len().max(1)).max(1)
    }
}

/// Table name from a source path: directory and last extension removed.
pub fn table_name_from_path(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| anyhow!("cannot derive a table name from `{}`", path.display()))
}

/// Backtick-quote an identifier (MySQL and SQLite both accept this form).
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
