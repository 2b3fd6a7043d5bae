use anyhow::Result;
use sqlx::Connection;
use std::time::Instant;
use tracing::{info, instrument, warn};

use crate::{
    config::PipelineConfig,
    db, load, process,
    schema::{table_name_from_path, TableSchema},
};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub table: String,
    pub rows: u64,
}

/// Load, clean and persist one CSV file.
///
/// Everything up to cleaning happens before the store is touched, so input
/// and transformation errors leave the destination alone. The connection is
/// closed on every path out of the persistence step.
#[instrument(level = "info", skip(config), fields(csv = %config.csv_path.display()))]
pub async fn run(config: &PipelineConfig) -> Result<LoadReport> {
    let start = Instant::now();
    let table = table_name_from_path(&config.csv_path)?;

    let raw = load::read_csv(&config.csv_path)?;
    let cleaned = process::clean(&raw)?;
    let schema = TableSchema::from_batch(table, &cleaned);

    let mut conn = db::connect(&config.database.url()?).await?;
    let result = db::replace_table(&mut conn, &schema, &cleaned).await;
    if let Err(e) = conn.close().await {
        warn!(error = %e, "closing database connection");
    }
    let rows = result?;

    info!(table = %schema.name, rows, elapsed = ?start.elapsed(), "pipeline finished");
    Ok(LoadReport {
        table: schema.name,
        rows,
    })
}
