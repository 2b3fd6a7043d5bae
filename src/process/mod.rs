//! Booking-table cleaning. Each step takes a batch and returns a new one;
//! the order below matters because later steps read the types earlier ones
//! produce.

pub mod date_parser;
pub mod dates;
pub mod dedup;
pub mod defaults;
pub mod filter;
pub mod normalize;
pub mod numeric;
pub mod utils;

use anyhow::Result;
use arrow::record_batch::RecordBatch;
use tracing::{debug, info, instrument};

use defaults::DEFAULTS;
use numeric::NUMERIC_COLUMNS;

pub const ADR: &str = "adr";
pub const LEAD_TIME: &str = "lead_time";
pub const ARRIVAL_PARTS: [&str; 3] = [
    "arrival_date_year",
    "arrival_date_month",
    "arrival_date_day_of_month",
];
pub const RESERVATION_STATUS_DATE: &str = "reservation_status_date";

pub const ARRIVAL_DATE: &str = "arrival_date";
pub const ARRIVAL_PREFIX: &str = "arrival";
pub const ADR_NORMALIZED: &str = "adr_normalized";

/// Every input column the cleaning steps read.
pub fn required_columns() -> Vec<&'static str> {
    DEFAULTS
        .iter()
        .map(|(name, _)| *name)
        .chain(NUMERIC_COLUMNS.iter().copied())
        .chain(ARRIVAL_PARTS)
        .chain([RESERVATION_STATUS_DATE])
        .collect()
}

/// Run the full cleaning sequence over a freshly loaded all-text batch.
#[instrument(level = "info", skip(batch), fields(rows = batch.num_rows()))]
pub fn clean(batch: &RecordBatch) -> Result<RecordBatch> {
    for name in required_columns() {
        utils::column_index(batch, name)?;
    }

    let batch = defaults::fill_defaults(batch)?;
    let batch = numeric::coerce_numeric(&batch, NUMERIC_COLUMNS)?;
    let batch = dates::derive_date(&batch, ARRIVAL_PARTS, ARRIVAL_DATE)?;
    let batch = dates::coerce_date(&batch, RESERVATION_STATUS_DATE)?;
    let batch = dates::derive_date_parts(&batch, ARRIVAL_DATE, ARRIVAL_PREFIX)?;

    let before = batch.num_rows();
    let batch = filter::drop_negative_or_null(&batch, &[ADR, LEAD_TIME])?;
    debug!(
        dropped = before - batch.num_rows(),
        "dropped rows with negative or missing adr/lead_time"
    );

    let batch = normalize::add_normalized(&batch, ADR, ADR_NORMALIZED)?;

    let before = batch.num_rows();
    let batch = dedup::drop_duplicates(&batch)?;
    debug!(dropped = before - batch.num_rows(), "dropped duplicate rows");

    info!(rows = batch.num_rows(), columns = batch.num_columns(), "cleaned");
    Ok(batch)
}
