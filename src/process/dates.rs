use anyhow::{anyhow, Result};
use arrow::{
    array::{Array, ArrayRef, AsArray, Date32Array, Int32Array},
    datatypes::Date32Type,
    record_batch::RecordBatch,
};
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;

use crate::process::{
    date_parser::{compose_date, parse_date},
    utils::{column_index, set_column, string_column},
};

fn epoch_days(date: NaiveDate) -> i32 {
    (date - NaiveDate::default()).num_days() as i32
}

/// Combine year, month and day-of-month text columns into one `Date32`
/// column called `target`.
pub fn derive_date(
    batch: &RecordBatch,
    [year, month, day]: [&str; 3],
    target: &str,
) -> Result<RecordBatch> {
    let years = string_column(batch, year)?;
    let months = string_column(batch, month)?;
    let days = string_column(batch, day)?;

    let dates: Date32Array = years
        .iter()
        .zip(months.iter())
        .zip(days.iter())
        .map(|((y, m), d)| compose_date(y?, m?, d?).map(epoch_days))
        .collect();

    set_column(batch, target, Arc::new(dates) as ArrayRef)
}

/// Coerce a text column to `Date32`; unparsable cells become null.
pub fn coerce_date(batch: &RecordBatch, name: &str) -> Result<RecordBatch> {
    let dates: Date32Array = string_column(batch, name)?
        .iter()
        .map(|v| v.and_then(parse_date).map(epoch_days))
        .collect();
    set_column(batch, name, Arc::new(dates) as ArrayRef)
}

/// Append `<prefix>_year`, `<prefix>_month` and `<prefix>_day` taken from a
/// `Date32` column. Null dates give null parts.
pub fn derive_date_parts(batch: &RecordBatch, source: &str, prefix: &str) -> Result<RecordBatch> {
    let idx = column_index(batch, source)?;
    let dates = batch
        .column(idx)
        .as_primitive_opt::<Date32Type>()
        .ok_or_else(|| anyhow!("column `{}` is not a date column", source))?;

    let calendar: Vec<Option<NaiveDate>> = (0..dates.len())
        .map(|i| {
            if dates.is_null(i) {
                None
            } else {
                dates.value_as_date(i)
            }
        })
        .collect();

    let year: Int32Array = calendar.iter().map(|d| d.map(|d| d.year())).collect();
    let month: Int32Array = calendar.iter().map(|d| d.map(|d| d.month() as i32)).collect();
    let day: Int32Array = calendar.iter().map(|d| d.map(|d| d.day() as i32)).collect();

    let out = set_column(batch, &format!("{prefix}_year"), Arc::new(year) as ArrayRef)?;
    let out = set_column(&out, &format!("{prefix}_month"), Arc::new(month) as ArrayRef)?;
    set_column(&out, &format!("{prefix}_day"), Arc::new(day) as ArrayRef)
}
