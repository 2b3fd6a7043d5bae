use anyhow::Result;
use arrow::array::{ArrayRef, Float64Array};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

use crate::process::utils::{set_column, string_column};

pub const NUMERIC_COLUMNS: &[&str] = &[
    "lead_time",
    "adults",
    "children",
    "babies",
    "previous_cancellations",
    "previous_bookings_not_canceled",
    "days_in_waiting_list",
    "adr",
    "required_car_parking_spaces",
    "total_of_special_requests",
];

/// Parse a decimal or scientific number. Anything else, including `inf` and
/// `nan`, is `None`. `-0` comes back as `0.0` so equal values stay equal
/// bit for bit.
pub fn parse_number(raw: &str) -> Option<f64> {
    let v: f64 = raw.trim().parse().ok()?;
    v.is_finite().then_some(v + 0.0)
}

/// Coerce text columns to `Float64`; unparsable cells become null.
pub fn coerce_numeric(batch: &RecordBatch, columns: &[&str]) -> Result<RecordBatch> {
    let mut out = batch.clone();
    for name in columns {
        let numbers: Float64Array = string_column(&out, name)?
            .iter()
            .map(|v| v.and_then(parse_number))
            .collect();
        out = set_column(&out, name, Arc::new(numbers) as ArrayRef)?;
    }
    Ok(out)
}
