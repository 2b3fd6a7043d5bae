use anyhow::Result;
use arrow::array::{ArrayRef, StringArray};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

use crate::process::utils::{set_column, string_column};

/// Literal fill values for booking columns whose missing cells get a default.
/// Every other column keeps its nulls.
pub const DEFAULTS: &[(&str, &str)] = &[
    ("is_canceled", "0"),
    ("country", "Unknown"),
    ("meal", "Undefined"),
    ("market_segment", "Unknown"),
    ("distribution_channel", "Unknown"),
    ("reserved_room_type", "Undefined"),
    ("assigned_room_type", "Undefined"),
    ("deposit_type", "No Deposit"),
    ("agent", "Unknown"),
    ("company", "Unknown"),
    ("customer_type", "Unknown"),
    ("reservation_status", "Unknown"),
];

pub fn fill_defaults(batch: &RecordBatch) -> Result<RecordBatch> {
    let mut out = batch.clone();
    for &(name, default) in DEFAULTS {
        let filled: StringArray = string_column(&out, name)?
            .iter()
            .map(|v| Some(v.unwrap_or(default)))
            .collect();
        out = set_column(&out, name, Arc::new(filled) as ArrayRef)?;
    }
    Ok(out)
}
