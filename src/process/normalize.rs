use anyhow::Result;
use arrow::{
    array::{ArrayRef, Float64Array},
    compute::{max, min},
    record_batch::RecordBatch,
};
use std::sync::Arc;

use crate::process::utils::{float_column, set_column};

/// Min-max scale into [0, 1]. A constant column maps to all zeros; nulls stay
/// null.
pub fn min_max(values: &Float64Array) -> Float64Array {
    let (Some(lo), Some(hi)) = (min(values), max(values)) else {
        return values.iter().collect();
    };
    let range = hi - lo;
    values
        .iter()
        .map(|v| v.map(|x| if range == 0.0 { 0.0 } else { (x - lo) / range }))
        .collect()
}

/// Append `target` holding the min-max scaled copy of `source`.
pub fn add_normalized(batch: &RecordBatch, source: &str, target: &str) -> Result<RecordBatch> {
    let scaled = min_max(float_column(batch, source)?);
    set_column(batch, target, Arc::new(scaled) as ArrayRef)
}
