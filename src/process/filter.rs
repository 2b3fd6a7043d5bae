use anyhow::Result;
use arrow::{array::BooleanArray, compute::filter_record_batch, record_batch::RecordBatch};

use crate::process::utils::float_column;

/// Keep only rows where every named numeric column holds a value `>= 0`.
/// A null never passes.
pub fn drop_negative_or_null(batch: &RecordBatch, columns: &[&str]) -> Result<RecordBatch> {
    let mut keep = vec![true; batch.num_rows()];
    for name in columns {
        let values = float_column(batch, name)?;
        for (k, v) in keep.iter_mut().zip(values.iter()) {
            *k &= matches!(v, Some(x) if x >= 0.0);
        }
    }
    let mask = BooleanArray::from(keep);
    filter_record_batch(batch, &mask).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::parse_csv;
    use crate::process::numeric::coerce_numeric;

    #[test]
    fn negative_and_null_rows_are_dropped() -> Result<()> {
        let text = "adr,lead_time,id\n75,3,a\n-5,3,b\n80,-1,c\n,2,d\n0,0,e\n\n90,oops,f\n";
        let batch = coerce_numeric(&parse_csv(text)?, &["adr", "lead_time"])?;
        let kept = drop_negative_or_null(&batch, &["adr", "lead_time"])?;

        let ids: Vec<Option<&str>> = crate::process::utils::string_column(&kept, "id")?
            .iter()
            .collect();
        assert_eq!(ids, vec![Some("a"), Some("e")]);
        Ok(())
    }
}
