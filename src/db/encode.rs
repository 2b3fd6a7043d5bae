use anyhow::{bail, Result};
use arrow::{
    array::{Array, ArrayRef, AsArray},
    datatypes::{DataType, Date32Type, Float64Type, Int32Type},
};

/// Text form of one cell as it is stored in a `TEXT` column; `None` is SQL
/// `NULL`.
pub fn render_cell(array: &ArrayRef, row: usize) -> Result<Option<String>> {
    if array.is_null(row) {
        return Ok(None);
    }
    let text = match array.data_type() {
        DataType::Utf8 => array.as_string::<i32>().value(row).to_string(),
        DataType::Float64 => format_number(array.as_primitive::<Float64Type>().value(row)),
        DataType::Int32 => array.as_primitive::<Int32Type>().value(row).to_string(),
        DataType::Date32 => match array.as_primitive::<Date32Type>().value_as_date(row) {
            Some(d) => d.format("%Y-%m-%d").to_string(),
            None => return Ok(None),
        },
        other => bail!("cannot store a {} column as text", other),
    };
    Ok(Some(text))
}

/// Whole numbers print without a fractional part (`342`, not `342.0`).
pub fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}
