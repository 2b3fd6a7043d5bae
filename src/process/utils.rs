use anyhow::{anyhow, Result};
use arrow::{
    array::{ArrayRef, AsArray, Float64Array, StringArray},
    datatypes::{Field, Schema},
    record_batch::RecordBatch,
};
use std::sync::Arc;

pub fn column_index(batch: &RecordBatch, name: &str) -> Result<usize> {
    batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow!("column `{}` not found in input", name))
}

/// Borrow a column that must still be text.
pub fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    let idx = column_index(batch, name)?;
    batch
        .column(idx)
        .as_string_opt::<i32>()
        .ok_or_else(|| anyhow!("column `{}` is {}, expected text", name, batch.column(idx).data_type()))
}

/// Borrow a column that has been coerced to numbers.
pub fn float_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Float64Array> {
    let idx = column_index(batch, name)?;
    batch
        .column(idx)
        .as_primitive_opt()
        .ok_or_else(|| anyhow!("column `{}` is {}, expected numeric", name, batch.column(idx).data_type()))
}

/// Replace the column called `name` (keeping its position) or append it at
/// the end. The field type follows the new array.
pub fn set_column(batch: &RecordBatch, name: &str, array: ArrayRef) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut fields: Vec<Field> = schema.fields().iter().map(|f| f.as_ref().clone()).collect();
    let mut columns = batch.columns().to_vec();
    let field = Field::new(name, array.data_type().clone(), true);

    match schema.index_of(name) {
        Ok(idx) => {
            fields[idx] = field;
            columns[idx] = array;
        }
        Err(_) => {
            fields.push(field);
            columns.push(array);
        }
    }

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).map_err(Into::into)
}
