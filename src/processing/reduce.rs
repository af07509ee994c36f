//! Column reductions for [`crate::types::DataSet`].

use crate::types::{DataSet, DataType, Value};

/// Built-in reduction operations over a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count non-null values.
    NonNullCount,
    /// Minimum numeric value, ignoring nulls.
    Min,
    /// Maximum numeric value, ignoring nulls.
    Max,
    /// Arithmetic mean of numeric values as `Float64`, ignoring nulls.
    Mean,
}

/// Reduce the column named `column` using a built-in [`ReduceOp`].
///
/// Duplicate names resolve to the first matching field; use [`reduce_column`] to address a
/// column by position.
///
/// - Returns `None` if `column` does not exist in the schema.
/// - For `NonNullCount`, returns `Some(Value::Int64(n))` for any column type.
/// - For `Min`/`Max`, the result keeps the column's numeric type, and is `Some(Value::Null)` for
///   non-numeric or all-null columns.
/// - For `Mean`, returns `Some(Value::Float64(_))`, or `Some(Value::Null)` for non-numeric or
///   all-null columns.
pub fn reduce(dataset: &DataSet, column: &str, op: ReduceOp) -> Option<Value> {
    let idx = dataset.schema.index_of(column)?;
    reduce_column(dataset, idx, op)
}

/// Reduce the column at position `idx`. Returns `None` when `idx` is outside the schema.
pub fn reduce_column(dataset: &DataSet, idx: usize, op: ReduceOp) -> Option<Value> {
    let field = dataset.schema.fields.get(idx)?;

    let value = match op {
        ReduceOp::NonNullCount => {
            let n = dataset.column(idx).filter(|v| !v.is_null()).count();
            Value::Int64(n as i64)
        }
        ReduceOp::Mean => {
            let (sum, n) = dataset
                .column(idx)
                .filter_map(Value::as_f64)
                .fold((0.0_f64, 0_usize), |(s, n), v| (s + v, n + 1));
            if n == 0 {
                Value::Null
            } else {
                Value::Float64(sum / n as f64)
            }
        }
        ReduceOp::Min | ReduceOp::Max => extreme(dataset, idx, field.data_type, op),
    };
    Some(value)
}

fn extreme(dataset: &DataSet, idx: usize, data_type: DataType, op: ReduceOp) -> Value {
    match data_type {
        DataType::Int64 => dataset
            .column(idx)
            .filter_map(|v| match v {
                Value::Int64(i) => Some(*i),
                _ => None,
            })
            .reduce(|acc, v| pick(op, acc, v))
            .map_or(Value::Null, Value::Int64),
        DataType::Float64 => dataset
            .column(idx)
            .filter_map(|v| match v {
                Value::Float64(f) => Some(*f),
                _ => None,
            })
            .reduce(|acc, v| pick(op, acc, v))
            .map_or(Value::Null, Value::Float64),
        DataType::Bool | DataType::Utf8 => Value::Null,
    }
}

fn pick<T: PartialOrd>(op: ReduceOp, current: T, candidate: T) -> T {
    let replace = match op {
        ReduceOp::Min => candidate < current,
        _ => candidate > current,
    };
    if replace { candidate } else { current }
}
