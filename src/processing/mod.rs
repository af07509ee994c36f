//! In-memory column reductions over a [`crate::types::DataSet`].
//!
//! [`reduce()`] looks a column up by name; [`reduce_column()`] takes its position, which is what
//! the [`crate::inspection`] reports use so that repeated header names stay distinct.
//!
//! ```rust
//! use rust_data_ingestion::processing::{ReduceOp, reduce, reduce_column};
//! use rust_data_ingestion::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let ds = DataSet::new(
//!     Schema::new(vec![Field::new("score", DataType::Float64)]),
//!     vec![
//!         vec![Value::Float64(10.0)],
//!         vec![Value::Float64(20.0)],
//!         vec![Value::Null],
//!     ],
//! );
//!
//! assert_eq!(reduce(&ds, "score", ReduceOp::Max), Some(Value::Float64(20.0)));
//! assert_eq!(reduce(&ds, "score", ReduceOp::NonNullCount), Some(Value::Int64(2)));
//! assert_eq!(reduce_column(&ds, 0, ReduceOp::Mean), Some(Value::Float64(15.0)));
//! ```

pub mod reduce;

pub use reduce::{ReduceOp, reduce, reduce_column};
