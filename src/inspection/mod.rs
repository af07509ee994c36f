//! Inspection of an ingested [`DataSet`].
//!
//! Strategies implement [`DataInspectionStrategy`] and return a report; a [`DataInspector`] holds
//! the current strategy and can be switched at runtime. Reports implement [`std::fmt::Display`]
//! for plain-text output and [`serde::Serialize`] for machine-readable output.
//!
//! ```rust
//! use rust_data_ingestion::inspection::{
//!     DataInspector, DataTypesInspectionStrategy, DescribeInspectionStrategy,
//! };
//! use rust_data_ingestion::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let ds = DataSet::new(
//!     Schema::new(vec![Field::new("Name", DataType::Utf8), Field::new("Age", DataType::Int64)]),
//!     vec![
//!         vec![Value::Utf8("Ada".into()), Value::Int64(36)],
//!         vec![Value::Utf8("Grace".into()), Value::Null],
//!     ],
//! );
//!
//! let mut inspector = DataInspector::new(DataTypesInspectionStrategy);
//! println!("{}", inspector.execute_inspection(&ds));
//!
//! inspector.set_strategy(DescribeInspectionStrategy);
//! println!("{}", inspector.execute_inspection(&ds));
//! ```
//!
//! Missing-value analysis lives in [`missing`].

mod describe;
pub mod missing;

use std::fmt;

use serde::Serialize;

use crate::processing::{ReduceOp, reduce_column};
use crate::types::{DataSet, DataType, Value};

pub use describe::{
    CategoricalSummary, DescribeInspectionStrategy, DescribeReport, NumericSummary,
};
pub use missing::{
    MissingColumn, MissingValuesAnalysis, MissingValuesReport, SimpleMissingValuesAnalysis,
    explore_missing_values,
};

/// A kind of inspection that can be run over a dataset.
pub trait DataInspectionStrategy: Send + Sync {
    /// Inspect `dataset` and return the findings.
    fn inspect(&self, dataset: &DataSet) -> InspectionReport;
}

/// Output of a [`DataInspectionStrategy`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InspectionReport {
    /// Column types and non-null counts.
    DataTypes(DataTypesReport),
    /// Descriptive statistics.
    Describe(DescribeReport),
}

impl fmt::Display for InspectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataTypes(r) => fmt::Display::fmt(r, f),
            Self::Describe(r) => fmt::Display::fmt(r, f),
        }
    }
}

/// Runs the currently selected inspection strategy.
pub struct DataInspector {
    strategy: Box<dyn DataInspectionStrategy>,
}

impl DataInspector {
    /// Create an inspector using `strategy`.
    pub fn new(strategy: impl DataInspectionStrategy + 'static) -> Self {
        Self {
            strategy: Box::new(strategy),
        }
    }

    /// Replace the current strategy.
    pub fn set_strategy(&mut self, strategy: impl DataInspectionStrategy + 'static) {
        self.strategy = Box::new(strategy);
    }

    /// Run the current strategy over `dataset`.
    pub fn execute_inspection(&self, dataset: &DataSet) -> InspectionReport {
        self.strategy.inspect(dataset)
    }
}

impl fmt::Debug for DataInspector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataInspector").finish_non_exhaustive()
    }
}

/// Reports each column's type and how many of its values are non-null.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataTypesInspectionStrategy;

/// Per-column entry of a [`DataTypesReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnTypeInfo {
    pub name: String,
    pub data_type: DataType,
    pub non_null: usize,
}

/// Result of [`DataTypesInspectionStrategy`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataTypesReport {
    pub rows: usize,
    pub columns: Vec<ColumnTypeInfo>,
}

impl DataInspectionStrategy for DataTypesInspectionStrategy {
    fn inspect(&self, dataset: &DataSet) -> InspectionReport {
        let columns = dataset
            .schema
            .fields
            .iter()
            .enumerate()
            .map(|(idx, field)| ColumnTypeInfo {
                name: field.name.clone(),
                data_type: field.data_type,
                non_null: count_non_null(dataset, idx),
            })
            .collect();

        InspectionReport::DataTypes(DataTypesReport {
            rows: dataset.row_count(),
            columns,
        })
    }
}

impl fmt::Display for DataTypesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Data types")?;
        writeln!(f, "rows: {}, columns: {}", self.rows, self.columns.len())?;
        let width = name_width(self.columns.iter().map(|c| c.name.as_str()));
        writeln!(f, "{:>3}  {:<width$}  {:>8}  dtype", "#", "column", "non-null")?;
        for (i, c) in self.columns.iter().enumerate() {
            writeln!(f, "{i:>3}  {:<width$}  {:>8}  {}", c.name, c.non_null, c.data_type)?;
        }
        Ok(())
    }
}

pub(crate) fn count_non_null(dataset: &DataSet, idx: usize) -> usize {
    match reduce_column(dataset, idx, ReduceOp::NonNullCount) {
        Some(Value::Int64(n)) => usize::try_from(n).unwrap_or_default(),
        _ => 0,
    }
}

pub(crate) fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(str::len).max().unwrap_or(0).max("column".len())
}

#[cfg(test)]
mod tests {
    use super::{
        DataInspector, DataTypesInspectionStrategy, DescribeInspectionStrategy, InspectionReport,
    };
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn people() -> DataSet {
        DataSet::new(
            Schema::new(vec![
                Field::new("Name", DataType::Utf8),
                Field::new("Age", DataType::Int64),
            ]),
            vec![
                vec![Value::Utf8("Ada".into()), Value::Int64(36)],
                vec![Value::Utf8("Grace".into()), Value::Null],
                vec![Value::Null, Value::Int64(41)],
            ],
        )
    }

    #[test]
    fn data_types_report_counts_non_null() {
        let report = DataInspector::new(DataTypesInspectionStrategy).execute_inspection(&people());
        let InspectionReport::DataTypes(r) = report else {
            panic!("expected data types report");
        };
        assert_eq!(r.rows, 3);
        assert_eq!(r.columns[0].non_null, 2);
        assert_eq!(r.columns[1].data_type, DataType::Int64);
        assert_eq!(r.columns[1].non_null, 2);
    }

    #[test]
    fn inspector_switches_strategy() {
        let mut inspector = DataInspector::new(DataTypesInspectionStrategy);
        inspector.set_strategy(DescribeInspectionStrategy);
        assert!(matches!(
            inspector.execute_inspection(&people()),
            InspectionReport::Describe(_)
        ));
    }

    #[test]
    fn report_serializes_with_kind_tag() {
        let report = DataInspector::new(DataTypesInspectionStrategy).execute_inspection(&people());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["kind"], "data_types");
        assert_eq!(json["columns"][1]["data_type"], "Int64");
    }

    #[test]
    fn data_types_report_renders_a_row_per_column() {
        let text = DataInspector::new(DataTypesInspectionStrategy)
            .execute_inspection(&people())
            .to_string();
        assert!(text.contains("rows: 3, columns: 2"));
        assert!(text.contains("Name"));
        assert!(text.contains("int64"));
    }
}
