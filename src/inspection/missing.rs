//! Missing-value analysis.
//!
//! [`MissingValuesAnalysis::analyze`] is a template: it identifies missing values and then hands
//! the result to [`MissingValuesAnalysis::visualize_missing_values`], which does nothing unless an
//! implementation overrides it.

use std::fmt;

use serde::Serialize;

use crate::types::DataSet;

use super::count_non_null;

/// Missing-value count for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingColumn {
    pub name: String,
    pub missing: usize,
}

/// Columns with at least one missing value, in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingValuesReport {
    pub rows: usize,
    pub columns: Vec<MissingColumn>,
}

impl MissingValuesReport {
    /// Missing values across all columns.
    pub fn total_missing(&self) -> usize {
        self.columns.iter().map(|c| c.missing).sum()
    }
}

impl fmt::Display for MissingValuesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Missing values by column")?;
        if self.columns.is_empty() {
            return writeln!(f, "(none)");
        }
        let width = super::name_width(self.columns.iter().map(|c| c.name.as_str()));
        for c in &self.columns {
            writeln!(f, "{:<width$}  {}", c.name, c.missing)?;
        }
        Ok(())
    }
}

/// Two-step missing-value analysis.
pub trait MissingValuesAnalysis {
    /// Count missing values per column.
    fn identify_missing_values(&self, dataset: &DataSet) -> MissingValuesReport;

    /// Present the findings. No-op by default.
    fn visualize_missing_values(&self, _dataset: &DataSet, _report: &MissingValuesReport) {}

    /// Identify, then visualize; returns the identified report.
    fn analyze(&self, dataset: &DataSet) -> MissingValuesReport {
        let report = self.identify_missing_values(dataset);
        self.visualize_missing_values(dataset, &report);
        report
    }
}

/// Counts nulls per column and logs the report at `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleMissingValuesAnalysis;

impl MissingValuesAnalysis for SimpleMissingValuesAnalysis {
    fn identify_missing_values(&self, dataset: &DataSet) -> MissingValuesReport {
        let rows = dataset.row_count();
        let columns = dataset
            .schema
            .fields
            .iter()
            .enumerate()
            .filter_map(|(idx, field)| {
                let missing = rows - count_non_null(dataset, idx);
                (missing > 0).then(|| MissingColumn {
                    name: field.name.clone(),
                    missing,
                })
            })
            .collect();
        MissingValuesReport { rows, columns }
    }

    fn visualize_missing_values(&self, _dataset: &DataSet, report: &MissingValuesReport) {
        tracing::info!(
            total_missing = report.total_missing(),
            columns = report.columns.len(),
            "missing values\n{report}"
        );
    }
}

/// Run [`SimpleMissingValuesAnalysis`] over `dataset`.
pub fn explore_missing_values(dataset: &DataSet) -> MissingValuesReport {
    SimpleMissingValuesAnalysis.analyze(dataset)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::{MissingValuesAnalysis, MissingValuesReport, explore_missing_values};
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn sample() -> DataSet {
        DataSet::new(
            Schema::new(vec![
                Field::new("a", DataType::Int64),
                Field::new("b", DataType::Utf8),
                Field::new("c", DataType::Bool),
            ]),
            vec![
                vec![Value::Int64(1), Value::Null, Value::Bool(true)],
                vec![Value::Null, Value::Null, Value::Bool(false)],
            ],
        )
    }

    #[test]
    fn only_columns_with_missing_values_are_reported() {
        let report = explore_missing_values(&sample());
        assert_eq!(report.rows, 2);
        let names: Vec<_> = report.columns.iter().map(|c| (c.name.as_str(), c.missing)).collect();
        assert_eq!(names, vec![("a", 1), ("b", 2)]);
        assert_eq!(report.total_missing(), 3);
    }

    #[test]
    fn repeated_column_names_are_counted_separately() {
        let ds = DataSet::new(
            Schema::new(vec![
                Field::new("a", DataType::Int64),
                Field::new("a", DataType::Int64),
            ]),
            vec![
                vec![Value::Int64(1), Value::Null],
                vec![Value::Int64(2), Value::Null],
            ],
        );
        let report = explore_missing_values(&ds);
        let counts: Vec<_> = report.columns.iter().map(|c| (c.name.as_str(), c.missing)).collect();
        assert_eq!(counts, vec![("a", 2)]);
    }

    #[test]
    fn analyze_runs_identify_then_visualize() {
        struct Recording {
            visualized: Cell<usize>,
        }
        impl MissingValuesAnalysis for Recording {
            fn identify_missing_values(&self, ds: &DataSet) -> MissingValuesReport {
                MissingValuesReport {
                    rows: ds.row_count(),
                    columns: vec![],
                }
            }
            fn visualize_missing_values(&self, _ds: &DataSet, report: &MissingValuesReport) {
                self.visualized.set(report.rows);
            }
        }

        let analysis = Recording {
            visualized: Cell::new(0),
        };
        let report = analysis.analyze(&sample());
        assert_eq!(analysis.visualized.get(), 2);
        assert!(report.to_string().contains("(none)"));
    }
}
