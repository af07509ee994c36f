use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::processing::{ReduceOp, reduce_column};
use crate::types::{DataSet, Value};

use super::{DataInspectionStrategy, InspectionReport, count_non_null, name_width};

/// Descriptive statistics: numeric columns get count/mean/std/quartiles, the rest get
/// count/unique/top/freq.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescribeInspectionStrategy;

/// Statistics for one numeric column. All floats are `None` when the column has no values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (n - 1); `None` below two values.
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Statistics for one non-numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSummary {
    pub column: String,
    pub count: usize,
    pub unique: usize,
    /// Most frequent value; ties go to the value seen first.
    pub top: Option<String>,
    pub freq: usize,
}

/// Result of [`DescribeInspectionStrategy`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescribeReport {
    pub numeric: Vec<NumericSummary>,
    pub categorical: Vec<CategoricalSummary>,
}

impl DataInspectionStrategy for DescribeInspectionStrategy {
    fn inspect(&self, dataset: &DataSet) -> InspectionReport {
        let mut numeric = Vec::new();
        let mut categorical = Vec::new();
        for (idx, field) in dataset.schema.fields.iter().enumerate() {
            if field.data_type.is_numeric() {
                numeric.push(numeric_summary(dataset, idx, &field.name));
            } else {
                categorical.push(categorical_summary(dataset, idx, &field.name));
            }
        }
        InspectionReport::Describe(DescribeReport {
            numeric,
            categorical,
        })
    }
}

fn numeric_summary(dataset: &DataSet, idx: usize, column: &str) -> NumericSummary {
    let as_f64 = |op| reduce_column(dataset, idx, op).as_ref().and_then(Value::as_f64);

    let mut values: Vec<f64> = dataset.column(idx).filter_map(Value::as_f64).collect();
    values.sort_by(f64::total_cmp);
    let mean = as_f64(ReduceOp::Mean);

    let std = match (mean, values.len()) {
        (Some(mean), n) if n > 1 => {
            let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            Some((ss / (n - 1) as f64).sqrt())
        }
        _ => None,
    };

    NumericSummary {
        column: column.to_owned(),
        count: count_non_null(dataset, idx),
        mean,
        std,
        min: as_f64(ReduceOp::Min),
        q25: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max: as_f64(ReduceOp::Max),
    }
}

/// Linear interpolation between closest ranks over sorted `values`.
fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let pos = q * (values.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(values[lo] + (values[hi] - values[lo]) * frac)
}

fn categorical_summary(dataset: &DataSet, idx: usize, column: &str) -> CategoricalSummary {
    // value -> (frequency, first position)
    let mut seen: HashMap<String, (usize, usize)> = HashMap::new();
    for (pos, value) in dataset.column(idx).filter(|v| !v.is_null()).enumerate() {
        seen.entry(value.to_string()).or_insert((0, pos)).0 += 1;
    }

    let top = seen
        .iter()
        .max_by(|a, b| a.1.0.cmp(&b.1.0).then(b.1.1.cmp(&a.1.1)))
        .map(|(value, (freq, _))| (value.clone(), *freq));

    CategoricalSummary {
        column: column.to_owned(),
        count: count_non_null(dataset, idx),
        unique: seen.len(),
        freq: top.as_ref().map_or(0, |(_, freq)| *freq),
        top: top.map(|(value, _)| value),
    }
}

impl fmt::Display for DescribeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opt = |v: Option<f64>| v.map_or_else(|| "NaN".to_string(), |v| format!("{v:.3}"));

        writeln!(f, "Statistics for numerical columns")?;
        let width = name_width(self.numeric.iter().map(|s| s.column.as_str()));
        writeln!(
            f,
            "{:<width$}  {:>6}  {:>10}  {:>10}  {:>10}  {:>10}  {:>10}  {:>10}  {:>10}",
            "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
        )?;
        for s in &self.numeric {
            writeln!(
                f,
                "{:<width$}  {:>6}  {:>10}  {:>10}  {:>10}  {:>10}  {:>10}  {:>10}  {:>10}",
                s.column,
                s.count,
                opt(s.mean),
                opt(s.std),
                opt(s.min),
                opt(s.q25),
                opt(s.median),
                opt(s.q75),
                opt(s.max)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Statistics for non-numerical columns")?;
        let width = name_width(self.categorical.iter().map(|s| s.column.as_str()));
        writeln!(f, "{:<width$}  {:>6}  {:>6}  {:>6}  top", "column", "count", "unique", "freq")?;
        for s in &self.categorical {
            writeln!(
                f,
                "{:<width$}  {:>6}  {:>6}  {:>6}  {}",
                s.column,
                s.count,
                s.unique,
                s.freq,
                s.top.as_deref().unwrap_or("-")
            )?;
        }
        Ok(())
    }
}
