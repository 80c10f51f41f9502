//! Statistics Calculator Module
//! Descriptive statistics per numeric column (count, mean, std, min, quartiles, max).

use crate::data::NUMERIC_COLUMNS;
use polars::prelude::*;
use rayon::prelude::*;
use statrs::statistics::Statistics;

/// Descriptive statistics for a single numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Default for ColumnSummary {
    fn default() -> Self {
        Self {
            column: String::new(),
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            median: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    ///
    /// Std is the sample standard deviation (n - 1), NaN for fewer than two values.
    pub fn describe(values: &[f64]) -> ColumnSummary {
        let n = values.len();
        if n == 0 {
            return ColumnSummary::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = Statistics::mean(values.iter());
        let std = Statistics::std_dev(values.iter());

        ColumnSummary {
            column: String::new(),
            count: n,
            mean,
            std,
            min: sorted[0],
            q25: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            q75: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Get the non-missing values of a column as f64.
    pub fn column_values(df: &DataFrame, column: &str) -> Vec<f64> {
        df.column(column)
            .ok()
            .and_then(|col| col.cast(&DataType::Float64).ok())
            .map(|col| {
                col.f64()
                    .ok()
                    .map(|ca| ca.into_iter().flatten().collect())
                    .unwrap_or_default()
            })
            .unwrap_or_default()
    }

    /// Summarise every numeric column present in the frame, in parallel.
    ///
    /// Output keeps the dataset's column order.
    pub fn describe_frame(df: &DataFrame) -> Vec<ColumnSummary> {
        let present: Vec<&str> = NUMERIC_COLUMNS
            .iter()
            .copied()
            .filter(|name| df.column(name).is_ok())
            .collect();

        present
            .par_iter()
            .map(|name| {
                let values = Self::column_values(df, name);
                let mut summary = Self::describe(&values);
                summary.column = name.to_string();
                summary
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::tests::record;
    use crate::data::table::SalesTable;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn describe_reports_every_statistic() {
        // Values 1, 2, 3, 4, 10 shuffled
        let s = StatsCalculator::describe(&[4.0, 1.0, 10.0, 3.0, 2.0]);

        assert_eq!(s.count, 5);
        assert!(close(s.mean, 4.0));
        assert!(close(s.std, 3.5355339059327378));
        assert!(close(s.min, 1.0));
        assert!(close(s.q25, 2.0));
        assert!(close(s.median, 3.0));
        assert!(close(s.q75, 4.0));
        assert!(close(s.max, 10.0));
    }

    #[test]
    fn quartiles_interpolate_between_values() {
        let s = StatsCalculator::describe(&[1.0, 2.0, 3.0, 4.0]);
        assert!(close(s.q25, 1.75));
        assert!(close(s.median, 2.5));
        assert!(close(s.q75, 3.25));
    }

    #[test]
    fn single_value_has_undefined_std() {
        let s = StatsCalculator::describe(&[7.0]);
        assert_eq!(s.count, 1);
        assert!(s.std.is_nan());
        assert!(close(s.median, 7.0));
    }

    #[test]
    fn empty_input_reports_zero_count() {
        let s = StatsCalculator::describe(&[]);
        assert_eq!(s.count, 0);
        assert!(s.mean.is_nan());
        assert!(s.max.is_nan());
    }

    #[test]
    fn describe_frame_covers_numeric_columns_in_order() {
        let table = SalesTable::from_records(&[
            record("GameA", "Action", 2005, 3.0),
            record("GameB", "Action", 2006, 1.0),
            record("GameC", "Sports", 2005, 2.0),
        ])
        .unwrap();

        let summaries = StatsCalculator::describe_frame(table.frame());
        let columns: Vec<&str> = summaries.iter().map(|s| s.column.as_str()).collect();
        assert_eq!(columns, NUMERIC_COLUMNS.to_vec());

        let global = summaries.last().unwrap();
        assert_eq!(global.count, 3);
        assert!(close(global.mean, 2.0));
        assert!(close(global.min, 1.0));
        assert!(close(global.max, 3.0));

        let year = &summaries[1];
        assert!(close(year.median, 2005.0));
    }
}
