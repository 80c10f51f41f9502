//! Data Processor Module
//! Turns the sales table into the view requested by an analysis mode.

use super::table::{SalesRecord, SalesTable, GENRE, GLOBAL_SALES, PLATFORM, YEAR};
use crate::stats::{ColumnSummary, StatsCalculator};
use polars::prelude::*;
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;
use tracing::{debug, warn};

/// Rows shown by the overview.
pub const OVERVIEW_ROWS: usize = 5;

/// Platforms kept after ranking.
pub const PLATFORM_LIMIT: usize = 15;

/// Accepted values for N in top-N mode; callers clamp before building the mode.
pub const TOP_N_RANGE: RangeInclusive<usize> = 5..=50;

pub const DEFAULT_TOP_N: usize = 10;

#[derive(Error, Debug, PartialEq)]
pub enum ProcessorError {
    #[error("Unknown analysis mode: {0}")]
    UnknownMode(String),
}

/// Analysis mode selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// First rows plus descriptive statistics
    #[default]
    Overview,
    /// First N rows in table order
    TopN(usize),
    /// Global sales per genre, best first
    Genre,
    /// Global sales per platform, best 15
    Platform,
    /// Global sales per year, chronological
    Yearly,
}

impl Mode {
    /// Identifiers in menu order.
    pub const KEYS: [&'static str; 5] = ["overview", "top_n", "genre", "platform", "yearly"];

    /// Build a mode from its identifier; `top_n` is only used by `"top_n"`.
    pub fn from_key(key: &str, top_n: usize) -> Result<Mode, ProcessorError> {
        match key {
            "overview" => Ok(Mode::Overview),
            "top_n" => Ok(Mode::TopN(top_n)),
            "genre" => Ok(Mode::Genre),
            "platform" => Ok(Mode::Platform),
            "yearly" => Ok(Mode::Yearly),
            other => Err(ProcessorError::UnknownMode(other.to_string())),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Mode::Overview => "overview",
            Mode::TopN(_) => "top_n",
            Mode::Genre => "genre",
            Mode::Platform => "platform",
            Mode::Yearly => "yearly",
        }
    }
}

/// Column a grouped view is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Genre,
    Platform,
    Year,
}

impl Dimension {
    pub fn column(&self) -> &'static str {
        match self {
            Dimension::Genre => GENRE,
            Dimension::Platform => PLATFORM,
            Dimension::Year => YEAR,
        }
    }
}

/// Group key: a text label or a year.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum GroupKey {
    Label(String),
    Year(i64),
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Label(label) => f.write_str(label),
            GroupKey::Year(year) => write!(f, "{}", year),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupEntry {
    pub key: GroupKey,
    pub global_sales: f64,
}

/// Summed Global_Sales per group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedSales {
    pub dimension: Dimension,
    pub entries: Vec<GroupEntry>,
}

impl GroupedSales {
    fn empty(dimension: Dimension) -> Self {
        Self {
            dimension,
            entries: Vec::new(),
        }
    }
}

/// Request-scoped result of an aggregation.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregatedView {
    Overview {
        head: Vec<SalesRecord>,
        summary: Vec<ColumnSummary>,
    },
    TopN(Vec<SalesRecord>),
    Grouped(GroupedSales),
}

impl AggregatedView {
    /// Number of rows (records or groups) in the view.
    pub fn len(&self) -> usize {
        match self {
            AggregatedView::Overview { head, .. } => head.len(),
            AggregatedView::TopN(records) => records.len(),
            AggregatedView::Grouped(grouped) => grouped.entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handles the aggregation behind every analysis mode.
pub struct DataProcessor;

impl DataProcessor {
    /// Derive the view for `mode` from the table.
    ///
    /// Never fails on data shape: an empty table or a missing column gives an
    /// empty view.
    pub fn aggregate(table: &SalesTable, mode: Mode) -> AggregatedView {
        debug!(mode = mode.key(), rows = table.height(), "aggregating");

        match mode {
            Mode::Overview => AggregatedView::Overview {
                head: Self::head_records(table, OVERVIEW_ROWS),
                summary: StatsCalculator::describe_frame(table.frame()),
            },
            Mode::TopN(n) => AggregatedView::TopN(Self::head_records(table, n)),
            Mode::Genre => AggregatedView::Grouped(Self::ranked_sales(table, Dimension::Genre, None)),
            Mode::Platform => AggregatedView::Grouped(Self::ranked_sales(
                table,
                Dimension::Platform,
                Some(PLATFORM_LIMIT),
            )),
            Mode::Yearly => AggregatedView::Grouped(Self::yearly_sales(table)),
        }
    }

    /// First `n` rows as records, in table order.
    fn head_records(table: &SalesTable, n: usize) -> Vec<SalesRecord> {
        table.head_records(n).unwrap_or_else(|e| {
            warn!(error = %e, "could not read table rows");
            Vec::new()
        })
    }

    /// Sum per group, best first; ties keep ascending key order.
    fn ranked_sales(table: &SalesTable, dimension: Dimension, limit: Option<usize>) -> GroupedSales {
        let key = dimension.column();
        let options = SortMultipleOptions {
            descending: vec![true, false],
            maintain_order: true,
            ..Default::default()
        };

        Self::grouped_sales(table, dimension, |lf| {
            let sorted = lf.sort_by_exprs([col(GLOBAL_SALES), col(key)], options);
            match limit {
                Some(limit) => sorted.limit(limit as IdxSize),
                None => sorted,
            }
        })
    }

    fn yearly_sales(table: &SalesTable) -> GroupedSales {
        Self::grouped_sales(table, Dimension::Year, |lf| {
            lf.sort_by_exprs([col(YEAR)], SortMultipleOptions::default())
        })
    }

    /// Group by the dimension, sum Global_Sales, then order with `arrange`.
    fn grouped_sales(
        table: &SalesTable,
        dimension: Dimension,
        arrange: impl FnOnce(LazyFrame) -> LazyFrame,
    ) -> GroupedSales {
        let df = table.frame();
        let key = dimension.column();
        if df.column(key).is_err() || df.column(GLOBAL_SALES).is_err() {
            return GroupedSales::empty(dimension);
        }

        let grouped = df
            .clone()
            .lazy()
            .group_by([col(key)])
            .agg([col(GLOBAL_SALES).sum()]);

        match arrange(grouped).collect().and_then(|out| Self::entries(&out, dimension)) {
            Ok(entries) => GroupedSales { dimension, entries },
            Err(e) => {
                warn!(error = %e, column = key, "grouping failed, returning empty view");
                GroupedSales::empty(dimension)
            }
        }
    }

    /// Read (key, sum) pairs out of an aggregated frame.
    fn entries(df: &DataFrame, dimension: Dimension) -> PolarsResult<Vec<GroupEntry>> {
        let sales = df.column(GLOBAL_SALES)?.f64()?;
        let keys = df.column(dimension.column())?;

        let keys: Vec<Option<GroupKey>> = match dimension {
            Dimension::Year => keys
                .i64()?
                .into_iter()
                .map(|year| year.map(GroupKey::Year))
                .collect(),
            Dimension::Genre | Dimension::Platform => keys
                .str()?
                .into_iter()
                .map(|label| label.map(|l| GroupKey::Label(l.to_string())))
                .collect(),
        };

        Ok(keys
            .into_iter()
            .zip(sales.into_iter())
            .filter_map(|(key, sum)| {
                Some(GroupEntry {
                    key: key?,
                    global_sales: sum.unwrap_or(0.0),
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::tests::record;
    use std::collections::HashSet;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn label(s: &str) -> GroupKey {
        GroupKey::Label(s.to_string())
    }

    fn example_table() -> SalesTable {
        SalesTable::from_records(&[
            record("GameA", "Action", 2005, 3.0),
            record("GameB", "Action", 2006, 1.0),
            record("GameC", "Sports", 2005, 2.0),
        ])
        .unwrap()
    }

    /// Sixty games over 20 platforms, 12 genres and 8 years, deliberately unsorted.
    fn large_table() -> SalesTable {
        let records: Vec<SalesRecord> = (0..60)
            .map(|i| {
                let mut r = record(
                    &format!("Game{}", i),
                    &format!("Genre{}", i % 12),
                    2000 + (i * 7 % 8) as i64,
                    ((i * 37) % 23) as f64 * 0.25 + 0.01,
                );
                r.rank = i as i64 + 1;
                r.platform = format!("P{}", i % 20);
                r
            })
            .collect();
        SalesTable::from_records(&records).unwrap()
    }

    fn grouped(view: AggregatedView) -> GroupedSales {
        match view {
            AggregatedView::Grouped(g) => g,
            other => panic!("expected grouped view, got {:?}", other),
        }
    }

    #[test]
    fn genre_example_sums_and_ranks() {
        let g = grouped(DataProcessor::aggregate(&example_table(), Mode::Genre));

        assert_eq!(g.dimension, Dimension::Genre);
        assert_eq!(g.entries.len(), 2);
        assert_eq!(g.entries[0].key, label("Action"));
        assert!(close(g.entries[0].global_sales, 4.0));
        assert_eq!(g.entries[1].key, label("Sports"));
        assert!(close(g.entries[1].global_sales, 2.0));
    }

    #[test]
    fn yearly_example_is_chronological() {
        let g = grouped(DataProcessor::aggregate(&example_table(), Mode::Yearly));

        let pairs: Vec<(GroupKey, f64)> = g
            .entries
            .iter()
            .map(|e| (e.key.clone(), e.global_sales))
            .collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, GroupKey::Year(2005));
        assert!(close(pairs[0].1, 5.0));
        assert_eq!(pairs[1].0, GroupKey::Year(2006));
        assert!(close(pairs[1].1, 1.0));
    }

    #[test]
    fn top_n_keeps_table_order() {
        let table = large_table();
        let all = table.records().unwrap();

        for n in TOP_N_RANGE {
            let AggregatedView::TopN(rows) = DataProcessor::aggregate(&table, Mode::TopN(n)) else {
                panic!("expected top-n view");
            };
            assert_eq!(rows.len(), n.min(table.height()));
            assert_eq!(rows.as_slice(), &all[..rows.len()]);
        }
    }

    #[test]
    fn top_n_on_short_table_returns_every_row() {
        let view = DataProcessor::aggregate(&example_table(), Mode::TopN(10));
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn genre_is_non_increasing_and_conserves_mass() {
        let table = large_table();
        let g = grouped(DataProcessor::aggregate(&table, Mode::Genre));

        assert_eq!(g.entries.len(), 12);
        for pair in g.entries.windows(2) {
            assert!(pair[0].global_sales >= pair[1].global_sales);
        }
        let total: f64 = g.entries.iter().map(|e| e.global_sales).sum();
        assert!((total - table.total_global_sales()).abs() < 1e-6);
    }

    #[test]
    fn platform_keeps_best_fifteen() {
        let table = large_table();
        let g = grouped(DataProcessor::aggregate(&table, Mode::Platform));

        assert_eq!(g.entries.len(), PLATFORM_LIMIT);
        for pair in g.entries.windows(2) {
            assert!(pair[0].global_sales >= pair[1].global_sales);
        }

        // Every dropped platform sells no more than the last one kept.
        let mut totals: Vec<f64> = (0..20)
            .map(|p| {
                table
                    .records()
                    .unwrap()
                    .iter()
                    .filter(|r| r.platform == format!("P{}", p))
                    .map(|r| r.global_sales)
                    .sum()
            })
            .collect();
        totals.sort_by(|a, b| b.partial_cmp(a).unwrap());
        assert!(close(g.entries[PLATFORM_LIMIT - 1].global_sales, totals[PLATFORM_LIMIT - 1]));
    }

    #[test]
    fn yearly_has_one_entry_per_year() {
        let table = large_table();
        let g = grouped(DataProcessor::aggregate(&table, Mode::Yearly));

        let years: HashSet<i64> = table.records().unwrap().iter().map(|r| r.year).collect();
        assert_eq!(g.entries.len(), years.len());
        for pair in g.entries.windows(2) {
            assert!(pair[0].key < pair[1].key);
        }
    }

    #[test]
    fn ties_break_by_ascending_key() {
        let table = SalesTable::from_records(&[
            record("GameA", "Sports", 2001, 2.0),
            record("GameB", "Action", 2001, 2.0),
            record("GameC", "Puzzle", 2001, 5.0),
        ])
        .unwrap();

        let g = grouped(DataProcessor::aggregate(&table, Mode::Genre));
        let keys: Vec<String> = g.entries.iter().map(|e| e.key.to_string()).collect();
        assert_eq!(keys, vec!["Puzzle", "Action", "Sports"]);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let table = large_table();
        for key in Mode::KEYS {
            let mode = Mode::from_key(key, 25).unwrap();
            assert_eq!(
                DataProcessor::aggregate(&table, mode),
                DataProcessor::aggregate(&table, mode)
            );
        }
    }

    #[test]
    fn empty_table_gives_empty_views() {
        let table = SalesTable::from_records(&[]).unwrap();
        for key in Mode::KEYS {
            let mode = Mode::from_key(key, 10).unwrap();
            assert!(DataProcessor::aggregate(&table, mode).is_empty(), "{}", key);
        }

        let AggregatedView::Overview { summary, .. } =
            DataProcessor::aggregate(&table, Mode::Overview)
        else {
            panic!("expected overview");
        };
        assert!(summary.iter().all(|s| s.count == 0));
    }

    #[test]
    fn missing_grouping_column_gives_empty_view() {
        let df = example_table().frame().drop(GENRE).unwrap();
        let table = SalesTable::new(df);

        let g = grouped(DataProcessor::aggregate(&table, Mode::Genre));
        assert!(g.entries.is_empty());
    }

    #[test]
    fn overview_has_head_and_summary() {
        let table = large_table();
        let AggregatedView::Overview { head, summary } =
            DataProcessor::aggregate(&table, Mode::Overview)
        else {
            panic!("expected overview");
        };

        assert_eq!(head.len(), OVERVIEW_ROWS);
        assert_eq!(head[0].name, "Game0");
        assert_eq!(summary.len(), 7);
        assert!(summary.iter().all(|s| s.count == 60));
    }

    #[test]
    fn unknown_mode_fails_fast() {
        assert_eq!(
            Mode::from_key("pie", 10),
            Err(ProcessorError::UnknownMode("pie".to_string()))
        );
        assert_eq!(Mode::from_key("top_n", 12), Ok(Mode::TopN(12)));
        for key in Mode::KEYS {
            assert_eq!(Mode::from_key(key, 5).unwrap().key(), key);
        }
    }

    #[test]
    fn default_mode_is_overview() {
        assert_eq!(Mode::default(), Mode::Overview);
        assert_eq!(Mode::default().key(), Mode::KEYS[0]);
    }
}
