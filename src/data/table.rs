//! Sales Table Module
//! Row type and the immutable, cleaned sales table backed by a Polars DataFrame.

use polars::prelude::*;

pub const RANK: &str = "Rank";
pub const NAME: &str = "Name";
pub const PLATFORM: &str = "Platform";
pub const YEAR: &str = "Year";
pub const GENRE: &str = "Genre";
pub const PUBLISHER: &str = "Publisher";
pub const NA_SALES: &str = "NA_Sales";
pub const EU_SALES: &str = "EU_Sales";
pub const JP_SALES: &str = "JP_Sales";
pub const OTHER_SALES: &str = "Other_Sales";
pub const GLOBAL_SALES: &str = "Global_Sales";

/// Columns holding free text.
pub const TEXT_COLUMNS: [&str; 4] = [NAME, PLATFORM, GENRE, PUBLISHER];

/// Columns holding whole numbers after cleaning.
pub const INTEGER_COLUMNS: [&str; 2] = [RANK, YEAR];

/// Sales figures, in millions of units.
pub const SALES_COLUMNS: [&str; 5] = [NA_SALES, EU_SALES, JP_SALES, OTHER_SALES, GLOBAL_SALES];

/// Every column in source order.
pub const ALL_COLUMNS: [&str; 11] = [
    RANK,
    NAME,
    PLATFORM,
    YEAR,
    GENRE,
    PUBLISHER,
    NA_SALES,
    EU_SALES,
    JP_SALES,
    OTHER_SALES,
    GLOBAL_SALES,
];

/// Numeric columns in source order (the ones `describe` reports on).
pub const NUMERIC_COLUMNS: [&str; 7] = [
    RANK,
    YEAR,
    NA_SALES,
    EU_SALES,
    JP_SALES,
    OTHER_SALES,
    GLOBAL_SALES,
];

/// One cleaned row of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub rank: i64,
    pub name: String,
    pub platform: String,
    pub year: i64,
    pub genre: String,
    pub publisher: String,
    pub na_sales: f64,
    pub eu_sales: f64,
    pub jp_sales: f64,
    pub other_sales: f64,
    pub global_sales: f64,
}

/// Immutable, cleaned table of sales records.
///
/// Rank and Year are `Int64`, text columns `String`, sales `Float64`.
#[derive(Debug, Clone, Default)]
pub struct SalesTable {
    df: DataFrame,
}

impl SalesTable {
    /// Wrap an already-cleaned DataFrame.
    pub(crate) fn new(df: DataFrame) -> Self {
        Self { df }
    }

    /// Get a reference to the underlying DataFrame.
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    /// Get the number of rows.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// First `n` rows as records, in table order.
    pub fn head_records(&self, n: usize) -> PolarsResult<Vec<SalesRecord>> {
        records_from_frame(&self.df.head(Some(n)))
    }

    /// Sum of Global_Sales over every row.
    pub fn total_global_sales(&self) -> f64 {
        self.df
            .column(GLOBAL_SALES)
            .ok()
            .and_then(|col| col.f64().ok().map(|ca| ca.into_iter().flatten().sum::<f64>()))
            .unwrap_or(0.0)
    }
}

/// Extract typed records from a frame with the cleaned schema.
fn records_from_frame(df: &DataFrame) -> PolarsResult<Vec<SalesRecord>> {
    let rank = df.column(RANK)?.i64()?;
    let name = df.column(NAME)?.str()?;
    let platform = df.column(PLATFORM)?.str()?;
    let year = df.column(YEAR)?.i64()?;
    let genre = df.column(GENRE)?.str()?;
    let publisher = df.column(PUBLISHER)?.str()?;
    let na = df.column(NA_SALES)?.f64()?;
    let eu = df.column(EU_SALES)?.f64()?;
    let jp = df.column(JP_SALES)?.f64()?;
    let other = df.column(OTHER_SALES)?.f64()?;
    let global = df.column(GLOBAL_SALES)?.f64()?;

    let records = (0..df.height())
        .map(|i| SalesRecord {
            rank: rank.get(i).unwrap_or_default(),
            name: name.get(i).unwrap_or_default().to_string(),
            platform: platform.get(i).unwrap_or_default().to_string(),
            year: year.get(i).unwrap_or_default(),
            genre: genre.get(i).unwrap_or_default().to_string(),
            publisher: publisher.get(i).unwrap_or_default().to_string(),
            na_sales: na.get(i).unwrap_or_default(),
            eu_sales: eu.get(i).unwrap_or_default(),
            jp_sales: jp.get(i).unwrap_or_default(),
            other_sales: other.get(i).unwrap_or_default(),
            global_sales: global.get(i).unwrap_or_default(),
        })
        .collect();

    Ok(records)
}

#[cfg(test)]
impl SalesTable {
    /// Build a table from records, keeping their order.
    pub fn from_records(records: &[SalesRecord]) -> PolarsResult<Self> {
        let df = DataFrame::new(vec![
            int_column(RANK, records, |r| r.rank),
            text_column(NAME, records, |r| r.name.as_str()),
            text_column(PLATFORM, records, |r| r.platform.as_str()),
            int_column(YEAR, records, |r| r.year),
            text_column(GENRE, records, |r| r.genre.as_str()),
            text_column(PUBLISHER, records, |r| r.publisher.as_str()),
            float_column(NA_SALES, records, |r| r.na_sales),
            float_column(EU_SALES, records, |r| r.eu_sales),
            float_column(JP_SALES, records, |r| r.jp_sales),
            float_column(OTHER_SALES, records, |r| r.other_sales),
            float_column(GLOBAL_SALES, records, |r| r.global_sales),
        ])?;

        Ok(Self { df })
    }

    /// Convert all rows to records, in table order.
    pub fn records(&self) -> PolarsResult<Vec<SalesRecord>> {
        records_from_frame(&self.df)
    }
}

#[cfg(test)]
fn text_column(name: &str, records: &[SalesRecord], field: impl Fn(&SalesRecord) -> &str) -> Column {
    let values: Vec<String> = records.iter().map(|r| field(r).to_string()).collect();
    Column::new(name.into(), values)
}

#[cfg(test)]
fn int_column(name: &str, records: &[SalesRecord], field: impl Fn(&SalesRecord) -> i64) -> Column {
    let values: Vec<i64> = records.iter().map(field).collect();
    Column::new(name.into(), values)
}

#[cfg(test)]
fn float_column(name: &str, records: &[SalesRecord], field: impl Fn(&SalesRecord) -> f64) -> Column {
    let values: Vec<f64> = records.iter().map(field).collect();
    Column::new(name.into(), values)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Minimal record for fixtures; regional sales split evenly.
    pub(crate) fn record(name: &str, genre: &str, year: i64, global: f64) -> SalesRecord {
        SalesRecord {
            rank: 0,
            name: name.to_string(),
            platform: "PS2".to_string(),
            year,
            genre: genre.to_string(),
            publisher: "Nintendo".to_string(),
            na_sales: global / 4.0,
            eu_sales: global / 4.0,
            jp_sales: global / 4.0,
            other_sales: global / 4.0,
            global_sales: global,
        }
    }

    #[test]
    fn records_survive_the_frame_in_order() {
        let input = vec![
            record("GameA", "Action", 2005, 3.0),
            record("GameB", "Action", 2006, 1.0),
            record("GameC", "Sports", 2005, 2.0),
        ];
        let table = SalesTable::from_records(&input).unwrap();

        assert_eq!(table.height(), 3);
        assert_eq!(table.frame().get_column_names().len(), ALL_COLUMNS.len());
        assert_eq!(table.records().unwrap(), input);
    }

    #[test]
    fn total_global_sales_sums_every_row() {
        let table = SalesTable::from_records(&[
            record("GameA", "Action", 2005, 3.0),
            record("GameB", "Action", 2006, 1.5),
        ])
        .unwrap();

        assert!((table.total_global_sales() - 4.5).abs() < 1e-12);
    }

    #[test]
    fn head_records_stops_at_n() {
        let table = SalesTable::from_records(&[
            record("GameA", "Action", 2005, 3.0),
            record("GameB", "Action", 2006, 1.5),
        ])
        .unwrap();

        let names: Vec<String> = table.head_records(1).unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["GameA".to_string()]);
        assert_eq!(table.head_records(10).unwrap().len(), 2);
    }

    #[test]
    fn empty_table_has_no_records() {
        let table = SalesTable::from_records(&[]).unwrap();
        assert!(table.is_empty());
        assert!(table.records().unwrap().is_empty());
        assert_eq!(table.total_global_sales(), 0.0);
    }
}
