//! Data module - CSV loading, the sales table and aggregation

mod loader;
mod processor;
pub(crate) mod table;

pub use loader::SalesLoader;
pub use processor::{
    AggregatedView, DataProcessor, Dimension, GroupKey, Mode, ProcessorError, DEFAULT_TOP_N,
    TOP_N_RANGE,
};
pub use table::{SalesRecord, NUMERIC_COLUMNS};
