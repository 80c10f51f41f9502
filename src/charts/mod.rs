//! Charts module - Chart rendering

mod plotter;
mod renderer;
mod spec;

pub use plotter::ChartPlotter;
pub use renderer::{StaticChartRenderer, EXPORT_HEIGHT, EXPORT_WIDTH};
pub use spec::{ChartLabels, ChartSpec};
