//! Chart Spec Module
//! Chart-ready data derived from an aggregated view, shared by the
//! interactive plotter and the static renderer.

use super::plotter::Palette;
use crate::data::{AggregatedView, Dimension, GroupKey};

/// What to draw for a view.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    /// Horizontal bars, first entry on top
    Bars {
        bars: Vec<(String, f64)>,
        palette: Palette,
    },
    /// Line with markers over whole years
    Trend { points: Vec<(i64, f64)> },
}

/// Titles and axis names, already localized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartLabels {
    pub title: String,
    pub value_axis: String,
    pub category_axis: String,
}

impl ChartSpec {
    /// Chart for a view; the overview and empty views have none.
    pub fn from_view(view: &AggregatedView) -> Option<ChartSpec> {
        if view.is_empty() {
            return None;
        }

        match view {
            AggregatedView::Overview { .. } => None,
            AggregatedView::TopN(records) => Some(ChartSpec::Bars {
                bars: records
                    .iter()
                    .map(|r| (r.name.clone(), r.global_sales))
                    .collect(),
                palette: Palette::Viridis,
            }),
            AggregatedView::Grouped(grouped) => match grouped.dimension {
                Dimension::Year => Some(ChartSpec::Trend {
                    points: grouped
                        .entries
                        .iter()
                        .filter_map(|e| match e.key {
                            GroupKey::Year(year) => Some((year, e.global_sales)),
                            GroupKey::Label(_) => None,
                        })
                        .collect(),
                }),
                Dimension::Genre | Dimension::Platform => Some(ChartSpec::Bars {
                    bars: grouped
                        .entries
                        .iter()
                        .map(|e| (e.key.to_string(), e.global_sales))
                        .collect(),
                    palette: if grouped.dimension == Dimension::Genre {
                        Palette::Rocket
                    } else {
                        Palette::Mako
                    },
                }),
            },
        }
    }
}
