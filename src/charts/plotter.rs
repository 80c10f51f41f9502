//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot.

use crate::data::SalesRecord;
use crate::stats::ColumnSummary;
use egui::{Color32, RichText, ScrollArea};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints, Points};

/// Line colour for the yearly trend.
pub const TREND_COLOR: Color32 = Color32::from_rgb(31, 119, 180); // Blue

/// Sequential colour maps used for bar charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Viridis,
    Rocket,
    Mako,
}

impl Palette {
    fn anchors(&self) -> &'static [(u8, u8, u8); 5] {
        match self {
            Palette::Viridis => &[
                (68, 1, 84),
                (59, 82, 139),
                (33, 145, 140),
                (94, 201, 98),
                (253, 231, 37),
            ],
            Palette::Rocket => &[
                (35, 12, 50),
                (95, 24, 85),
                (203, 27, 79),
                (245, 112, 74),
                (246, 200, 170),
            ],
            Palette::Mako => &[
                (27, 17, 40),
                (56, 46, 107),
                (54, 115, 160),
                (64, 184, 173),
                (190, 235, 210),
            ],
        }
    }

    /// Colour at position `t` in [0, 1], linearly interpolated between anchors.
    pub fn rgb_at(&self, t: f64) -> (u8, u8, u8) {
        let anchors = self.anchors();
        let scaled = t.clamp(0.0, 1.0) * (anchors.len() - 1) as f64;
        let lower = scaled.floor() as usize;
        let upper = (lower + 1).min(anchors.len() - 1);
        let frac = scaled - lower as f64;

        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        let (a, b) = (anchors[lower], anchors[upper]);
        (lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
    }

    /// Colour for bar `index` out of `count`, spread evenly over the map.
    pub fn rgb_for(&self, index: usize, count: usize) -> (u8, u8, u8) {
        let t = if count > 1 {
            index as f64 / (count - 1) as f64
        } else {
            0.0
        };
        self.rgb_at(t)
    }

    pub fn color_for(&self, index: usize, count: usize) -> Color32 {
        let (r, g, b) = self.rgb_for(index, count);
        Color32::from_rgb(r, g, b)
    }
}

/// Creates the dashboard's charts and tables using egui and egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw a horizontal bar chart; the first bar is drawn at the top.
    pub fn draw_bar_chart(
        ui: &mut egui::Ui,
        id: &str,
        bars: &[(String, f64)],
        palette: Palette,
        value_label: &str,
        category_label: &str,
    ) {
        let n = bars.len();
        let labels: Vec<String> = bars.iter().map(|(label, _)| label.clone()).collect();
        // Row i sits at y = n - 1 - i
        let position = move |i: usize| (n - 1 - i) as f64;

        let chart_bars: Vec<Bar> = bars
            .iter()
            .enumerate()
            .map(|(i, (label, value))| {
                Bar::new(position(i), *value)
                    .name(format!("{}: {:.2}", label, value))
                    .width(0.8)
                    .fill(palette.color_for(i, n))
            })
            .collect();

        let height = (n as f32 * 26.0).clamp(240.0, 900.0);

        Plot::new(id)
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_x(0.0)
            .x_axis_label(value_label)
            .y_axis_label(category_label)
            .y_grid_spacer(move |_input| {
                (0..n)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .y_axis_formatter(move |mark, _range| {
                let v = mark.value;
                if v < 0.0 || v.fract() != 0.0 {
                    return String::new();
                }
                let row = v as usize;
                if row < labels.len() {
                    labels[labels.len() - 1 - row].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(chart_bars).horizontal());
            });
    }

    /// Draw a line chart with point markers, x axis as whole years.
    pub fn draw_line_chart(
        ui: &mut egui::Ui,
        id: &str,
        points: &[(i64, f64)],
        x_label: &str,
        y_label: &str,
    ) {
        let coords: Vec<[f64; 2]> = points.iter().map(|&(x, y)| [x as f64, y]).collect();

        Plot::new(id)
            .height(420.0)
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_label(x_label)
            .y_axis_label(y_label)
            .x_axis_formatter(|mark, _range| {
                if mark.value.fract() == 0.0 {
                    format!("{:.0}", mark.value)
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(coords.iter().copied()))
                        .color(TREND_COLOR)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(coords.iter().copied()))
                        .radius(4.0)
                        .color(TREND_COLOR),
                );
            });
    }

    /// Draw sales records as a table.
    pub fn draw_records_table(ui: &mut egui::Ui, id: &str, records: &[SalesRecord]) {
        ScrollArea::horizontal().id_salt(id).show(ui, |ui| {
            egui::Grid::new(ui.make_persistent_id(id))
                .striped(true)
                .min_col_width(55.0)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    for header in [
                        "Rank",
                        "Name",
                        "Platform",
                        "Year",
                        "Genre",
                        "Publisher",
                        "NA_Sales",
                        "EU_Sales",
                        "JP_Sales",
                        "Other_Sales",
                        "Global_Sales",
                    ] {
                        ui.label(RichText::new(header).strong().size(12.0));
                    }
                    ui.end_row();

                    for r in records {
                        ui.label(r.rank.to_string());
                        ui.label(&r.name);
                        ui.label(&r.platform);
                        ui.label(r.year.to_string());
                        ui.label(&r.genre);
                        ui.label(&r.publisher);
                        for value in [
                            r.na_sales,
                            r.eu_sales,
                            r.jp_sales,
                            r.other_sales,
                            r.global_sales,
                        ] {
                            ui.label(format!("{:.2}", value));
                        }
                        ui.end_row();
                    }
                });
        });
    }

    /// Draw descriptive statistics: one row per statistic, one column per field.
    pub fn draw_summary_table(ui: &mut egui::Ui, id: &str, summaries: &[ColumnSummary]) {
        let rows: [(&str, fn(&ColumnSummary) -> f64); 8] = [
            ("count", |s| s.count as f64),
            ("mean", |s| s.mean),
            ("std", |s| s.std),
            ("min", |s| s.min),
            ("25%", |s| s.q25),
            ("50%", |s| s.median),
            ("75%", |s| s.q75),
            ("max", |s| s.max),
        ];

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ScrollArea::horizontal().id_salt(id).show(ui, |ui| {
                    egui::Grid::new(ui.make_persistent_id(id))
                        .striped(true)
                        .min_col_width(70.0)
                        .spacing([12.0, 4.0])
                        .show(ui, |ui| {
                            ui.label("");
                            for s in summaries {
                                ui.label(RichText::new(&s.column).strong().size(12.0));
                            }
                            ui.end_row();

                            for (name, stat) in rows {
                                ui.label(RichText::new(name).strong().size(12.0));
                                for s in summaries {
                                    ui.label(Self::format_stat(stat(s)));
                                }
                                ui.end_row();
                            }
                        });
                });
            });
    }

    /// Six decimals, "NaN" for undefined statistics.
    pub fn format_stat(value: f64) -> String {
        if value.is_nan() {
            "NaN".to_string()
        } else {
            format!("{:.6}", value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_ends_match_anchors() {
        assert_eq!(Palette::Viridis.rgb_at(0.0), (68, 1, 84));
        assert_eq!(Palette::Viridis.rgb_at(1.0), (253, 231, 37));
        assert_eq!(Palette::Mako.rgb_for(0, 1), (27, 17, 40));
    }

    #[test]
    fn palette_interpolates_between_anchors() {
        // Halfway between the first two viridis anchors.
        assert_eq!(Palette::Viridis.rgb_at(0.125), (64, 42, 112));
    }

    #[test]
    fn stats_use_six_decimals() {
        assert_eq!(ChartPlotter::format_stat(2.5), "2.500000");
        assert_eq!(ChartPlotter::format_stat(f64::NAN), "NaN");
    }
}
