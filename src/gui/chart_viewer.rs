//! Chart Viewer Widget
//! Central scrollable panel showing the view for the selected analysis mode.

use crate::charts::{ChartLabels, ChartPlotter, ChartSpec};
use crate::data::{AggregatedView, Mode};
use crate::i18n::{Locale, ResourceBundle, TextKey};
use egui::{RichText, ScrollArea};

/// Current mode and its derived view.
#[derive(Default)]
pub struct ChartViewer {
    pub mode: Mode,
    pub view: Option<AggregatedView>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the displayed view.
    pub fn set_view(&mut self, mode: Mode, view: AggregatedView) {
        self.mode = mode;
        self.view = Some(view);
    }

    /// Whether `mode` is already on screen.
    pub fn shows(&self, mode: Mode) -> bool {
        self.view.is_some() && self.mode == mode
    }

    /// Header for a mode.
    pub fn header(mode: Mode) -> TextKey {
        match mode {
            Mode::Overview => TextKey::OverviewHeader,
            Mode::TopN(_) => TextKey::TopNHeader,
            Mode::Genre => TextKey::GenreHeader,
            Mode::Platform => TextKey::PlatformHeader,
            Mode::Yearly => TextKey::YearlyHeader,
        }
    }

    /// Localized title and axis names for a mode's chart.
    pub fn labels(mode: Mode, bundle: &ResourceBundle, locale: Locale) -> ChartLabels {
        let sales = bundle.text(locale, TextKey::SalesLabel);
        let (title, category) = match mode {
            Mode::Overview => (bundle.text(locale, TextKey::OverviewHeader), String::new()),
            Mode::TopN(n) => (
                bundle.format(locale, TextKey::TopNPlotTitle, n),
                bundle.text(locale, TextKey::GameLabel),
            ),
            Mode::Genre => (
                bundle.text(locale, TextKey::GenrePlotTitle),
                bundle.text(locale, TextKey::GenreLabel),
            ),
            Mode::Platform => (
                bundle.text(locale, TextKey::PlatformPlotTitle),
                bundle.text(locale, TextKey::PlatformLabel),
            ),
            Mode::Yearly => (
                bundle.text(locale, TextKey::YearlyPlotTitle),
                bundle.text(locale, TextKey::YearLabel),
            ),
        };

        ChartLabels {
            title,
            value_axis: sales,
            category_axis: category,
        }
    }

    /// Draw the header and the view for the current mode.
    pub fn show(&self, ui: &mut egui::Ui, bundle: &ResourceBundle, locale: Locale) {
        ui.heading(RichText::new(bundle.text(locale, TextKey::Title)).size(26.0));
        ui.add_space(10.0);

        let Some(view) = &self.view else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new(bundle.text(locale, TextKey::NoData)).size(20.0));
            });
            return;
        };

        ui.label(
            RichText::new(bundle.text(locale, Self::header(self.mode)))
                .size(20.0)
                .strong(),
        );
        ui.add_space(8.0);

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if let AggregatedView::Overview { head, summary } = view {
                    ui.label(bundle.text(locale, TextKey::OverviewDesc));
                    ui.add_space(8.0);
                    ChartPlotter::draw_records_table(ui, "overview_head", head);
                    ui.add_space(15.0);
                    ui.label(
                        RichText::new(bundle.text(locale, TextKey::OverviewStats))
                            .size(16.0)
                            .strong(),
                    );
                    ui.add_space(5.0);
                    ChartPlotter::draw_summary_table(ui, "overview_stats", summary);
                    return;
                }

                let labels = Self::labels(self.mode, bundle, locale);
                ui.label(RichText::new(&labels.title).size(16.0));
                ui.add_space(5.0);

                match ChartSpec::from_view(view) {
                    Some(ChartSpec::Bars { bars, palette }) => ChartPlotter::draw_bar_chart(
                        ui,
                        self.mode.key(),
                        &bars,
                        palette,
                        &labels.value_axis,
                        &labels.category_axis,
                    ),
                    Some(ChartSpec::Trend { points }) => ChartPlotter::draw_line_chart(
                        ui,
                        self.mode.key(),
                        &points,
                        &labels.category_axis,
                        &labels.value_axis,
                    ),
                    None => {
                        ui.label(RichText::new(bundle.text(locale, TextKey::NoData)).size(16.0));
                    }
                }
            });
    }
}
