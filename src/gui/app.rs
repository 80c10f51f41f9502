//! Dashboard Main Application
//! Main window with the analysis menu and the view for the selected mode.

use crate::charts::{ChartSpec, StaticChartRenderer, EXPORT_HEIGHT, EXPORT_WIDTH};
use crate::data::{DataProcessor, SalesLoader};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::i18n::{Locale, ResourceBundle, TextKey};
use egui::SidePanel;
use std::path::PathBuf;
use tracing::{error, warn};

/// Main application window.
pub struct DashboardApp {
    loader: SalesLoader,
    bundle: ResourceBundle,
    locale: Locale,
    export_dir: PathBuf,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    shown_locale: Option<Locale>,
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        loader: SalesLoader,
        bundle: ResourceBundle,
        locale: Locale,
        top_n: usize,
        export_dir: PathBuf,
    ) -> Self {
        let mut app = Self {
            loader,
            bundle,
            locale,
            export_dir,
            control_panel: ControlPanel::new(top_n),
            chart_viewer: ChartViewer::new(),
            shown_locale: None,
        };
        app.refresh_view();
        app
    }

    /// Recompute the view when the selection differs from what is shown.
    fn refresh_view(&mut self) {
        let mode = match self.control_panel.selected_mode() {
            Ok(mode) => mode,
            Err(e) => {
                error!(error = %e, "invalid selection");
                self.control_panel.set_error(&self.bundle, self.locale, e);
                return;
            }
        };
        if self.chart_viewer.shows(mode) {
            return;
        }

        match self.loader.load() {
            Ok(table) => {
                let view = DataProcessor::aggregate(table, mode);
                self.chart_viewer.set_view(mode, view);
                self.control_panel.clear_status();
            }
            Err(e) => {
                error!(error = %e, "dataset unavailable");
                self.control_panel.set_error(&self.bundle, self.locale, e);
            }
        }
    }

    /// Render the current chart to PNG and open it.
    fn handle_export(&mut self) {
        let mode = self.chart_viewer.mode;
        let spec = self.chart_viewer.view.as_ref().and_then(ChartSpec::from_view);
        let Some(spec) = spec else {
            self.control_panel
                .set_info(self.bundle.text(self.locale, TextKey::ExportNothing));
            return;
        };

        let labels = ChartViewer::labels(mode, &self.bundle, self.locale);
        let path = self.export_dir.join(format!("{}.png", mode.key()));

        match StaticChartRenderer::render_png(&spec, &labels, &path, EXPORT_WIDTH, EXPORT_HEIGHT) {
            Ok(()) => {
                self.control_panel.set_info(self.bundle.format(
                    self.locale,
                    TextKey::ExportDone,
                    path.display(),
                ));
                if let Err(e) = open::that(&path) {
                    warn!(error = %e, path = %path.display(), "could not open exported chart");
                }
            }
            Err(e) => {
                error!(error = %e, "export failed");
                self.control_panel.set_error(&self.bundle, self.locale, e);
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.shown_locale != Some(self.locale) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(
                self.bundle.text(self.locale, TextKey::PageTitle),
            ));
            self.shown_locale = Some(self.locale);
        }

        // Left panel - Analysis Menu
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui, &self.bundle, self.locale);

                    match action {
                        ControlPanelAction::ToggleLanguage => self.locale = self.locale.toggle(),
                        ControlPanelAction::SelectionChanged => self.refresh_view(),
                        ControlPanelAction::Export => self.handle_export(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, &self.bundle, self.locale);
        });
    }
}
