//! Control Panel Widget
//! Left side panel: language toggle, analysis menu and top-N slider.

use crate::data::{Mode, DEFAULT_TOP_N, TOP_N_RANGE};
use crate::i18n::{Locale, ResourceBundle, TextKey};
use egui::{Color32, RichText};

/// Message shown under the export button.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// Left side control panel with the analysis menu.
pub struct ControlPanel {
    /// Identifier of the selected mode (one of `Mode::KEYS`)
    pub mode_key: &'static str,
    pub top_n: usize,
    pub status: Option<Status>,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            mode_key: Mode::KEYS[0],
            top_n: DEFAULT_TOP_N,
            status: None,
        }
    }
}

impl ControlPanel {
    pub fn new(top_n: usize) -> Self {
        Self {
            top_n: top_n.clamp(*TOP_N_RANGE.start(), *TOP_N_RANGE.end()),
            ..Self::default()
        }
    }

    /// Draw the control panel
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        bundle: &ResourceBundle,
        locale: Locale,
    ) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            if ui.button(bundle.text(locale, TextKey::LanguageToggle)).clicked() {
                action = ControlPanelAction::ToggleLanguage;
            }
        });
        ui.add_space(10.0);
        ui.label(
            RichText::new(bundle.text(locale, TextKey::SidebarTitle))
                .size(20.0)
                .color(Color32::from_rgb(100, 149, 237)),
        );
        ui.add_space(5.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Analysis Menu =====
        ui.label(RichText::new(bundle.text(locale, TextKey::RadioLabel)).size(14.0).strong());
        ui.add_space(5.0);

        for key in Mode::KEYS {
            if ui
                .radio(self.mode_key == key, bundle.mode_label(locale, key))
                .clicked()
                && self.mode_key != key
            {
                self.mode_key = key;
                action = ControlPanelAction::SelectionChanged;
            }
        }

        // ===== Top-N Slider =====
        if self.mode_key == "top_n" {
            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);
            ui.label(bundle.text(locale, TextKey::TopNSlider));
            let slider = egui::Slider::new(&mut self.top_n, TOP_N_RANGE);
            if ui.add(slider).changed() {
                action = ControlPanelAction::SelectionChanged;
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            let export_button =
                egui::Button::new(RichText::new(bundle.text(locale, TextKey::ExportButton)).size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
            if ui.add(export_button).clicked() {
                action = ControlPanelAction::Export;
            }
        });

        if let Some(status) = &self.status {
            ui.add_space(8.0);
            let (text, status_color) = match status {
                Status::Info(text) => (text, Color32::GRAY),
                Status::Error(text) => (text, Color32::from_rgb(220, 53, 69)),
            };
            ui.label(RichText::new(text).size(11.0).color(status_color));
        }

        action
    }

    /// Mode for the current selection.
    pub fn selected_mode(&self) -> Result<Mode, crate::data::ProcessorError> {
        Mode::from_key(self.mode_key, self.top_n)
    }

    pub fn set_info(&mut self, text: String) {
        self.status = Some(Status::Info(text));
    }

    /// Show an error, worded in the current locale.
    pub fn set_error(
        &mut self,
        bundle: &ResourceBundle,
        locale: Locale,
        error: impl std::fmt::Display,
    ) {
        self.status = Some(Status::Error(bundle.format(locale, TextKey::ErrorStatus, error)));
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    ToggleLanguage,
    SelectionChanged,
    Export,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_overview_with_clamped_n() {
        let panel = ControlPanel::new(80);
        assert_eq!(panel.mode_key, "overview");
        assert_eq!(panel.top_n, 50);
        assert_eq!(panel.selected_mode(), Ok(Mode::Overview));
    }

    #[test]
    fn top_n_selection_carries_the_slider_value() {
        let mut panel = ControlPanel::new(12);
        panel.mode_key = "top_n";
        assert_eq!(panel.selected_mode(), Ok(Mode::TopN(12)));
    }

    #[test]
    fn errors_are_localized_and_kept_apart_from_info() {
        let bundle = ResourceBundle::builtin();
        let mut panel = ControlPanel::new(10);
        panel.mode_key = "pie";

        let err = panel.selected_mode().unwrap_err();
        panel.set_error(&bundle, Locale::Es, &err);
        assert_eq!(
            panel.status,
            Some(Status::Error(format!("Se produjo un error: {}", err)))
        );

        panel.set_info("Error-free export".to_string());
        assert!(matches!(panel.status, Some(Status::Info(_))));

        panel.clear_status();
        assert_eq!(panel.status, None);
    }
}
