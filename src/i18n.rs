//! Localized UI strings, keyed by locale and text key.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    #[cfg(test)]
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Es];

    /// The other language.
    pub fn toggle(self) -> Locale {
        match self {
            Locale::En => Locale::Es,
            Locale::Es => Locale::En,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    PageTitle,
    Title,
    LanguageToggle,
    SidebarTitle,
    RadioLabel,
    NavOverview,
    NavTopN,
    NavGenre,
    NavPlatform,
    NavYearly,
    OverviewHeader,
    OverviewDesc,
    OverviewStats,
    TopNHeader,
    TopNSlider,
    TopNPlotTitle,
    SalesLabel,
    GameLabel,
    GenreHeader,
    GenrePlotTitle,
    GenreLabel,
    PlatformHeader,
    PlatformPlotTitle,
    PlatformLabel,
    YearlyHeader,
    YearlyPlotTitle,
    YearLabel,
    ExportButton,
    ExportDone,
    ExportNothing,
    NoData,
    ErrorStatus,
}

impl TextKey {
    #[cfg(test)]
    pub const ALL: [TextKey; 32] = [
        TextKey::PageTitle,
        TextKey::Title,
        TextKey::LanguageToggle,
        TextKey::SidebarTitle,
        TextKey::RadioLabel,
        TextKey::NavOverview,
        TextKey::NavTopN,
        TextKey::NavGenre,
        TextKey::NavPlatform,
        TextKey::NavYearly,
        TextKey::OverviewHeader,
        TextKey::OverviewDesc,
        TextKey::OverviewStats,
        TextKey::TopNHeader,
        TextKey::TopNSlider,
        TextKey::TopNPlotTitle,
        TextKey::SalesLabel,
        TextKey::GameLabel,
        TextKey::GenreHeader,
        TextKey::GenrePlotTitle,
        TextKey::GenreLabel,
        TextKey::PlatformHeader,
        TextKey::PlatformPlotTitle,
        TextKey::PlatformLabel,
        TextKey::YearlyHeader,
        TextKey::YearlyPlotTitle,
        TextKey::YearLabel,
        TextKey::ExportButton,
        TextKey::ExportDone,
        TextKey::ExportNothing,
        TextKey::NoData,
        TextKey::ErrorStatus,
    ];

    /// Menu label for a mode identifier.
    pub fn for_mode(key: &str) -> Option<TextKey> {
        match key {
            "overview" => Some(TextKey::NavOverview),
            "top_n" => Some(TextKey::NavTopN),
            "genre" => Some(TextKey::NavGenre),
            "platform" => Some(TextKey::NavPlatform),
            "yearly" => Some(TextKey::NavYearly),
            _ => None,
        }
    }
}

const ENGLISH: [(TextKey, &str); 32] = [
    (TextKey::PageTitle, "Video Game Sales Analysis"),
    (TextKey::Title, "Video Game Sales Exploration Console 🎮"),
    (TextKey::LanguageToggle, "Español / English"),
    (TextKey::SidebarTitle, "Analysis Menu"),
    (TextKey::RadioLabel, "Choose an analysis type:"),
    (TextKey::NavOverview, "Overview"),
    (TextKey::NavTopN, "Top N by Sales"),
    (TextKey::NavGenre, "Genre Analysis"),
    (TextKey::NavPlatform, "Platform Analysis"),
    (TextKey::NavYearly, "Yearly Trend"),
    (TextKey::OverviewHeader, "Dataset Overview"),
    (
        TextKey::OverviewDesc,
        "First records of the dataset, containing information on over 16,000 video games.",
    ),
    (TextKey::OverviewStats, "Descriptive Statistics"),
    (TextKey::TopNHeader, "Best-Selling Video Games"),
    (TextKey::TopNSlider, "Select the number of games to display:"),
    (TextKey::TopNPlotTitle, "Top {} Best-Selling Video Games Globally"),
    (TextKey::SalesLabel, "Global Sales (in millions)"),
    (TextKey::GameLabel, "Video Game"),
    (TextKey::GenreHeader, "Sales Analysis by Genre"),
    (TextKey::GenrePlotTitle, "Total Global Sales by Genre"),
    (TextKey::GenreLabel, "Genre"),
    (TextKey::PlatformHeader, "Sales Analysis by Platform"),
    (TextKey::PlatformPlotTitle, "Top 15 Platforms by Global Sales"),
    (TextKey::PlatformLabel, "Platform"),
    (TextKey::YearlyHeader, "Annual Sales Trend"),
    (TextKey::YearlyPlotTitle, "Annual Evolution of Global Sales"),
    (TextKey::YearLabel, "Year"),
    (TextKey::ExportButton, "💾 Export PNG"),
    (TextKey::ExportDone, "Chart exported to {}"),
    (TextKey::ExportNothing, "This view has no chart to export"),
    (TextKey::NoData, "No Data"),
    (TextKey::ErrorStatus, "Error: {}"),
];

const SPANISH: [(TextKey, &str); 32] = [
    (TextKey::PageTitle, "Análisis de Ventas de Videojuegos"),
    (TextKey::Title, "Consola de Exploración de Ventas de Videojuegos 🎮"),
    (TextKey::LanguageToggle, "Español / English"),
    (TextKey::SidebarTitle, "Menú de Análisis"),
    (TextKey::RadioLabel, "Elige un tipo de análisis:"),
    (TextKey::NavOverview, "Visión General"),
    (TextKey::NavTopN, "Top N por Ventas"),
    (TextKey::NavGenre, "Análisis por Género"),
    (TextKey::NavPlatform, "Análisis por Plataforma"),
    (TextKey::NavYearly, "Tendencia Anual"),
    (TextKey::OverviewHeader, "Visión General del Dataset"),
    (
        TextKey::OverviewDesc,
        "Primeros registros del conjunto de datos, que contiene información sobre más de 16,000 videojuegos.",
    ),
    (TextKey::OverviewStats, "Estadísticas Descriptivas"),
    (TextKey::TopNHeader, "Los Videojuegos Más Vendidos"),
    (TextKey::TopNSlider, "Selecciona el número de juegos a mostrar:"),
    (TextKey::TopNPlotTitle, "Top {} Videojuegos más Vendidos Globalmente"),
    (TextKey::SalesLabel, "Ventas Globales (en millones)"),
    (TextKey::GameLabel, "Videojuego"),
    (TextKey::GenreHeader, "Análisis de Ventas por Género"),
    (TextKey::GenrePlotTitle, "Ventas Globales Totales por Género"),
    (TextKey::GenreLabel, "Género"),
    (TextKey::PlatformHeader, "Análisis de Ventas por Plataforma"),
    (TextKey::PlatformPlotTitle, "Top 15 Plataformas por Ventas Globales"),
    (TextKey::PlatformLabel, "Plataforma"),
    (TextKey::YearlyHeader, "Tendencia de Ventas Anuales"),
    (TextKey::YearlyPlotTitle, "Evolución Anual de las Ventas Globales"),
    (TextKey::YearLabel, "Año"),
    (TextKey::ExportButton, "💾 Exportar PNG"),
    (TextKey::ExportDone, "Gráfico exportado a {}"),
    (TextKey::ExportNothing, "Esta vista no tiene gráfico para exportar"),
    (TextKey::NoData, "Sin Datos"),
    (TextKey::ErrorStatus, "Se produjo un error: {}"),
];

/// UI strings for every supported locale.
#[derive(Debug, Clone)]
pub struct ResourceBundle {
    texts: HashMap<(Locale, TextKey), String>,
}

impl Default for ResourceBundle {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ResourceBundle {
    /// English and Spanish strings shipped with the application.
    pub fn builtin() -> Self {
        let texts = ENGLISH
            .iter()
            .map(|(key, text)| ((Locale::En, *key), text.to_string()))
            .chain(
                SPANISH
                    .iter()
                    .map(|(key, text)| ((Locale::Es, *key), text.to_string())),
            )
            .collect();
        Self { texts }
    }

    /// Look up a string; a missing entry falls back to English, then to the key name.
    pub fn text(&self, locale: Locale, key: TextKey) -> String {
        self.texts
            .get(&(locale, key))
            .or_else(|| self.texts.get(&(Locale::En, key)))
            .cloned()
            .unwrap_or_else(|| format!("{:?}", key))
    }

    /// Look up a template and substitute its `{}` placeholder.
    pub fn format(&self, locale: Locale, key: TextKey, arg: impl std::fmt::Display) -> String {
        self.text(locale, key).replacen("{}", &arg.to_string(), 1)
    }

    /// Menu label for a mode identifier, or the identifier itself when unknown.
    pub fn mode_label(&self, locale: Locale, mode_key: &str) -> String {
        TextKey::for_mode(mode_key)
            .map(|key| self.text(locale, key))
            .unwrap_or_else(|| mode_key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Mode;

    #[test]
    fn every_key_is_translated_in_every_locale() {
        let bundle = ResourceBundle::builtin();
        for locale in Locale::ALL {
            for key in TextKey::ALL {
                assert!(
                    bundle.texts.contains_key(&(locale, key)),
                    "{:?} missing {:?}",
                    locale,
                    key
                );
            }
        }
    }

    #[test]
    fn format_fills_the_placeholder() {
        let bundle = ResourceBundle::builtin();
        assert_eq!(
            bundle.format(Locale::En, TextKey::TopNPlotTitle, 10),
            "Top 10 Best-Selling Video Games Globally"
        );
        assert_eq!(
            bundle.format(Locale::Es, TextKey::TopNPlotTitle, 25),
            "Top 25 Videojuegos más Vendidos Globalmente"
        );
    }

    #[test]
    fn every_mode_has_a_label() {
        let bundle = ResourceBundle::builtin();
        for key in Mode::KEYS {
            assert!(TextKey::for_mode(key).is_some(), "{}", key);
        }
        assert_eq!(bundle.mode_label(Locale::Es, "yearly"), "Tendencia Anual");
        assert_eq!(bundle.mode_label(Locale::En, "pie"), "pie");
    }

    #[test]
    fn error_status_follows_the_locale() {
        let bundle = ResourceBundle::builtin();
        assert_eq!(
            bundle.format(Locale::En, TextKey::ErrorStatus, "Unknown mode: pie"),
            "Error: Unknown mode: pie"
        );
        assert_eq!(
            bundle.format(Locale::Es, TextKey::ErrorStatus, "Unknown mode: pie"),
            "Se produjo un error: Unknown mode: pie"
        );
    }

    #[test]
    fn toggle_switches_language() {
        assert_eq!(Locale::En.toggle(), Locale::Es);
        assert_eq!(Locale::Es.toggle().toggle(), Locale::Es);
    }

    #[test]
    fn locale_reads_lowercase_codes() {
        let locale: Locale = serde_json::from_str("\"es\"").unwrap();
        assert_eq!(locale, Locale::Es);
    }
}
