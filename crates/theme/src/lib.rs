pub mod colors;
pub mod resources;
pub mod style;

pub use colors::ToIced;
pub use resources::{ResourceKey, Resources};
pub use style::{BarStyle, ItemStyle};

use statusbar_config::{ColorTheme, GlobalConfig, ThemeConfig, ThemeVariant};
use statusbar_core::Color;
use std::time::Duration;

/// Compiled theme derived from [`ThemeConfig`].
///
/// The color theme only selects a resource dictionary; everything the
/// renderer needs is resolved through [`Theme::resource`].
#[derive(Debug, Clone)]
pub struct Theme {
    pub color_theme: ColorTheme,
    pub variant: ThemeVariant,
    pub resources: Resources,
    pub font_size: f32,
    pub padding: u16,
    pub gap: u16,
    /// Time per frame of a spinning icon.
    pub spin_interval: Duration,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        Self {
            color_theme: cfg.color_theme,
            variant: cfg.variant,
            resources: Resources::lookup(cfg.color_theme, cfg.variant),
            font_size: cfg.font_size,
            padding: cfg.padding,
            gap: cfg.gap,
            spin_interval: Duration::from_millis(cfg.spin_interval_ms.max(16)),
        }
    }

    pub fn resource(&self, key: ResourceKey) -> Color {
        self.resources.get(key)
    }

    /// Switch to another color theme, keeping fonts and metrics.
    pub fn set_color_theme(&mut self, color_theme: ColorTheme, variant: ThemeVariant) {
        self.color_theme = color_theme;
        self.variant = variant;
        self.resources = Resources::lookup(color_theme, variant);
    }

    pub fn bar_style(&self, global: &GlobalConfig) -> BarStyle {
        BarStyle {
            background: self.resource(ResourceKey::BarBackground),
            border: self.resource(ResourceKey::Border),
            opacity: global.opacity.clamp(0.0, 1.0),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switching_color_theme_swaps_the_dictionary() {
        let mut theme = Theme::default();
        let before = theme.resource(ResourceKey::BarBackground);

        theme.set_color_theme(ColorTheme::OneDark, ThemeVariant::Dark);
        assert_ne!(theme.resource(ResourceKey::BarBackground), before);
        assert_eq!(theme.font_size, ThemeConfig::default().font_size);
    }

    #[test]
    fn spin_interval_has_a_floor() {
        let theme = Theme::from_config(&ThemeConfig { spin_interval_ms: 0, ..ThemeConfig::default() });
        assert_eq!(theme.spin_interval, Duration::from_millis(16));
    }
}
