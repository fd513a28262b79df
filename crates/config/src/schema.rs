use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `statusbar.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusBarConfig {
    /// Placement and behaviour of the bar surface.
    pub global: GlobalConfig,
    /// Theme / visual settings.
    pub theme: ThemeConfig,
}

/// Global bar settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Bar height in logical pixels.
    pub height: u32,
    /// Whether the bar sits at the top or the bottom.
    pub position: Position,
    /// Reserve an exclusive zone so windows don't overlap the bar.
    pub exclusive_zone: bool,
    /// Overall background opacity (0.0 – 1.0).
    pub opacity: f32,
    /// Open the item configuration menu on right click.
    pub context_menu: bool,
    /// How long temporary messages stay up when no duration is given.
    pub message_timeout_ms: u64,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            height: 28,
            position: Position::Bottom,
            exclusive_zone: true,
            opacity: 1.0,
            context_menu: true,
            message_timeout_ms: 3000,
        }
    }
}

/// Bar position on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Top,
    #[default]
    Bottom,
}

/// Named set of bar colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ColorTheme {
    #[default]
    DarkPlus,
    OneDark,
    GithubDefault,
}

impl ColorTheme {
    pub const ALL: [ColorTheme; 3] = [Self::DarkPlus, Self::OneDark, Self::GithubDefault];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

/// Theme / styling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub color_theme: ColorTheme,
    pub variant: ThemeVariant,
    /// Font size in points.
    pub font_size: f32,
    /// Horizontal padding inside each item (pixels).
    pub padding: u16,
    /// Gap between items (pixels).
    pub gap: u16,
    /// Time per frame of a spinning icon.
    pub spin_interval_ms: u64,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            color_theme: ColorTheme::DarkPlus,
            variant: ThemeVariant::Dark,
            font_size: 13.0,
            padding: 8,
            gap: 0,
            spin_interval_ms: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_documents_fill_in_defaults() {
        let config: StatusBarConfig = toml::from_str(
            r#"
            [global]
            position = "top"
            context_menu = false

            [theme]
            color_theme = "one-dark"
            variant = "light"
            "#,
        )
        .unwrap();

        assert_eq!(config.global.position, Position::Top);
        assert!(!config.global.context_menu);
        assert_eq!(config.global.height, GlobalConfig::default().height);
        assert_eq!(config.theme.color_theme, ColorTheme::OneDark);
        assert_eq!(config.theme.variant, ThemeVariant::Light);
        assert_eq!(config.theme.spin_interval_ms, 100);
    }

    #[test]
    fn empty_document_is_the_default_config() {
        let config: StatusBarConfig = toml::from_str("").unwrap();
        assert_eq!(config, StatusBarConfig::default());
    }

    #[test]
    fn color_theme_names_are_kebab_case() {
        let config: ThemeConfig = toml::from_str(r#"color_theme = "github-default""#).unwrap();
        assert_eq!(config.color_theme, ColorTheme::GithubDefault);
        assert!(toml::from_str::<ThemeConfig>(r#"color_theme = "solarized""#).is_err());
    }
}
