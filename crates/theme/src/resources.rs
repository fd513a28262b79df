use crate::colors::hex;
use statusbar_config::{ColorTheme, ThemeVariant};
use statusbar_core::Color;

/// Colors a theme provides to the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    BarBackground,
    BarForeground,
    ItemHoverBackground,
    ItemPressedBackground,
    Border,
    MessageForeground,
    MenuBackground,
    MenuForeground,
}

/// One resource dictionary: every [`ResourceKey`] resolved for a single
/// theme and variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resources {
    pub bar_background: Color,
    pub bar_foreground: Color,
    pub item_hover_background: Color,
    pub item_pressed_background: Color,
    pub border: Color,
    pub message_foreground: Color,
    pub menu_background: Color,
    pub menu_foreground: Color,
}

impl Resources {
    pub fn get(&self, key: ResourceKey) -> Color {
        match key {
            ResourceKey::BarBackground => self.bar_background,
            ResourceKey::BarForeground => self.bar_foreground,
            ResourceKey::ItemHoverBackground => self.item_hover_background,
            ResourceKey::ItemPressedBackground => self.item_pressed_background,
            ResourceKey::Border => self.border,
            ResourceKey::MessageForeground => self.message_foreground,
            ResourceKey::MenuBackground => self.menu_background,
            ResourceKey::MenuForeground => self.menu_foreground,
        }
    }

    /// Look up the dictionary for `theme` in `variant`.
    pub fn lookup(theme: ColorTheme, variant: ThemeVariant) -> Self {
        match (theme, variant) {
            (ColorTheme::DarkPlus, ThemeVariant::Dark) => Self {
                bar_background: hex("#007acc"),
                bar_foreground: hex("#ffffff"),
                item_hover_background: Color::WHITE.with_alpha(0.12),
                item_pressed_background: Color::WHITE.with_alpha(0.18),
                border: Color::TRANSPARENT,
                message_foreground: hex("#ffffff"),
                menu_background: hex("#252526"),
                menu_foreground: hex("#cccccc"),
            },
            (ColorTheme::DarkPlus, ThemeVariant::Light) => Self {
                bar_background: hex("#007acc"),
                bar_foreground: hex("#ffffff"),
                item_hover_background: Color::WHITE.with_alpha(0.12),
                item_pressed_background: Color::WHITE.with_alpha(0.18),
                border: Color::TRANSPARENT,
                message_foreground: hex("#ffffff"),
                menu_background: hex("#ffffff"),
                menu_foreground: hex("#616161"),
            },
            (ColorTheme::OneDark, ThemeVariant::Dark) => Self {
                bar_background: hex("#21252b"),
                bar_foreground: hex("#9da5b4"),
                item_hover_background: hex("#2c313a"),
                item_pressed_background: hex("#333842"),
                border: hex("#181a1f"),
                message_foreground: hex("#d7dae0"),
                menu_background: hex("#21252b"),
                menu_foreground: hex("#9da5b4"),
            },
            (ColorTheme::OneDark, ThemeVariant::Light) => Self {
                bar_background: hex("#eaeaeb"),
                bar_foreground: hex("#424243"),
                item_hover_background: hex("#dbdbdc"),
                item_pressed_background: hex("#d0d0d1"),
                border: hex("#dbdbdc"),
                message_foreground: hex("#232324"),
                menu_background: hex("#f0f0f1"),
                menu_foreground: hex("#232324"),
            },
            (ColorTheme::GithubDefault, ThemeVariant::Dark) => Self {
                bar_background: hex("#0d1117"),
                bar_foreground: hex("#7d8590"),
                item_hover_background: Color::WHITE.with_alpha(0.08),
                item_pressed_background: Color::WHITE.with_alpha(0.14),
                border: hex("#30363d"),
                message_foreground: hex("#e6edf3"),
                menu_background: hex("#161b22"),
                menu_foreground: hex("#e6edf3"),
            },
            (ColorTheme::GithubDefault, ThemeVariant::Light) => Self {
                bar_background: hex("#ffffff"),
                bar_foreground: hex("#656d76"),
                item_hover_background: Color::BLACK.with_alpha(0.06),
                item_pressed_background: Color::BLACK.with_alpha(0.1),
                border: hex("#d0d7de"),
                message_foreground: hex("#1f2328"),
                menu_background: hex("#ffffff"),
                menu_foreground: hex("#1f2328"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_dictionary_is_opaque_where_it_matters() {
        for theme in ColorTheme::ALL {
            for variant in [ThemeVariant::Dark, ThemeVariant::Light] {
                let resources = Resources::lookup(theme, variant);
                assert_eq!(resources.get(ResourceKey::BarBackground).a, 1.0, "{theme:?} {variant:?}");
                assert_eq!(resources.get(ResourceKey::BarForeground).a, 1.0, "{theme:?} {variant:?}");
            }
        }
    }

    #[test]
    fn variants_pick_different_dictionaries() {
        let dark = Resources::lookup(ColorTheme::GithubDefault, ThemeVariant::Dark);
        let light = Resources::lookup(ColorTheme::GithubDefault, ThemeVariant::Light);
        assert_ne!(dark.bar_background, light.bar_background);
        assert_eq!(light.get(ResourceKey::BarBackground), Color::WHITE);
    }
}
