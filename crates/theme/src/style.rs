use crate::{ResourceKey, Theme};
use statusbar_core::Color;

/// Visual settings for the bar surface itself.
#[derive(Debug, Clone, Copy)]
pub struct BarStyle {
    pub background: Color,
    pub border: Color,
    /// Effective opacity (0.0 = transparent, 1.0 = opaque).
    pub opacity: f32,
}

/// Resolved colors for one item in its current pointer state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemStyle {
    /// `None` leaves the bar background showing through.
    pub background: Option<Color>,
    pub foreground: Color,
}

impl ItemStyle {
    /// Combine an item's own color hints with the theme.
    ///
    /// An explicit background wins over hover and pressed highlights; those
    /// only apply to clickable items.
    pub fn resolve(
        theme: &Theme,
        color: Option<Color>,
        background: Option<Color>,
        clickable: bool,
        hovered: bool,
        pressed: bool,
    ) -> Self {
        let highlight = match (clickable, pressed, hovered) {
            (true, true, _) => Some(theme.resource(ResourceKey::ItemPressedBackground)),
            (true, false, true) => Some(theme.resource(ResourceKey::ItemHoverBackground)),
            _ => None,
        };

        Self {
            background: background.or(highlight),
            foreground: color.unwrap_or_else(|| theme.resource(ResourceKey::BarForeground)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_override_the_theme() {
        let theme = Theme::default();
        let style = ItemStyle::resolve(
            &theme,
            Some(Color::BLACK),
            Some(Color::MEDIUM_SEA_GREEN),
            true,
            true,
            true,
        );
        assert_eq!(style.foreground, Color::BLACK);
        assert_eq!(style.background, Some(Color::MEDIUM_SEA_GREEN));
    }

    #[test]
    fn only_clickable_items_highlight() {
        let theme = Theme::default();
        let idle = ItemStyle::resolve(&theme, None, None, false, true, false);
        assert_eq!(idle.background, None);
        assert_eq!(idle.foreground, theme.resource(ResourceKey::BarForeground));

        let hovered = ItemStyle::resolve(&theme, None, None, true, true, false);
        assert_eq!(hovered.background, Some(theme.resource(ResourceKey::ItemHoverBackground)));

        let pressed = ItemStyle::resolve(&theme, None, None, true, true, true);
        assert_eq!(pressed.background, Some(theme.resource(ResourceKey::ItemPressedBackground)));
    }
}
