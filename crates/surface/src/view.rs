use crate::inline::Inline;
use statusbar_core::{Alignment, Color, Content, EntryKey, FontWeight};
use std::fmt;

/// Everything a renderer needs to draw one rendered entry.
#[derive(Clone)]
pub struct EntryView {
    pub key: EntryKey,
    pub id: String,
    pub inlines: Vec<Inline>,
    pub tool_tip: String,
    pub color: Option<Color>,
    pub background_color: Option<Color>,
    pub font_weight: FontWeight,
    pub content: Option<Content>,
    pub has_click: bool,
    pub pressed: bool,
    pub hovered: bool,
}

impl EntryView {
    pub fn has_foreground(&self) -> bool {
        self.color.is_some()
    }

    pub fn has_background(&self) -> bool {
        self.background_color.is_some()
    }

    /// Whether any inline needs animation frames.
    pub fn spins(&self) -> bool {
        self.inlines
            .iter()
            .any(|inline| matches!(inline, Inline::Icon { spin: true, .. }))
    }
}

impl fmt::Debug for EntryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryView")
            .field("key", &self.key)
            .field("id", &self.id)
            .field("inlines", &self.inlines)
            .field("has_content", &self.content.is_some())
            .field("pressed", &self.pressed)
            .finish_non_exhaustive()
    }
}

/// Rendered entries of all three regions, in display order.
///
/// Taken under the container lock so views can be built without holding it.
#[derive(Debug, Clone, Default)]
pub struct BarSnapshot {
    pub left: Vec<EntryView>,
    pub center: Vec<EntryView>,
    pub right: Vec<EntryView>,
}

impl BarSnapshot {
    pub fn region(&self, alignment: Alignment) -> &[EntryView] {
        match alignment {
            Alignment::Left => &self.left,
            Alignment::Center => &self.center,
            Alignment::Right => &self.right,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntryView> {
        self.left.iter().chain(&self.center).chain(&self.right)
    }

    pub fn spins(&self) -> bool {
        self.iter().any(EntryView::spins)
    }
}
