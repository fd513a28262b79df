use crate::{change::EntryChange, color::Color};
use std::{
    any::Any,
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

/// Zero-argument callback fired when an entry is clicked.
pub type ClickHandler = Arc<dyn Fn() + Send + Sync>;

/// Arbitrary replacement for text-based rendering (e.g. an embedded view).
///
/// The core never looks inside; renderers downcast to the types they know.
pub type Content = Arc<dyn Any + Send + Sync>;

/// Which region of the bar an entry lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub const ALL: [Alignment; 3] = [Alignment::Left, Alignment::Center, Alignment::Right];
}

/// Font weight hint for the entry's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Process-unique identity of one entry instance.
///
/// Unlike [`Entry::id`], which is caller-supplied and may repeat, a key is
/// never shared between two entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey(u64);

impl EntryKey {
    /// Allocate a fresh key.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mutable state of one status bar item.
#[derive(Clone)]
pub struct Entry {
    pub key: EntryKey,
    /// Stable identity used by the disabled-ids set and the configuration menu.
    pub id: String,
    /// Label shown in the configuration menu; falls back to `id`.
    pub name: Option<String>,
    pub alignment: Alignment,
    /// Higher priority sorts further toward the start of its region.
    pub priority: i32,
    /// May embed `$(icon)` tokens.
    pub text: String,
    pub tool_tip: String,
    pub color: Option<Color>,
    pub background_color: Option<Color>,
    pub font_weight: FontWeight,
    pub content: Option<Content>,
    pub click: Option<ClickHandler>,
    pub is_show: bool,
    pub is_temporary: bool,
}

impl Entry {
    /// A persistent, initially hidden entry.
    pub fn new(id: impl Into<String>, alignment: Alignment, priority: i32) -> Self {
        Self {
            key: EntryKey::next(),
            id: id.into(),
            name: None,
            alignment,
            priority,
            text: String::new(),
            tool_tip: String::new(),
            color: None,
            background_color: None,
            font_weight: FontWeight::Normal,
            content: None,
            click: None,
            is_show: false,
            is_temporary: false,
        }
    }

    /// A temporary message entry, shown immediately in the left region.
    pub fn temporary(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_show: true,
            is_temporary: true,
            ..Self::new(id, Alignment::Left, 0)
        }
    }

    /// Apply a single property change.
    pub fn apply(&mut self, change: EntryChange) {
        match change {
            EntryChange::Text(text) => self.text = text,
            EntryChange::ToolTip(tip) => self.tool_tip = tip,
            EntryChange::Name(name) => self.name = name,
            EntryChange::Click(click) => self.click = click,
            EntryChange::Color(color) => self.color = color,
            EntryChange::BackgroundColor(color) => self.background_color = color,
            EntryChange::FontWeight(weight) => self.font_weight = weight,
            EntryChange::Content(content) => self.content = content,
            EntryChange::Show(show) => self.is_show = show,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    pub fn has_click(&self) -> bool {
        self.click.is_some()
    }

    pub fn has_foreground(&self) -> bool {
        self.color.is_some()
    }

    pub fn has_background(&self) -> bool {
        self.background_color.is_some()
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &self.key)
            .field("id", &self.id)
            .field("alignment", &self.alignment)
            .field("priority", &self.priority)
            .field("text", &self.text)
            .field("has_click", &self.has_click())
            .field("has_content", &self.content.is_some())
            .field("is_show", &self.is_show)
            .field("is_temporary", &self.is_temporary)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entries_start_hidden_and_persistent() {
        let entry = Entry::new("mode", Alignment::Right, 5);
        assert!(!entry.is_show);
        assert!(!entry.is_temporary);
        assert_eq!(entry.display_name(), "mode");
    }

    #[test]
    fn temporary_entries_are_shown_immediately() {
        let entry = Entry::temporary("{tmp}", "$(sync~spin) Saving");
        assert!(entry.is_show);
        assert!(entry.is_temporary);
        assert_eq!(entry.alignment, Alignment::Left);
        assert_eq!(entry.priority, 0);
    }

    #[test]
    fn keys_are_unique() {
        let a = Entry::new("same", Alignment::Left, 0);
        let b = Entry::new("same", Alignment::Left, 0);
        assert_ne!(a.key, b.key);
    }

    #[test]
    fn apply_updates_pseudo_state() {
        let mut entry = Entry::new("mode", Alignment::Left, 0);
        assert!(!entry.has_background());

        entry.apply(EntryChange::BackgroundColor(Some(Color::DODGER_BLUE)));
        entry.apply(EntryChange::Click(Some(Arc::new(|| {}))));
        entry.apply(EntryChange::Name(Some("Editor mode".into())));

        assert!(entry.has_background());
        assert!(entry.has_click());
        assert!(!entry.has_foreground());
        assert_eq!(entry.display_name(), "Editor mode");
    }
}
