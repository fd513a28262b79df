use crate::{
    color::Color,
    entry::{ClickHandler, Content, FontWeight},
};
use std::fmt;

/// A single property write flowing from an item handle to its entry.
///
/// Writes made off the owning thread travel as values of this type through
/// the dispatcher queue, so they are applied in the order they were issued.
#[derive(Clone)]
pub enum EntryChange {
    Text(String),
    ToolTip(String),
    /// Display name used by the configuration menu.
    Name(Option<String>),
    Click(Option<ClickHandler>),
    Color(Option<Color>),
    BackgroundColor(Option<Color>),
    FontWeight(FontWeight),
    Content(Option<Content>),
    /// `show()` / `hide()`.
    Show(bool),
}

impl EntryChange {
    /// Short name of the property, for logging.
    pub fn property(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::ToolTip(_) => "tool_tip",
            Self::Name(_) => "name",
            Self::Click(_) => "click",
            Self::Color(_) => "color",
            Self::BackgroundColor(_) => "background_color",
            Self::FontWeight(_) => "font_weight",
            Self::Content(_) => "content",
            Self::Show(_) => "is_show",
        }
    }
}

impl fmt::Debug for EntryChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::ToolTip(tip) => f.debug_tuple("ToolTip").field(tip).finish(),
            Self::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Self::Color(color) => f.debug_tuple("Color").field(color).finish(),
            Self::BackgroundColor(color) => f.debug_tuple("BackgroundColor").field(color).finish(),
            Self::FontWeight(weight) => f.debug_tuple("FontWeight").field(weight).finish(),
            Self::Show(show) => f.debug_tuple("Show").field(show).finish(),
            Self::Click(click) => f.debug_tuple("Click").field(&click.is_some()).finish(),
            Self::Content(content) => f.debug_tuple("Content").field(&content.is_some()).finish(),
        }
    }
}
