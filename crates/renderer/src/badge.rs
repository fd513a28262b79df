use crate::BarEvent;
use iced::{
    widget::{container, text},
    Element, Length,
};
use statusbar_core::Color;
use statusbar_theme::{Theme, ToIced};

/// Custom entry content drawn as a colored label instead of the entry text.
///
/// Attach it with `item.set_content(Some(Arc::new(Badge { .. })))`.
#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub label: String,
    pub foreground: Color,
    pub background: Color,
}

impl Badge {
    pub fn new(label: impl Into<String>, foreground: Color, background: Color) -> Self {
        Self {
            label: label.into(),
            foreground,
            background,
        }
    }

    pub fn view<'a>(&self, theme: &Theme) -> Element<'a, BarEvent> {
        let background = self.background.to_iced();

        container(
            text(self.label.clone())
                .size(theme.font_size)
                .color(self.foreground.to_iced()),
        )
        .padding([0, theme.padding])
        .center_y(Length::Fill)
        .style(move |_: &iced::Theme| container::Style {
            background: Some(iced::Background::Color(background)),
            ..Default::default()
        })
        .into()
    }
}
