//! Drawing for the status bar: turns a [`BarSnapshot`] into iced widgets.
//!
//! Rendering never touches the container directly. The host takes a
//! snapshot under the container lock, draws it, and feeds the resulting
//! [`BarEvent`]s back to the container.

pub mod badge;
pub mod menu;
pub mod spinner;

pub use badge::Badge;

use iced::{
    font::Weight,
    widget::{container, mouse_area, row, text, tooltip, Row},
    Alignment as Align, Element, Font, Length,
};
use statusbar_core::{Alignment, EntryKey, FontWeight};
use statusbar_surface::{BarSnapshot, EntryView, Inline};
use statusbar_theme::{ItemStyle, ResourceKey, Theme, ToIced};

/// Pointer and menu input produced by the bar view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarEvent {
    Entered(EntryKey),
    Exited(EntryKey),
    /// Primary button down over an entry.
    Pressed(EntryKey),
    Released(EntryKey),
    /// Secondary click, over an entry or on empty bar space.
    ContextMenu(Option<EntryKey>),
    MenuToggled(String, bool),
    MenuHideOrigin,
    MenuClosed,
}

/// Draw all three regions of `snapshot`.
///
/// `frame` advances spinning icons; pass any counter that ticks at the
/// theme's spin interval.
pub fn bar<'a>(snapshot: &'a BarSnapshot, theme: &'a Theme, frame: usize) -> Element<'a, BarEvent> {
    let region = |alignment| {
        Row::with_children(
            snapshot
                .region(alignment)
                .iter()
                .map(|view| entry(view, theme, frame)),
        )
        .spacing(theme.gap as f32)
        .height(Length::Fill)
        .align_y(Align::Center)
    };

    let content = row![
        container(region(Alignment::Left)).width(Length::FillPortion(2)),
        container(region(Alignment::Center))
            .width(Length::FillPortion(1))
            .center_x(Length::Fill),
        container(region(Alignment::Right))
            .width(Length::FillPortion(2))
            .align_right(Length::Fill),
    ]
    .width(Length::Fill)
    .height(Length::Fill);

    mouse_area(content)
        .on_right_press(BarEvent::ContextMenu(None))
        .into()
}

/// Draw one entry with its pointer handling and tool tip.
pub fn entry<'a>(view: &'a EntryView, theme: &'a Theme, frame: usize) -> Element<'a, BarEvent> {
    let style = ItemStyle::resolve(
        theme,
        view.color,
        view.background_color,
        view.has_click,
        view.hovered,
        view.pressed,
    );

    let body: Element<'a, BarEvent> =
        match view.content.as_ref().and_then(|content| content.downcast_ref::<Badge>()) {
            Some(badge) => badge.view(theme),
            None => inlines(view, theme, style.foreground, frame),
        };

    let background = style.background.map(|color| iced::Background::Color(color.to_iced()));
    let boxed = container(body)
        .padding([0, theme.padding])
        .center_y(Length::Fill)
        .style(move |_: &iced::Theme| container::Style {
            background,
            ..Default::default()
        });

    let key = view.key;
    let area = mouse_area(boxed)
        .on_enter(BarEvent::Entered(key))
        .on_exit(BarEvent::Exited(key))
        .on_press(BarEvent::Pressed(key))
        .on_release(BarEvent::Released(key))
        .on_right_press(BarEvent::ContextMenu(Some(key)));

    if view.tool_tip.is_empty() {
        return area.into();
    }

    let tip_background = theme.resource(ResourceKey::MenuBackground).to_iced();
    let tip_foreground = theme.resource(ResourceKey::MenuForeground).to_iced();
    let tip = container(text(view.tool_tip.as_str()).size(theme.font_size))
        .padding(4)
        .style(move |_: &iced::Theme| container::Style {
            background: Some(iced::Background::Color(tip_background)),
            text_color: Some(tip_foreground),
            ..Default::default()
        });

    tooltip(area, tip, tooltip::Position::Top).into()
}

fn inlines<'a>(
    view: &'a EntryView,
    theme: &'a Theme,
    color: statusbar_core::Color,
    frame: usize,
) -> Element<'a, BarEvent> {
    let font = match view.font_weight {
        FontWeight::Normal => Font::DEFAULT,
        FontWeight::Bold => Font {
            weight: Weight::Bold,
            ..Font::DEFAULT
        },
    };
    let color = color.to_iced();

    let parts = view.inlines.iter().map(|inline| -> Element<'a, BarEvent> {
        let label = match inline {
            Inline::Text(text) => text.clone(),
            Inline::Icon { glyph, spin, .. } => spinner::glyph(*glyph, *spin, frame).to_string(),
        };
        text(label).size(theme.font_size).font(font).color(color).into()
    });

    Row::with_children(parts).align_y(Align::Center).into()
}
