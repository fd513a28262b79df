use crate::BarEvent;
use iced::{
    widget::{button, checkbox, column, container, row, text, Column},
    Alignment, Element, Length,
};
use statusbar_surface::ConfigMenu;
use statusbar_theme::{ResourceKey, Theme, ToIced};

/// Draw the item configuration menu.
pub fn view<'a>(menu: &'a ConfigMenu, theme: &'a Theme) -> Element<'a, BarEvent> {
    let foreground = theme.resource(ResourceKey::MenuForeground).to_iced();
    let background = theme.resource(ResourceKey::MenuBackground).to_iced();
    let border = theme.resource(ResourceKey::Border).to_iced();

    let toggles = menu.toggles.iter().map(|toggle| -> Element<'a, BarEvent> {
        let id = toggle.id.clone();
        checkbox(toggle.checked)
            .label(toggle.label.as_str())
            .text_size(theme.font_size)
            .on_toggle(move |checked| BarEvent::MenuToggled(id.clone(), checked))
            .into()
    });

    let mut items = Column::with_children(toggles).spacing(4);

    if let Some(hide) = &menu.hide_origin {
        let label = text(hide.label.as_str()).size(theme.font_size).color(foreground);
        items = items.push(button(label).on_press(BarEvent::MenuHideOrigin).style(button::text));
    }

    let footer = row![button(text("Done").size(theme.font_size)).on_press(BarEvent::MenuClosed)]
        .align_y(Alignment::Center);

    container(column![items, footer].spacing(8))
        .padding(8)
        .width(Length::Shrink)
        .style(move |_: &iced::Theme| container::Style {
            background: Some(iced::Background::Color(background)),
            text_color: Some(foreground),
            border: iced::Border {
                color: border,
                width: 1.0,
                radius: 4.0.into(),
            },
            ..Default::default()
        })
        .into()
}
