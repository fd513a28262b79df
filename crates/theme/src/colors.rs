use statusbar_core::Color;

/// Conversion of status bar colors into [`iced::Color`].
pub trait ToIced {
    fn to_iced(self) -> iced::Color;
}

impl ToIced for Color {
    #[inline]
    fn to_iced(self) -> iced::Color {
        iced::Color::from_rgba(self.r, self.g, self.b, self.a)
    }
}

/// Parse a hex literal known to be valid at compile time.
pub(crate) fn hex(value: &str) -> Color {
    Color::from_hex(value).unwrap_or(Color::TRANSPARENT)
}
