/// Normalised RGBA colour (each channel in `[0.0, 1.0]`).
///
/// Used for the optional foreground / background hints an entry carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK:            Self = Self::rgb(0x00, 0x00, 0x00);
    pub const WHITE:            Self = Self::rgb(0xff, 0xff, 0xff);
    pub const MEDIUM_SEA_GREEN: Self = Self::rgb(0x3c, 0xb3, 0x71);
    pub const DODGER_BLUE:      Self = Self::rgb(0x1e, 0x90, 0xff);
    pub const ORANGE_RED:       Self = Self::rgb(0xff, 0x45, 0x00);
    pub const TRANSPARENT:      Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    /// Build an opaque colour from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };

        match hex.len() {
            6 => Some(Self::rgb(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)),
            8 => Some(
                Self::rgb(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)
                    .with_alpha(byte(&hex[6..8])? as f32 / 255.0),
            ),
            _ => None,
        }
    }

    /// Return a copy with the alpha channel set to `alpha`.
    #[inline]
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_and_eight_digit_hex() {
        assert_eq!(Color::from_hex("#ff4500"), Some(Color::ORANGE_RED));

        let c = Color::from_hex("00000080").unwrap();
        assert_eq!(c.r, 0.0);
        assert!((c.a - 128.0 / 255.0).abs() < f32::EPSILON);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#gggggg"), None);
        assert_eq!(Color::from_hex("#ééé"), None);
    }
}
