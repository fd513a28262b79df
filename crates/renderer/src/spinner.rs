/// Frames cycled in place of a spinning icon's glyph.
pub const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Glyph to draw for an icon at animation `frame`.
pub fn glyph(icon: char, spin: bool, frame: usize) -> char {
    if spin {
        FRAMES[frame % FRAMES.len()]
    } else {
        icon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_icons_ignore_the_frame() {
        assert_eq!(glyph('x', false, 7), 'x');
    }

    #[test]
    fn spinning_icons_wrap_around() {
        assert_eq!(glyph('x', true, 0), FRAMES[0]);
        assert_eq!(glyph('x', true, FRAMES.len() + 2), FRAMES[2]);
    }
}
