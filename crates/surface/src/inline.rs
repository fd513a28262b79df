use statusbar_icons::{parse, IconCatalog, Segment};

/// Owned form of a parsed text [`Segment`], kept alongside its entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Icon {
        name: String,
        glyph: char,
        /// Only set when the catalog has an animated rendition.
        spin: bool,
    },
}

/// Parse `text` in full into owned inlines.
pub fn layout(text: &str, catalog: &dyn IconCatalog) -> Vec<Inline> {
    parse(text, catalog)
        .map(|segment| match segment {
            Segment::Text(text) => Inline::Text(text.to_owned()),
            Segment::Icon { name, glyph, spin } => Inline::Icon {
                name: name.to_owned(),
                glyph,
                spin: spin && catalog.can_spin(name),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use statusbar_icons::CodiconCatalog;

    #[test]
    fn spin_requires_an_animated_rendition() {
        let catalog = CodiconCatalog::new();
        let inlines = layout("$(sync~spin) $(check~spin)", &catalog);

        assert!(matches!(&inlines[0], Inline::Icon { name, spin: true, .. } if name == "sync"));
        assert_eq!(inlines[1], Inline::Text(" ".into()));
        assert!(matches!(&inlines[2], Inline::Icon { name, spin: false, .. } if name == "check"));
    }
}
