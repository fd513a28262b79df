use crate::catalog::IconCatalog;
use std::iter::FusedIterator;

/// Suffix that requests the animated rendition of an icon: `$(sync~spin)`.
pub const SPIN_SUFFIX: &str = "~spin";

const TOKEN_OPEN: &str = "$(";
const TOKEN_CLOSE: char = ')';

/// One piece of parsed status bar text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Verbatim text. Unknown icon references degrade to this, delimiters included.
    Text(&'a str),
    /// A known icon; `name` has the spin suffix stripped.
    Icon { name: &'a str, glyph: char, spin: bool },
}

/// Lazy left-to-right split of a string into [`Segment`]s.
///
/// Created by [`parse`].
#[derive(Debug)]
pub struct Segments<'a, 'c, C: ?Sized> {
    text: &'a str,
    catalog: &'c C,
    /// Start of the literal run not yet emitted.
    pos: usize,
    /// Icon found after a literal run, emitted on the following call.
    pending: Option<Segment<'a>>,
}

/// A `$(...)` occurrence: byte range of the whole token plus its inner name.
struct Token<'a> {
    start: usize,
    end: usize,
    name: &'a str,
}

/// Split `text` into literal runs and icon references.
///
/// Matches are leftmost-first and non-overlapping: a token is `$(`, one or
/// more characters other than `)`, then `)`. Empty input yields nothing.
pub fn parse<'a, 'c, C>(text: &'a str, catalog: &'c C) -> Segments<'a, 'c, C>
where
    C: IconCatalog + ?Sized,
{
    Segments {
        text,
        catalog,
        pos: 0,
        pending: None,
    }
}

/// Whether `text` contains at least one `$(...)` token, known or not.
pub fn has_icons(text: &str) -> bool {
    find_token(text, 0).is_some()
}

fn find_token(text: &str, from: usize) -> Option<Token<'_>> {
    let mut cursor = from;

    while let Some(offset) = text[cursor..].find(TOKEN_OPEN) {
        let start = cursor + offset;
        let inner = start + TOKEN_OPEN.len();

        match text[inner..].find(TOKEN_CLOSE) {
            // No closing paren anywhere after this point, so no later match either.
            None => return None,
            // `$()` is not a token; retry one byte further.
            Some(0) => cursor = start + 1,
            Some(len) => {
                return Some(Token {
                    start,
                    end: inner + len + 1,
                    name: &text[inner..inner + len],
                })
            }
        }
    }

    None
}

impl<'a, C> Segments<'a, '_, C>
where
    C: IconCatalog + ?Sized,
{
    fn resolve(&self, token: &Token<'a>) -> Segment<'a> {
        let (name, spin) = match token.name.strip_suffix(SPIN_SUFFIX) {
            Some(stripped) => (stripped, true),
            None => (token.name, false),
        };

        match self.catalog.lookup(name) {
            Some(glyph) => Segment::Icon { name, glyph, spin },
            None => Segment::Text(&self.text[token.start..token.end]),
        }
    }
}

impl<'a, C> Iterator for Segments<'a, '_, C>
where
    C: IconCatalog + ?Sized,
{
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(segment) = self.pending.take() {
            return Some(segment);
        }

        if self.pos >= self.text.len() {
            return None;
        }

        let Some(token) = find_token(self.text, self.pos) else {
            let rest = &self.text[self.pos..];
            self.pos = self.text.len();
            return Some(Segment::Text(rest));
        };

        let literal = &self.text[self.pos..token.start];
        let segment = self.resolve(&token);
        self.pos = token.end;

        if literal.is_empty() {
            Some(segment)
        } else {
            self.pending = Some(segment);
            Some(Segment::Text(literal))
        }
    }
}

impl<C> FusedIterator for Segments<'_, '_, C> where C: IconCatalog + ?Sized {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CodiconCatalog;

    fn catalog(name: &str) -> Option<char> {
        match name {
            "check" => Some('✓'),
            "sync" => Some('↻'),
            "account" => Some('@'),
            _ => None,
        }
    }

    fn segments(text: &str) -> Vec<Segment<'_>> {
        parse(text, &catalog).collect()
    }

    #[test]
    fn splits_text_around_icon() {
        assert_eq!(
            segments("Hello $(check) world"),
            vec![
                Segment::Text("Hello "),
                Segment::Icon { name: "check", glyph: '✓', spin: false },
                Segment::Text(" world"),
            ]
        );
    }

    #[test]
    fn spin_suffix_is_stripped() {
        assert_eq!(
            segments("$(sync~spin)"),
            vec![Segment::Icon { name: "sync", glyph: '↻', spin: true }]
        );
    }

    #[test]
    fn unknown_icon_degrades_to_literal_token() {
        assert_eq!(segments("$(unknown-name)"), vec![Segment::Text("$(unknown-name)")]);
        assert_eq!(
            segments("a $(nope~spin) b"),
            vec![Segment::Text("a "), Segment::Text("$(nope~spin)"), Segment::Text(" b")]
        );
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(segments("").is_empty());
    }

    #[test]
    fn plain_text_is_one_segment() {
        assert_eq!(segments("UTF-8"), vec![Segment::Text("UTF-8")]);
    }

    #[test]
    fn adjacent_icons_have_no_empty_literals() {
        assert_eq!(
            segments("$(account)$(check)"),
            vec![
                Segment::Icon { name: "account", glyph: '@', spin: false },
                Segment::Icon { name: "check", glyph: '✓', spin: false },
            ]
        );
    }

    #[test]
    fn malformed_tokens_stay_literal() {
        assert_eq!(segments("cost $() $(check"), vec![Segment::Text("cost $() $(check")]);
        assert_eq!(
            segments("$()$(check)"),
            vec![Segment::Text("$()"), Segment::Icon { name: "check", glyph: '✓', spin: false }]
        );
    }

    #[test]
    fn nested_open_is_part_of_the_name() {
        // Leftmost-first: the token starts at the first `$(` and ends at the first `)`.
        assert_eq!(segments("$($(check)"), vec![Segment::Text("$($(check)")]);
    }

    #[test]
    fn multibyte_text_is_preserved() {
        assert_eq!(
            segments("↑ 1 ↓ 0 $(sync~spin) ! 0"),
            vec![
                Segment::Text("↑ 1 ↓ 0 "),
                Segment::Icon { name: "sync", glyph: '↻', spin: true },
                Segment::Text(" ! 0"),
            ]
        );
    }

    #[test]
    fn works_with_the_builtin_catalog() {
        let catalog = CodiconCatalog::new();
        let parsed: Vec<_> = parse("$(git-branch) master", &catalog).collect();
        assert!(matches!(parsed[0], Segment::Icon { name: "git-branch", spin: false, .. }));
        assert_eq!(parsed[1], Segment::Text(" master"));
    }

    #[test]
    fn detects_tokens() {
        assert!(has_icons("x $(anything) y"));
        assert!(!has_icons("no icons $() here"));
    }
}
