/// Pure `name -> glyph` lookup used to validate icon references.
///
/// Implementations must be side-effect free; the parser calls `lookup` on the
/// owning thread every time an entry's text changes.
pub trait IconCatalog: Send + Sync {
    fn lookup(&self, name: &str) -> Option<char>;

    /// Whether the icon has an animated rendition for `$(name~spin)`.
    /// Non-spinnable icons fall back to their static glyph.
    fn can_spin(&self, _name: &str) -> bool {
        false
    }
}

impl<F> IconCatalog for F
where
    F: Fn(&str) -> Option<char> + Send + Sync,
{
    fn lookup(&self, name: &str) -> Option<char> {
        self(name)
    }
}

/// Built-in subset of the VS Code codicon font.
///
/// Glyphs are the font's private-use code points, so the bar font must
/// include codicons for them to render.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodiconCatalog;

const SPINNABLE: &[&str] = &["gear", "loading", "sync"];

const CODICONS: &[(&str, char)] = &[
    ("account", '\u{eb99}'),
    ("add", '\u{ea60}'),
    ("alert", '\u{ea6c}'),
    ("bell", '\u{eaa2}'),
    ("bug", '\u{eaaf}'),
    ("calendar", '\u{eab0}'),
    ("check", '\u{eab2}'),
    ("check-all", '\u{ebb1}'),
    ("chevron-down", '\u{eab4}'),
    ("chevron-up", '\u{eab7}'),
    ("circle-filled", '\u{ea71}'),
    ("clock", '\u{ea82}'),
    ("close", '\u{ea76}'),
    ("cloud", '\u{ebaa}'),
    ("cloud-upload", '\u{eb9a}'),
    ("code", '\u{eac4}'),
    ("comment", '\u{ea6b}'),
    ("copilot", '\u{ec1e}'),
    ("debug-alt", '\u{eb91}'),
    ("error", '\u{ea87}'),
    ("eye", '\u{ea70}'),
    ("feedback", '\u{eb96}'),
    ("file", '\u{ea7b}'),
    ("flame", '\u{eaf2}'),
    ("folder", '\u{ea83}'),
    ("gear", '\u{eaf8}'),
    ("git-branch", '\u{ea68}'),
    ("git-commit", '\u{eafc}'),
    ("git-merge", '\u{eafe}'),
    ("git-pull-request", '\u{ea64}'),
    ("github", '\u{ea84}'),
    ("globe", '\u{eb01}'),
    ("heart", '\u{eb05}'),
    ("home", '\u{eb06}'),
    ("info", '\u{ea74}'),
    ("json", '\u{eb0f}'),
    ("key", '\u{eb11}'),
    ("light-bulb", '\u{ea61}'),
    ("lightbulb", '\u{ea61}'),
    ("loading", '\u{eb19}'),
    ("lock", '\u{ea75}'),
    ("mail", '\u{eb1c}'),
    ("mention", '\u{eb24}'),
    ("person", '\u{ea67}'),
    ("play", '\u{eb2c}'),
    ("plug", '\u{eb2d}'),
    ("pulse", '\u{eb31}'),
    ("rocket", '\u{eb44}'),
    ("search", '\u{ea6d}'),
    ("server", '\u{eb50}'),
    ("settings", '\u{eb52}'),
    ("settings-gear", '\u{eaf8}'),
    ("sign-in", '\u{ea6f}'),
    ("sign-out", '\u{ea6e}'),
    ("source-control", '\u{ea68}'),
    ("star", '\u{ea6a}'),
    ("stop", '\u{ead7}'),
    ("sync", '\u{ea77}'),
    ("tag", '\u{ea66}'),
    ("terminal", '\u{ea85}'),
    ("thumbsup", '\u{eb86}'),
    ("tools", '\u{eb6d}'),
    ("trash", '\u{ea81}'),
    ("warning", '\u{ea6c}'),
    ("watch", '\u{eb7b}'),
    ("zap", '\u{ea86}'),
];

impl CodiconCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Every icon name this catalog knows.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        CODICONS.iter().map(|(name, _)| *name)
    }
}

impl IconCatalog for CodiconCatalog {
    fn lookup(&self, name: &str) -> Option<char> {
        CODICONS
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, glyph)| *glyph)
    }

    fn can_spin(&self, name: &str) -> bool {
        SPINNABLE.contains(&name)
    }
}
