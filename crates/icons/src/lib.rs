//! Icon lookup and `$(icon-name)` token parsing for status bar text.

pub mod catalog;
pub mod parser;

pub use catalog::{CodiconCatalog, IconCatalog};
pub use parser::{has_icons, parse, Segment, Segments, SPIN_SUFFIX};
