pub mod change;
pub mod color;
pub mod disabled;
pub mod entry;
pub mod error;
pub mod surface;

pub use change::EntryChange;
pub use color::Color;
pub use disabled::{DisabledDelta, DisabledIds};
pub use entry::{Alignment, ClickHandler, Content, Entry, EntryKey, FontWeight};
pub use error::{Result, StatusBarError};
pub use surface::Surface;
