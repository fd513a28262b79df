//! The status bar surface: three priority-ordered regions, the disabled-ids
//! filter, pointer click tracking and the right-click configuration menu.

pub mod container;
pub mod inline;
pub mod menu;
pub mod region;
pub mod view;

pub use container::{PointerButton, SharedContainer, StatusBarContainer};
pub use inline::{layout, Inline};
pub use menu::{ConfigMenu, HideAction, MenuToggle};
pub use region::{Region, Slot};
pub use view::{BarSnapshot, EntryView};
