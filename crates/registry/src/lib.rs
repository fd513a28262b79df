//! Entry registry and lifecycle engine for the status bar.
//!
//! A [`StatusBarManager`] hands out [`StatusBarItem`]s, buffers them until a
//! surface is bound, and marshals writes made on other threads onto the
//! thread that owns the surface.

mod dispatcher;
pub mod item;
pub mod manager;
pub mod message;

pub use item::StatusBarItem;
pub use dispatcher::WorkSignal;
pub use manager::{StatusBarManager, WeakStatusBarManager};
pub use message::MessageHandle;
