use crate::{
    change::EntryChange,
    disabled::DisabledIds,
    entry::{Content, Entry, EntryKey},
};

/// The rendering target the status bar manager forwards entries to.
///
/// A surface owns the left / center / right regions and realises inserts and
/// removals visually. Every method is called on the surface's owning thread.
pub trait Surface: Send {
    /// Called once when the surface is bound, with every entry created
    /// before binding in creation order.
    fn attach(&mut self, pending: Vec<Entry>) {
        for entry in pending {
            self.insert(entry);
        }
    }

    /// Place `entry` into the region matching its alignment.
    fn insert(&mut self, entry: Entry);

    /// Remove the entry from whichever region holds it.
    ///
    /// Removing an absent entry is a no-op and returns `None`.
    fn remove(&mut self, key: EntryKey) -> Option<Entry>;

    /// Apply a property change to a live entry. Unknown keys are ignored.
    fn apply(&mut self, key: EntryKey, change: EntryChange);

    /// Custom content of a live entry, read back for item handles.
    fn content(&self, key: EntryKey) -> Option<Content>;

    /// Recompute visibility after the disabled-ids set changed.
    fn notify_disabled_ids_changed(&mut self, old: &DisabledIds, new: &DisabledIds);
}
