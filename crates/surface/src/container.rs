use crate::{
    inline::layout,
    menu::{ConfigMenu, HideAction, MenuToggle},
    region::{Region, Slot},
    view::{BarSnapshot, EntryView},
};
use parking_lot::{Mutex, MutexGuard};
use statusbar_core::{
    Alignment, ClickHandler, Content, DisabledDelta, DisabledIds, Entry, EntryChange, EntryKey,
    Surface,
};
use statusbar_icons::{CodiconCatalog, IconCatalog};
use std::{collections::HashSet, fmt, sync::Arc};
use tracing::{debug, trace};

/// Mouse button reported with a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other,
}

/// The concrete status bar surface: three regions plus the disabled-ids
/// filter, click tracking and the configuration menu.
pub struct StatusBarContainer {
    left: Region,
    center: Region,
    right: Region,
    disabled: DisabledIds,
    context_menu: bool,
    hovered: Option<EntryKey>,
    pressed: Option<EntryKey>,
    catalog: Arc<dyn IconCatalog>,
}

impl StatusBarContainer {
    pub fn new() -> Self {
        Self::with_catalog(Arc::new(CodiconCatalog::new()))
    }

    pub fn with_catalog(catalog: Arc<dyn IconCatalog>) -> Self {
        Self {
            left: Region::new(),
            center: Region::new(),
            right: Region::new(),
            disabled: DisabledIds::new(),
            context_menu: true,
            hovered: None,
            pressed: None,
            catalog,
        }
    }

    /// Start with `disabled` already applied; entries inserted later are
    /// filtered against it.
    pub fn with_disabled_ids(mut self, disabled: DisabledIds) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn region(&self, alignment: Alignment) -> &Region {
        match alignment {
            Alignment::Left => &self.left,
            Alignment::Center => &self.center,
            Alignment::Right => &self.right,
        }
    }

    fn region_mut(&mut self, alignment: Alignment) -> &mut Region {
        match alignment {
            Alignment::Left => &mut self.left,
            Alignment::Center => &mut self.center,
            Alignment::Right => &mut self.right,
        }
    }

    fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.left.iter().chain(self.center.iter()).chain(self.right.iter())
    }

    fn slots_mut(&mut self) -> impl Iterator<Item = &mut Slot> {
        self.left
            .iter_mut()
            .chain(self.center.iter_mut())
            .chain(self.right.iter_mut())
    }

    pub fn slot(&self, key: EntryKey) -> Option<&Slot> {
        self.slots().find(|slot| slot.entry.key == key)
    }

    fn slot_mut(&mut self, key: EntryKey) -> Option<&mut Slot> {
        self.slots_mut().find(|slot| slot.entry.key == key)
    }

    /// `Some(true)` when the entry is shown and not disabled.
    pub fn is_visible(&self, key: EntryKey) -> Option<bool> {
        self.slot(key).map(Slot::is_rendered)
    }

    /// Total number of entries across all regions, rendered or not.
    pub fn len(&self) -> usize {
        self.left.len() + self.center.len() + self.right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ── Disabled ids ─────────────────────────────────────────────────────────

    pub fn disabled_ids(&self) -> &DisabledIds {
        &self.disabled
    }

    /// Replace the disabled set, flipping only entries whose id changed state.
    pub fn set_disabled_ids(&mut self, disabled: DisabledIds) -> DisabledDelta {
        let old = std::mem::take(&mut self.disabled);
        let delta = DisabledIds::delta(&old, &disabled);
        self.notify_disabled_ids_changed(&old, &disabled);
        delta
    }

    pub fn disable(&mut self, id: &str) -> DisabledDelta {
        let mut next = self.disabled.clone();
        next.insert(id);
        self.set_disabled_ids(next)
    }

    pub fn enable(&mut self, id: &str) -> DisabledDelta {
        let mut next = self.disabled.clone();
        next.remove(id);
        self.set_disabled_ids(next)
    }

    fn apply_delta(&mut self, delta: &DisabledDelta) {
        if delta.is_empty() {
            return;
        }

        for slot in self.slots_mut().filter(|slot| !slot.entry.is_temporary) {
            let id = slot.entry.id.as_str();
            if delta.to_show.contains(id) {
                trace!(id, "Entry re-enabled");
                slot.visible = true;
            } else if delta.to_hide.contains(id) {
                trace!(id, "Entry disabled");
                slot.visible = false;
            }
        }
    }

    // ── Configuration menu ───────────────────────────────────────────────────

    pub fn context_menu_enabled(&self) -> bool {
        self.context_menu
    }

    pub fn set_context_menu_enabled(&mut self, enabled: bool) {
        self.context_menu = enabled;
    }

    /// Build the configuration menu for a secondary click.
    ///
    /// `origin` is the entry under the pointer, if any. A non-temporary
    /// origin is left out of the toggle list and offered as a separate
    /// "hide" action instead. Returns `None` when the menu is disabled.
    pub fn open_menu(&self, origin: Option<EntryKey>) -> Option<ConfigMenu> {
        if !self.context_menu {
            return None;
        }

        let origin = origin
            .and_then(|key| self.slot(key))
            .filter(|slot| !slot.entry.is_temporary);

        let mut seen = HashSet::new();
        let toggles = self
            .slots()
            .filter(|slot| !slot.entry.is_temporary)
            .filter(|slot| origin.map_or(true, |o| o.entry.key != slot.entry.key))
            .filter(|slot| seen.insert(slot.entry.id.as_str()))
            .map(|slot| MenuToggle {
                id: slot.entry.id.clone(),
                label: slot.entry.display_name().to_owned(),
                checked: !self.disabled.contains(&slot.entry.id),
            })
            .collect();

        let hide_origin = origin.map(|slot| HideAction {
            id: slot.entry.id.clone(),
            label: format!("Hide '{}'", slot.entry.display_name()),
            chosen: false,
        });

        Some(ConfigMenu { toggles, hide_origin })
    }

    /// Apply the choices of a dismissed menu in one batch.
    pub fn close_menu(&mut self, menu: &ConfigMenu) -> DisabledDelta {
        let next = menu.reconcile(&self.disabled);
        let delta = self.set_disabled_ids(next);
        if !delta.is_empty() {
            debug!(
                shown = delta.to_show.len(),
                hidden = delta.to_hide.len(),
                "Configuration menu changed disabled entries"
            );
        }
        delta
    }

    // ── Pointer ──────────────────────────────────────────────────────────────

    pub fn pointer_entered(&mut self, key: EntryKey) {
        self.hovered = Some(key);
    }

    pub fn pointer_exited(&mut self, key: EntryKey) {
        if self.hovered == Some(key) {
            self.hovered = None;
        }
    }

    /// Arm a click on `key`. Only primary presses on clickable entries count.
    pub fn pointer_pressed(&mut self, key: EntryKey, button: PointerButton) -> bool {
        let clickable = self.slot(key).is_some_and(|slot| slot.entry.has_click());
        if button == PointerButton::Primary && clickable {
            self.pressed = Some(key);
            true
        } else {
            false
        }
    }

    /// Finish a press. Returns the click handler to run when the pointer is
    /// still over the entry that was pressed.
    ///
    /// The handler is returned rather than called so the caller can release
    /// any lock on the container first.
    pub fn pointer_released(&mut self, key: EntryKey) -> Option<ClickHandler> {
        let pressed = self.pressed.take()?;
        if pressed != key || self.hovered != Some(key) {
            return None;
        }
        self.slot(key)?.entry.click.clone()
    }

    // ── Rendering ────────────────────────────────────────────────────────────

    /// Rendered entries of every region, in display order.
    pub fn snapshot(&self) -> BarSnapshot {
        let views = |region: &Region| -> Vec<EntryView> {
            region
                .iter()
                .filter(|slot| slot.is_rendered())
                .map(|slot| self.view(slot))
                .collect()
        };

        BarSnapshot {
            left: views(&self.left),
            center: views(&self.center),
            right: views(&self.right),
        }
    }

    fn view(&self, slot: &Slot) -> EntryView {
        let entry = &slot.entry;
        EntryView {
            key: entry.key,
            id: entry.id.clone(),
            inlines: slot.inlines.clone(),
            tool_tip: entry.tool_tip.clone(),
            color: entry.color,
            background_color: entry.background_color,
            font_weight: entry.font_weight,
            content: entry.content.clone(),
            has_click: entry.has_click(),
            pressed: self.pressed == Some(entry.key),
            hovered: self.hovered == Some(entry.key),
        }
    }

    pub fn into_shared(self) -> SharedContainer {
        SharedContainer(Arc::new(Mutex::new(self)))
    }
}

impl Default for StatusBarContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StatusBarContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusBarContainer")
            .field("left", &self.left.ids())
            .field("center", &self.center.ids())
            .field("right", &self.right.ids())
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

impl Surface for StatusBarContainer {
    fn insert(&mut self, entry: Entry) {
        let visible = entry.is_temporary || !self.disabled.contains(&entry.id);
        let inlines = layout(&entry.text, self.catalog.as_ref());
        let alignment = entry.alignment;
        debug!(id = %entry.id, key = %entry.key, ?alignment, visible, "Inserting entry");

        self.region_mut(alignment).insert(Slot { entry, visible, inlines });
    }

    fn remove(&mut self, key: EntryKey) -> Option<Entry> {
        if self.hovered == Some(key) {
            self.hovered = None;
        }
        if self.pressed == Some(key) {
            self.pressed = None;
        }

        let slot = Alignment::ALL
            .into_iter()
            .find_map(|alignment| self.region_mut(alignment).remove(key))?;
        Some(slot.entry)
    }

    fn apply(&mut self, key: EntryKey, change: EntryChange) {
        let catalog = Arc::clone(&self.catalog);
        let Some(slot) = self.slot_mut(key) else {
            trace!(%key, "Change for an entry that is no longer present");
            return;
        };

        let relayout = matches!(change, EntryChange::Text(_));
        slot.entry.apply(change);
        if relayout {
            slot.inlines = layout(&slot.entry.text, catalog.as_ref());
        }
    }

    fn content(&self, key: EntryKey) -> Option<Content> {
        self.slot(key)?.entry.content.clone()
    }

    fn notify_disabled_ids_changed(&mut self, old: &DisabledIds, new: &DisabledIds) {
        let delta = DisabledIds::delta(old, new);
        self.apply_delta(&delta);
        self.disabled = new.clone();
    }
}

/// A container shared between the manager it is bound to and the host
/// that renders it and feeds it pointer input.
///
/// Lock order: the manager locks its own state before the container, so the
/// host must never call into the manager while holding [`SharedContainer::lock`].
#[derive(Clone, Default)]
pub struct SharedContainer(Arc<Mutex<StatusBarContainer>>);

impl SharedContainer {
    pub fn new(container: StatusBarContainer) -> Self {
        container.into_shared()
    }

    pub fn lock(&self) -> MutexGuard<'_, StatusBarContainer> {
        self.0.lock()
    }
}

impl fmt::Debug for SharedContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedContainer").field(&*self.0.lock()).finish()
    }
}

impl Surface for SharedContainer {
    fn attach(&mut self, pending: Vec<Entry>) {
        self.0.lock().attach(pending);
    }

    fn insert(&mut self, entry: Entry) {
        self.0.lock().insert(entry);
    }

    fn remove(&mut self, key: EntryKey) -> Option<Entry> {
        self.0.lock().remove(key)
    }

    fn apply(&mut self, key: EntryKey, change: EntryChange) {
        self.0.lock().apply(key, change);
    }

    fn content(&self, key: EntryKey) -> Option<Content> {
        self.0.lock().content(key)
    }

    fn notify_disabled_ids_changed(&mut self, old: &DisabledIds, new: &DisabledIds) {
        self.0.lock().notify_disabled_ids_changed(old, new);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn entry(id: &str, alignment: Alignment, priority: i32) -> Entry {
        let mut entry = Entry::new(id, alignment, priority);
        entry.is_show = true;
        entry
    }

    fn insert(container: &mut StatusBarContainer, id: &str, alignment: Alignment) -> EntryKey {
        let entry = entry(id, alignment, 0);
        let key = entry.key;
        container.insert(entry);
        key
    }

    #[test]
    fn entries_land_in_their_alignment_region() {
        let mut container = StatusBarContainer::new();
        insert(&mut container, "mode", Alignment::Left);
        insert(&mut container, "counter", Alignment::Center);
        insert(&mut container, "cursor", Alignment::Right);

        assert_eq!(container.region(Alignment::Left).ids(), ["mode"]);
        assert_eq!(container.region(Alignment::Center).ids(), ["counter"]);
        assert_eq!(container.region(Alignment::Right).ids(), ["cursor"]);
    }

    #[test]
    fn disabled_ids_filter_new_entries() {
        let disabled: DisabledIds = ["cursor"].into_iter().collect();
        let mut container = StatusBarContainer::new().with_disabled_ids(disabled);
        let key = insert(&mut container, "cursor", Alignment::Right);

        assert_eq!(container.is_visible(key), Some(false));
        assert!(container.slot(key).unwrap().entry.is_show);
        assert!(container.snapshot().right.is_empty());
    }

    #[test]
    fn disable_then_enable_restores_is_show() {
        let mut container = StatusBarContainer::new();
        let shown = insert(&mut container, "branch", Alignment::Left);
        let hidden = insert(&mut container, "status", Alignment::Left);
        container.apply(hidden, EntryChange::Show(false));

        container.disable("branch");
        container.disable("status");
        assert_eq!(container.is_visible(shown), Some(false));
        assert_eq!(container.is_visible(hidden), Some(false));

        container.enable("branch");
        container.enable("status");
        assert_eq!(container.is_visible(shown), Some(true));
        assert_eq!(container.is_visible(hidden), Some(false));

        // add → remove → add ends disabled, same as a single add.
        container.disable("branch");
        assert_eq!(container.is_visible(shown), Some(false));
    }

    #[test]
    fn bulk_replace_only_touches_the_delta() {
        let mut container = StatusBarContainer::new()
            .with_disabled_ids(["a", "b"].into_iter().collect());
        let a = insert(&mut container, "a", Alignment::Left);
        let b = insert(&mut container, "b", Alignment::Left);
        let c = insert(&mut container, "c", Alignment::Left);

        let delta = container.set_disabled_ids(["b", "c"].into_iter().collect());
        assert_eq!(delta.to_show.len(), 1);
        assert_eq!(delta.to_hide.len(), 1);

        assert_eq!(container.is_visible(a), Some(true));
        assert_eq!(container.is_visible(b), Some(false));
        assert_eq!(container.is_visible(c), Some(false));

        let unchanged = container.set_disabled_ids(["b", "c"].into_iter().collect());
        assert!(unchanged.is_empty());
    }

    #[test]
    fn temporary_entries_ignore_disabled_ids() {
        let mut container = StatusBarContainer::new()
            .with_disabled_ids(["{msg}"].into_iter().collect());
        let message = Entry::temporary("{msg}", "Saved");
        let key = message.key;
        container.insert(message);

        assert_eq!(container.is_visible(key), Some(true));
    }

    #[test]
    fn text_changes_are_reparsed() {
        let mut container = StatusBarContainer::new();
        let key = insert(&mut container, "branch", Alignment::Left);

        container.apply(key, EntryChange::Text("$(git-branch) main".into()));
        let inlines = &container.slot(key).unwrap().inlines;
        assert_eq!(inlines.len(), 2);
        assert!(matches!(&inlines[0], crate::Inline::Icon { name, .. } if name == "git-branch"));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut container = StatusBarContainer::new();
        let key = insert(&mut container, "mode", Alignment::Center);

        assert!(container.remove(key).is_some());
        assert!(container.remove(key).is_none());
        assert!(container.is_empty());
    }

    #[test]
    fn menu_lists_persistent_entries_and_offers_hiding_the_origin() {
        let mut container = StatusBarContainer::new()
            .with_disabled_ids(["encoding"].into_iter().collect());
        let mode = insert(&mut container, "mode", Alignment::Left);
        insert(&mut container, "encoding", Alignment::Right);
        container.insert(Entry::temporary("{msg}", "Saved"));

        let menu = container.open_menu(Some(mode)).unwrap();
        let ids: Vec<_> = menu.toggles.iter().map(|t| (t.id.as_str(), t.checked)).collect();
        assert_eq!(ids, [("encoding", false)]);

        let hide = menu.hide_origin.as_ref().unwrap();
        assert_eq!(hide.id, "mode");
        assert_eq!(hide.label, "Hide 'mode'");

        let generic = container.open_menu(None).unwrap();
        assert_eq!(generic.toggles.len(), 2);
        assert!(generic.hide_origin.is_none());
    }

    #[test]
    fn closing_the_menu_applies_all_choices_at_once() {
        let mut container = StatusBarContainer::new();
        let mode = insert(&mut container, "mode", Alignment::Left);
        let cursor = insert(&mut container, "cursor", Alignment::Right);
        let encoding = insert(&mut container, "encoding", Alignment::Right);

        let mut menu = container.open_menu(Some(mode)).unwrap();
        menu.toggle("cursor");
        menu.choose_hide_origin();

        let delta = container.close_menu(&menu);
        assert_eq!(delta.to_hide.len(), 2);
        assert_eq!(container.is_visible(mode), Some(false));
        assert_eq!(container.is_visible(cursor), Some(false));
        assert_eq!(container.is_visible(encoding), Some(true));

        let mut menu = container.open_menu(None).unwrap();
        menu.set_checked("mode", true);
        menu.set_checked("cursor", true);
        container.close_menu(&menu);
        assert!(container.disabled_ids().is_empty());
        assert_eq!(container.is_visible(cursor), Some(true));
    }

    #[test]
    fn disabled_context_menu_does_not_open() {
        let mut container = StatusBarContainer::new();
        container.set_context_menu_enabled(false);
        assert!(container.open_menu(None).is_none());
    }

    #[test]
    fn click_fires_only_when_released_over_the_pressed_entry() {
        let clicks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&clicks);

        let mut container = StatusBarContainer::new();
        let key = insert(&mut container, "mode", Alignment::Left);
        container.apply(
            key,
            EntryChange::Click(Some(Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }))),
        );

        container.pointer_entered(key);
        assert!(container.pointer_pressed(key, PointerButton::Primary));
        assert!(container.snapshot().left[0].pressed);
        if let Some(click) = container.pointer_released(key) {
            click();
        }

        // Moving off before release cancels.
        container.pointer_pressed(key, PointerButton::Primary);
        container.pointer_exited(key);
        assert!(container.pointer_released(key).is_none());

        // Secondary presses never arm a click.
        container.pointer_entered(key);
        assert!(!container.pointer_pressed(key, PointerButton::Secondary));
        assert!(container.pointer_released(key).is_none());

        assert_eq!(clicks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn entries_without_click_do_not_arm() {
        let mut container = StatusBarContainer::new();
        let key = insert(&mut container, "cursor", Alignment::Right);
        container.pointer_entered(key);
        assert!(!container.pointer_pressed(key, PointerButton::Primary));
    }
}
