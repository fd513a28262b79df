use crate::inline::Inline;
use statusbar_core::{Entry, EntryKey};

/// An entry placed in a region, plus the state the container derives for it.
#[derive(Debug, Clone)]
pub struct Slot {
    pub entry: Entry,
    /// `false` while the entry's id is disabled. Rendered only when this and
    /// `entry.is_show` are both true.
    pub visible: bool,
    /// Parsed `entry.text`, refreshed on every text change.
    pub inlines: Vec<Inline>,
}

impl Slot {
    pub fn is_rendered(&self) -> bool {
        self.visible && self.entry.is_show
    }
}

/// Ordered entries for one alignment slot.
///
/// Sorted by non-increasing priority; equal priorities keep arrival order.
#[derive(Debug, Default)]
pub struct Region {
    slots: Vec<Slot>,
}

impl Region {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position a new entry of `priority` would take: before the first
    /// entry with strictly lower priority, or at the end.
    pub fn insert_index(&self, priority: i32) -> usize {
        self.slots
            .iter()
            .position(|slot| slot.entry.priority < priority)
            .unwrap_or(self.slots.len())
    }

    /// Insert `slot` at its rank and return the index it landed at.
    pub fn insert(&mut self, slot: Slot) -> usize {
        let index = self.insert_index(slot.entry.priority);
        self.slots.insert(index, slot);
        index
    }

    /// Remove the entry with `key`. Absent keys are a no-op.
    pub fn remove(&mut self, key: EntryKey) -> Option<Slot> {
        let index = self.slots.iter().position(|slot| slot.entry.key == key)?;
        Some(self.slots.remove(index))
    }

    pub fn get(&self, key: EntryKey) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.entry.key == key)
    }

    pub fn get_mut(&mut self, key: EntryKey) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|slot| slot.entry.key == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Slot> {
        self.slots.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Ids in display order.
    pub fn ids(&self) -> Vec<&str> {
        self.slots.iter().map(|slot| slot.entry.id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statusbar_core::Alignment;

    fn slot(id: &str, priority: i32) -> Slot {
        Slot {
            entry: Entry::new(id, Alignment::Left, priority),
            visible: true,
            inlines: Vec::new(),
        }
    }

    #[test]
    fn higher_priority_goes_first() {
        let mut region = Region::new();
        region.insert(slot("low", -100));
        region.insert(slot("high", 100));
        region.insert(slot("mid", 0));

        assert_eq!(region.ids(), ["high", "mid", "low"]);
    }

    #[test]
    fn equal_priorities_keep_arrival_order() {
        let mut region = Region::new();
        for (id, priority) in [("a", 1), ("b", 0), ("c", 1), ("d", 0), ("e", 2), ("f", 1)] {
            region.insert(slot(id, priority));
        }

        assert_eq!(region.ids(), ["e", "a", "c", "f", "b", "d"]);

        let priorities: Vec<i32> = region.iter().map(|s| s.entry.priority).collect();
        assert!(priorities.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn removing_an_absent_entry_is_a_no_op() {
        let mut region = Region::new();
        let kept = slot("kept", 0);
        let key = kept.entry.key;
        region.insert(kept);

        let stranger = Entry::new("stranger", Alignment::Left, 0);
        assert!(region.remove(stranger.key).is_none());
        assert_eq!(region.len(), 1);

        assert!(region.remove(key).is_some());
        assert!(region.remove(key).is_none());
        assert!(region.is_empty());
    }
}
