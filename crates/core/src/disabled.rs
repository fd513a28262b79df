use std::collections::{btree_set, BTreeSet};

/// Set of entry ids the user has chosen to hide.
///
/// Owned by the host application; the container keeps a copy and recomputes
/// entry visibility from the difference between successive versions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisabledIds(BTreeSet<String>);

/// Ids whose visibility must flip when moving from one set to another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisabledDelta {
    /// `old − new`: ids that became enabled.
    pub to_show: BTreeSet<String>,
    /// `new − old`: ids that became disabled.
    pub to_hide: BTreeSet<String>,
}

impl DisabledDelta {
    pub fn is_empty(&self) -> bool {
        self.to_show.is_empty() && self.to_hide.is_empty()
    }
}

impl DisabledIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    /// Returns `true` if the id was not already disabled.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.0.insert(id.into())
    }

    /// Returns `true` if the id was disabled.
    pub fn remove(&mut self, id: &str) -> bool {
        self.0.remove(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.0.iter()
    }

    /// Compute which ids change visibility going from `old` to `new`.
    pub fn delta(old: &Self, new: &Self) -> DisabledDelta {
        DisabledDelta {
            to_show: old.0.difference(&new.0).cloned().collect(),
            to_hide: new.0.difference(&old.0).cloned().collect(),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for DisabledIds {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for DisabledIds {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a DisabledIds {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_splits_added_and_removed_ids() {
        let old: DisabledIds = ["a", "b"].into_iter().collect();
        let new: DisabledIds = ["b", "c"].into_iter().collect();

        let delta = DisabledIds::delta(&old, &new);
        assert_eq!(delta.to_show.into_iter().collect::<Vec<_>>(), ["a"]);
        assert_eq!(delta.to_hide.into_iter().collect::<Vec<_>>(), ["c"]);
    }

    #[test]
    fn identical_sets_produce_empty_delta() {
        let set: DisabledIds = ["mode", "cursor"].into_iter().collect();
        assert!(DisabledIds::delta(&set, &set.clone()).is_empty());
    }
}
