use statusbar_core::DisabledIds;

/// One "show this item" checkbox in the configuration menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuToggle {
    pub id: String,
    pub label: String,
    /// Checked means enabled (id not in the disabled set).
    pub checked: bool,
}

/// The "Hide 'x'" action offered for the entry the menu was opened on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HideAction {
    pub id: String,
    pub label: String,
    pub chosen: bool,
}

/// Right-click configuration menu listing every non-temporary entry.
///
/// The user flips toggles while the menu is open; nothing changes until the
/// menu is closed and [`ConfigMenu::reconcile`] folds every choice into the
/// disabled set at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMenu {
    pub toggles: Vec<MenuToggle>,
    pub hide_origin: Option<HideAction>,
}

impl ConfigMenu {
    /// Flip the toggle for `id`. Returns the new checked state.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let toggle = self.toggles.iter_mut().find(|t| t.id == id)?;
        toggle.checked = !toggle.checked;
        Some(toggle.checked)
    }

    pub fn set_checked(&mut self, id: &str, checked: bool) -> bool {
        match self.toggles.iter_mut().find(|t| t.id == id) {
            Some(toggle) => {
                toggle.checked = checked;
                true
            }
            None => false,
        }
    }

    /// Select the "hide this one" action, if the menu offers it.
    pub fn choose_hide_origin(&mut self) -> bool {
        match self.hide_origin.as_mut() {
            Some(action) => {
                action.chosen = true;
                true
            }
            None => false,
        }
    }

    /// The disabled set after applying this menu's choices to `current`.
    ///
    /// Unchecked toggles are added, checked ones removed; ids not listed in
    /// the menu (temporary entries, entries no longer present) are untouched.
    pub fn reconcile(&self, current: &DisabledIds) -> DisabledIds {
        let mut next = current.clone();

        for toggle in &self.toggles {
            if toggle.checked {
                next.remove(&toggle.id);
            } else {
                next.insert(toggle.id.clone());
            }
        }

        if let Some(action) = self.hide_origin.as_ref().filter(|a| a.chosen) {
            next.insert(action.id.clone());
        }

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(toggles: &[(&str, bool)]) -> ConfigMenu {
        ConfigMenu {
            toggles: toggles
                .iter()
                .map(|(id, checked)| MenuToggle {
                    id: id.to_string(),
                    label: id.to_string(),
                    checked: *checked,
                })
                .collect(),
            hide_origin: None,
        }
    }

    #[test]
    fn reconcile_adds_unchecked_and_removes_checked() {
        let current: DisabledIds = ["encoding", "orphan"].into_iter().collect();
        let mut menu = menu(&[("mode", true), ("encoding", false), ("cursor", true)]);

        menu.toggle("encoding");
        menu.toggle("cursor");

        let next = menu.reconcile(&current);
        assert!(next.contains("cursor"));
        assert!(!next.contains("encoding"));
        assert!(!next.contains("mode"));
        // Ids the menu does not list stay as they were.
        assert!(next.contains("orphan"));
    }

    #[test]
    fn untouched_menu_reconciles_to_the_same_set() {
        let current: DisabledIds = ["cursor"].into_iter().collect();
        let menu = menu(&[("mode", true), ("cursor", false)]);
        assert_eq!(menu.reconcile(&current), current);
    }

    #[test]
    fn hide_action_only_applies_when_chosen() {
        let mut menu = menu(&[("mode", true)]);
        menu.hide_origin = Some(HideAction {
            id: "cursor".into(),
            label: "Hide 'cursor'".into(),
            chosen: false,
        });

        assert!(!menu.reconcile(&DisabledIds::new()).contains("cursor"));
        assert!(menu.choose_hide_origin());
        assert!(menu.reconcile(&DisabledIds::new()).contains("cursor"));
    }

    #[test]
    fn toggling_unknown_ids_does_nothing() {
        let mut menu = menu(&[("mode", true)]);
        assert_eq!(menu.toggle("missing"), None);
        assert!(!menu.set_checked("missing", false));
        assert_eq!(menu.toggle("mode"), Some(false));
    }
}
