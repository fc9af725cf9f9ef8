//! Row selection keyed by user id.

use std::collections::BTreeSet;

use domain::{User, UserId};

/// Selected row ids, independent of filtering, sorting and paging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSelection {
    ids: BTreeSet<UserId>,
}

impl RowSelection {
    pub fn is_selected(&self, id: UserId) -> bool {
        self.ids.contains(&id)
    }

    /// Flip one row; returns the new state.
    pub fn toggle(&mut self, id: UserId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn select(&mut self, id: UserId) {
        self.ids.insert(id);
    }

    pub fn deselect(&mut self, id: UserId) {
        self.ids.remove(&id);
    }

    pub fn select_all(&mut self, ids: impl IntoIterator<Item = UserId>) {
        self.ids.extend(ids);
    }

    pub fn deselect_all(&mut self, ids: impl IntoIterator<Item = UserId>) {
        for id in ids {
            self.ids.remove(&id);
        }
    }

    /// Whether every id given is selected (false for none).
    pub fn all_selected(&self, ids: impl IntoIterator<Item = UserId>) -> bool {
        let mut any = false;
        for id in ids {
            if !self.ids.contains(&id) {
                return false;
            }
            any = true;
        }
        any
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = UserId> + '_ {
        self.ids.iter().copied()
    }

    /// Drop selections whose row is gone from the list; returns how many.
    pub fn retain_existing(&mut self, users: &[User]) -> usize {
        let before = self.ids.len();
        let present: BTreeSet<UserId> = users.iter().map(|u| u.id).collect();
        self.ids.retain(|id| present.contains(id));
        before - self.ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: UserId) -> User {
        User {
            id,
            name: format!("User {}", id),
            email: format!("user{}@example.com", id),
            role: "viewer".into(),
            team: "sales".into(),
            status: "active".into(),
            avatar: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_toggle() {
        let mut selection = RowSelection::default();
        assert!(selection.toggle(3));
        assert!(selection.is_selected(3));
        assert!(!selection.toggle(3));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_all_selected() {
        let mut selection = RowSelection::default();
        assert!(!selection.all_selected([]));

        selection.select_all([1, 2, 3]);
        assert!(selection.all_selected([1, 3]));
        assert!(!selection.all_selected([1, 4]));

        selection.deselect_all([1, 3]);
        assert_eq!(selection.ids().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_retain_existing_drops_missing_rows() {
        let mut selection = RowSelection::default();
        selection.select_all([1, 2, 5]);

        let removed = selection.retain_existing(&[user(1), user(2)]);
        assert_eq!(removed, 1);
        assert_eq!(selection.ids().collect::<Vec<_>>(), vec![1, 2]);
    }
}
