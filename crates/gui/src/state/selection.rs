use super::marker::MarkerId;

/// Curated marker set (no duplicates, kept in click order)
#[derive(Default, Debug, Clone)]
pub struct SelectionState {
    selected: Vec<MarkerId>,
    /// Version counter for selection changes (for redraw)
    pub version: u64,
}

impl SelectionState {
    /// All selected markers
    pub fn all(&self) -> &[MarkerId] {
        &self.selected
    }

    /// Check if a marker is selected
    pub fn is_selected(&self, id: MarkerId) -> bool {
        self.selected.contains(&id)
    }

    /// Toggle membership; returns whether the marker is now selected
    pub fn toggle(&mut self, id: MarkerId) -> bool {
        self.version += 1;
        if let Some(pos) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(id);
            true
        }
    }

    /// Add without toggling; returns false if it was already present
    pub fn add(&mut self, id: MarkerId) -> bool {
        if self.is_selected(id) {
            return false;
        }
        self.selected.push(id);
        self.version += 1;
        true
    }

    /// Clear all selection
    pub fn clear(&mut self) {
        if !self.selected.is_empty() {
            self.selected.clear();
            self.version += 1;
        }
    }

    /// Number of selected markers
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_empty() {
        let s = SelectionState::default();
        assert!(s.all().is_empty());
        assert_eq!(s.count(), 0);
        assert!(s.is_empty());
    }

    #[test]
    fn test_toggle_add() {
        let mut s = SelectionState::default();
        assert!(s.toggle(MarkerId(1)));
        assert!(s.toggle(MarkerId(2)));
        assert_eq!(s.count(), 2);
        assert!(s.is_selected(MarkerId(1)));
        assert!(s.is_selected(MarkerId(2)));
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut s = SelectionState::default();
        assert!(s.toggle(MarkerId(3)));
        assert!(!s.toggle(MarkerId(3)));
        assert!(!s.is_selected(MarkerId(3)));
        assert!(s.is_empty());
    }

    #[test]
    fn test_add_is_unique() {
        let mut s = SelectionState::default();
        assert!(s.add(MarkerId(1)));
        assert!(!s.add(MarkerId(1)));
        assert_eq!(s.count(), 1);
    }

    #[test]
    fn test_all_preserves_order() {
        let mut s = SelectionState::default();
        s.toggle(MarkerId(2));
        s.toggle(MarkerId(0));
        s.toggle(MarkerId(1));
        assert_eq!(s.all(), &[MarkerId(2), MarkerId(0), MarkerId(1)]);
    }

    #[test]
    fn test_clear_bumps_version_once() {
        let mut s = SelectionState::default();
        s.toggle(MarkerId(0));
        let v = s.version;
        s.clear();
        assert_eq!(s.version, v + 1);
        s.clear();
        assert_eq!(s.version, v + 1);
    }
}
