use crate::core::models::atom::PickedAtom;

/// Maximum number of atoms a selection holds.
pub const MAX_SELECTION: usize = 4;

/// What a single click did to a [`Selection`].
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionChange {
    /// The atom was appended.
    Added,
    /// The atom was already selected and has been removed from `index`.
    Removed { index: usize },
    /// The selection was full; `evicted` (the oldest atom) made room for the new one.
    Evicted { evicted: PickedAtom },
}

/// An ordered, capacity-bounded set of clicked atoms.
///
/// Insertion order decides which atom plays which role in the angle and
/// dihedral formulas. No serial id ever appears twice.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    atoms: Vec<PickedAtom>,
}

impl Selection {
    pub fn new() -> Self {
        Self {
            atoms: Vec::with_capacity(MAX_SELECTION),
        }
    }

    /// Applies one click.
    ///
    /// Clicking a selected atom deselects it, keeping the order of the rest.
    /// Otherwise the atom is appended, evicting the oldest entry first when
    /// the selection is already full.
    pub fn toggle(&mut self, atom: PickedAtom) -> SelectionChange {
        if let Some(index) = self.position(atom.serial) {
            self.atoms.remove(index);
            return SelectionChange::Removed { index };
        }

        if self.atoms.len() < MAX_SELECTION {
            self.atoms.push(atom);
            SelectionChange::Added
        } else {
            let evicted = self.atoms.remove(0);
            self.atoms.push(atom);
            SelectionChange::Evicted { evicted }
        }
    }

    pub fn clear(&mut self) {
        self.atoms.clear();
    }

    pub fn atoms(&self) -> &[PickedAtom] {
        &self.atoms
    }

    pub fn serials(&self) -> Vec<usize> {
        self.atoms.iter().map(|a| a.serial).collect()
    }

    pub fn position(&self, serial: usize) -> Option<usize> {
        self.atoms.iter().position(|a| a.serial == serial)
    }

    pub fn contains(&self, serial: usize) -> bool {
        self.position(serial).is_some()
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.atoms.len() == MAX_SELECTION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(serial: usize) -> PickedAtom {
        PickedAtom::new(serial, "C", serial as f64, 0.0, 0.0)
    }

    fn selection_of(serials: &[usize]) -> Selection {
        let mut selection = Selection::new();
        for &s in serials {
            selection.toggle(atom(s));
        }
        selection
    }

    #[test]
    fn atoms_are_appended_in_click_order() {
        let selection = selection_of(&[7, 3, 9]);
        assert_eq!(selection.serials(), vec![7, 3, 9]);
        assert_eq!(selection.len(), 3);
        assert!(!selection.is_full());
    }

    #[test]
    fn reclicking_deselects_and_keeps_relative_order() {
        let mut selection = selection_of(&[1, 2, 3, 4]);
        let change = selection.toggle(atom(2));
        assert_eq!(change, SelectionChange::Removed { index: 1 });
        assert_eq!(selection.serials(), vec![1, 3, 4]);
    }

    #[test]
    fn double_click_restores_previous_state() {
        for prefix in [vec![], vec![1], vec![1, 2], vec![1, 2, 3]] {
            let before = selection_of(&prefix);
            let mut after = before.clone();
            after.toggle(atom(42));
            after.toggle(atom(42));
            assert_eq!(after, before, "prefix {prefix:?}");
        }
    }

    #[test]
    fn double_click_on_full_selection_loses_the_evicted_atom() {
        let mut selection = selection_of(&[1, 2, 3, 4]);
        selection.toggle(atom(42));
        selection.toggle(atom(42));
        assert_eq!(selection.serials(), vec![2, 3, 4]);
    }

    #[test]
    fn fifth_distinct_click_evicts_the_oldest() {
        let mut selection = selection_of(&[1, 2, 3, 4]);
        let change = selection.toggle(atom(5));
        assert_eq!(change, SelectionChange::Evicted { evicted: atom(1) });
        assert_eq!(selection.serials(), vec![2, 3, 4, 5]);
        assert!(selection.is_full());
    }

    #[test]
    fn sliding_window_over_many_clicks() {
        let selection = selection_of(&[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(selection.serials(), vec![4, 5, 6, 7]);
    }

    #[test]
    fn reclick_on_full_selection_removes_instead_of_evicting() {
        let mut selection = selection_of(&[1, 2, 3, 4]);
        selection.toggle(atom(4));
        assert_eq!(selection.serials(), vec![1, 2, 3]);
    }

    #[test]
    fn serials_never_repeat() {
        let selection = selection_of(&[1, 2, 1, 3, 2, 4, 5, 1]);
        let mut serials = selection.serials();
        let len = serials.len();
        serials.sort_unstable();
        serials.dedup();
        assert_eq!(serials.len(), len);
        assert!(len <= MAX_SELECTION);
    }

    #[test]
    fn clear_empties_selection() {
        let mut selection = selection_of(&[1, 2, 3]);
        selection.clear();
        assert!(selection.is_empty());
        assert!(!selection.contains(1));
    }
}
