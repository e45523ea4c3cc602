use super::error::EngineError;
use super::highlight::{self, HighlightPalette, HighlightSink};
use super::measurement::MeasurementResult;
use super::selection::{Selection, SelectionChange};
use crate::core::dihedrals::numbering::{ReferenceMap, ReferenceNumbering};
use crate::core::dihedrals::table::DihedralTable;
use crate::core::models::atom::PickedAtom;
use crate::core::models::structure::Structure;
use tracing::debug;

pub type SelectionCallback<'a> = Box<dyn FnMut(&MeasurementResult) + 'a>;

/// The selection state machine of one viewer panel.
///
/// Each click or clear mutates the selection, redraws the slot highlights,
/// recomputes the [`MeasurementResult`] and hands it to the observer, all
/// before the call returns. Panels never share a picker.
pub struct AtomPicker<'a> {
    selection: Selection,
    table: DihedralTable,
    numbering: ReferenceNumbering,
    reference: ReferenceMap,
    palette: HighlightPalette,
    highlighter: Option<Box<dyn HighlightSink + 'a>>,
    callback: Option<SelectionCallback<'a>>,
}

impl Default for AtomPicker<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> AtomPicker<'a> {
    pub fn new() -> Self {
        Self {
            selection: Selection::new(),
            table: DihedralTable::builtin(),
            numbering: ReferenceNumbering::default(),
            reference: ReferenceMap::default(),
            palette: HighlightPalette::default(),
            highlighter: None,
            callback: None,
        }
    }

    pub fn with_table(mut self, table: DihedralTable) -> Self {
        self.table = table;
        self
    }

    /// Sets the numbering scheme. It takes effect against an empty structure
    /// until [`AtomPicker::load_structure`] binds it to a real one.
    pub fn with_numbering(mut self, numbering: ReferenceNumbering) -> Self {
        self.numbering = numbering;
        self.reference = numbering.bind(&Structure::new());
        self
    }

    pub fn with_palette(mut self, palette: HighlightPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_highlighter(mut self, highlighter: Box<dyn HighlightSink + 'a>) -> Self {
        self.highlighter = Some(highlighter);
        self
    }

    pub fn with_callback(mut self, callback: SelectionCallback<'a>) -> Self {
        self.callback = Some(callback);
        self
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn table(&self) -> &DihedralTable {
        &self.table
    }

    /// The result the observer last saw, recomputed on demand.
    pub fn current(&self) -> MeasurementResult {
        MeasurementResult::compute(&self.selection, &self.table, &self.reference)
    }

    /// Resets the selection for a freshly loaded structure and rebinds the
    /// reference numbering to it.
    pub fn load_structure(&mut self, structure: &Structure) -> MeasurementResult {
        self.reference = self.numbering.bind(structure);
        self.selection.clear();
        debug!(atoms = structure.len(), "Structure loaded, selection reset");
        self.refresh()
    }

    /// Handles one atom click reported by the viewer.
    pub fn on_atom_clicked(&mut self, atom: PickedAtom) -> MeasurementResult {
        let serial = atom.serial;
        match self.selection.toggle(atom) {
            SelectionChange::Added => debug!(serial, "Atom selected"),
            SelectionChange::Removed { index } => debug!(serial, index, "Atom deselected"),
            SelectionChange::Evicted { evicted } => {
                debug!(serial, evicted = evicted.serial, "Atom selected, oldest evicted")
            }
        }
        self.refresh()
    }

    /// Clicks the atom with `serial` in `structure`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AtomNotFound`] if the structure has no such atom;
    /// the selection is left untouched and no notification is sent.
    pub fn click_serial(
        &mut self,
        structure: &Structure,
        serial: usize,
    ) -> Result<MeasurementResult, EngineError> {
        let atom = structure
            .atom(serial)
            .ok_or(EngineError::AtomNotFound { serial })?;
        Ok(self.on_atom_clicked(atom.picked()))
    }

    pub fn clear(&mut self) -> MeasurementResult {
        self.selection.clear();
        debug!("Selection cleared");
        self.refresh()
    }

    pub fn set_palette(&mut self, palette: HighlightPalette) {
        self.palette = palette;
        if let Some(sink) = self.highlighter.as_deref_mut() {
            highlight::refresh(sink, &self.selection, &self.palette);
        }
    }

    fn refresh(&mut self) -> MeasurementResult {
        if let Some(sink) = self.highlighter.as_deref_mut() {
            highlight::refresh(sink, &self.selection, &self.palette);
        }

        let result = self.current();
        debug!(
            count = result.count(),
            kind = result.measurement.kind(),
            matches = result.matches.len(),
            "Measurement recomputed"
        );
        if let Some(cb) = self.callback.as_mut() {
            cb(&result);
        }
        result
    }
}
