use super::error::EngineError;
use super::measurement::MeasurementResult;
use super::picker::AtomPicker;
use crate::core::models::atom::PickedAtom;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    pub struct PanelId;
}

/// A set of independent viewer panels, each with its own [`AtomPicker`].
///
/// Panels share no mutable state; clicking in one never touches another.
#[derive(Default)]
pub struct Session<'a> {
    panels: SlotMap<PanelId, AtomPicker<'a>>,
}

impl<'a> Session<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_panel(&mut self, picker: AtomPicker<'a>) -> PanelId {
        self.panels.insert(picker)
    }

    pub fn close_panel(&mut self, id: PanelId) -> Option<AtomPicker<'a>> {
        self.panels.remove(id)
    }

    pub fn panel(&self, id: PanelId) -> Option<&AtomPicker<'a>> {
        self.panels.get(id)
    }

    pub fn panel_mut(&mut self, id: PanelId) -> Option<&mut AtomPicker<'a>> {
        self.panels.get_mut(id)
    }

    /// Routes a click to the panel it happened in.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PanelNotFound`] if the panel has been closed.
    pub fn click(
        &mut self,
        id: PanelId,
        atom: PickedAtom,
    ) -> Result<MeasurementResult, EngineError> {
        self.panels
            .get_mut(id)
            .map(|picker| picker.on_atom_clicked(atom))
            .ok_or(EngineError::PanelNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}
