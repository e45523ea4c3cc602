use super::atom::Atom;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructureError {
    #[error("Duplicate atom serial: {0}")]
    DuplicateSerial(usize),
}

/// A loaded molecular structure: the owner of every [`Atom`] the engine measures.
///
/// Atoms keep their file order; lookup by serial id goes through an index map
/// built once at construction.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    /// Atoms in the order the loader produced them.
    atoms: Vec<Atom>,
    /// Lookup map from serial id to position in `atoms`.
    serial_index: HashMap<usize, usize>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a structure from loader output, rejecting repeated serial ids.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::DuplicateSerial`] for the first serial seen twice.
    pub fn from_atoms(atoms: Vec<Atom>) -> Result<Self, StructureError> {
        let mut structure = Self::new();
        for atom in atoms {
            structure.add_atom(atom)?;
        }
        Ok(structure)
    }

    /// Appends an atom to the structure.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::DuplicateSerial`] if the serial id is already taken.
    pub fn add_atom(&mut self, atom: Atom) -> Result<(), StructureError> {
        if self.serial_index.contains_key(&atom.serial) {
            return Err(StructureError::DuplicateSerial(atom.serial));
        }
        self.serial_index.insert(atom.serial, self.atoms.len());
        self.atoms.push(atom);
        Ok(())
    }

    pub fn atom(&self, serial: usize) -> Option<&Atom> {
        self.serial_index.get(&serial).map(|&i| &self.atoms[i])
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Returns `true` if any atom carries residue context.
    pub fn has_residues(&self) -> bool {
        self.atoms.iter().any(|a| a.residue.is_some())
    }
}
