use nalgebra::Point3;

/// Residue context attached to atoms read from residue-aware formats such as PDB.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResidueInfo {
    /// Chain identifier (e.g., 'A').
    pub chain_id: char,
    /// Residue sequence number as written in the source file.
    pub residue_number: isize,
    /// Residue name (e.g., "DA", "G").
    pub residue_name: String,
}

/// Represents one atom of a loaded structure.
///
/// Atoms are owned by a [`Structure`](super::structure::Structure) and are only
/// ever read by the measurement engine. The serial id is assigned by the loader,
/// is unique within its structure, and need not be contiguous.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Stable per-atom identifier assigned by the structure loader.
    pub serial: usize,
    /// Element or species label (e.g., "C", "O", "P").
    pub element: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Atom name (e.g., "C4'"), if the source format carries one.
    pub name: Option<String>,
    /// Residue context, if the source format carries one.
    pub residue: Option<ResidueInfo>,
}

impl Atom {
    /// Creates a bare atom with no name and no residue context.
    pub fn new(serial: usize, element: &str, position: Point3<f64>) -> Self {
        Self {
            serial,
            element: element.to_string(),
            position,
            name: None,
            residue: None,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_residue(mut self, residue: ResidueInfo) -> Self {
        self.residue = Some(residue);
        self
    }

    /// Produces the payload a viewer reports when this atom is clicked.
    pub fn picked(&self) -> PickedAtom {
        PickedAtom {
            serial: self.serial,
            element: self.element.clone(),
            position: self.position,
        }
    }
}

/// The `{serial, element, position}` snapshot delivered by an atom click.
#[derive(Debug, Clone, PartialEq)]
pub struct PickedAtom {
    pub serial: usize,
    pub element: String,
    pub position: Point3<f64>,
}

impl PickedAtom {
    pub fn new(serial: usize, element: &str, x: f64, y: f64, z: f64) -> Self {
        Self {
            serial,
            element: element.to_string(),
            position: Point3::new(x, y, z),
        }
    }
}
