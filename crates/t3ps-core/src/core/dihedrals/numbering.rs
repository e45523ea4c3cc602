//! Canonical reference numbering of the T3PS dinucleotide model.
//!
//! The dihedral table speaks in 0-based indices of a fixed 32-atom model. A loaded
//! structure speaks in its own serial ids. [`ReferenceNumbering`] is the explicit
//! step that translates the latter into the former before anything is matched.

use crate::core::models::structure::Structure;
use phf::{Map, phf_map};
use std::collections::HashMap;
use std::str::FromStr;

/// Number of atoms in the reference model.
pub const REFERENCE_ATOM_COUNT: usize = 32;

/// CHARMM atom names by reference index.
pub static ATOM_NAMES: [&str; REFERENCE_ATOM_COUNT] = [
    // Sugar ring A (5' end)
    "O4A", "C1A", "H11A", "H12A", "C4A", "H41A", "H42A",
    "C2A", "H21A", "H22A", "C3A", "H31A", "O3A",
    // Phosphate bridge
    "P", "O1P", "O2P", "O5B",
    // Sugar ring B (3' end)
    "C5B", "H5B1", "H5B2", "C4B", "H4B1", "O4B", "C1B",
    "H1B1", "H1B2", "C2B", "H2B1", "H2B2", "C3B", "H3B1", "H3B2",
];

/// Primed names with a numeric ring suffix, by reference index.
pub static ATOM_NAMES_ALT: [&str; REFERENCE_ATOM_COUNT] = [
    "O4'1", "C1'1", "H1'1a", "H1'1b", "C4'1", "H4'1a", "H4'1b", "C2'1", "H2'1a", "H2'1b", "C3'1",
    "H3'1", "O3'1", "P", "O1P", "O2P", "O5'2", "C5'2", "H5'2a", "H5'2b", "C4'2", "H4'2", "O4'2",
    "C1'2", "H1'2a", "H1'2b", "C2'2", "H2'2a", "H2'2b", "C3'2", "H3'2a", "H3'2b",
];

// Both naming schemes; the phosphate names are shared between them.
static NAME_TO_INDEX: Map<&'static str, usize> = phf_map! {
    "O4A" => 0, "C1A" => 1, "H11A" => 2, "H12A" => 3, "C4A" => 4, "H41A" => 5, "H42A" => 6,
    "C2A" => 7, "H21A" => 8, "H22A" => 9, "C3A" => 10, "H31A" => 11, "O3A" => 12,
    "P" => 13, "O1P" => 14, "O2P" => 15, "O5B" => 16,
    "C5B" => 17, "H5B1" => 18, "H5B2" => 19, "C4B" => 20, "H4B1" => 21, "O4B" => 22,
    "C1B" => 23, "H1B1" => 24, "H1B2" => 25, "C2B" => 26, "H2B1" => 27, "H2B2" => 28,
    "C3B" => 29, "H3B1" => 30, "H3B2" => 31,
    "O4'1" => 0, "C1'1" => 1, "H1'1a" => 2, "H1'1b" => 3, "C4'1" => 4, "H4'1a" => 5,
    "H4'1b" => 6, "C2'1" => 7, "H2'1a" => 8, "H2'1b" => 9, "C3'1" => 10, "H3'1" => 11,
    "O3'1" => 12, "O5'2" => 16, "C5'2" => 17, "H5'2a" => 18, "H5'2b" => 19, "C4'2" => 20,
    "H4'2" => 21, "O4'2" => 22, "C1'2" => 23, "H1'2a" => 24, "H1'2b" => 25, "C2'2" => 26,
    "H2'2a" => 27, "H2'2b" => 28, "C3'2" => 29, "H3'2a" => 30, "H3'2b" => 31,
};

/// CHARMM name of a reference index, or `Atom{index}` outside the model.
pub fn atom_name(index: usize) -> String {
    ATOM_NAMES
        .get(index)
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("Atom{index}"))
}

pub fn atom_name_alt(index: usize) -> String {
    ATOM_NAMES_ALT
        .get(index)
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("Atom{index}"))
}

/// Reference index of a CHARMM or primed atom name.
pub fn reference_index(name: &str) -> Option<usize> {
    NAME_TO_INDEX.get(name.trim()).copied()
}

/// How a structure's serial ids relate to the reference numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceNumbering {
    /// Serials already are reference indices (T3PS XYZ files, 0-based in file order).
    #[default]
    Identity,
    /// Serials are shifted by a constant, e.g. `Offset(1)` for 1-based files.
    Offset(usize),
    /// Reference indices come from each atom's name.
    AtomName,
}

impl ReferenceNumbering {
    /// Binds the scheme to a concrete structure.
    pub fn bind(&self, structure: &Structure) -> ReferenceMap {
        match self {
            Self::Identity => ReferenceMap::Identity,
            Self::Offset(offset) => ReferenceMap::Offset(*offset),
            Self::AtomName => ReferenceMap::Table(
                structure
                    .atoms()
                    .iter()
                    .filter_map(|atom| {
                        let index = reference_index(atom.name.as_deref()?)?;
                        Some((atom.serial, index))
                    })
                    .collect(),
            ),
        }
    }
}

impl FromStr for ReferenceNumbering {
    type Err = ();

    /// Parses `identity`, `atom-name` or `offset[:N]` (default offset 1).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "identity" | "zero-based" => Ok(Self::Identity),
            "atom-name" | "atom_name" | "name" => Ok(Self::AtomName),
            "offset" | "one-based" => Ok(Self::Offset(1)),
            other => other
                .strip_prefix("offset:")
                .and_then(|n| n.parse().ok())
                .map(Self::Offset)
                .ok_or(()),
        }
    }
}

/// A [`ReferenceNumbering`] resolved against one structure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReferenceMap {
    #[default]
    Identity,
    Offset(usize),
    Table(HashMap<usize, usize>),
}

impl ReferenceMap {
    pub fn canonical(&self, serial: usize) -> Option<usize> {
        match self {
            Self::Identity => Some(serial),
            Self::Offset(offset) => serial.checked_sub(*offset),
            Self::Table(table) => table.get(&serial).copied(),
        }
    }

    /// Maps every serial, or returns `None` if any of them has no reference index.
    pub fn canonicalize(&self, serials: &[usize]) -> Option<Vec<usize>> {
        serials.iter().map(|&s| self.canonical(s)).collect()
    }
}
