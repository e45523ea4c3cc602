use super::selection::Selection;
use crate::core::dihedrals::numbering::ReferenceMap;
use crate::core::dihedrals::table::{DIHEDRAL_ATOMS, DihedralMatch, DihedralTable};
use crate::core::models::atom::PickedAtom;
use crate::core::utils::geometry;
use std::fmt;

/// The scalar derived from the current selection size.
///
/// Angles carry both units: bond angles in `[0, 180]` degrees, dihedrals in
/// `[0, 360)` degrees. Distances are plain Angstroms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// Fewer than two atoms selected.
    None,
    Distance { angstroms: f64 },
    Angle { radians: f64, degrees: f64 },
    Dihedral { radians: f64, degrees: f64 },
}

impl Measurement {
    pub fn from_atoms(atoms: &[PickedAtom]) -> Self {
        match atoms {
            [a, b] => Self::Distance {
                angstroms: geometry::distance(&a.position, &b.position),
            },
            [a, b, c] => {
                let radians = geometry::bond_angle(&a.position, &b.position, &c.position);
                Self::Angle {
                    radians,
                    degrees: geometry::angle_degrees(radians),
                }
            }
            [a, b, c, d] => {
                let radians =
                    geometry::dihedral(&a.position, &b.position, &c.position, &d.position);
                Self::Dihedral {
                    radians,
                    degrees: geometry::dihedral_degrees(radians),
                }
            }
            _ => Self::None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Distance { .. } => "distance",
            Self::Angle { .. } => "angle",
            Self::Dihedral { .. } => "dihedral",
        }
    }

    pub fn degrees(&self) -> Option<f64> {
        match self {
            Self::Angle { degrees, .. } | Self::Dihedral { degrees, .. } => Some(*degrees),
            _ => None,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(2);
        match self {
            Self::None => write!(f, "no measurement"),
            Self::Distance { angstroms } => write!(f, "distance {angstroms:.precision$} Å"),
            Self::Angle { radians, degrees } => {
                write!(f, "angle {degrees:.precision$}° ({radians:.4} rad)")
            }
            Self::Dihedral { radians, degrees } => {
                write!(f, "dihedral {degrees:.precision$}° ({radians:.4} rad)")
            }
        }
    }
}

/// A read-only snapshot handed to the observer after every selection change.
///
/// Recomputed from scratch on each change and never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementResult {
    /// The selected atoms, in selection order.
    pub atoms: Vec<PickedAtom>,
    pub measurement: Measurement,
    /// Named torsions the selection corresponds to. Only ever non-empty for
    /// four atoms whose serials all map onto the reference numbering.
    pub matches: Vec<DihedralMatch>,
}

impl MeasurementResult {
    pub fn empty() -> Self {
        Self {
            atoms: Vec::new(),
            measurement: Measurement::None,
            matches: Vec::new(),
        }
    }

    pub fn compute(selection: &Selection, table: &DihedralTable, reference: &ReferenceMap) -> Self {
        let atoms = selection.atoms().to_vec();
        let measurement = Measurement::from_atoms(&atoms);
        let matches = if atoms.len() == DIHEDRAL_ATOMS {
            reference
                .canonicalize(&selection.serials())
                .map(|indices| table.identify(&indices))
                .unwrap_or_default()
        } else {
            Vec::new()
        };

        Self {
            atoms,
            measurement,
            matches,
        }
    }

    pub fn count(&self) -> usize {
        self.atoms.len()
    }
}
