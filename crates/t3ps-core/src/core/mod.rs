//! # Core Module
//!
//! The stateless foundation of the T3PS measurement engine.
//!
//! - **Molecular Representation** ([`models`]) - atoms and loaded structures
//! - **Numerics** ([`utils`]) - vector primitives and the distance/angle/dihedral calculator
//! - **Torsion Knowledge** ([`dihedrals`]) - the named backbone and pseudorotation
//!   torsions, the matcher, and the canonical reference numbering
//! - **File I/O** ([`io`]) - XYZ and PDB structure readers
//!
//! Nothing in this module holds selection state; that lives in [`crate::engine`].

pub mod dihedrals;
pub mod io;
pub mod models;
pub mod utils;
