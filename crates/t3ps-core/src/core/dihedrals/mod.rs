//! # Dihedral Identification
//!
//! Static reference data and the pure matcher that labels a raw 4-atom selection
//! with the named torsion it measures.
//!
//! - [`table`] - the three families of named torsions and the forward/reverse matcher
//! - [`numbering`] - the canonical atom numbering the table is written in, and the
//!   mapping step from a structure's own serial ids onto it
//!
//! The matcher compares integers only. Translating serials into reference indices
//! is always a separate, explicit step through [`numbering::ReferenceMap`].

pub mod numbering;
pub mod table;
