//! # Core Models Module
//!
//! Data structures for the atoms the measurement engine reads.
//!
//! - [`atom`] - a single atom (serial id, element, position) plus the
//!   [`PickedAtom`](atom::PickedAtom) snapshot a viewer click delivers
//! - [`structure`] - the owner of a loaded set of atoms, indexed by serial id
//!
//! Atoms are owned by a [`Structure`](structure::Structure). The selection and
//! measurement layers only ever read them.

pub mod atom;
pub mod structure;
