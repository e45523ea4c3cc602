//! Readers for the structure formats the measurement tools accept.
//!
//! Both readers produce a [`Structure`](crate::core::models::structure::Structure)
//! through the shared [`traits::StructureFile`] interface.

pub mod pdb;
pub mod traits;
pub mod xyz;
