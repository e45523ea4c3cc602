//! Pure numerical helpers shared by the measurement engine.
//!
//! - [`vector`] - cross/dot/normalize primitives with zero-length passthrough
//! - [`geometry`] - distance, bond angle and dihedral over atom positions

pub mod geometry;
pub mod vector;
