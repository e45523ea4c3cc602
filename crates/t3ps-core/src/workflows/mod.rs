//! # Workflows Module
//!
//! High-level entry points that tie the [`core`](crate::core) data and the
//! [`engine`](crate::engine) state machine together.
//!
//! - **Selection Replay** ([`measure`]) - feed a sequence of clicks through a
//!   picker and report the final measurement with its dihedral identification
//! - **Backbone Analysis** ([`backbone`]) - compute α, β, γ, ε and ζ for every
//!   nucleotide of a residue-annotated structure, with CSV export

pub mod backbone;
pub mod measure;
