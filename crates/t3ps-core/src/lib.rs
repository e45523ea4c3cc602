//! # T3PS Measurement Library
//!
//! Geometry measurement and dihedral identification for the T3PS DNA backbone
//! study: measure distances, bond angles and torsions over clicked atoms, and
//! recognise which named backbone or sugar-pseudorotation torsion a 4-atom
//! selection corresponds to.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless models (`Structure`, `Atom`), the
//!   vector and geometry calculator, the dihedral table with its matcher, the
//!   reference numbering, and structure readers.
//!
//! - **[`engine`]: The Selection Layer.** The per-panel selection state machine,
//!   measurement results, the highlight protocol towards the external viewer,
//!   and multi-panel sessions.
//!
//! - **[`workflows`]: The Public API.** Selection replay and backbone analysis
//!   over a whole loaded structure.
//!
//! Rendering, plotting and network I/O are left to the host application. The
//! viewer is reached only through [`engine::highlight::HighlightSink`] and the
//! observer callback of [`engine::picker::AtomPicker`].

pub mod core;
pub mod engine;
pub mod workflows;
