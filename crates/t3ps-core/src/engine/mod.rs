//! # Engine Module
//!
//! The stateful layer of the measurement engine: one selection state machine per
//! viewer panel, driven synchronously by click events.
//!
//! ## Architecture
//!
//! - **Selection** ([`selection`]) - the ordered, 4-slot atom set with toggle and
//!   FIFO eviction semantics
//! - **Measurement** ([`measurement`]) - the tagged distance/angle/dihedral result
//!   recomputed after every change
//! - **Highlighting** ([`highlight`]) - the reset-then-recolour protocol issued to
//!   the external viewer
//! - **Picker** ([`picker`]) - ties the above together for one panel and notifies
//!   the registered observer
//! - **Session** ([`session`]) - independent panels keyed by [`session::PanelId`]
//! - **Error Handling** ([`error`]) - lookups that can miss (unknown serial, closed panel)
//!
//! Nothing here suspends or spawns: a click, its recomputation and its
//! notification all complete within the same call.

pub mod error;
pub mod highlight;
pub mod measurement;
pub mod picker;
pub mod selection;
pub mod session;
