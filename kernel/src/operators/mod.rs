//! Operators module: band moves and the `apply()` entry point.
//!
//! Depends on `carrier`. Does not import from `invariants`.

pub mod action;
pub mod apply;
pub mod band;
pub mod moves;
