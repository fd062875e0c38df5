//! Ribbon kernel: link diagrams and the band-move surgery performed on them.
//!
//! # API Surface
//!
//! - [`carrier::diagram::LinkDiagram`] -- validated planar-diagram (PD) code
//! - [`operators::apply::apply`] -- apply one band move, producing a new band state
//! - [`operators::apply::MoveContext::check`] -- the legality rule shared by
//!   masking and execution
//! - [`invariants::simplify::simplify`] -- Reidemeister I/II reduction
//! - [`invariants::simplify::simplify_global`] -- randomized reduction with
//!   R3 slides and backtracking
//! - [`invariants::determinant::knot_determinant`] -- coloring-matrix determinant
//!
//! # Module Dependency Direction
//!
//! `carrier` ← `invariants` ← `operators`
//!
//! One-way only. No cycles. `carrier` depends on nothing internal;
//! `operators` measures its size ceiling with `invariants::simplify`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod carrier;
pub mod invariants;
pub mod operators;
