//! Diagram invariants and reductions used to recognise solved states.

pub mod determinant;
pub mod fingerprint;
pub mod simplify;
