//! Diagram representation: PD crossings, faces, braid input, oriented export.

pub mod braid;
pub mod diagram;
pub mod faces;
pub mod oriented;
