//! Shared helpers for the lock tests and fixture binaries.

pub mod walk_helpers;
