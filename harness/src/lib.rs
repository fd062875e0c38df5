//! Ribbon Harness: inputs, orchestration and artifacts for the random walk.
//!
//! The harness turns link specifications into diagrams, runs
//! `ribbon_search::driver::run_walk` over them, and writes what was found.
//!
//! The harness does NOT implement move or episode logic; it delegates to
//! `ribbon_search`, which delegates diagram surgery to `ribbon_kernel`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod export;
pub mod input;
pub mod knot_table;
pub mod runner;
