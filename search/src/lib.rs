//! Ribbon Search: the band-move episode environment and its random-walk driver.
//!
//! This crate depends only on `ribbon_kernel`. It does NOT depend on
//! `ribbon_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! ribbon_kernel  ←  ribbon_search  ←  ribbon_harness
//! (diagram, moves)   (env, driver)      (inputs, runner, CLI)
//! ```
//!
//! # Key types
//!
//! - [`action_space::ActionSpaceV1`] -- flat index ↔ `(kind, position)`
//! - [`mask::validity_mask`] -- legal indices for the current state
//! - [`env::RibbonEnvV1`] -- the episode controller over a batch of links
//! - [`sampler::ActionSampler`] -- uniform or category-weighted choice
//! - [`driver::run_walk`] -- the retrying search loop
//! - [`oracle::DiagramOracle`] -- injected unknot/unlink recognition

#![forbid(unsafe_code)]

pub mod action_space;
pub mod driver;
pub mod env;
pub mod error;
pub mod mask;
pub mod oracle;
pub mod policy;
pub mod report;
pub mod sampler;
