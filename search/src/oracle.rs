//! Injected recognition capabilities.
//!
//! The environment never decides on its own whether a diagram is trivial;
//! it asks a [`DiagramOracle`], by default [`GlobalOracle`]. The
//! obstruction check run after a solved single-link walk goes through
//! [`SliceObstruction`]. Both are traits so a stronger toolkit can be
//! substituted without touching the state machine.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ribbon_kernel::carrier::diagram::LinkDiagram;
use ribbon_kernel::invariants::determinant::{is_perfect_square, knot_determinant};
use ribbon_kernel::invariants::simplify::{simplify, simplify_global};

/// Diagram simplification and unlink recognition.
///
/// # Contract
///
/// - `simplify` must return a diagram of the same link.
/// - `is_unlink` may return false negatives (the search just keeps going)
///   but must never return a false positive.
pub trait DiagramOracle {
    /// A simplified diagram of the same link.
    fn simplify(&self, diagram: &LinkDiagram) -> LinkDiagram;

    /// Crossing count after simplification.
    fn simplified_crossing_count(&self, diagram: &LinkDiagram) -> usize {
        self.simplify(diagram).crossing_count()
    }

    /// Whether the diagram is recognised as the unlink of `components`
    /// components. A wrong component count is rejected before simplifying.
    fn is_unlink(&self, diagram: &LinkDiagram, components: usize) -> bool {
        if diagram.component_count() != components {
            return false;
        }
        let simplified = self.simplify(diagram);
        simplified.is_crossingless() && simplified.free_loops() == components
    }
}

/// Greedy Reidemeister I/II reduction from the kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReidemeisterOracle;

impl DiagramOracle for ReidemeisterOracle {
    fn simplify(&self, diagram: &LinkDiagram) -> LinkDiagram {
        simplify(diagram)
    }
}

/// Built-in oracle: the kernel's randomized global reduction.
///
/// Every call draws from a fresh generator seeded with `seed`, so the
/// answer for a given diagram never depends on earlier calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalOracle {
    pub seed: u64,
}

impl DiagramOracle for GlobalOracle {
    fn simplify(&self, diagram: &LinkDiagram) -> LinkDiagram {
        simplify_global(diagram, &mut ChaCha8Rng::seed_from_u64(self.seed))
    }
}

/// Result of a slice-obstruction check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstructionVerdictV1 {
    /// No obstruction found. `determinant` is `None` for links.
    NoObstruction { determinant: Option<u64> },
    /// The knot is provably not slice, hence not ribbon.
    Obstructed { determinant: u64 },
}

impl ObstructionVerdictV1 {
    #[must_use]
    pub fn passed(&self) -> bool {
        matches!(self, Self::NoObstruction { .. })
    }
}

/// A necessary condition for sliceness.
pub trait SliceObstruction {
    fn check(&self, diagram: &LinkDiagram) -> ObstructionVerdictV1;
}

/// Fox–Milnor via the determinant: a slice knot has square determinant.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterminantObstruction;

impl SliceObstruction for DeterminantObstruction {
    fn check(&self, diagram: &LinkDiagram) -> ObstructionVerdictV1 {
        match knot_determinant(&simplify(diagram)) {
            Some(determinant) if !is_perfect_square(determinant) => {
                ObstructionVerdictV1::Obstructed { determinant }
            }
            determinant => ObstructionVerdictV1::NoObstruction { determinant },
        }
    }
}
