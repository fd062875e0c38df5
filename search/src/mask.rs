//! Validity mask over the flat action space.
//!
//! Built from one [`MoveContext`] per state, asking the same legality
//! question `apply` asks. Recomputed after every accepted move.

use ribbon_kernel::operators::apply::{MoveContext, MoveLimits};
use ribbon_kernel::operators::band::BandStateV1;

use crate::action_space::ActionSpaceV1;

/// `mask[i]` is true iff action `i` would be accepted in `state`.
#[must_use]
pub fn validity_mask(space: &ActionSpaceV1, state: &BandStateV1, limits: MoveLimits) -> Vec<bool> {
    let context = MoveContext::new(state, limits);
    space
        .actions()
        .map(|action| context.is_legal(action))
        .collect()
}

/// Indices of the legal actions, ascending.
#[must_use]
pub fn legal_indices(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &legal)| legal.then_some(i))
        .collect()
}
