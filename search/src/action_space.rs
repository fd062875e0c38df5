//! `ActionSpaceV1`: the flat action index layout.
//!
//! With `P = max_size` positions per category the space has `4P + 2`
//! indices:
//!
//! | Index range  | Kind                                      | Position    |
//! |--------------|-------------------------------------------|-------------|
//! | `[0, P)`     | start                                     | `index`     |
//! | `[P, 4P)`    | `[under, attach, over][k % 3]`, `k = index - P` | `k / 3` |
//! | `4P, 4P + 1` | twist                                     | handedness  |
//!
//! A start position names a crossing; the band anchors on the edge at its
//! slot 0. Since inputs never exceed the ceiling, every crossing of the
//! input has a start index.
//!
//! Per-category weights are broadcast over the same layout by
//! [`ActionSpaceV1::broadcast_weights`], so mask and weights always have
//! equal length.

use ribbon_kernel::operators::action::{Action, MoveKind};

use crate::error::ActionError;

/// Kinds of the interleaved middle block, in index order.
const INTERLEAVED: [MoveKind; 3] = [MoveKind::Under, MoveKind::Attach, MoveKind::Over];

/// Number of twist indices at the end of the space.
pub const TWIST_SLOTS: usize = 2;

/// The flat action space for a given crossing ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpaceV1 {
    positions: usize,
}

impl ActionSpaceV1 {
    #[must_use]
    pub const fn new(max_size: usize) -> Self {
        Self {
            positions: max_size,
        }
    }

    /// Positions per category (`P`).
    #[must_use]
    pub const fn positions(&self) -> usize {
        self.positions
    }

    /// Total number of indices, `4P + 2`.
    #[must_use]
    pub const fn len(&self) -> usize {
        4 * self.positions + TWIST_SLOTS
    }

    /// Always false: the twist indices exist even when `P = 0`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Flat index of `action`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::PositionOutOfRange`] if the position does not
    /// fit the kind's sub-range.
    pub fn encode(&self, action: Action) -> Result<usize, ActionError> {
        let p = self.positions;
        let limit = if action.kind == MoveKind::Twist {
            TWIST_SLOTS
        } else {
            p
        };
        if action.position >= limit {
            return Err(ActionError::PositionOutOfRange {
                kind: action.kind,
                position: action.position,
                limit,
            });
        }
        Ok(match action.kind {
            MoveKind::Start => action.position,
            MoveKind::Under => p + 3 * action.position,
            MoveKind::Attach => p + 3 * action.position + 1,
            MoveKind::Over => p + 3 * action.position + 2,
            MoveKind::Twist => 4 * p + action.position,
        })
    }

    /// Action at flat `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::IndexOutOfRange`] if `index >= len()`.
    pub fn decode(&self, index: usize) -> Result<Action, ActionError> {
        let p = self.positions;
        if index >= self.len() {
            return Err(ActionError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(if index < p {
            Action::start(index)
        } else if index < 4 * p {
            let k = index - p;
            Action::new(INTERLEAVED[k % 3], k / 3)
        } else {
            Action::new(MoveKind::Twist, index - 4 * p)
        })
    }

    /// Every action of the space, in index order.
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        (0..self.len()).filter_map(|i| self.decode(i).ok())
    }

    /// Expand per-category weights `[start, attach, over, under, twist]`
    /// into one weight per flat index.
    #[must_use]
    pub fn broadcast_weights(&self, weights: &[f64; 5]) -> Vec<f64> {
        self.actions()
            .map(|action| weights[action.kind.category()])
            .collect()
    }
}
