//! `apply()`: apply one band move to a `BandStateV1`.
//!
//! Legality lives in exactly one place, [`MoveContext::check`]. The validity
//! mask asks the same question for every index, so an action is in the mask
//! if and only if `apply` accepts it.
//!
//! Two-phase:
//! 1. Check: phase, band budget, size ceiling, and target resolution. The
//!    result is a [`MovePlan`] naming the concrete slots to rewrite.
//! 2. Execute: clone the state and run the surgery from [`super::moves`].
//!
//! The size ceiling bounds the diagram after R1/R2 reduction. A finger or a
//! twist only adds a removable bigon or kink, so those moves are checked
//! against the reduced size of the current diagram; an attach changes the
//! link and is checked against the reduced size of its result.

use std::cell::OnceCell;

use crate::carrier::diagram::{EdgeIndex, EdgeLabel, LinkDiagram};
use crate::carrier::faces::{trace_face, Side};
use crate::invariants::simplify::simplify;
use crate::operators::action::{Action, Handedness, MoveKind};
use crate::operators::band::{BandEvent, BandPhase, BandStateV1, BandTip, CrossKind};
use crate::operators::moves::{cross_edge, saddle, twist_tip};

/// Bounds every move is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveLimits {
    /// Crossing ceiling on the R1/R2-reduced diagram.
    pub max_size: usize,
    /// Shared bound on completed bands and on twists per band.
    pub max_bands: usize,
}

/// Typed failure for move application. The state is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveFailure {
    /// The move kind is not available in the current phase.
    WrongPhase { kind: MoveKind, phase: BandPhase },
    /// Start requires at least one crossing to anchor on.
    NoCrossings,
    /// The position does not name a crossing, face side, or handedness.
    PositionOutOfRange {
        kind: MoveKind,
        position: usize,
        available: usize,
    },
    /// The addressed front-face side is the tip edge itself.
    TipEdgeTarget { position: usize },
    /// The reduced diagram would exceed the crossing ceiling.
    SizeLimit { required: usize, max_size: usize },
    /// The band budget is used up.
    BandLimit { bands: usize, max_bands: usize },
    /// The current band already carries the maximum number of twists.
    TwistLimit { twists: usize, max_bands: usize },
}

impl std::fmt::Display for MoveFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongPhase { kind, phase } => {
                write!(f, "{kind} is not available in phase {phase:?}")
            }
            Self::NoCrossings => write!(f, "diagram has no crossings to anchor a band on"),
            Self::PositionOutOfRange {
                kind,
                position,
                available,
            } => write!(
                f,
                "{kind} position {position} out of range ({available} available)"
            ),
            Self::TipEdgeTarget { position } => {
                write!(f, "position {position} addresses the band tip itself")
            }
            Self::SizeLimit { required, max_size } => {
                write!(f, "reduced diagram needs {required} crossings, ceiling is {max_size}")
            }
            Self::BandLimit { bands, max_bands } => {
                write!(f, "{bands} bands completed, limit is {max_bands}")
            }
            Self::TwistLimit { twists, max_bands } => {
                write!(f, "{twists} twists on this band, limit is {max_bands}")
            }
        }
    }
}

impl std::error::Error for MoveFailure {}

/// A checked move, resolved to concrete diagram slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePlan {
    Anchor {
        tip: BandTip,
        edge: EdgeLabel,
    },
    Cross {
        tip: BandTip,
        target: Side,
        kind: CrossKind,
    },
    Twist {
        tip: BandTip,
        handedness: Handedness,
    },
    Saddle {
        tip: BandTip,
        target: Side,
    },
}

/// Per-state data shared by every legality check.
///
/// Build once per state and query for each action; the mask does exactly
/// this across the whole action space.
#[derive(Debug)]
pub struct MoveContext<'a> {
    state: &'a BandStateV1,
    limits: MoveLimits,
    index: EdgeIndex,
    front: Vec<Side>,
    reduced: OnceCell<usize>,
}

impl<'a> MoveContext<'a> {
    #[must_use]
    pub fn new(state: &'a BandStateV1, limits: MoveLimits) -> Self {
        let diagram: &LinkDiagram = state.diagram();
        let index = diagram.edge_index();
        let front = state
            .tip()
            .map(|tip| trace_face(diagram, &index, tip.from))
            .unwrap_or_default();
        Self {
            state,
            limits,
            index,
            front,
            reduced: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn limits(&self) -> MoveLimits {
        self.limits
    }

    /// Sides of the tip's front face, tip first. Empty before a start.
    #[must_use]
    pub fn front_face(&self) -> &[Side] {
        &self.front
    }

    /// Whether `action` would be accepted.
    #[must_use]
    pub fn is_legal(&self, action: Action) -> bool {
        self.check(action).is_ok()
    }

    /// Check `action` against the current state and resolve its target.
    ///
    /// # Errors
    ///
    /// Returns the first [`MoveFailure`] that makes the action illegal.
    pub fn check(&self, action: Action) -> Result<MovePlan, MoveFailure> {
        match action.kind {
            MoveKind::Start => self.check_start(action.position),
            MoveKind::Twist => {
                let tip = self.building_tip(action.kind)?;
                let handedness = Handedness::from_position(action.position).ok_or(
                    MoveFailure::PositionOutOfRange {
                        kind: MoveKind::Twist,
                        position: action.position,
                        available: 2,
                    },
                )?;
                self.check_size(self.reduced_size())?;
                let twists = self.state.twists_on_band();
                if twists >= self.limits.max_bands {
                    return Err(MoveFailure::TwistLimit {
                        twists,
                        max_bands: self.limits.max_bands,
                    });
                }
                Ok(MovePlan::Twist { tip, handedness })
            }
            MoveKind::Over | MoveKind::Under => {
                let tip = self.building_tip(action.kind)?;
                let target = self.front_side(action)?;
                self.check_size(self.reduced_size())?;
                let kind = if action.kind == MoveKind::Over {
                    CrossKind::Over
                } else {
                    CrossKind::Under
                };
                Ok(MovePlan::Cross { tip, target, kind })
            }
            MoveKind::Attach => {
                let tip = self.building_tip(action.kind)?;
                let target = self.front_side(action)?;
                let plan = MovePlan::Saddle { tip, target };
                let after = self.execute(plan);
                self.check_size(simplify(after.diagram()).crossing_count())?;
                Ok(plan)
            }
        }
    }

    /// The band tip, provided a band is in progress and budget remains.
    fn building_tip(&self, kind: MoveKind) -> Result<BandTip, MoveFailure> {
        let tip = self.state.tip().ok_or(MoveFailure::WrongPhase {
            kind,
            phase: BandPhase::AwaitingStart,
        })?;
        let bands = self.state.bands_completed();
        if bands >= self.limits.max_bands {
            return Err(MoveFailure::BandLimit {
                bands,
                max_bands: self.limits.max_bands,
            });
        }
        Ok(tip)
    }

    fn check_start(&self, position: usize) -> Result<MovePlan, MoveFailure> {
        let phase = self.state.phase();
        if phase != BandPhase::AwaitingStart {
            return Err(MoveFailure::WrongPhase {
                kind: MoveKind::Start,
                phase,
            });
        }
        let diagram = self.state.diagram();
        if diagram.is_crossingless() {
            return Err(MoveFailure::NoCrossings);
        }
        let out_of_range = || MoveFailure::PositionOutOfRange {
            kind: MoveKind::Start,
            position,
            available: diagram.crossing_count(),
        };
        let edge = diagram.crossings().get(position).ok_or_else(out_of_range)?[0];
        let [from, to] = self.index.occurrences(edge).ok_or_else(out_of_range)?;
        Ok(MovePlan::Anchor {
            tip: BandTip { from, to },
            edge,
        })
    }

    /// Crossings of the current diagram after R1/R2 reduction, computed once.
    fn reduced_size(&self) -> usize {
        *self
            .reduced
            .get_or_init(|| simplify(self.state.diagram()).crossing_count())
    }

    fn check_size(&self, required: usize) -> Result<(), MoveFailure> {
        if required > self.limits.max_size {
            return Err(MoveFailure::SizeLimit {
                required,
                max_size: self.limits.max_size,
            });
        }
        Ok(())
    }

    /// Front-face side `position + 1`; side 0 is the tip.
    fn front_side(&self, action: Action) -> Result<Side, MoveFailure> {
        let side = self
            .front
            .get(action.position + 1)
            .ok_or(MoveFailure::PositionOutOfRange {
                kind: action.kind,
                position: action.position,
                available: self.front.len().saturating_sub(1),
            })?;
        if side.label == self.front[0].label {
            return Err(MoveFailure::TipEdgeTarget {
                position: action.position,
            });
        }
        Ok(*side)
    }

    /// Run a checked plan against a copy of the state.
    #[must_use]
    pub fn execute(&self, plan: MovePlan) -> BandStateV1 {
        let mut next = self.state.clone();
        match plan {
            MovePlan::Anchor { tip, edge } => {
                next.tip = Some(tip);
                next.history.push(BandEvent::Started { edge });
            }
            MovePlan::Cross { tip, target, kind } => {
                next.tip = Some(cross_edge(&mut next.diagram, tip, target, kind));
                next.history.push(BandEvent::Crossed {
                    edge: target.label,
                    kind,
                });
            }
            MovePlan::Twist { tip, handedness } => {
                next.tip = Some(twist_tip(&mut next.diagram, tip, handedness));
                next.twists_on_band += 1;
                next.history.push(BandEvent::Twisted { handedness });
            }
            MovePlan::Saddle { tip, target } => {
                next.tip = Some(saddle(&mut next.diagram, tip, target));
                next.bands_completed += 1;
                next.twists_on_band = 0;
                next.history.push(BandEvent::Attached {
                    edge: target.label,
                    band: next.bands_completed,
                });
            }
        }
        next
    }
}

/// Apply one action.
///
/// # Errors
///
/// Returns [`MoveFailure`] when the action is illegal in `state`; the
/// state is left untouched.
pub fn apply(
    state: &BandStateV1,
    action: Action,
    limits: MoveLimits,
) -> Result<BandStateV1, MoveFailure> {
    let context = MoveContext::new(state, limits);
    let plan = context.check(action)?;
    Ok(context.execute(plan))
}
