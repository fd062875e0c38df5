//! `RibbonEnvV1`: the episode controller.
//!
//! Owns one live [`BandStateV1`] at a time and walks a batch of links.
//!
//! ```text
//! AwaitingStart ──start──▶ BuildingBands ──┬──▶ Solved     ("unknot")
//!                                          └──▶ Abandoned  ("max-steps",
//!                                                "max-bands", "dead-end")
//! ```
//!
//! Every `step` increments the step counter, applies the action if it is
//! legal (an illegal in-range action is a no-op), then checks in order:
//! solved, step budget, band budget, empty mask. The first that holds ends
//! the episode. `reset(false)` restarts the current link; `reset(true)`
//! moves to the next one.
//!
//! Fingers and twists are isotopies of the link, so the oracle is only
//! consulted after an accepted attach. An accepted start reuses the verdict
//! on the input diagram, computed once per link. The validity mask is
//! cached and recomputed only when the state changes.

use ribbon_kernel::carrier::diagram::LinkDiagram;
use ribbon_kernel::operators::action::{Action, MoveKind};
use ribbon_kernel::operators::apply::{apply, MoveLimits};
use ribbon_kernel::operators::band::{BandPhase, BandStateV1};
use tracing::{debug, info, trace};

use crate::action_space::ActionSpaceV1;
use crate::error::{EpisodeError, SearchError};
use crate::mask::validity_mask;
use crate::oracle::{DiagramOracle, GlobalOracle};
use crate::policy::WalkPolicyV1;

/// A named input diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedLinkV1 {
    pub name: String,
    pub diagram: LinkDiagram,
}

impl NamedLinkV1 {
    #[must_use]
    pub fn new(name: impl Into<String>, diagram: LinkDiagram) -> Self {
        Self {
            name: name.into(),
            diagram,
        }
    }
}

/// Why an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReasonV1 {
    /// The diagram is the unlink with the expected number of components.
    Unknot,
    /// The step budget ran out.
    MaxSteps,
    /// The band budget is used up and the diagram is not solved.
    MaxBands,
    /// No action is legal.
    DeadEnd,
}

impl TerminationReasonV1 {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknot => "unknot",
            Self::MaxSteps => "max-steps",
            Self::MaxBands => "max-bands",
            Self::DeadEnd => "dead-end",
        }
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Unknot)
    }
}

impl std::fmt::Display for TerminationReasonV1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Episode lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EpisodePhaseV1 {
    AwaitingStart,
    BuildingBands,
    Solved,
    Abandoned,
}

/// Details of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepInfo {
    /// Set when the step ended the episode.
    pub result: Option<TerminationReasonV1>,
    /// The decoded action.
    pub action: Action,
    /// Whether the action was legal and changed the state.
    pub accepted: bool,
    /// Steps taken in this episode, including this one.
    pub steps: u64,
    /// Crossings of the live diagram after the step.
    pub crossings: usize,
    /// Bands completed after the step.
    pub bands_completed: usize,
}

impl StepInfo {
    /// The termination reason as a string, empty while the episode runs.
    #[must_use]
    pub fn result_str(&self) -> &'static str {
        self.result.map_or("", TerminationReasonV1::as_str)
    }
}

/// Result of [`RibbonEnvV1::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub done: bool,
    pub info: StepInfo,
}

/// The episode controller over a batch of links.
pub struct RibbonEnvV1 {
    links: Vec<NamedLinkV1>,
    space: ActionSpaceV1,
    limits: MoveLimits,
    max_steps: u64,
    oracle: Box<dyn DiagramOracle>,
    current: usize,
    next_l: usize,
    state: BandStateV1,
    mask: Vec<bool>,
    input_is_unlink: bool,
    steps: u64,
    finished: Option<TerminationReasonV1>,
    exhausted: bool,
    num_times_solved: u64,
    total_solved: u64,
    total_abandoned: u64,
}

impl RibbonEnvV1 {
    /// Environment with the built-in [`GlobalOracle`].
    ///
    /// # Errors
    ///
    /// See [`RibbonEnvV1::with_oracle`].
    pub fn new(links: Vec<NamedLinkV1>, policy: &WalkPolicyV1) -> Result<Self, SearchError> {
        Self::with_oracle(links, policy, Box::new(GlobalOracle::default()))
    }

    /// Environment over `links`, loaded at the first link.
    ///
    /// # Errors
    ///
    /// - [`SearchError::EmptyBatch`] if `links` is empty.
    /// - [`SearchError::InvalidPolicy`] if the policy does not validate.
    /// - [`SearchError::DiagramTooLarge`] if an input already exceeds the
    ///   crossing ceiling.
    pub fn with_oracle(
        links: Vec<NamedLinkV1>,
        policy: &WalkPolicyV1,
        oracle: Box<dyn DiagramOracle>,
    ) -> Result<Self, SearchError> {
        policy.validate()?;
        let first = links.first().ok_or(SearchError::EmptyBatch)?.diagram.clone();
        let diagrams: Vec<LinkDiagram> = links.iter().map(|l| l.diagram.clone()).collect();
        let max_size = policy.resolve_max_size(&diagrams);
        if let Some(big) = links
            .iter()
            .find(|l| l.diagram.crossing_count() > max_size)
        {
            return Err(SearchError::DiagramTooLarge {
                link: big.name.clone(),
                crossings: big.diagram.crossing_count(),
                max_size,
            });
        }
        let mut env = Self {
            links,
            space: ActionSpaceV1::new(max_size),
            limits: policy.limits(max_size),
            max_steps: policy.max_steps,
            oracle,
            current: 0,
            next_l: 1,
            state: BandStateV1::new(first),
            mask: Vec::new(),
            input_is_unlink: false,
            steps: 0,
            finished: None,
            exhausted: false,
            num_times_solved: 0,
            total_solved: 0,
            total_abandoned: 0,
        };
        env.load_current();
        Ok(env)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn action_space(&self) -> ActionSpaceV1 {
        self.space
    }

    #[must_use]
    pub fn limits(&self) -> MoveLimits {
        self.limits
    }

    #[must_use]
    pub fn links(&self) -> &[NamedLinkV1] {
        &self.links
    }

    /// Name of the link currently loaded.
    #[must_use]
    pub fn link_name(&self) -> &str {
        &self.links[self.current].name
    }

    /// Index of the link currently loaded.
    #[must_use]
    pub fn current_link(&self) -> usize {
        self.current
    }

    /// Index of the next link `reset(true)` will load.
    #[must_use]
    pub fn next_l(&self) -> usize {
        self.next_l
    }

    #[must_use]
    pub fn state(&self) -> &BandStateV1 {
        &self.state
    }

    /// Steps taken in the current episode.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Successful episodes on the current link.
    #[must_use]
    pub fn num_times_solved(&self) -> u64 {
        self.num_times_solved
    }

    #[must_use]
    pub fn total_solved(&self) -> u64 {
        self.total_solved
    }

    #[must_use]
    pub fn total_abandoned(&self) -> u64 {
        self.total_abandoned
    }

    /// Step budget per episode.
    #[must_use]
    pub fn max_steps_until_reset(&self) -> u64 {
        self.max_steps
    }

    /// True once `reset(true)` was called with no link left.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// How the current episode ended, if it has.
    #[must_use]
    pub fn result(&self) -> Option<TerminationReasonV1> {
        self.finished
    }

    #[must_use]
    pub fn phase(&self) -> EpisodePhaseV1 {
        match self.finished {
            Some(TerminationReasonV1::Unknot) => EpisodePhaseV1::Solved,
            Some(_) => EpisodePhaseV1::Abandoned,
            None => match self.state.phase() {
                BandPhase::AwaitingStart => EpisodePhaseV1::AwaitingStart,
                BandPhase::BuildingBands => EpisodePhaseV1::BuildingBands,
            },
        }
    }

    /// Legal-action mask: `true` marks an index `step` would accept.
    #[must_use]
    pub fn invalid_action_mask(&self) -> &[bool] {
        &self.mask
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Take one step with the action at flat `index`.
    ///
    /// # Errors
    ///
    /// - [`EpisodeError::Exhausted`] after the batch has been consumed.
    /// - [`EpisodeError::EpisodeFinished`] if the episode already ended.
    /// - [`EpisodeError::ActionOutOfRange`] if `index` is outside the space.
    pub fn step(&mut self, index: usize) -> Result<StepOutcome, EpisodeError> {
        if self.exhausted {
            return Err(EpisodeError::Exhausted);
        }
        if self.finished.is_some() {
            return Err(EpisodeError::EpisodeFinished);
        }
        let action = self.space.decode(index)?;
        self.steps += 1;

        let accepted = match apply(&self.state, action, self.limits) {
            Ok(next) => {
                self.state = next;
                self.refresh_mask();
                debug!(
                    link = %self.link_name(),
                    step = self.steps,
                    %action,
                    crossings = self.state.crossing_count(),
                    "accepted move"
                );
                true
            }
            Err(failure) => {
                trace!(step = self.steps, %action, %failure, "illegal action, no-op");
                false
            }
        };

        let result = self.evaluate(action, accepted);
        if let Some(reason) = result {
            self.finish(reason);
        }
        Ok(StepOutcome {
            done: result.is_some(),
            info: StepInfo {
                result,
                action,
                accepted,
                steps: self.steps,
                crossings: self.state.crossing_count(),
                bands_completed: self.state.bands_completed(),
            },
        })
    }

    /// Start a new episode.
    ///
    /// `force = false` restarts the current link from its original diagram.
    /// `force = true` loads the next link; with none left the environment
    /// becomes exhausted.
    pub fn reset(&mut self, force: bool) {
        if force {
            if self.next_l >= self.links.len() {
                self.exhausted = true;
                return;
            }
            self.current = self.next_l;
            self.next_l += 1;
            self.num_times_solved = 0;
            self.load_current();
            debug!(link = %self.link_name(), index = self.current, "loaded next link");
        } else {
            self.state = BandStateV1::new(self.links[self.current].diagram.clone());
            self.refresh_mask();
        }
        self.steps = 0;
        self.finished = None;
    }

    /// Fresh state and input verdict for the link at `current`.
    fn load_current(&mut self) {
        let diagram = &self.links[self.current].diagram;
        self.input_is_unlink = self
            .oracle
            .is_unlink(diagram, diagram.component_count());
        self.state = BandStateV1::new(diagram.clone());
        self.refresh_mask();
    }

    fn refresh_mask(&mut self) {
        self.mask = validity_mask(&self.space, &self.state, self.limits);
    }

    fn evaluate(&self, action: Action, accepted: bool) -> Option<TerminationReasonV1> {
        let diagram = self.state.diagram();
        let target = self.state.target_components();
        let solved = if diagram.is_crossingless() {
            diagram.free_loops() == target
        } else if accepted {
            match action.kind {
                MoveKind::Start => self.input_is_unlink,
                MoveKind::Attach => self.oracle.is_unlink(diagram, target),
                MoveKind::Over | MoveKind::Under | MoveKind::Twist => false,
            }
        } else {
            false
        };
        if solved {
            return Some(TerminationReasonV1::Unknot);
        }
        if self.steps > self.max_steps {
            return Some(TerminationReasonV1::MaxSteps);
        }
        if accepted
            && self.state.phase() == BandPhase::BuildingBands
            && self.state.bands_completed() >= self.limits.max_bands
        {
            return Some(TerminationReasonV1::MaxBands);
        }
        if !self.mask.contains(&true) {
            return Some(TerminationReasonV1::DeadEnd);
        }
        None
    }

    fn finish(&mut self, reason: TerminationReasonV1) {
        self.finished = Some(reason);
        if reason.is_success() {
            self.num_times_solved += 1;
            self.total_solved += 1;
            info!(
                link = %self.link_name(),
                steps = self.steps,
                bands = self.state.bands_completed(),
                band_string = %self.state.band_string(),
                "solved"
            );
        } else {
            self.total_abandoned += 1;
            debug!(link = %self.link_name(), steps = self.steps, %reason, "episode abandoned");
        }
    }
}
