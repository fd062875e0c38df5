//! Typed search errors.
//!
//! `SearchError` covers pre-flight failures: nothing has been stepped yet.
//! Episode outcomes (solved, step budget, band budget, dead end) are not
//! errors; they are reported through [`crate::env::TerminationReasonV1`].

use ribbon_kernel::operators::action::MoveKind;

/// Pre-flight failure while building an environment, sampler, or walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The policy has an unusable setting.
    InvalidPolicy { detail: String },
    /// A weight vector is malformed.
    InvalidWeights { detail: String },
    /// No links were supplied.
    EmptyBatch,
    /// An input diagram already exceeds the crossing ceiling.
    DiagramTooLarge {
        link: String,
        crossings: usize,
        max_size: usize,
    },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy { detail } => write!(f, "invalid walk policy: {detail}"),
            Self::InvalidWeights { detail } => write!(f, "invalid sampling weights: {detail}"),
            Self::EmptyBatch => write!(f, "no links to process"),
            Self::DiagramTooLarge {
                link,
                crossings,
                max_size,
            } => write!(
                f,
                "link {link} has {crossings} crossings, more than max_size {max_size}"
            ),
        }
    }
}

impl std::error::Error for SearchError {}

/// Failure to encode or decode an action index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The flat index is not below the action-space length.
    IndexOutOfRange { index: usize, len: usize },
    /// The position is not encodable for this kind.
    PositionOutOfRange {
        kind: MoveKind,
        position: usize,
        limit: usize,
    },
}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "action index {index} out of range for space of {len}")
            }
            Self::PositionOutOfRange {
                kind,
                position,
                limit,
            } => write!(f, "{kind} position {position} not below {limit}"),
        }
    }
}

impl std::error::Error for ActionError {}

/// Misuse of the episode controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpisodeError {
    /// The index is outside the flat action space.
    ActionOutOfRange(ActionError),
    /// `step` was called after `done` without a `reset`.
    EpisodeFinished,
    /// Every link in the batch has been consumed.
    Exhausted,
}

impl std::fmt::Display for EpisodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ActionOutOfRange(inner) => write!(f, "{inner}"),
            Self::EpisodeFinished => write!(f, "episode is finished; call reset first"),
            Self::Exhausted => write!(f, "all links have been processed"),
        }
    }
}

impl std::error::Error for EpisodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ActionOutOfRange(inner) => Some(inner),
            Self::EpisodeFinished | Self::Exhausted => None,
        }
    }
}

impl From<ActionError> for EpisodeError {
    fn from(err: ActionError) -> Self {
        Self::ActionOutOfRange(err)
    }
}
