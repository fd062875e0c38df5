//! Walk policy: per-link budgets and the crossing ceiling.

use ribbon_kernel::carrier::diagram::LinkDiagram;
use ribbon_kernel::operators::apply::MoveLimits;

use crate::error::SearchError;

/// Budgets for the random walk.
///
/// `max_bands` is one shared bound on completed bands and on twists per
/// band. `max_tries < 0` means retry forever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkPolicyV1 {
    /// Shared bound on bands and twists per band.
    pub max_bands: usize,
    /// Crossing ceiling; `None` derives `1 + max crossings` over the batch.
    pub max_size: Option<usize>,
    /// Steps per episode before it is abandoned.
    pub max_steps: u64,
    /// Episodes per link before it is recorded as failed; negative is unbounded.
    pub max_tries: i64,
    /// Stop after the first link resolves either way.
    pub single_link: bool,
}

impl WalkPolicyV1 {
    /// Check settings that can never produce a meaningful walk.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_tries` is 0.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_tries == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "max_tries must be positive or negative (unbounded), not 0".into(),
            });
        }
        Ok(())
    }

    /// The crossing ceiling for a batch of diagrams.
    #[must_use]
    pub fn resolve_max_size(&self, diagrams: &[LinkDiagram]) -> usize {
        self.max_size.unwrap_or_else(|| {
            1 + diagrams
                .iter()
                .map(LinkDiagram::crossing_count)
                .max()
                .unwrap_or(0)
        })
    }

    /// Move limits for a resolved crossing ceiling.
    #[must_use]
    pub fn limits(&self, max_size: usize) -> MoveLimits {
        MoveLimits {
            max_size,
            max_bands: self.max_bands,
        }
    }

    /// Whether `tries` finished episodes use up the per-link budget.
    #[must_use]
    pub fn tries_exhausted(&self, tries: u64) -> bool {
        u64::try_from(self.max_tries).is_ok_and(|max| tries >= max)
    }
}

impl Default for WalkPolicyV1 {
    fn default() -> Self {
        Self {
            max_bands: 5,
            max_size: None,
            max_steps: 50,
            max_tries: 1000,
            single_link: false,
        }
    }
}
