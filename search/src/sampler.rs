//! Action selection for the random walk.
//!
//! Per-category weights are given in the order
//! `[start, attach, over, under, twist]` and broadcast over the flat space.
//! An all-ones vector selects plain uniform sampling over legal actions.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::action_space::ActionSpaceV1;
use crate::error::SearchError;
use crate::mask::legal_indices;

/// Default category weights: attach strongly preferred, twists mildly.
pub const DEFAULT_WEIGHTS: [f64; 5] = [1.0, 17.0, 1.0, 1.0, 3.0];

/// How the driver picks the next action index.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionSampler {
    /// Uniform over legal indices.
    Uniform,
    /// Proportional to per-index weights, restricted to legal indices.
    Weighted(Vec<f64>),
}

impl ActionSampler {
    /// Build a sampler from category weights.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidWeights`] if a weight is negative or
    /// not finite.
    pub fn from_category_weights(
        weights: &[f64; 5],
        space: &ActionSpaceV1,
    ) -> Result<Self, SearchError> {
        if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(SearchError::InvalidWeights {
                detail: format!("weight {bad} is not a finite non-negative number"),
            });
        }
        #[allow(clippy::float_cmp)]
        let all_ones = weights.iter().all(|&w| w == 1.0);
        if all_ones {
            return Ok(Self::Uniform);
        }
        Ok(Self::Weighted(space.broadcast_weights(weights)))
    }

    #[must_use]
    pub fn is_uniform(&self) -> bool {
        matches!(self, Self::Uniform)
    }

    /// Pick an index given the validity mask.
    ///
    /// With no legal action the result is index 0; the environment treats
    /// it as a no-op and ends the episode. If every legal action has zero
    /// weight, falls back to uniform over legal actions.
    pub fn sample<R: Rng>(&self, mask: &[bool], rng: &mut R) -> usize {
        let legal = legal_indices(mask);
        if legal.is_empty() {
            return 0;
        }
        if let Self::Weighted(weights) = self {
            let masked = legal
                .iter()
                .map(|&i| weights.get(i).copied().unwrap_or(0.0));
            if let Ok(dist) = WeightedIndex::new(masked) {
                return legal[dist.sample(rng)];
            }
        }
        legal[rng.gen_range(0..legal.len())]
    }
}

/// Parse a weight list such as `"[1.,17.,1.,1.,3.]"`.
///
/// Brackets are optional. Exactly five comma-separated numbers.
///
/// # Errors
///
/// Returns [`SearchError::InvalidWeights`] on a malformed list.
pub fn parse_weights(text: &str) -> Result<[f64; 5], SearchError> {
    let inner = text
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']');
    let values = inner
        .split(',')
        .map(|field| {
            let field = field.trim();
            field.parse::<f64>().map_err(|_| SearchError::InvalidWeights {
                detail: format!("{field:?} is not a number"),
            })
        })
        .collect::<Result<Vec<f64>, SearchError>>()?;
    <[f64; 5]>::try_from(values).map_err(|values| SearchError::InvalidWeights {
        detail: format!("expected 5 weights, got {}", values.len()),
    })
}
