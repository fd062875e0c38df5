//! `WalkReportV1`: the outcome of a random-walk run.
//!
//! One [`LinkOutcomeV1`] per link the driver resolved, in batch order.
//! Serializes to JSON with sorted keys, so the bytes (and the report
//! digest) are a function of the walk alone.

use ribbon_kernel::carrier::oriented::oriented_pd;
use ribbon_kernel::invariants::fingerprint::{
    canonical_hash, diagram_fingerprint, ContentHash, DOMAIN_WALK_REPORT,
};
use ribbon_kernel::operators::band::BandStateV1;

use crate::env::NamedLinkV1;

/// How a single link ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOutcomeV1 {
    pub name: String,
    /// Batch index.
    pub index: usize,
    /// Finished episodes, including the successful one.
    pub tries: u64,
    /// Steps across all episodes on this link.
    pub steps: u64,
    pub original_fingerprint: ContentHash,
    /// Final band state of the successful episode.
    pub solution: Option<BandStateV1>,
}

impl LinkOutcomeV1 {
    #[must_use]
    pub fn failed(link: &NamedLinkV1, index: usize, tries: u64, steps: u64) -> Self {
        Self {
            name: link.name.clone(),
            index,
            tries,
            steps,
            original_fingerprint: diagram_fingerprint(&link.diagram),
            solution: None,
        }
    }

    #[must_use]
    pub fn solved(
        link: &NamedLinkV1,
        index: usize,
        tries: u64,
        steps: u64,
        solution: BandStateV1,
    ) -> Self {
        Self {
            solution: Some(solution),
            ..Self::failed(link, index, tries, steps)
        }
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    /// Band string of the successful episode, empty on failure.
    #[must_use]
    pub fn band_string(&self) -> String {
        self.solution
            .as_ref()
            .map(BandStateV1::band_string)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn final_fingerprint(&self) -> Option<ContentHash> {
        self.solution
            .as_ref()
            .map(|state| diagram_fingerprint(state.diagram()))
    }

    fn to_json_value(&self) -> serde_json::Value {
        let solution = self.solution.as_ref().map(|state| {
            serde_json::json!({
                "band_string": state.band_string(),
                "bands_completed": state.bands_completed(),
                "crossings": state.crossing_count(),
                "final_fingerprint": diagram_fingerprint(state.diagram()).as_str(),
                "final_pd": oriented_pd(state.diagram()),
                "free_loops": state.diagram().free_loops(),
            })
        });
        serde_json::json!({
            "index": self.index,
            "name": self.name,
            "original_fingerprint": self.original_fingerprint.as_str(),
            "solution": solution,
            "solved": self.is_solved(),
            "steps": self.steps,
            "tries": self.tries,
        })
    }
}

/// Report of one `run_walk`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkReportV1 {
    pub links: Vec<LinkOutcomeV1>,
    pub total_steps: u64,
    pub total_episodes: u64,
    /// `"uniform"` or `"weighted"`.
    pub sampler: &'static str,
}

impl WalkReportV1 {
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.links.iter().filter(|l| l.is_solved()).count()
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.links.len() - self.success_count()
    }

    #[must_use]
    pub fn succeeded(&self) -> Vec<&str> {
        self.links
            .iter()
            .filter(|l| l.is_solved())
            .map(|l| l.name.as_str())
            .collect()
    }

    #[must_use]
    pub fn failed(&self) -> Vec<&str> {
        self.links
            .iter()
            .filter(|l| !l.is_solved())
            .map(|l| l.name.as_str())
            .collect()
    }

    /// Convert to a `serde_json::Value`. Keys are sorted on output.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "failed": self.failed(),
            "links": self.links.iter().map(LinkOutcomeV1::to_json_value).collect::<Vec<_>>(),
            "sampler": self.sampler,
            "succeeded": self.succeeded(),
            "total_episodes": self.total_episodes,
            "total_steps": self.total_steps,
        })
    }

    /// Compact JSON bytes with sorted keys.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.to_json_value())
    }

    /// Digest of the canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn content_hash(&self) -> Result<ContentHash, serde_json::Error> {
        Ok(canonical_hash(
            DOMAIN_WALK_REPORT,
            &self.to_canonical_json_bytes()?,
        ))
    }
}
