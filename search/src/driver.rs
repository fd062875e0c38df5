//! `run_walk`: the retrying random-walk loop.
//!
//! Mask, sample, step. On a solved episode the link is recorded and the
//! driver moves to the next link. Any other ending counts as one try; once
//! the per-link try budget is used up the link is recorded as failed and
//! the driver moves on. The loop ends when the batch is exhausted, or after
//! the first link resolves when `single_link` is set.

use rand::Rng;
use tracing::{error, info};

use crate::env::RibbonEnvV1;
use crate::error::EpisodeError;
use crate::policy::WalkPolicyV1;
use crate::report::{LinkOutcomeV1, WalkReportV1};
use crate::sampler::ActionSampler;

/// Steps between progress log lines.
pub const PROGRESS_INTERVAL: u64 = 10_000;

/// Per-link counters, reset whenever the driver moves on.
#[derive(Debug, Default)]
struct LinkProgress {
    tries: u64,
    steps: u64,
}

/// Run the walk over every link loaded into `env`.
///
/// # Errors
///
/// Returns [`EpisodeError`] only on controller misuse, which the loop never
/// commits with a well-formed `env`; the error is propagated rather than
/// hidden.
pub fn run_walk<R: Rng>(
    env: &mut RibbonEnvV1,
    sampler: &ActionSampler,
    policy: &WalkPolicyV1,
    rng: &mut R,
) -> Result<WalkReportV1, EpisodeError> {
    let mut outcomes = Vec::new();
    let mut progress = LinkProgress::default();
    let mut total_steps = 0u64;
    let mut total_episodes = 0u64;

    while !env.is_exhausted() {
        let index = sampler.sample(env.invalid_action_mask(), rng);
        let outcome = env.step(index)?;
        total_steps += 1;
        progress.steps += 1;

        if total_steps % PROGRESS_INTERVAL == 0 {
            info!(
                steps = total_steps,
                link = %env.link_name(),
                solved = env.total_solved(),
                abandoned = env.total_abandoned(),
                "progress"
            );
        }

        if !outcome.done {
            continue;
        }
        total_episodes += 1;
        progress.tries += 1;

        let link = &env.links()[env.current_link()];
        let resolved = if outcome.info.result.is_some_and(|r| r.is_success()) {
            info!(
                link = %link.name,
                tries = progress.tries,
                band_string = %env.state().band_string(),
                "link solved"
            );
            Some(LinkOutcomeV1::solved(
                link,
                env.current_link(),
                progress.tries,
                progress.steps,
                env.state().clone(),
            ))
        } else if policy.tries_exhausted(progress.tries) {
            error!(
                link = %link.name,
                tries = progress.tries,
                "giving up on link after reaching max tries"
            );
            Some(LinkOutcomeV1::failed(
                link,
                env.current_link(),
                progress.tries,
                progress.steps,
            ))
        } else {
            None
        };

        match resolved {
            Some(resolved) => {
                outcomes.push(resolved);
                progress = LinkProgress::default();
                if policy.single_link {
                    break;
                }
                env.reset(true);
            }
            None => env.reset(false),
        }
    }

    Ok(WalkReportV1 {
        links: outcomes,
        total_steps,
        total_episodes,
        sampler: if sampler.is_uniform() {
            "uniform"
        } else {
            "weighted"
        },
    })
}
