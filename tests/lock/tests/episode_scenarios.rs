//! Episode controller scenario tests.
//!
//! Proves:
//! 1. Trivial inputs solve on the first step
//! 2. Budgets end episodes with the documented reasons
//! 3. Misuse is reported as typed errors
//! 4. `reset(false)` is idempotent and restores the original link
//! 5. `reset(true)` walks the batch and then reports exhaustion

use ribbon_kernel::carrier::braid::braid_closure;
use ribbon_kernel::carrier::diagram::LinkDiagram;
use ribbon_search::env::{EpisodePhaseV1, NamedLinkV1, RibbonEnvV1, TerminationReasonV1};
use ribbon_search::error::EpisodeError;
use ribbon_search::policy::WalkPolicyV1;

use lock_tests::walk_helpers::table_link;

fn env(links: Vec<NamedLinkV1>, policy: &WalkPolicyV1) -> RibbonEnvV1 {
    RibbonEnvV1::new(links, policy).unwrap()
}

/// Step the first legal action (or index 0) until done.
fn run_episode(env: &mut RibbonEnvV1) -> TerminationReasonV1 {
    loop {
        let index = env
            .invalid_action_mask()
            .iter()
            .position(|&legal| legal)
            .unwrap_or(0);
        let out = env.step(index).unwrap();
        if out.done {
            return out.info.result.unwrap();
        }
    }
}

// ---------------------------------------------------------------------------
// 1. Trivial inputs
// ---------------------------------------------------------------------------

#[test]
fn unknot_with_no_bands_is_solved_immediately() {
    let policy = WalkPolicyV1 {
        max_bands: 0,
        ..WalkPolicyV1::default()
    };
    let mut e = env(vec![table_link("unknot")], &policy);
    let out = e.step(0).unwrap();
    assert!(out.done);
    assert!(out.info.result_str().contains("unknot"));
    assert_eq!(out.info.bands_completed, 0);
    assert_eq!(e.num_times_solved(), 1);
}

#[test]
fn kinked_unknot_is_solved_after_start() {
    let kinked = NamedLinkV1::new(
        "kink",
        LinkDiagram::from_pd(vec![[1, 2, 2, 3], [3, 4, 4, 1]]).unwrap(),
    );
    let mut e = env(vec![kinked], &WalkPolicyV1::default());
    assert_eq!(run_episode(&mut e), TerminationReasonV1::Unknot);
    assert_eq!(e.steps(), 1);
}

#[test]
fn split_unlink_needs_no_bands() {
    let link = NamedLinkV1::new("unlink2", braid_closure(&[1, -1, 1, -1]).unwrap());
    let mut e = env(vec![link], &WalkPolicyV1::default());
    assert_eq!(run_episode(&mut e), TerminationReasonV1::Unknot);
    assert_eq!(e.state().bands_completed(), 0);
}

// ---------------------------------------------------------------------------
// 2. Budgets
// ---------------------------------------------------------------------------

#[test]
fn zero_step_budget_ends_on_first_step() {
    let policy = WalkPolicyV1 {
        max_steps: 0,
        ..WalkPolicyV1::default()
    };
    let mut e = env(vec![table_link("6_1")], &policy);
    let out = e.step(0).unwrap();
    assert!(out.done);
    assert_eq!(out.info.result_str(), "max-steps");
    assert_eq!(e.phase(), EpisodePhaseV1::Abandoned);
}

#[test]
fn step_budget_counts_no_ops() {
    let policy = WalkPolicyV1 {
        max_steps: 3,
        ..WalkPolicyV1::default()
    };
    let mut e = env(vec![table_link("3_1")], &policy);
    let twist = e.action_space().len() - 1;
    for _ in 0..3 {
        assert!(!e.step(twist).unwrap().done);
    }
    let out = e.step(twist).unwrap();
    assert_eq!(out.info.result, Some(TerminationReasonV1::MaxSteps));
    assert!(!out.info.accepted);
}

#[test]
fn non_ribbon_knot_never_solves_without_bands() {
    let policy = WalkPolicyV1 {
        max_bands: 0,
        ..WalkPolicyV1::default()
    };
    let mut e = env(vec![table_link("4_1")], &policy);
    assert_eq!(run_episode(&mut e), TerminationReasonV1::MaxBands);
    assert_eq!(e.total_abandoned(), 1);
}

// ---------------------------------------------------------------------------
// 3. Misuse
// ---------------------------------------------------------------------------

#[test]
fn out_of_range_index_is_a_typed_error() {
    let mut e = env(vec![table_link("3_1")], &WalkPolicyV1::default());
    let len = e.action_space().len();
    assert!(matches!(
        e.step(len),
        Err(EpisodeError::ActionOutOfRange(_))
    ));
    assert!(matches!(
        e.step(usize::MAX),
        Err(EpisodeError::ActionOutOfRange(_))
    ));
}

#[test]
fn stepping_a_finished_episode_is_an_error() {
    let mut e = env(vec![table_link("unknot")], &WalkPolicyV1::default());
    assert!(e.step(0).unwrap().done);
    assert_eq!(e.step(0).unwrap_err(), EpisodeError::EpisodeFinished);
}

// ---------------------------------------------------------------------------
// 4-5. Reset
// ---------------------------------------------------------------------------

#[test]
fn soft_reset_is_idempotent() {
    let mut e = env(vec![table_link("6_1")], &WalkPolicyV1::default());
    let original = e.state().clone();
    let original_mask = e.invalid_action_mask().to_vec();
    let _ = run_episode(&mut e);
    e.reset(false);
    let once = e.state().clone();
    e.reset(false);
    assert_eq!(e.state(), &once);
    assert_eq!(e.state(), &original);
    assert_eq!(e.invalid_action_mask(), original_mask);
    assert_eq!(e.phase(), EpisodePhaseV1::AwaitingStart);
    assert_eq!(e.link_name(), "6_1");
}

#[test]
fn hard_reset_walks_then_exhausts() {
    let links = vec![table_link("3_1"), table_link("4_1"), table_link("6_1")];
    let mut e = env(links, &WalkPolicyV1::default());
    let mut seen = vec![e.link_name().to_string()];
    for expected_next in 2..=3 {
        e.reset(true);
        assert_eq!(e.next_l(), expected_next);
        seen.push(e.link_name().to_string());
    }
    assert_eq!(seen, vec!["3_1", "4_1", "6_1"]);
    assert!(!e.is_exhausted());
    e.reset(true);
    assert!(e.is_exhausted());
    assert_eq!(e.step(0).unwrap_err(), EpisodeError::Exhausted);
}

#[test]
fn counters_track_outcomes() {
    let links = vec![table_link("unknot"), table_link("3_1")];
    let policy = WalkPolicyV1 {
        max_steps: 0,
        ..WalkPolicyV1::default()
    };
    let mut e = env(links, &policy);
    assert!(e.step(0).unwrap().done);
    e.reset(true);
    assert_eq!(e.num_times_solved(), 0);
    assert!(e.step(0).unwrap().done);
    assert_eq!(e.total_solved(), 1);
    assert_eq!(e.total_abandoned(), 1);
    assert_eq!(e.max_steps_until_reset(), 0);
}
