//! Shared helpers for ribbon benchmark suites.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ribbon_harness::knot_table;
use ribbon_kernel::carrier::diagram::LinkDiagram;
use ribbon_kernel::operators::apply::{apply, MoveLimits};
use ribbon_kernel::operators::band::BandStateV1;
use ribbon_search::action_space::ActionSpaceV1;
use ribbon_search::driver::run_walk;
use ribbon_search::env::{NamedLinkV1, RibbonEnvV1};
use ribbon_search::mask::{legal_indices, validity_mask};
use ribbon_search::policy::WalkPolicyV1;
use ribbon_search::report::WalkReportV1;
use ribbon_search::sampler::ActionSampler;

/// Diagram of a built-in table entry.
///
/// # Panics
///
/// Panics if the name is unknown. Benchmark setup failures are fatal.
#[must_use]
pub fn table_diagram(name: &str) -> LinkDiagram {
    knot_table::lookup(name)
        .expect("table entry builds")
        .unwrap_or_else(|| panic!("no table entry {name}"))
}

/// A mid-walk state: `steps` uniform legal moves from `diagram`.
///
/// Used to benchmark mask and move costs on diagrams with a band in
/// progress rather than only on table diagrams.
///
/// # Panics
///
/// Panics if a masked action is rejected.
#[must_use]
pub fn walked_state(
    diagram: &LinkDiagram,
    limits: MoveLimits,
    seed: u64,
    steps: usize,
) -> BandStateV1 {
    let space = ActionSpaceV1::new(limits.max_size);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = BandStateV1::new(diagram.clone());
    for _ in 0..steps {
        let legal = legal_indices(&validity_mask(&space, &state, limits));
        if legal.is_empty() {
            break;
        }
        let action = space
            .decode(legal[rng.gen_range(0..legal.len())])
            .expect("legal index decodes");
        state = apply(&state, action, limits).expect("masked action applies");
    }
    state
}

/// Run a full seeded walk over table links.
///
/// # Panics
///
/// Panics if the environment rejects the policy or the walk misuses it.
#[must_use]
pub fn seeded_walk(
    names: &[&str],
    policy: &WalkPolicyV1,
    weights: &[f64; 5],
    seed: u64,
) -> WalkReportV1 {
    let links = names
        .iter()
        .map(|name| NamedLinkV1::new(*name, table_diagram(name)))
        .collect();
    let mut env = RibbonEnvV1::new(links, policy).expect("valid walk setup");
    let sampler =
        ActionSampler::from_category_weights(weights, &env.action_space()).expect("valid weights");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    run_walk(&mut env, &sampler, policy, &mut rng).expect("walk completes")
}
