//! Mask / executor agreement and diagram invariants along random walks.
//!
//! Proves, for every state reached by seeded uniform walks from several
//! table links:
//! 1. `mask[i]` is true exactly when `apply` accepts action `i`
//! 2. Rejected actions leave the state untouched
//! 3. The reduced crossing count of every measured diagram fits `max_size`
//! 4. Every label occurs exactly twice and each projection piece is planar
//!    (`n + 2` faces per connected piece)
//! 5. Bands and twists stay within `max_bands`

use ribbon_kernel::carrier::faces::faces;
use ribbon_kernel::invariants::simplify::simplify;
use ribbon_kernel::operators::apply::{apply, MoveLimits};
use ribbon_kernel::operators::band::BandStateV1;
use ribbon_search::action_space::ActionSpaceV1;
use ribbon_search::mask::validity_mask;

use lock_tests::walk_helpers::{projection_pieces, random_trajectory, table_link};

const LINKS: &[&str] = &["3_1", "4_1", "6_1", "square", "hopf"];
const SEEDS: &[u64] = &[1, 2, 3, 17, 99];
/// Headroom over the input's crossing count. One is the default ceiling.
const HEADROOM: &[usize] = &[1, 8];

fn limits_for(name: &str, headroom: usize) -> MoveLimits {
    MoveLimits {
        max_size: table_link(name).diagram.crossing_count() + headroom,
        max_bands: 3,
    }
}

fn trajectories() -> impl Iterator<Item = (String, MoveLimits, Vec<BandStateV1>)> {
    LINKS.iter().flat_map(|name| {
        HEADROOM.iter().flat_map(move |&headroom| {
            SEEDS.iter().map(move |&seed| {
                let limits = limits_for(name, headroom);
                let states = random_trajectory(&table_link(name).diagram, limits, seed, 40);
                (format!("{name}/+{headroom}/seed {seed}"), limits, states)
            })
        })
    })
}

// ---------------------------------------------------------------------------
// 1-2. Agreement
// ---------------------------------------------------------------------------

#[test]
fn mask_agrees_with_apply_on_every_index() {
    for (label, limits, states) in trajectories() {
        let space = ActionSpaceV1::new(limits.max_size);
        for state in &states {
            let mask = validity_mask(&space, state, limits);
            assert_eq!(mask.len(), space.len());
            for (index, legal) in mask.iter().enumerate() {
                let action = space.decode(index).unwrap();
                let result = apply(state, action, limits);
                assert_eq!(
                    result.is_ok(),
                    *legal,
                    "{label}: index {index} ({action}) mask={legal} apply={result:?}"
                );
            }
        }
    }
}

#[test]
fn trajectories_make_progress() {
    for (label, _, states) in trajectories() {
        assert!(states.len() > 1, "{label}: no legal first move");
    }
}

// ---------------------------------------------------------------------------
// 3-5. Invariants
// ---------------------------------------------------------------------------

#[test]
fn crossing_ceiling_is_never_exceeded() {
    // Fingers and twists are measured before the move, attaches after it.
    for (label, limits, states) in trajectories() {
        for pair in states.windows(2) {
            let measured = if pair[1].bands_completed() > pair[0].bands_completed() {
                &pair[1]
            } else {
                &pair[0]
            };
            let reduced = simplify(measured.diagram()).crossing_count();
            assert!(
                reduced <= limits.max_size,
                "{label}: {reduced} reduced crossings over ceiling {}",
                limits.max_size
            );
        }
    }
}

#[test]
fn fingers_are_reachable_under_the_default_ceiling() {
    for name in LINKS {
        let limits = limits_for(name, 1);
        let reached = SEEDS.iter().any(|&seed| {
            random_trajectory(&table_link(name).diagram, limits, seed, 40)
                .iter()
                .any(|state| state.crossing_count() > limits.max_size)
        });
        assert!(reached, "{name}: no finger move grew the raw diagram");
    }
}

#[test]
fn diagrams_stay_valid_and_planar() {
    for (label, _, states) in trajectories() {
        for (step, state) in states.iter().enumerate() {
            let d = state.diagram();
            d.validate()
                .unwrap_or_else(|e| panic!("{label} step {step}: {e}"));
            let expected = d.crossing_count() + 2 * projection_pieces(d);
            assert_eq!(
                faces(d).len(),
                expected,
                "{label} step {step}: face count breaks Euler characteristic"
            );
        }
    }
}

#[test]
fn band_budgets_hold() {
    for (label, limits, states) in trajectories() {
        for state in &states {
            assert!(state.bands_completed() <= limits.max_bands, "{label}");
            assert!(state.twists_on_band() <= limits.max_bands, "{label}");
        }
    }
}
