//! Simplification oracle lock tests.
//!
//! Proves:
//! 1. Kinks and cancelling braid pairs reduce to free loops
//! 2. Reduced alternating diagrams are left alone
//! 3. Twist kinks added by band moves are removed again
//! 4. Simplification preserves component count and the knot determinant
//! 5. The global pass never does worse than the greedy one

use ribbon_kernel::carrier::braid::braid_closure;
use ribbon_kernel::carrier::diagram::LinkDiagram;
use ribbon_kernel::invariants::determinant::knot_determinant;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ribbon_kernel::invariants::simplify::{simplify, simplify_global, simplify_with_stats};
use ribbon_kernel::operators::action::{Action, Handedness};
use ribbon_kernel::operators::apply::{apply, MoveLimits};
use ribbon_kernel::operators::band::BandStateV1;
use ribbon_search::oracle::{DiagramOracle, ReidemeisterOracle};

use lock_tests::walk_helpers::{random_trajectory, table_link};

#[test]
fn trivial_braids_reduce_to_unlinks() {
    let cases: &[(&[i32], usize)] = &[
        (&[1, -1], 2),
        (&[1, 2, -2, -1], 3),
        (&[-1, 1, -1, 1], 2),
        (&[1], 1),
        (&[1, 1, -1], 1),
    ];
    for (word, components) in cases {
        let closed = braid_closure(word).unwrap();
        assert!(
            ReidemeisterOracle.is_unlink(&closed, *components),
            "{word:?} should reduce to the {components}-component unlink"
        );
    }
}

#[test]
fn reduced_alternating_diagrams_are_fixed_points() {
    for name in ["3_1", "4_1", "6_1", "hopf"] {
        let d = table_link(name).diagram;
        let (out, stats) = simplify_with_stats(&d);
        assert_eq!(out, d, "{name} changed");
        assert_eq!(stats.reidemeister_one + stats.reidemeister_two, 0);
    }
}

#[test]
fn twist_kinks_are_undone() {
    let limits = MoveLimits {
        max_size: 10,
        max_bands: 3,
    };
    let trefoil = table_link("3_1").diagram;
    let mut state = apply(&BandStateV1::new(trefoil), Action::start(2), limits).unwrap();
    for handedness in [Handedness::Left, Handedness::Right, Handedness::Left] {
        state = apply(&state, Action::twist(handedness), limits).unwrap();
    }
    assert_eq!(state.crossing_count(), 6);
    assert_eq!(ReidemeisterOracle.simplified_crossing_count(state.diagram()), 3);
}

#[test]
fn simplify_preserves_components_and_determinant() {
    let limits = MoveLimits {
        max_size: 14,
        max_bands: 2,
    };
    for name in ["3_1", "4_1", "6_1"] {
        for seed in 0..6 {
            for state in random_trajectory(&table_link(name).diagram, limits, seed, 25) {
                let d: &LinkDiagram = state.diagram();
                let s = simplify(d);
                assert!(s.crossing_count() <= d.crossing_count());
                assert_eq!(s.component_count(), d.component_count(), "{name}/{seed}");
                assert_eq!(knot_determinant(&s), knot_determinant(d), "{name}/{seed}");
            }
        }
    }
}

#[test]
fn global_pass_preserves_the_link() {
    let limits = MoveLimits {
        max_size: 10,
        max_bands: 2,
    };
    for name in ["3_1", "6_1"] {
        for seed in 0..2 {
            let states = random_trajectory(&table_link(name).diagram, limits, seed, 12);
            for state in states.iter().step_by(3) {
                let d = state.diagram();
                let g = simplify_global(d, &mut ChaCha8Rng::seed_from_u64(seed));
                assert!(g.crossing_count() <= simplify(d).crossing_count(), "{name}/{seed}");
                assert_eq!(g.component_count(), d.component_count(), "{name}/{seed}");
                assert_eq!(knot_determinant(&g), knot_determinant(d), "{name}/{seed}");
            }
        }
    }
}
