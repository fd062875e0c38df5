//! Determinant obstruction over the built-in table.
//!
//! Proves:
//! 1. Every table entry marked ribbon passes the obstruction
//! 2. Knots with non-square determinant are obstructed
//! 3. The verdict survives finger moves and twists of an unattached band

use ribbon_harness::knot_table::KNOT_TABLE;
use ribbon_kernel::operators::apply::MoveLimits;
use ribbon_search::oracle::{DeterminantObstruction, ObstructionVerdictV1, SliceObstruction};

use lock_tests::walk_helpers::{random_trajectory, table_link};

#[test]
fn ribbon_entries_pass() {
    for entry in KNOT_TABLE.iter().filter(|e| e.ribbon) {
        let d = entry.diagram.build().unwrap();
        assert!(
            DeterminantObstruction.check(&d).passed(),
            "{} is ribbon but obstructed",
            entry.name
        );
    }
}

#[test]
fn non_square_determinants_are_obstructed() {
    for (name, det) in [("3_1", 3), ("4_1", 5), ("5_1", 5)] {
        assert_eq!(
            DeterminantObstruction.check(&table_link(name).diagram),
            ObstructionVerdictV1::Obstructed { determinant: det },
            "{name}"
        );
    }
}

#[test]
fn verdict_is_stable_under_twists() {
    // Before the first attach the band is a finger of the knot itself.
    let limits = MoveLimits {
        max_size: 14,
        max_bands: 2,
    };
    for name in ["3_1", "6_1"] {
        let link = table_link(name);
        let expected = DeterminantObstruction.check(&link.diagram);
        for seed in [5, 6, 7] {
            for state in random_trajectory(&link.diagram, limits, seed, 12)
                .iter()
                .take_while(|s| s.bands_completed() == 0)
            {
                assert_eq!(DeterminantObstruction.check(state.diagram()), expected, "{name}");
            }
        }
    }
}
