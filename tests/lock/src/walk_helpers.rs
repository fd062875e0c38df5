//! Shared helpers for driving random trajectories through the kernel.
//!
//! Trajectories pick uniformly among legal actions with a seeded
//! `ChaCha8Rng`, so every caller sees the same sequence of states for a
//! given seed.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ribbon_harness::knot_table;
use ribbon_kernel::carrier::diagram::LinkDiagram;
use ribbon_kernel::operators::apply::{apply, MoveLimits};
use ribbon_kernel::operators::band::BandStateV1;
use ribbon_search::action_space::ActionSpaceV1;
use ribbon_search::env::NamedLinkV1;
use ribbon_search::mask::{legal_indices, validity_mask};

/// Named table link.
///
/// # Panics
///
/// Panics if the name is not in the built-in table.
#[must_use]
pub fn table_link(name: &str) -> NamedLinkV1 {
    let diagram = knot_table::lookup(name)
        .expect("table entry builds")
        .unwrap_or_else(|| panic!("no table entry {name}"));
    NamedLinkV1::new(name, diagram)
}

/// States visited by a uniform random walk from `diagram`, initial state
/// first. Stops after `steps` moves or when no move is legal.
///
/// # Panics
///
/// Panics if a masked action is rejected by `apply`.
#[must_use]
pub fn random_trajectory(
    diagram: &LinkDiagram,
    limits: MoveLimits,
    seed: u64,
    steps: usize,
) -> Vec<BandStateV1> {
    let space = ActionSpaceV1::new(limits.max_size);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = BandStateV1::new(diagram.clone());
    let mut out = vec![state.clone()];
    for _ in 0..steps {
        let legal = legal_indices(&validity_mask(&space, &state, limits));
        if legal.is_empty() {
            break;
        }
        let index = legal[rng.gen_range(0..legal.len())];
        let action = space.decode(index).expect("legal index decodes");
        state = apply(&state, action, limits)
            .unwrap_or_else(|e| panic!("masked action {action} rejected: {e}"));
        out.push(state.clone());
    }
    out
}

/// Connected pieces of the projection graph, free loops excluded.
#[must_use]
pub fn projection_pieces(diagram: &LinkDiagram) -> usize {
    let n = diagram.crossing_count();
    let mut parent: Vec<usize> = (0..n).collect();
    let mut first_seen: BTreeMap<u32, usize> = BTreeMap::new();
    for (c, crossing) in diagram.crossings().iter().enumerate() {
        for &label in crossing {
            if let Some(&other) = first_seen.get(&label) {
                let (a, b) = (root(&mut parent, c), root(&mut parent, other));
                parent[a] = b;
            } else {
                first_seen.insert(label, c);
            }
        }
    }
    (0..n).filter(|&c| root(&mut parent, c) == c).count()
}

fn root(parent: &mut [usize], mut x: usize) -> usize {
    while parent[x] != x {
        parent[x] = parent[parent[x]];
        x = parent[x];
    }
    x
}
