//! Action-space layout lock tests.
//!
//! The flat layout is part of the external surface (mask length, weight
//! vectors, recorded action indices), so it is pinned here.

use ribbon_kernel::operators::action::{Action, Handedness, MoveKind};
use ribbon_search::action_space::ActionSpaceV1;
use ribbon_search::sampler::DEFAULT_WEIGHTS;

#[test]
fn length_is_four_p_plus_two_for_every_size() {
    for p in 0..40 {
        assert_eq!(ActionSpaceV1::new(p).len(), 4 * p + 2);
    }
}

#[test]
fn decode_is_a_bijection() {
    for p in [1, 3, 7, 20] {
        let space = ActionSpaceV1::new(p);
        let actions: Vec<Action> = space.actions().collect();
        assert_eq!(actions.len(), space.len());
        let mut unique = actions.clone();
        unique.sort_by_key(|a| (a.kind.category(), a.position));
        unique.dedup();
        assert_eq!(unique.len(), space.len(), "duplicate actions for P={p}");
        for (i, action) in actions.iter().enumerate() {
            assert_eq!(space.encode(*action).unwrap(), i);
        }
    }
}

#[test]
fn per_kind_counts() {
    let space = ActionSpaceV1::new(6);
    let count = |kind| space.actions().filter(|a| a.kind == kind).count();
    assert_eq!(count(MoveKind::Start), 6);
    assert_eq!(count(MoveKind::Attach), 6);
    assert_eq!(count(MoveKind::Over), 6);
    assert_eq!(count(MoveKind::Under), 6);
    assert_eq!(count(MoveKind::Twist), 2);
}

#[test]
fn pinned_indices() {
    let space = ActionSpaceV1::new(5);
    assert_eq!(space.encode(Action::start(4)).unwrap(), 4);
    assert_eq!(space.encode(Action::under(0)).unwrap(), 5);
    assert_eq!(space.encode(Action::attach(0)).unwrap(), 6);
    assert_eq!(space.encode(Action::over(0)).unwrap(), 7);
    assert_eq!(space.encode(Action::over(4)).unwrap(), 19);
    assert_eq!(space.encode(Action::twist(Handedness::Left)).unwrap(), 20);
    assert_eq!(space.encode(Action::twist(Handedness::Right)).unwrap(), 21);
}

#[test]
fn weights_align_with_layout() {
    let space = ActionSpaceV1::new(4);
    let weights = space.broadcast_weights(&DEFAULT_WEIGHTS);
    assert_eq!(weights.len(), space.len());
    for (action, weight) in space.actions().zip(&weights) {
        assert!((weight - DEFAULT_WEIGHTS[action.kind.category()]).abs() < f64::EPSILON);
    }
}
