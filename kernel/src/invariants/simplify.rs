//! Reidemeister reduction.
//!
//! [`simplify`] repeatedly removes a monogon face (R1) or a bigon face whose
//! two crossings let one strand lie entirely over the other (R2), until
//! neither exists. This greedy pass gets stuck on diagrams that only reduce
//! after a strand is slid across a crossing.
//!
//! [`simplify_level`] interleaves random R3 slides across triangle faces
//! with the greedy pass. [`simplify_global`] additionally backtracks: it
//! adds a few random bigons (inverse R2), levels again, and keeps the
//! result when it has fewer crossings than the best so far.
//!
//! None of these is a canonical form: a diagram of the unknot can survive
//! with crossings. Callers treat "no crossings left" as a certificate and
//! anything else as "not recognised".
//!
//! Removal is a splice: at each removed crossing the two halves of each
//! strand are joined. Joined labels are merged with a union-find. A merged
//! class that still touches a remaining crossing is relabelled to one
//! representative; a class with no remaining occurrence closed up into a
//! crossingless component.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::carrier::diagram::{Crossing, EdgeLabel, LinkDiagram};
use crate::carrier::faces::{faces, Side};

/// R3 attempts per level pass: a base plus this many per crossing.
const LEVEL_ATTEMPTS_BASE: usize = 20;
const LEVEL_ATTEMPTS_PER_CROSSING: usize = 10;

/// Backtracking rounds per global pass: a base plus this many per crossing.
const GLOBAL_ROUNDS_BASE: usize = 10;
const GLOBAL_ROUNDS_PER_CROSSING: usize = 4;

/// Most bigons added in one backtracking round.
const MAX_BACKTRACK_MOVES: usize = 3;

/// Counts of moves performed by [`simplify_with_stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimplifyStats {
    pub reidemeister_one: usize,
    pub reidemeister_two: usize,
}

/// Reduce a diagram with R1 and R2 moves.
#[must_use]
pub fn simplify(diagram: &LinkDiagram) -> LinkDiagram {
    simplify_with_stats(diagram).0
}

/// [`simplify`], also reporting how many moves of each kind were applied.
#[must_use]
pub fn simplify_with_stats(diagram: &LinkDiagram) -> (LinkDiagram, SimplifyStats) {
    let mut current = diagram.clone();
    let mut stats = SimplifyStats::default();
    loop {
        if let Some(crossing) = find_monogon(&current) {
            current = splice_out(&current, &[crossing]);
            stats.reidemeister_one += 1;
        } else if let Some((a, b)) = find_bigon(&current) {
            current = splice_out(&current, &[a, b]);
            stats.reidemeister_two += 1;
        } else {
            return (current, stats);
        }
    }
}

/// Greedy R1/R2 reduction interleaved with random R3 slides.
///
/// After each slide the greedy pass runs again. Stops once the diagram is
/// crossingless, no triangle admits a slide, or the attempt budget (which
/// grows with the crossing count) runs out. Returns the first diagram with
/// the fewest crossings seen, so a diagram no slide improves comes back as
/// [`simplify`] left it.
#[must_use]
pub fn simplify_level<R: Rng + ?Sized>(diagram: &LinkDiagram, rng: &mut R) -> LinkDiagram {
    let mut best = simplify(diagram);
    let mut current = best.clone();
    let attempts = LEVEL_ATTEMPTS_BASE + LEVEL_ATTEMPTS_PER_CROSSING * best.crossing_count();
    for _ in 0..attempts {
        if current.is_crossingless() {
            break;
        }
        let triangles = slidable_triangles(&current);
        let Some(triangle) = triangles.choose(rng) else {
            break;
        };
        current = simplify(&slide_triangle(&current, triangle));
        if current.crossing_count() < best.crossing_count() {
            best = current.clone();
        }
    }
    best
}

/// [`simplify_level`] with random backtracking.
///
/// Each round adds up to three bigons to the best diagram found so far and
/// levels the result, keeping it only when it has fewer crossings.
#[must_use]
pub fn simplify_global<R: Rng + ?Sized>(diagram: &LinkDiagram, rng: &mut R) -> LinkDiagram {
    let mut best = simplify_level(diagram, rng);
    let rounds = GLOBAL_ROUNDS_BASE + GLOBAL_ROUNDS_PER_CROSSING * best.crossing_count();
    for _ in 0..rounds {
        if best.is_crossingless() {
            break;
        }
        let moves = rng.gen_range(1..=MAX_BACKTRACK_MOVES);
        let candidate = simplify_level(&backtrack(&best, rng, moves), rng);
        if candidate.crossing_count() < best.crossing_count() {
            best = candidate;
        }
    }
    best
}

/// First crossing carrying a loop edge between neighbouring slots.
fn find_monogon(diagram: &LinkDiagram) -> Option<usize> {
    diagram
        .crossings()
        .iter()
        .position(|x| (0..4).any(|i| x[i] == x[(i + 1) % 4]))
}

/// First bigon face joining two distinct crossings where the strand along
/// one side has the same role (over or under) at both ends.
fn find_bigon(diagram: &LinkDiagram) -> Option<(usize, usize)> {
    faces(diagram).into_iter().find_map(|face| {
        let [side, _] = face.as_slice() else {
            return None;
        };
        let (a, b) = (side.from.crossing, side.to.crossing);
        (a != b && side.from.is_under() == side.to.is_under()).then_some((a, b))
    })
}

/// Triangle faces on three distinct crossings where the strand along some
/// side passes over (or under) both of the other strands.
fn slidable_triangles(diagram: &LinkDiagram) -> Vec<[Side; 3]> {
    faces(diagram)
        .into_iter()
        .filter_map(|face| {
            let sides: [Side; 3] = face.try_into().ok()?;
            let crossings: BTreeSet<usize> = sides.iter().map(|s| s.from.crossing).collect();
            let labels: BTreeSet<EdgeLabel> = sides.iter().map(|s| s.label).collect();
            let layered = sides.iter().any(|s| s.from.is_under() == s.to.is_under());
            (crossings.len() == 3 && labels.len() == 3 && layered).then_some(sides)
        })
        .collect()
}

/// R3: slide one strand of a triangle across the crossing of the other two.
///
/// Every crossing keeps its slots and roles. Along each side `near → far`,
/// the inner slots take the labels that used to leave the triangle at the
/// other end, and the outer slots share a fresh label for the new side.
fn slide_triangle(diagram: &LinkDiagram, triangle: &[Side; 3]) -> LinkDiagram {
    let mut next = diagram.clone();
    for (side, fresh) in triangle.iter().zip(diagram.next_label()..) {
        let (near, far) = (side.from, side.to);
        next.set_label(near, diagram.label_at(far.opposite()));
        next.set_label(far, diagram.label_at(near.opposite()));
        next.set_label(near.opposite(), fresh);
        next.set_label(far.opposite(), fresh);
    }
    next
}

/// Add `moves` random bigons, each by pushing one side of a face across
/// another side of the same face.
fn backtrack<R: Rng + ?Sized>(diagram: &LinkDiagram, rng: &mut R, moves: usize) -> LinkDiagram {
    let mut current = diagram.clone();
    for _ in 0..moves {
        let faces: Vec<Vec<Side>> = faces(&current)
            .into_iter()
            .filter(|face| face.len() >= 2)
            .collect();
        let Some(face) = faces.choose(rng) else {
            break;
        };
        let i = rng.gen_range(0..face.len());
        let mut j = rng.gen_range(0..face.len() - 1);
        if j >= i {
            j += 1;
        }
        let (pushed, target) = (face[i], face[j]);
        if pushed.label == target.label {
            continue;
        }
        push_across(&mut current, pushed, target, rng.gen_bool(0.5));
    }
    current
}

/// Inverse R2: push a finger of `pushed` across `target`, which bounds the
/// same face, passing over it when `over` is set.
fn push_across(diagram: &mut LinkDiagram, pushed: Side, target: Side, over: bool) {
    let base = diagram.next_label();
    let (left, tip, right, before, mid, after) =
        (base, base + 1, base + 2, base + 3, base + 4, base + 5);
    diagram.set_label(pushed.from, left);
    diagram.set_label(pushed.to, right);
    diagram.set_label(target.from, before);
    diagram.set_label(target.to, after);
    let (first, second) = if over {
        ([mid, left, after, tip], [before, right, mid, tip])
    } else {
        ([left, after, tip, mid], [right, mid, tip, before])
    };
    diagram.push_crossing(first);
    diagram.push_crossing(second);
}

/// Remove `removed` crossings, joining the strands that passed through them.
fn splice_out(diagram: &LinkDiagram, removed: &[usize]) -> LinkDiagram {
    let mut classes = LabelUnion::default();
    for &c in removed {
        let x = diagram.crossings()[c];
        classes.union(x[0], x[2]);
        classes.union(x[1], x[3]);
    }

    let mut kept: Vec<Crossing> = diagram
        .crossings()
        .iter()
        .enumerate()
        .filter(|(c, _)| !removed.contains(c))
        .map(|(_, x)| *x)
        .collect();

    let mut representative: HashMap<EdgeLabel, EdgeLabel> = HashMap::new();
    for label in kept.iter().flatten() {
        if classes.contains(*label) {
            let root = classes.find(*label);
            representative.entry(root).or_insert(*label);
        }
    }

    let roots = classes.roots();
    let closed = roots
        .iter()
        .filter(|root| !representative.contains_key(root))
        .count();

    for label in kept.iter_mut().flatten() {
        if classes.contains(*label) {
            let root = classes.find(*label);
            if let Some(&rep) = representative.get(&root) {
                *label = rep;
            }
        }
    }

    LinkDiagram::from_parts(kept, diagram.free_loops() + closed)
}

/// Union-find keyed by edge label.
#[derive(Debug, Default)]
struct LabelUnion {
    parent: BTreeMap<EdgeLabel, EdgeLabel>,
}

impl LabelUnion {
    fn contains(&self, label: EdgeLabel) -> bool {
        self.parent.contains_key(&label)
    }

    fn find(&mut self, label: EdgeLabel) -> EdgeLabel {
        let mut node = *self.parent.entry(label).or_insert(label);
        let mut current = label;
        while node != current {
            let grand = self.parent.get(&node).copied().unwrap_or(node);
            self.parent.insert(current, grand);
            current = node;
            node = grand;
        }
        current
    }

    fn union(&mut self, a: EdgeLabel, b: EdgeLabel) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent.insert(ra.max(rb), ra.min(rb));
        }
    }

    fn roots(&mut self) -> BTreeSet<EdgeLabel> {
        let labels: Vec<EdgeLabel> = self.parent.keys().copied().collect();
        labels.into_iter().map(|l| self.find(l)).collect()
    }
}
