//! Knot determinant from the Fox coloring matrix.
//!
//! Arcs are the over-strand pieces of the diagram: labels at slots 1 and 3
//! of a crossing belong to the same arc. Each crossing contributes a row
//! with `+2` at its over arc and `-1` at each of its two under arcs. The
//! determinant is the absolute value of any first minor; the last row and
//! column are deleted.
//!
//! The determinant of a ribbon knot (indeed of any slice knot) is a
//! perfect square, which gives a cheap obstruction: a non-square
//! determinant proves the knot is not ribbon.

use std::collections::{BTreeMap, BTreeSet};

use crate::carrier::diagram::{EdgeLabel, LinkDiagram};

/// Determinant of a knot diagram.
///
/// Returns `None` for diagrams with more than one component, and when an
/// intermediate value overflows `i128`.
#[must_use]
pub fn knot_determinant(diagram: &LinkDiagram) -> Option<u64> {
    if diagram.component_count() != 1 {
        return None;
    }
    if diagram.is_crossingless() {
        return Some(1);
    }

    let arcs = arc_ids(diagram);
    let n = diagram.crossing_count();
    if arcs.values().collect::<BTreeSet<_>>().len() != n {
        return None;
    }

    let mut matrix = vec![vec![0i128; n]; n];
    for (row, x) in diagram.crossings().iter().enumerate() {
        let over = arcs.get(&x[1])?;
        matrix[row][*over] += 2;
        matrix[row][*arcs.get(&x[0])?] -= 1;
        matrix[row][*arcs.get(&x[2])?] -= 1;
    }

    matrix.pop();
    for row in &mut matrix {
        row.pop();
    }
    let det = bareiss(matrix)?;
    u64::try_from(det.unsigned_abs()).ok()
}

/// Whether `value` is a perfect square.
#[must_use]
pub fn is_perfect_square(value: u64) -> bool {
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let guess = (value as f64).sqrt() as u64;
    (guess.saturating_sub(1)..=guess + 1).any(|r| r.checked_mul(r) == Some(value))
}

/// Map every edge label to a dense arc id.
fn arc_ids(diagram: &LinkDiagram) -> BTreeMap<EdgeLabel, usize> {
    // Labels joined through an over-strand share an arc.
    let mut parent: BTreeMap<EdgeLabel, EdgeLabel> = BTreeMap::new();
    for label in diagram.crossings().iter().flatten() {
        parent.insert(*label, *label);
    }
    let root = |parent: &BTreeMap<EdgeLabel, EdgeLabel>, mut label: EdgeLabel| {
        while let Some(&up) = parent.get(&label) {
            if up == label {
                break;
            }
            label = up;
        }
        label
    };
    for x in diagram.crossings() {
        let (a, b) = (root(&parent, x[1]), root(&parent, x[3]));
        if a != b {
            parent.insert(a.max(b), a.min(b));
        }
    }

    let mut dense: BTreeMap<EdgeLabel, usize> = BTreeMap::new();
    let mut ids = BTreeMap::new();
    for &label in parent.keys() {
        let r = root(&parent, label);
        let next = dense.len();
        let id = *dense.entry(r).or_insert(next);
        ids.insert(label, id);
    }
    ids
}

/// Fraction-free Gaussian elimination.
fn bareiss(mut m: Vec<Vec<i128>>) -> Option<i128> {
    let n = m.len();
    if n == 0 {
        return Some(1);
    }
    let mut sign = 1i128;
    let mut prev = 1i128;
    for k in 0..n - 1 {
        if m[k][k] == 0 {
            let Some(pivot) = (k + 1..n).find(|&r| m[r][k] != 0) else {
                return Some(0);
            };
            m.swap(k, pivot);
            sign = -sign;
        }
        for i in k + 1..n {
            for j in k + 1..n {
                let lhs = m[i][j].checked_mul(m[k][k])?;
                let rhs = m[i][k].checked_mul(m[k][j])?;
                m[i][j] = lhs.checked_sub(rhs)? / prev;
            }
        }
        prev = m[k][k];
    }
    Some(sign * m[n - 1][n - 1])
}
