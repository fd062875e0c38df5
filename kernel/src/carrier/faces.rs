//! Face tracing over a PD code.
//!
//! A directed side leaves slot `from` along its edge and arrives at
//! `to = partner(from)`. The next side of the same face leaves from the
//! slot counterclockwise of `to`. Walking this way keeps the face on the
//! right-hand side of every side, and every slot starts exactly one side.
//!
//! A connected diagram with `n` crossings has `n + 2` faces.

use super::diagram::{EdgeIndex, EdgeLabel, LinkDiagram, Slot};

/// One directed side of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Side {
    pub from: Slot,
    pub to: Slot,
    pub label: EdgeLabel,
}

impl Side {
    /// The side leaving `from`.
    #[must_use]
    pub fn leaving(diagram: &LinkDiagram, index: &EdgeIndex, from: Slot) -> Self {
        Self {
            from,
            to: index.partner(from),
            label: diagram.label_at(from),
        }
    }
}

/// Trace the face on the right of the side leaving `start`.
///
/// The first returned side leaves `start`; the rest follow in walking order.
#[must_use]
pub fn trace_face(diagram: &LinkDiagram, index: &EdgeIndex, start: Slot) -> Vec<Side> {
    let mut sides = Vec::new();
    let mut from = start;
    loop {
        let side = Side::leaving(diagram, index, from);
        sides.push(side);
        from = side.to.next_ccw();
        if from == start {
            return sides;
        }
    }
}

/// All faces, in order of their lowest starting slot.
#[must_use]
pub fn faces(diagram: &LinkDiagram) -> Vec<Vec<Side>> {
    let index = diagram.edge_index();
    let mut seen = vec![[false; 4]; diagram.crossing_count()];
    let mut out = Vec::new();
    for crossing in 0..diagram.crossing_count() {
        for slot_index in 0..4 {
            if seen[crossing][slot_index] {
                continue;
            }
            let face = trace_face(diagram, &index, Slot::new(crossing, slot_index));
            for side in &face {
                seen[side.from.crossing][side.from.index] = true;
            }
            out.push(face);
        }
    }
    out
}
