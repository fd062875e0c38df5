//! PD surgery for the band moves.
//!
//! Each function rewrites slots of the diagram in place and returns the new
//! band tip. Callers are responsible for legality (see
//! [`super::apply::MoveContext::check`]); given a legal target these keep
//! the diagram planar and every label paired.
//!
//! New crossings are appended, so slots of existing crossings stay valid.

use crate::carrier::diagram::{LinkDiagram, Slot};
use crate::carrier::faces::Side;
use crate::operators::action::Handedness;
use crate::operators::band::{BandTip, CrossKind};

/// Push the tip `P → Q` across the side `R → S` of its front face.
///
/// Two crossings `X1`, `X2` are added where the finger's two flanks meet
/// the crossed edge. The finger end becomes the new tip, facing the face
/// beyond the crossed edge.
///
/// | Labels | Slots                                |
/// |--------|--------------------------------------|
/// | `t1`   | `P`, left flank                      |
/// | `t4`   | `Q`, right flank                     |
/// | `f1`   | `R`, crossed edge near `X2`          |
/// | `f2`   | crossed edge between `X1` and `X2`   |
/// | `f3`   | `S`, crossed edge near `X1`          |
/// | `tip`  | the new tip between `X1` and `X2`    |
pub fn cross_edge(
    diagram: &mut LinkDiagram,
    tip: BandTip,
    target: Side,
    kind: CrossKind,
) -> BandTip {
    let base = diagram.next_label();
    let (t1, new_tip, t4, f1, f2, f3) = (base, base + 1, base + 2, base + 3, base + 4, base + 5);

    diagram.set_label(tip.from, t1);
    diagram.set_label(tip.to, t4);
    diagram.set_label(target.from, f1);
    diagram.set_label(target.to, f3);

    let (x1, x2, tip_slot) = match kind {
        CrossKind::Over => ([f2, t1, f3, new_tip], [f1, t4, f2, new_tip], 3),
        CrossKind::Under => ([t1, f3, new_tip, f2], [t4, f2, new_tip, f1], 2),
    };
    let c1 = diagram.push_crossing(x1);
    let c2 = diagram.push_crossing(x2);
    BandTip {
        from: Slot::new(c1, tip_slot),
        to: Slot::new(c2, tip_slot),
    }
}

/// Put a kink into the tip edge `P → Q`. The front face is unchanged.
pub fn twist_tip(diagram: &mut LinkDiagram, tip: BandTip, handedness: Handedness) -> BandTip {
    let base = diagram.next_label();
    let (a, kink, b) = (base, base + 1, base + 2);

    diagram.set_label(tip.from, a);
    diagram.set_label(tip.to, b);

    let (labels, from, to) = match handedness {
        Handedness::Left => ([a, kink, kink, b], 1, 2),
        Handedness::Right => ([b, a, kink, kink], 2, 3),
    };
    let c = diagram.push_crossing(labels);
    BandTip {
        from: Slot::new(c, from),
        to: Slot::new(c, to),
    }
}

/// Cut the tip `P → Q` and the side `R → S` and reconnect them across the
/// front face as `P – S` and `Q – R`.
///
/// The returned tip is the new edge `Q → R`, which faces the merged face
/// and anchors the next band.
pub fn saddle(diagram: &mut LinkDiagram, tip: BandTip, target: Side) -> BandTip {
    let base = diagram.next_label();
    let (x, y) = (base, base + 1);
    diagram.set_label(tip.from, x);
    diagram.set_label(target.to, x);
    diagram.set_label(tip.to, y);
    diagram.set_label(target.from, y);
    BandTip {
        from: tip.to,
        to: target.from,
    }
}
