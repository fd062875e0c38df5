//! Oriented PD export.
//!
//! Each component is walked once and its edges are numbered consecutively
//! (components in order of their first slot, labels starting at 1). A
//! crossing whose under-strand is entered through slot 2 is rotated by two
//! positions, so that every exported tuple has the incoming under-strand
//! at slot 0. This is the form consumed by PD-based knot software.

use super::diagram::{Crossing, LinkDiagram, Slot};

/// Oriented, consecutively relabelled PD code.
///
/// Crossingless components do not appear; see [`LinkDiagram::free_loops`].
#[must_use]
pub fn oriented_pd(diagram: &LinkDiagram) -> Vec<Crossing> {
    let count = diagram.crossing_count();
    let index = diagram.edge_index();
    let mut labels = vec![[0u32; 4]; count];
    let mut rotate = vec![false; count];
    let mut seen = vec![[false; 4]; count];
    let mut next_label: u32 = 1;

    for crossing in 0..count {
        for slot_index in 0..4 {
            if seen[crossing][slot_index] {
                continue;
            }
            let entries = index.strand_from(Slot::new(crossing, slot_index));
            let len = u32::try_from(entries.len()).unwrap_or(u32::MAX);
            for (k, entry) in (0u32..).zip(&entries) {
                let exit = entry.opposite();
                seen[entry.crossing][entry.index] = true;
                seen[exit.crossing][exit.index] = true;
                labels[entry.crossing][entry.index] = next_label + k;
                labels[exit.crossing][exit.index] = next_label + (k + 1) % len;
                if entry.index == 2 {
                    rotate[entry.crossing] = true;
                }
            }
            next_label += len;
        }
    }

    labels
        .into_iter()
        .zip(rotate)
        .map(|(l, r)| if r { [l[2], l[3], l[0], l[1]] } else { l })
        .collect()
}
