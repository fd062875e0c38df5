//! Braid closure: build a PD code from a braid word.
//!
//! Generator `i` (1-based) crosses strand positions `i` and `i + 1`; the
//! sign selects which strand passes under. Strands run upwards. At each
//! crossing the four slots are, counterclockwise from bottom-left:
//! `SW`, `SE`, `NE`, `NW`.
//!
//! | Sign | Under-strand | Tuple                  |
//! |------|--------------|------------------------|
//! | `+`  | `SW` → `NE`  | `[SW, SE, NE, NW]`     |
//! | `-`  | `SE` → `NW`  | `[SE, NE, NW, SW]`     |
//!
//! The closure joins the top of each position to its bottom. A position
//! never touched by a generator closes into a crossingless component.
//!
//! A word of length `n` can touch at most `n + 1` positions, so larger
//! generators are rejected rather than widening the braid.

use std::collections::HashMap;

use super::diagram::{Crossing, DiagramError, EdgeLabel, LinkDiagram};

/// Close a braid word into a link diagram.
///
/// # Errors
///
/// - [`DiagramError::InvalidBraidGenerator`] if any generator is 0.
/// - [`DiagramError::BraidGeneratorTooLarge`] if a generator's magnitude
///   exceeds the word length plus one.
pub fn braid_closure(word: &[i32]) -> Result<LinkDiagram, DiagramError> {
    if let Some(position) = word.iter().position(|&g| g == 0) {
        return Err(DiagramError::InvalidBraidGenerator { position });
    }
    let limit = word.len() + 1;
    if let Some(position) = word
        .iter()
        .position(|g| g.unsigned_abs() as usize > limit)
    {
        return Err(DiagramError::BraidGeneratorTooLarge {
            position,
            generator: word[position],
            limit,
        });
    }
    let width = word
        .iter()
        .map(|g| g.unsigned_abs() as usize)
        .max()
        .map_or(1, |max| max + 1);

    let bottom: Vec<EdgeLabel> = (1..).take(width).collect();
    let mut current = bottom.clone();
    let mut touched = vec![false; width];
    let mut next = EdgeLabel::try_from(width).unwrap_or(EdgeLabel::MAX - 1) + 1;
    let mut crossings: Vec<Crossing> = Vec::with_capacity(word.len());

    for &generator in word {
        let left = generator.unsigned_abs() as usize - 1;
        let right = left + 1;
        let (sw, se) = (current[left], current[right]);
        let (ne, nw) = (next, next + 1);
        next += 2;
        crossings.push(if generator > 0 {
            [sw, se, ne, nw]
        } else {
            [se, ne, nw, sw]
        });
        current[left] = nw;
        current[right] = ne;
        touched[left] = true;
        touched[right] = true;
    }

    let closing: HashMap<EdgeLabel, EdgeLabel> = (0..width)
        .filter(|&k| touched[k])
        .map(|k| (current[k], bottom[k]))
        .collect();
    for label in crossings.iter_mut().flatten() {
        if let Some(&to) = closing.get(label) {
            *label = to;
        }
    }
    let free_loops = touched.iter().filter(|&&t| !t).count();
    Ok(LinkDiagram::from_pd(crossings)?.with_free_loops(free_loops))
}
