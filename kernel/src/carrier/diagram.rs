//! `LinkDiagram`: a planar-diagram (PD) code plus crossingless components.
//!
//! # Conventions
//!
//! | Slot | Strand | Notes                                  |
//! |------|--------|----------------------------------------|
//! | 0    | under  | paired with slot 2                     |
//! | 1    | over   | paired with slot 3                     |
//! | 2    | under  |                                        |
//! | 3    | over   |                                        |
//!
//! Labels around a crossing are listed counterclockwise. Every edge label
//! occurs in exactly two slots. Strand orientation is not stored; the
//! oriented form is produced on export by [`super::oriented::oriented_pd`].
//!
//! Components without any crossing cannot be written as a PD tuple, so
//! they are counted in `free_loops` instead.

use std::collections::{BTreeMap, HashMap};

/// Edge label as it appears in a PD tuple.
pub type EdgeLabel = u32;

/// Labels of one crossing, counterclockwise, under-strand at slots 0 and 2.
pub type Crossing = [EdgeLabel; 4];

/// One position in the crossing table: `(crossing, index)` with `index < 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    pub crossing: usize,
    pub index: usize,
}

impl Slot {
    #[must_use]
    pub const fn new(crossing: usize, index: usize) -> Self {
        Self { crossing, index }
    }

    /// The slot across the crossing on the same strand.
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self {
            crossing: self.crossing,
            index: (self.index + 2) % 4,
        }
    }

    /// Next slot counterclockwise around the same crossing.
    #[must_use]
    pub const fn next_ccw(self) -> Self {
        Self {
            crossing: self.crossing,
            index: (self.index + 1) % 4,
        }
    }

    /// Whether this slot belongs to the under-strand.
    #[must_use]
    pub const fn is_under(self) -> bool {
        self.index % 2 == 0
    }
}

/// Error type for diagram construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramError {
    /// A label does not occur exactly twice.
    LabelMultiplicity { label: EdgeLabel, count: usize },
    /// A braid word contains the generator 0.
    InvalidBraidGenerator { position: usize },
    /// A braid generator addresses more strands than the word can touch.
    BraidGeneratorTooLarge {
        position: usize,
        generator: i32,
        limit: usize,
    },
}

impl std::fmt::Display for DiagramError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LabelMultiplicity { label, count } => {
                write!(f, "edge label {label} occurs {count} times (expected 2)")
            }
            Self::InvalidBraidGenerator { position } => {
                write!(f, "braid generator at position {position} is 0")
            }
            Self::BraidGeneratorTooLarge {
                position,
                generator,
                limit,
            } => write!(
                f,
                "braid generator {generator} at position {position} exceeds {limit}"
            ),
        }
    }
}

impl std::error::Error for DiagramError {}

/// A link diagram: crossing table plus crossingless components.
///
/// Crossings are indexed by position in the table. Operators append new
/// crossings at the end, so indices of existing crossings are stable
/// across band moves (simplification renumbers).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkDiagram {
    crossings: Vec<Crossing>,
    free_loops: usize,
}

impl LinkDiagram {
    /// Build from a PD code.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::LabelMultiplicity`] for the smallest label
    /// that does not occur exactly twice.
    pub fn from_pd(crossings: Vec<Crossing>) -> Result<Self, DiagramError> {
        let diagram = Self {
            crossings,
            free_loops: 0,
        };
        diagram.validate()?;
        Ok(diagram)
    }

    /// The trivial link with `components` crossingless components.
    #[must_use]
    pub fn unlink(components: usize) -> Self {
        Self {
            crossings: Vec::new(),
            free_loops: components,
        }
    }

    /// The same diagram with `count` extra crossingless components.
    #[must_use]
    pub fn with_free_loops(mut self, count: usize) -> Self {
        self.free_loops += count;
        self
    }

    /// Unchecked constructor for surgery code that preserves label pairing.
    pub(crate) fn from_parts(crossings: Vec<Crossing>, free_loops: usize) -> Self {
        Self {
            crossings,
            free_loops,
        }
    }

    /// Check that every label occurs exactly twice.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::LabelMultiplicity`] on the first bad label
    /// in ascending order.
    pub fn validate(&self) -> Result<(), DiagramError> {
        let mut counts: BTreeMap<EdgeLabel, usize> = BTreeMap::new();
        for label in self.crossings.iter().flatten() {
            *counts.entry(*label).or_default() += 1;
        }
        match counts.into_iter().find(|&(_, count)| count != 2) {
            Some((label, count)) => Err(DiagramError::LabelMultiplicity { label, count }),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn crossings(&self) -> &[Crossing] {
        &self.crossings
    }

    #[must_use]
    pub fn crossing_count(&self) -> usize {
        self.crossings.len()
    }

    /// Number of crossingless components.
    #[must_use]
    pub fn free_loops(&self) -> usize {
        self.free_loops
    }

    #[must_use]
    pub fn is_crossingless(&self) -> bool {
        self.crossings.is_empty()
    }

    /// Label stored at `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot.crossing` is out of range. Slots are only ever
    /// produced from this diagram's own table.
    #[must_use]
    pub fn label_at(&self, slot: Slot) -> EdgeLabel {
        self.crossings[slot.crossing][slot.index]
    }

    pub(crate) fn set_label(&mut self, slot: Slot, label: EdgeLabel) {
        self.crossings[slot.crossing][slot.index] = label;
    }

    /// Append a crossing and return its index.
    pub(crate) fn push_crossing(&mut self, labels: Crossing) -> usize {
        self.crossings.push(labels);
        self.crossings.len() - 1
    }

    /// Distinct edge labels in ascending order.
    #[must_use]
    pub fn edges(&self) -> Vec<EdgeLabel> {
        let mut labels: Vec<EdgeLabel> = self.crossings.iter().flatten().copied().collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }

    /// Number of edges (two per crossing).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.crossings.len() * 2
    }

    /// A label not used by any crossing.
    #[must_use]
    pub fn next_label(&self) -> EdgeLabel {
        self.crossings
            .iter()
            .flatten()
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Build the slot pairing for this diagram.
    #[must_use]
    pub fn edge_index(&self) -> EdgeIndex {
        EdgeIndex::build(self)
    }

    /// Number of link components, including crossingless ones.
    #[must_use]
    pub fn component_count(&self) -> usize {
        let index = self.edge_index();
        let mut seen = vec![[false; 4]; self.crossings.len()];
        let mut count = self.free_loops;
        for crossing in 0..self.crossings.len() {
            for slot_index in 0..4 {
                if seen[crossing][slot_index] {
                    continue;
                }
                count += 1;
                for entry in index.strand_from(Slot::new(crossing, slot_index)) {
                    let exit = entry.opposite();
                    seen[entry.crossing][entry.index] = true;
                    seen[exit.crossing][exit.index] = true;
                }
            }
        }
        count
    }
}

/// Slot pairing: for each slot, the other slot carrying the same label.
#[derive(Debug, Clone)]
pub struct EdgeIndex {
    partner: Vec<[Slot; 4]>,
    occurrences: HashMap<EdgeLabel, [Slot; 2]>,
}

impl EdgeIndex {
    fn build(diagram: &LinkDiagram) -> Self {
        let count = diagram.crossings.len();
        let mut partner: Vec<[Slot; 4]> = (0..count)
            .map(|c| [0, 1, 2, 3].map(|i| Slot::new(c, i)))
            .collect();
        let mut first: HashMap<EdgeLabel, Slot> = HashMap::with_capacity(count * 2);
        let mut occurrences = HashMap::with_capacity(count * 2);
        for (c, labels) in diagram.crossings.iter().enumerate() {
            for (i, label) in labels.iter().enumerate() {
                let here = Slot::new(c, i);
                if let Some(there) = first.remove(label) {
                    partner[c][i] = there;
                    partner[there.crossing][there.index] = here;
                    occurrences.insert(*label, [there, here]);
                } else {
                    first.insert(*label, here);
                }
            }
        }
        Self {
            partner,
            occurrences,
        }
    }

    /// The other end of the edge leaving `slot`.
    #[must_use]
    pub fn partner(&self, slot: Slot) -> Slot {
        self.partner[slot.crossing][slot.index]
    }

    /// Both slots of `label`, in table scan order.
    #[must_use]
    pub fn occurrences(&self, label: EdgeLabel) -> Option<[Slot; 2]> {
        self.occurrences.get(&label).copied()
    }

    /// Entry slots visited when walking a strand starting at `start`.
    ///
    /// Each step enters a crossing, leaves through the opposite slot, and
    /// follows the edge to the next crossing. Stops on returning to `start`.
    #[must_use]
    pub fn strand_from(&self, start: Slot) -> Vec<Slot> {
        let mut entries = Vec::new();
        let mut entry = start;
        loop {
            entries.push(entry);
            entry = self.partner(entry.opposite());
            if entry == start {
                return entries;
            }
        }
    }
}
