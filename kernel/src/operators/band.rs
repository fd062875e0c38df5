//! `BandStateV1`: the live diagram together with the band under construction.
//!
//! A band is grown as a finger pushed out of its anchor edge. The finger's
//! leading edge is the *tip*, a directed side of the diagram; the face on
//! the tip's right is the *front face*, the only face the band can reach
//! next. An attach closes the band with a saddle inside the front face.

use std::fmt;

use crate::carrier::diagram::{EdgeLabel, LinkDiagram, Slot};
use crate::operators::action::Handedness;

/// Directed side at the end of the band. The front face lies to its right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BandTip {
    pub from: Slot,
    pub to: Slot,
}

/// Whether the band finger crosses over or under the target edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrossKind {
    Over,
    Under,
}

/// Position in the band-building lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandPhase {
    /// No band anchored yet; only start moves are possible.
    AwaitingStart,
    /// A band tip exists.
    BuildingBands,
}

/// One accepted move, recorded for reporting. Never read by move logic.
///
/// Edge labels are those of the diagram before the move.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BandEvent {
    Started { edge: EdgeLabel },
    Crossed { edge: EdgeLabel, kind: CrossKind },
    Twisted { handedness: Handedness },
    Attached { edge: EdgeLabel, band: usize },
}

impl fmt::Display for BandEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { edge } => write!(f, "start band at edge {edge}"),
            Self::Crossed {
                edge,
                kind: CrossKind::Over,
            } => write!(f, "cross over edge {edge}"),
            Self::Crossed {
                edge,
                kind: CrossKind::Under,
            } => write!(f, "cross under edge {edge}"),
            Self::Twisted { handedness } => write!(f, "{handedness} twist"),
            Self::Attached { edge, band } => write!(f, "attach band {band} at edge {edge}"),
        }
    }
}

/// Diagram plus band bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandStateV1 {
    pub(crate) diagram: LinkDiagram,
    pub(crate) tip: Option<BandTip>,
    pub(crate) bands_completed: usize,
    pub(crate) twists_on_band: usize,
    pub(crate) history: Vec<BandEvent>,
    initial_components: usize,
}

/// Saved copy of a [`BandStateV1`], restored with [`BandStateV1::restore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandSnapshotV1(BandStateV1);

impl BandStateV1 {
    /// Fresh state over `diagram`, before any band.
    #[must_use]
    pub fn new(diagram: LinkDiagram) -> Self {
        let initial_components = diagram.component_count();
        Self {
            diagram,
            tip: None,
            bands_completed: 0,
            twists_on_band: 0,
            history: Vec::new(),
            initial_components,
        }
    }

    #[must_use]
    pub fn diagram(&self) -> &LinkDiagram {
        &self.diagram
    }

    #[must_use]
    pub fn tip(&self) -> Option<BandTip> {
        self.tip
    }

    #[must_use]
    pub fn phase(&self) -> BandPhase {
        if self.tip.is_some() {
            BandPhase::BuildingBands
        } else {
            BandPhase::AwaitingStart
        }
    }

    #[must_use]
    pub fn crossing_count(&self) -> usize {
        self.diagram.crossing_count()
    }

    #[must_use]
    pub fn bands_completed(&self) -> usize {
        self.bands_completed
    }

    #[must_use]
    pub fn twists_on_band(&self) -> usize {
        self.twists_on_band
    }

    #[must_use]
    pub fn initial_components(&self) -> usize {
        self.initial_components
    }

    /// Components expected once the link is unknotted: each completed band
    /// is a saddle that splits one component off.
    #[must_use]
    pub fn target_components(&self) -> usize {
        self.initial_components + self.bands_completed
    }

    #[must_use]
    pub fn history(&self) -> &[BandEvent] {
        &self.history
    }

    /// Human-readable description of every accepted move, in order.
    #[must_use]
    pub fn band_string(&self) -> String {
        self.history
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    #[must_use]
    pub fn snapshot(&self) -> BandSnapshotV1 {
        BandSnapshotV1(self.clone())
    }

    pub fn restore(&mut self, snapshot: BandSnapshotV1) {
        *self = snapshot.0;
    }
}
