//! Built-in named links.
//!
//! A small table of prime knots and links, given as PD codes or braid
//! words. Names follow the Rolfsen table (`3_1`, `6_1`, ...) with the
//! Dowker-Thistlethwaite style aliases (`K3a1`, `L2a1`, ...). Lookup is
//! case-insensitive.

use ribbon_kernel::carrier::braid::braid_closure;
use ribbon_kernel::carrier::diagram::{Crossing, DiagramError, LinkDiagram};
use ribbon_kernel::invariants::simplify::simplify;

/// How a table entry is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableDiagram {
    /// Crossingless unlink with this many components.
    Unlink(usize),
    Pd(&'static [Crossing]),
    /// Closed and simplified on lookup.
    Braid(&'static [i32]),
}

impl TableDiagram {
    /// Build the diagram.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError`] if the stored data is malformed.
    pub fn build(self) -> Result<LinkDiagram, DiagramError> {
        match self {
            Self::Unlink(n) => Ok(LinkDiagram::unlink(n)),
            Self::Pd(pd) => LinkDiagram::from_pd(pd.to_vec()),
            Self::Braid(word) => braid_closure(word).map(|d| simplify(&d)),
        }
    }
}

/// One row of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableEntry {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Whether the knot is known to be ribbon.
    pub ribbon: bool,
    pub diagram: TableDiagram,
}

const TREFOIL: &[Crossing] = &[[1, 4, 2, 5], [3, 6, 4, 1], [5, 2, 6, 3]];
const FIGURE_EIGHT: &[Crossing] = &[[4, 2, 5, 1], [8, 6, 1, 5], [6, 3, 7, 4], [2, 7, 3, 8]];
const STEVEDORE: &[Crossing] = &[
    [1, 4, 2, 5],
    [7, 10, 8, 11],
    [3, 9, 4, 8],
    [9, 3, 10, 2],
    [5, 12, 6, 1],
    [11, 6, 12, 7],
];
const HOPF: &[Crossing] = &[[4, 1, 3, 2], [2, 3, 1, 4]];

/// The built-in table, in display order.
pub const KNOT_TABLE: &[TableEntry] = &[
    TableEntry {
        name: "0_1",
        aliases: &["unknot", "K0a1"],
        ribbon: true,
        diagram: TableDiagram::Unlink(1),
    },
    TableEntry {
        name: "3_1",
        aliases: &["K3a1", "trefoil"],
        ribbon: false,
        diagram: TableDiagram::Pd(TREFOIL),
    },
    TableEntry {
        name: "4_1",
        aliases: &["K4a1", "figure-eight"],
        ribbon: false,
        diagram: TableDiagram::Pd(FIGURE_EIGHT),
    },
    TableEntry {
        name: "5_1",
        aliases: &["K5a2"],
        ribbon: false,
        diagram: TableDiagram::Braid(&[1, 1, 1, 1, 1]),
    },
    TableEntry {
        name: "6_1",
        aliases: &["K6a3", "stevedore"],
        ribbon: true,
        diagram: TableDiagram::Pd(STEVEDORE),
    },
    TableEntry {
        name: "square",
        aliases: &["3_1#-3_1"],
        ribbon: true,
        diagram: TableDiagram::Braid(&[1, 1, 1, -2, -2, -2]),
    },
    TableEntry {
        name: "granny",
        aliases: &["3_1#3_1"],
        ribbon: false,
        diagram: TableDiagram::Braid(&[1, 1, 1, 2, 2, 2]),
    },
    TableEntry {
        name: "hopf",
        aliases: &["L2a1"],
        ribbon: false,
        diagram: TableDiagram::Pd(HOPF),
    },
];

/// Entry whose name or alias matches `name`, ignoring ASCII case.
#[must_use]
pub fn find(name: &str) -> Option<&'static TableEntry> {
    let name = name.trim();
    KNOT_TABLE.iter().find(|entry| {
        entry.name.eq_ignore_ascii_case(name)
            || entry.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    })
}

/// Diagram for `name`, or `None` if the table has no such link.
///
/// # Errors
///
/// Returns [`DiagramError`] if the stored data is malformed.
pub fn lookup(name: &str) -> Result<Option<LinkDiagram>, DiagramError> {
    find(name).map(|entry| entry.diagram.build()).transpose()
}

/// Primary names, in table order.
pub fn names() -> impl Iterator<Item = &'static str> {
    KNOT_TABLE.iter().map(|entry| entry.name)
}
