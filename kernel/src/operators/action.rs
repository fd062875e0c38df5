//! Decoded actions: a move kind plus a position.

use std::fmt;

/// The closed set of band moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MoveKind {
    /// Anchor the first band on an edge.
    Start,
    /// Close the current band with a saddle on a front-face edge.
    Attach,
    /// Push the band tip over a front-face edge.
    Over,
    /// Push the band tip under a front-face edge.
    Under,
    /// Add a kink to the band.
    Twist,
}

impl MoveKind {
    /// All kinds in weight-vector order: `[start, attach, over, under, twist]`.
    pub const ALL: [Self; 5] = [
        Self::Start,
        Self::Attach,
        Self::Over,
        Self::Under,
        Self::Twist,
    ];

    /// Index of this kind in a 5-element weight vector.
    #[must_use]
    pub const fn category(self) -> usize {
        match self {
            Self::Start => 0,
            Self::Attach => 1,
            Self::Over => 2,
            Self::Under => 3,
            Self::Twist => 4,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Attach => "attach",
            Self::Over => "over",
            Self::Under => "under",
            Self::Twist => "twist",
        }
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction of a band kink. Encoded as twist position 0 (left) or 1 (right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    #[must_use]
    pub const fn from_position(position: usize) -> Option<Self> {
        match position {
            0 => Some(Self::Left),
            1 => Some(Self::Right),
            _ => None,
        }
    }

    #[must_use]
    pub const fn position(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// A decoded action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Action {
    pub kind: MoveKind,
    pub position: usize,
}

impl Action {
    #[must_use]
    pub const fn new(kind: MoveKind, position: usize) -> Self {
        Self { kind, position }
    }

    #[must_use]
    pub const fn start(position: usize) -> Self {
        Self::new(MoveKind::Start, position)
    }

    #[must_use]
    pub const fn attach(position: usize) -> Self {
        Self::new(MoveKind::Attach, position)
    }

    #[must_use]
    pub const fn over(position: usize) -> Self {
        Self::new(MoveKind::Over, position)
    }

    #[must_use]
    pub const fn under(position: usize) -> Self {
        Self::new(MoveKind::Under, position)
    }

    #[must_use]
    pub const fn twist(handedness: Handedness) -> Self {
        Self::new(MoveKind::Twist, handedness.position())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.position)
    }
}
