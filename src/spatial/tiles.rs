use std::fmt;

/// Opaque identifier for one tile kind
///
/// A value is either the designated empty sentinel, a single tile id, or a
/// composite of two stacked layers treated as one atomic token. Adjacency
/// learning and propagation compare values structurally and never look
/// inside a composite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileValue {
    /// Absence of any tile
    Empty,
    /// A single tile id
    Single(u32),
    /// Two stacked layers (bottom, top) forming one atomic value
    Composite(u32, u32),
}

impl TileValue {
    /// Build a layered value, normalizing equal layers to a single tile
    pub const fn composite(bottom: u32, top: u32) -> Self {
        if bottom == top {
            Self::Single(bottom)
        } else {
            Self::Composite(bottom, top)
        }
    }

    /// Whether this is the empty sentinel
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Bottom layer id, if any tile is present
    pub const fn base_layer(self) -> Option<u32> {
        match self {
            Self::Empty => None,
            Self::Single(id) | Self::Composite(id, _) => Some(id),
        }
    }
}

impl fmt::Display for TileValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Single(id) => write!(f, "{id}"),
            Self::Composite(bottom, top) => write!(f, "{bottom}_{top}"),
        }
    }
}
