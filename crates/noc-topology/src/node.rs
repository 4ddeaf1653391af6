//! Router coordinates on the torus.
//!
//! A node is addressed by its (row, column) pair. Rows grow downwards and
//! columns grow to the right; both are 0-indexed and wrap at the torus edge.

/// A router position on the torus.
///
/// Identity is value based: two nodes with equal coordinates are the same
/// node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Row index in `[0, rows)`
    pub row: usize,
    /// Column index in `[0, cols)`
    pub col: usize,
}

impl Node {
    /// The top-left router.
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    /// Create a new node.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether this node lies inside a `rows` x `cols` torus.
    pub const fn fits(&self, rows: usize, cols: usize) -> bool {
        self.row < rows && self.col < cols
    }

    /// Minimum hop count to `other` on an unloaded `rows` x `cols` torus.
    ///
    /// Each axis contributes the shorter of the direct and the wrapped
    /// distance.
    pub fn torus_distance(&self, other: &Self, rows: usize, cols: usize) -> usize {
        wrapped_distance(self.row, other.row, rows) + wrapped_distance(self.col, other.col, cols)
    }
}

fn wrapped_distance(a: usize, b: usize, len: usize) -> usize {
    let direct = a.abs_diff(b);
    direct.min(len.saturating_sub(direct))
}

impl From<(usize, usize)> for Node {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
