//! Grid topology for cloth constraints.
//!
//! Maps linear vertex indices to `(row, col)` grid coordinates and enumerates
//! the directed neighbor links each vertex relaxes against.
//!
//! Every vertex owns up to ten links:
//! - structural: above, right, below, left
//! - bend: two to the right, two below
//! - shear: the four diagonals
//!
//! Bend links only point right and down, so each undirected bend edge is
//! visited exactly once per pass. Structural and shear edges are visited from
//! both endpoints.

/// Maximum number of links a single vertex can own.
pub const MAX_LINKS: usize = 10;

/// Constraint class of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeClass {
    /// Direct horizontal/vertical neighbor.
    Structural,
    /// Neighbor two cells away along a row or column.
    Bend,
    /// Diagonal neighbor.
    Shear,
}

/// Grid axis a link runs along, used to select its rest length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeAxis {
    /// Along a row (columns change).
    Horizontal,
    /// Along a column (rows change).
    Vertical,
    /// Across a cell.
    Diagonal,
}

/// A directed link from a vertex to one of its neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    /// Index of the neighbor vertex.
    pub index: usize,
    /// Constraint class.
    pub class: EdgeClass,
    /// Axis the link runs along.
    pub axis: EdgeAxis,
}

/// Fixed-capacity neighbor table for one vertex.
///
/// Slots are ordered above, right, below, left, right+2, below+2,
/// above-left, above-right, below-left, below-right. Out-of-grid slots are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Neighbors {
    links: [Option<Link>; MAX_LINKS],
}

impl Neighbors {
    /// Iterates over the links that exist, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Link> + '_ {
        self.links.iter().flatten()
    }

    /// Returns the raw slot table.
    pub fn slots(&self) -> &[Option<Link>; MAX_LINKS] {
        &self.links
    }

    /// Number of existing links.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns true if no link exists (single-vertex grid).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Row-major grid of `cols x rows` vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridTopology {
    cols: usize,
    rows: usize,
}

// (row offset, col offset, class, axis) per slot.
const OFFSETS: [(isize, isize, EdgeClass, EdgeAxis); MAX_LINKS] = [
    (-1, 0, EdgeClass::Structural, EdgeAxis::Vertical),
    (0, 1, EdgeClass::Structural, EdgeAxis::Horizontal),
    (1, 0, EdgeClass::Structural, EdgeAxis::Vertical),
    (0, -1, EdgeClass::Structural, EdgeAxis::Horizontal),
    (0, 2, EdgeClass::Bend, EdgeAxis::Horizontal),
    (2, 0, EdgeClass::Bend, EdgeAxis::Vertical),
    (-1, -1, EdgeClass::Shear, EdgeAxis::Diagonal),
    (-1, 1, EdgeClass::Shear, EdgeAxis::Diagonal),
    (1, -1, EdgeClass::Shear, EdgeAxis::Diagonal),
    (1, 1, EdgeClass::Shear, EdgeAxis::Diagonal),
];

impl GridTopology {
    /// Creates a topology for a grid with the given division counts.
    ///
    /// A grid with `divisions_x` cells across has `divisions_x + 1` columns.
    pub fn from_divisions(divisions_x: u32, divisions_y: u32) -> Self {
        Self::new(divisions_x as usize + 1, divisions_y as usize + 1)
    }

    /// Creates a topology with explicit column and row counts.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Maps a vertex index to `(row, col)`.
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// Maps `(row, col)` back to a vertex index.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Returns the grid cell at a signed offset from `(row, col)`, if inside.
    fn offset(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<usize> {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        (r < self.rows && c < self.cols).then(|| self.index(r, c))
    }

    /// Enumerates the links owned by vertex `index`.
    pub fn neighbors(&self, index: usize) -> Neighbors {
        let (row, col) = self.coords(index);
        let mut links = [None; MAX_LINKS];

        for (slot, &(dr, dc, class, axis)) in links.iter_mut().zip(OFFSETS.iter()) {
            *slot = self
                .offset(row, col, dr, dc)
                .map(|index| Link { index, class, axis });
        }

        Neighbors { links }
    }

    /// Builds the neighbor table for every vertex, in index order.
    pub fn neighbor_table(&self) -> Vec<Neighbors> {
        (0..self.vertex_count()).map(|i| self.neighbors(i)).collect()
    }
}
