//! Shape masks and their orientations
//!
//! A shape is a fixed pattern of occupied unit cells. Orientations are
//! produced by quarter-turn rotation and horizontal reflection of the mask,
//! and compared through a canonical text signature.

use ndarray::Array2;

use crate::io::configuration::{EMPTY_MARKER, OCCUPIED_MARKER, SIGNATURE_ROW_SEPARATOR};

/// An immutable polyomino-like shape as supplied by the puzzle input
///
/// The mask is indexed `(row, col)`, so its dimensions are `(height, width)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    id: usize,
    mask: Array2<bool>,
    block_count: usize,
}

impl Shape {
    /// Create a shape from its id and occupancy mask
    pub fn new(id: usize, mask: Array2<bool>) -> Self {
        let block_count = mask.iter().filter(|&&cell| cell).count();
        Self {
            id,
            mask,
            block_count,
        }
    }

    /// Build a shape from `#`/`.` rows, padding ragged rows with empty cells
    pub fn from_rows<S: AsRef<str>>(id: usize, rows: &[S]) -> Self {
        let height = rows.len();
        let width = rows
            .iter()
            .map(|row| row.as_ref().chars().count())
            .max()
            .unwrap_or(0);

        let mask = Array2::from_shape_fn((height, width), |(row, col)| {
            rows.get(row)
                .and_then(|line| line.as_ref().chars().nth(col))
                .is_some_and(|marker| marker == OCCUPIED_MARKER)
        });

        Self::new(id, mask)
    }

    /// Identifier assigned by the input
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Number of occupied cells
    pub const fn block_count(&self) -> usize {
        self.block_count
    }

    /// Width of the bounding box in cells
    pub fn width(&self) -> usize {
        self.mask.ncols()
    }

    /// Height of the bounding box in cells
    pub fn height(&self) -> usize {
        self.mask.nrows()
    }

    /// Occupancy mask indexed `(row, col)`
    pub const fn mask(&self) -> &Array2<bool> {
        &self.mask
    }

    /// The shape in its input orientation
    pub fn as_variant(&self) -> Variant {
        Variant::from_mask(self.mask.clone())
    }
}

/// One orientation of a shape, ready for placement
///
/// Keeps the list of occupied `(row, col)` offsets next to the mask so that
/// overlap tests only visit occupied cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    mask: Array2<bool>,
    cells: Vec<[usize; 2]>,
}

impl Variant {
    /// Create a variant from an occupancy mask indexed `(row, col)`
    pub fn from_mask(mask: Array2<bool>) -> Self {
        let cells = mask
            .indexed_iter()
            .filter(|&(_, &occupied)| occupied)
            .map(|((row, col), _)| [row, col])
            .collect();
        Self { mask, cells }
    }

    /// Width of the bounding box in cells
    pub fn width(&self) -> usize {
        self.mask.ncols()
    }

    /// Height of the bounding box in cells
    pub fn height(&self) -> usize {
        self.mask.nrows()
    }

    /// Number of occupied cells
    pub fn block_count(&self) -> usize {
        self.cells.len()
    }

    /// Occupied `(row, col)` offsets in row-major order
    pub fn cells(&self) -> &[[usize; 2]] {
        &self.cells
    }

    /// Occupancy mask indexed `(row, col)`
    pub const fn mask(&self) -> &Array2<bool> {
        &self.mask
    }

    /// Rotate a quarter turn clockwise
    ///
    /// Cell `(y, x)` of an `H×W` mask moves to `(x, H-1-y)` of the `W×H` result.
    #[must_use]
    pub fn rotate_clockwise(&self) -> Self {
        let height = self.height();
        let rotated = Array2::from_shape_fn((self.width(), height), |(row, col)| {
            self.mask
                .get([height - 1 - col, row])
                .copied()
                .unwrap_or(false)
        });
        Self::from_mask(rotated)
    }

    /// Reflect horizontally by reversing every row
    #[must_use]
    pub fn mirror(&self) -> Self {
        let width = self.width();
        let reflected = Array2::from_shape_fn(self.mask.dim(), |(row, col)| {
            self.mask
                .get([row, width - 1 - col])
                .copied()
                .unwrap_or(false)
        });
        Self::from_mask(reflected)
    }

    /// Canonical signature used to detect duplicate orientations
    pub fn signature(&self) -> String {
        canonical_signature(&self.mask)
    }
}

/// Row-major `#`/`.` rendering of a mask with a separator after every row
pub fn canonical_signature(mask: &Array2<bool>) -> String {
    let mut signature = String::with_capacity(mask.len() + mask.nrows());
    for row in mask.rows() {
        for &occupied in row {
            signature.push(if occupied {
                OCCUPIED_MARKER
            } else {
                EMPTY_MARKER
            });
        }
        signature.push(SIGNATURE_ROW_SEPARATOR);
    }
    signature
}
