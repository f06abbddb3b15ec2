//! Rectangular regions and their required shape counts

/// A rectangular region that must receive a multiset of shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    width: usize,
    height: usize,
    required_counts: Vec<usize>,
}

impl Region {
    /// Create a region; `required_counts[id]` instances of shape `id` are required
    pub const fn new(width: usize, height: usize, required_counts: Vec<usize>) -> Self {
        Self {
            width,
            height,
            required_counts,
        }
    }

    /// Width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of cells in the region
    pub const fn area(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Required instance count per shape id
    pub fn required_counts(&self) -> &[usize] {
        &self.required_counts
    }

    /// Required instance count for one shape id (zero when not listed)
    pub fn required_count(&self, shape_id: usize) -> usize {
        self.required_counts.get(shape_id).copied().unwrap_or(0)
    }

    /// Total number of shape instances to place, saturating at `usize::MAX`
    pub fn total_instances(&self) -> usize {
        self.required_counts
            .iter()
            .fold(0, |total, &count| total.saturating_add(count))
    }

    /// Whether nothing has to be placed
    pub fn is_empty_requirement(&self) -> bool {
        self.required_counts.iter().all(|&count| count == 0)
    }
}
