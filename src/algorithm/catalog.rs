//! Orientation generation and the shared per-shape orientation cache

use crate::io::configuration::{MAX_VARIANTS, ROTATION_STEPS};
use crate::spatial::shape::{Shape, Variant};
use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

/// Generate every distinct orientation of a shape
///
/// Walks the four clockwise rotations, offering each rotation followed by its
/// horizontal mirror, and keeps only orientations whose canonical signature
/// has not been seen yet. The result is in generation order.
pub fn generate_variants(shape: &Shape) -> Vec<Variant> {
    let mut seen = HashSet::with_capacity(MAX_VARIANTS);
    let mut unique_variants = Vec::with_capacity(MAX_VARIANTS);

    let mut current = shape.as_variant();
    for _ in 0..ROTATION_STEPS {
        let mirrored = current.mirror();
        let next = current.rotate_clockwise();

        for candidate in [current, mirrored] {
            if seen.insert(candidate.signature()) {
                unique_variants.push(candidate);
            }
        }

        current = next;
    }

    unique_variants
}

struct CatalogEntry {
    shape: Shape,
    variants: OnceLock<Vec<Variant>>,
}

/// Shared, read-only table of shapes and their cached orientations
///
/// Orientations are computed on first request per shape and published once,
/// so the catalog can be shared across concurrent region evaluations.
#[derive(Default)]
pub struct ShapeCatalog {
    entries: BTreeMap<usize, CatalogEntry>,
}

impl ShapeCatalog {
    /// Create a catalog from parsed shapes; a later shape replaces an earlier one with the same id
    pub fn new(shapes: impl IntoIterator<Item = Shape>) -> Self {
        let entries = shapes
            .into_iter()
            .map(|shape| {
                (
                    shape.id(),
                    CatalogEntry {
                        shape,
                        variants: OnceLock::new(),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Look up a shape by id
    pub fn shape(&self, shape_id: usize) -> Option<&Shape> {
        self.entries.get(&shape_id).map(|entry| &entry.shape)
    }

    /// Orientations of a shape, computed on first use
    pub fn variants_of(&self, shape_id: usize) -> Option<&[Variant]> {
        self.entries.get(&shape_id).map(|entry| {
            entry
                .variants
                .get_or_init(|| generate_variants(&entry.shape))
                .as_slice()
        })
    }

    /// Compute the orientations of every shape up front
    pub fn precompute(&self) {
        for entry in self.entries.values() {
            entry
                .variants
                .get_or_init(|| generate_variants(&entry.shape));
        }
    }

    /// Number of shapes whose orientations have been materialised
    pub fn computed_count(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.variants.get().is_some())
            .count()
    }

    /// Number of shapes in the catalog
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no shapes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
