//! Puzzle text parsing into shapes and regions
//!
//! The format is a sequence of shape blocks followed by region lines:
//!
//! ```text
//! 0:
//! ###
//! ##.
//!
//! 4x4: 2 0
//! ```
//!
//! A shape block is a `<id>:` header followed by rows of `#` and `.`; ragged
//! rows are padded with empty cells. A region line is
//! `<width>x<height>: <count> ...` where `×` may replace `x` and the counts are
//! indexed by shape id.

use crate::algorithm::catalog::ShapeCatalog;
use crate::io::configuration::{
    DIMENSION_SEPARATORS, EMPTY_MARKER, MAX_REGION_DIMENSION, OCCUPIED_MARKER,
};
use crate::io::error::{Result, WithContext, parse_error};
use crate::spatial::{Region, Shape};
use std::collections::HashSet;
use std::path::Path;

/// Parsed puzzle: the shape definitions and the regions to check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Puzzle {
    /// Shapes in input order
    pub shapes: Vec<Shape>,
    /// Regions in input order
    pub regions: Vec<Region>,
}

impl Puzzle {
    /// Read and parse a puzzle file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are malformed
    pub fn from_path(path: &Path) -> Result<Self> {
        let input = std::fs::read_to_string(path).with_path(path, "read puzzle")?;
        parse_puzzle(&input)
    }

    /// Build the shape catalog for this puzzle's shapes
    pub fn catalog(&self) -> ShapeCatalog {
        ShapeCatalog::new(self.shapes.iter().cloned())
    }
}

struct PendingShape {
    id: usize,
    header_line: usize,
    rows: Vec<String>,
}

/// Parse puzzle text into shapes and regions
///
/// # Errors
///
/// Returns a `Parse` error naming the 1-based line of the first malformed
/// header, shape row or region line
pub fn parse_puzzle(input: &str) -> Result<Puzzle> {
    let mut puzzle = Puzzle::default();
    let mut seen_ids = HashSet::new();
    let mut pending: Option<PendingShape> = None;

    for (index, raw_line) in input.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();

        if line.is_empty() {
            finish_shape(pending.take(), &mut puzzle, &mut seen_ids)?;
            continue;
        }

        if is_region_line(line) {
            finish_shape(pending.take(), &mut puzzle, &mut seen_ids)?;
            puzzle.regions.push(parse_region(line, line_number)?);
            continue;
        }

        if let Some(id_text) = line.strip_suffix(':') {
            finish_shape(pending.take(), &mut puzzle, &mut seen_ids)?;
            let id = id_text.trim().parse::<usize>().map_err(|error| {
                parse_error(line_number, &format!("invalid shape id '{id_text}': {error}"))
            })?;
            pending = Some(PendingShape {
                id,
                header_line: line_number,
                rows: Vec::new(),
            });
            continue;
        }

        match pending.as_mut() {
            Some(shape) => {
                if let Some(bad) = line
                    .chars()
                    .find(|&marker| marker != OCCUPIED_MARKER && marker != EMPTY_MARKER)
                {
                    return Err(parse_error(
                        line_number,
                        &format!("unexpected character '{bad}' in shape {}", shape.id),
                    ));
                }
                shape.rows.push(line.to_string());
            }
            None => {
                return Err(parse_error(
                    line_number,
                    &format!("expected a shape header or region line, got '{line}'"),
                ));
            }
        }
    }

    finish_shape(pending, &mut puzzle, &mut seen_ids)?;
    Ok(puzzle)
}

fn is_region_line(line: &str) -> bool {
    line.split_once(':')
        .is_some_and(|(dimensions, _)| dimensions.contains(DIMENSION_SEPARATORS))
}

fn finish_shape(
    pending: Option<PendingShape>,
    puzzle: &mut Puzzle,
    seen_ids: &mut HashSet<usize>,
) -> Result<()> {
    let Some(shape) = pending else {
        return Ok(());
    };

    if shape.rows.is_empty() {
        return Err(parse_error(
            shape.header_line,
            &format!("shape {} has no rows", shape.id),
        ));
    }
    if !seen_ids.insert(shape.id) {
        return Err(parse_error(
            shape.header_line,
            &format!("duplicate shape id {}", shape.id),
        ));
    }

    puzzle.shapes.push(Shape::from_rows(shape.id, &shape.rows));
    Ok(())
}

/// Parse a single `<width>x<height>: <count> ...` line
///
/// # Errors
///
/// Returns a `Parse` error for missing or non-numeric dimensions and counts,
/// and for dimensions of zero or above `MAX_REGION_DIMENSION`
pub fn parse_region(line: &str, line_number: usize) -> Result<Region> {
    let Some((dimensions, counts)) = line.split_once(':') else {
        return Err(parse_error(line_number, &"region line is missing ':'"));
    };

    let sides: Vec<&str> = dimensions.split(DIMENSION_SEPARATORS).collect();
    let [width_text, height_text] = sides.as_slice() else {
        return Err(parse_error(
            line_number,
            &format!("expected '<width>x<height>', got '{}'", dimensions.trim()),
        ));
    };

    let width = parse_dimension(width_text, "width", line_number)?;
    let height = parse_dimension(height_text, "height", line_number)?;

    let required_counts = counts
        .split_whitespace()
        .map(|token| {
            token.parse::<usize>().map_err(|error| {
                parse_error(line_number, &format!("invalid count '{token}': {error}"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Region::new(width, height, required_counts))
}

fn parse_dimension(text: &str, name: &str, line_number: usize) -> Result<usize> {
    let text = text.trim();
    let value = text.parse::<usize>().map_err(|error| {
        parse_error(line_number, &format!("invalid {name} '{text}': {error}"))
    })?;

    if value == 0 || value > MAX_REGION_DIMENSION {
        return Err(parse_error(
            line_number,
            &format!("{name} {value} must be between 1 and {MAX_REGION_DIMENSION}"),
        ));
    }
    Ok(value)
}
