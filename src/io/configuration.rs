//! Packing constants and runtime configuration defaults

// Orientation limits
/// Maximum number of distinct orientations of a shape (four rotations, each mirrored)
pub const MAX_VARIANTS: usize = 8;
/// Number of quarter turns tried when generating orientations
pub const ROTATION_STEPS: usize = 4;

// Text markers shared by the puzzle format and the canonical signature
/// Marker for an occupied shape cell
pub const OCCUPIED_MARKER: char = '#';
/// Marker for an empty shape cell
pub const EMPTY_MARKER: char = '.';
/// Terminates every row of a canonical signature
pub const SIGNATURE_ROW_SEPARATOR: char = '|';
/// Separators accepted between region width and height
pub const DIMENSION_SEPARATORS: [char; 2] = ['x', '×'];

// Safety limit to prevent excessive memory allocation
/// Maximum allowed region width or height
pub const MAX_REGION_DIMENSION: usize = 10_000;

// Input discovery
/// File extension of puzzle files picked up from a directory target
pub const PUZZLE_EXTENSION: &str = "txt";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
