//! Tests for puzzle text parsing and its error reporting

#[cfg(test)]
mod tests {
    use polypack::io::error::PackingError;
    use polypack::io::parse::{Puzzle, parse_puzzle, parse_region};
    use std::io::Write;

    const EXAMPLE: &str = "\
0:
###
##.
##.

1:
###
##.
.##

2:
.##
###
##.

3:
##.
###
##.

4:
###
#..
###

5:
###
.#.
###

4x4: 0 0 0 0 2 0
12x5: 1 0 1 0 2 2
12×5: 1 0 1 0 3 2
";

    fn parse_error_line(input: &str) -> usize {
        match parse_puzzle(input) {
            Err(PackingError::Parse { line, .. }) => line,
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    // Tests the full example yields six shapes and three regions
    // Verified by treating blank lines as shape rows
    #[test]
    fn test_parse_example() {
        let puzzle = parse_puzzle(EXAMPLE).unwrap();

        assert_eq!(puzzle.shapes.len(), 6);
        assert_eq!(puzzle.regions.len(), 3);

        let ids: Vec<usize> = puzzle.shapes.iter().map(|shape| shape.id()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
        for shape in &puzzle.shapes {
            assert_eq!(shape.block_count(), 7, "shape {}", shape.id());
        }

        let first = puzzle.regions.first().unwrap();
        assert_eq!((first.width(), first.height()), (4, 4));
        assert_eq!(first.required_counts(), &[0, 0, 0, 0, 2, 0]);
    }

    // Tests both dimension separators are accepted
    // Verified by splitting only on the ASCII separator
    #[test]
    fn test_parse_region_separators() {
        let ascii = parse_region("12x5: 1 0 1", 1).unwrap();
        let unicode = parse_region("12×5: 1 0 1", 1).unwrap();

        assert_eq!(ascii, unicode);
        assert_eq!(ascii.width(), 12);
        assert_eq!(ascii.height(), 5);
        assert_eq!(ascii.required_counts(), &[1, 0, 1]);
    }

    // Tests a region line with no counts requires nothing
    // Verified by rejecting an empty count list
    #[test]
    fn test_parse_region_without_counts() {
        let region = parse_region("3x3:", 1).unwrap();

        assert!(region.is_empty_requirement());
    }

    // Tests surrounding whitespace and CRLF endings are ignored
    // Verified by parsing lines without trimming
    #[test]
    fn test_parse_trims_lines() {
        let input = "  0:  \r\n  #.\r\n  ##  \r\n\r\n  2x2: 1  \r\n";

        let puzzle = parse_puzzle(input).unwrap();

        assert_eq!(puzzle.shapes.len(), 1);
        assert_eq!(puzzle.shapes.first().map(|s| s.block_count()), Some(3));
        assert_eq!(puzzle.regions.len(), 1);
    }

    // Tests a region line directly after shape rows ends the shape
    // Verified by requiring a blank line before the first region
    #[test]
    fn test_region_line_finishes_shape() {
        let puzzle = parse_puzzle("0:\n##\n2x1: 1\n").unwrap();

        assert_eq!(puzzle.shapes.len(), 1);
        assert_eq!(puzzle.regions.len(), 1);
    }

    // Tests malformed lines report their 1-based line number
    // Verified by reporting 0-based line numbers
    #[test]
    fn test_parse_errors_name_line() {
        assert_eq!(parse_error_line("0:\n#a#\n"), 2);
        assert_eq!(parse_error_line("0:\n#\n\nhello\n"), 4);
        assert_eq!(parse_error_line("x:\n#\n"), 1);
        assert_eq!(parse_error_line("0:\n#\n\n4x4: 1 two\n"), 4);
        assert_eq!(parse_error_line("0:\n#\n\n4x: 1\n"), 4);
        assert_eq!(parse_error_line("0:\n#\n\n4x4x4: 1\n"), 4);
    }

    // Tests zero and oversized dimensions are rejected
    // Verified by accepting any parsed integer
    #[test]
    fn test_parse_region_dimension_limits() {
        assert!(matches!(
            parse_region("0x4: 1", 3),
            Err(PackingError::Parse { line: 3, .. })
        ));
        assert!(parse_region("4x0: 1", 3).is_err());
        assert!(parse_region("10001x1: 1", 3).is_err());
        assert!(parse_region("10000x1: 1", 3).is_ok());
    }

    // Tests a header with no rows is reported at the header line
    // Verified by silently dropping empty shapes
    #[test]
    fn test_shape_without_rows() {
        assert_eq!(parse_error_line("0:\n\n1:\n#\n"), 1);
        assert_eq!(parse_error_line("0:\n#\n\n1:\n"), 4);
    }

    // Tests a repeated shape id is rejected at its second header
    // Verified by letting the later shape overwrite the earlier one
    #[test]
    fn test_duplicate_shape_id() {
        assert_eq!(parse_error_line("0:\n#\n\n0:\n##\n"), 4);
    }

    // Tests shapes and regions are optional
    // Verified by requiring at least one region
    #[test]
    fn test_empty_input() {
        let puzzle = parse_puzzle("\n\n").unwrap();

        assert_eq!(puzzle, Puzzle::default());
    }

    // Tests reading from a file and reporting unreadable paths
    // Verified by swallowing the read error into an empty puzzle
    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(EXAMPLE.as_bytes()).unwrap();

        let puzzle = Puzzle::from_path(file.path()).unwrap();
        assert_eq!(puzzle.regions.len(), 3);
        assert_eq!(puzzle.catalog().len(), 6);

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        match Puzzle::from_path(&missing) {
            Err(PackingError::FileSystem {
                path, operation, ..
            }) => {
                assert_eq!(path, missing);
                assert_eq!(operation, "read puzzle");
            }
            other => panic!("expected a file system error, got {other:?}"),
        }
    }
}
