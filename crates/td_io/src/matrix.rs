//! `MatrixDataset`: the same construction as [`td_core::Dataset::builder`],
//! taken from a masked 2-D grid instead of a triple stream. Row `i` is
//! source `i`, column `j` is variable `j`, and `None` means "no claim".

use std::hash::Hash;

use td_core::{CoreError, Dataset};

/// Build a dataset from a masked grid: `grid[i][j] = Some(value)` if source
/// `i` asserted a value for variable `j`, `None` if it didn't. Every row
/// must have the same width; a ragged grid is rejected with the offending
/// row index.
pub fn build_matrix_dataset<Val>(
    grid: &[Vec<Option<Val>>],
) -> Result<Dataset<usize, usize, Val>, CoreError>
where
    Val: Eq + Hash + Clone,
{
    let width = grid.first().map_or(0, |row| row.len());
    for (i, row) in grid.iter().enumerate() {
        if row.len() != width {
            return Err(CoreError::BadShape(format!(
                "row {i} has width {}, expected {width}",
                row.len()
            )));
        }
    }

    let triples = grid.iter().enumerate().flat_map(|(s, row)| {
        row.iter()
            .enumerate()
            .filter_map(move |(v, cell)| cell.clone().map(|val| (s, v, val)))
    });
    Dataset::builder().build(triples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_claims_only_for_unmasked_cells() {
        let grid = vec![
            vec![Some("one"), None, Some("seven")],
            vec![Some("one"), Some("eight"), None],
            vec![None, None, Some("seven")],
        ];
        let d = build_matrix_dataset(&grid).unwrap();
        assert_eq!(d.num_sources(), 3);
        assert_eq!(d.num_variables(), 3);
        assert_eq!(d.num_claims(), 4);
    }

    #[test]
    fn ragged_row_is_rejected_with_its_index() {
        let grid = vec![vec![Some(1), Some(2)], vec![Some(1)]];
        let err = build_matrix_dataset(&grid).unwrap_err();
        match err {
            CoreError::BadShape(msg) => assert!(msg.contains("row 1")),
            other => panic!("expected BadShape, got {other:?}"),
        }
    }

    #[test]
    fn empty_grid_builds_an_empty_dataset() {
        let grid: Vec<Vec<Option<i32>>> = Vec::new();
        let d = build_matrix_dataset(&grid).unwrap();
        assert_eq!(d.num_sources(), 0);
        assert_eq!(d.num_claims(), 0);
    }
}
