//! A thin text encoding of the masked grid in [`crate::matrix`]: comma
//! separated, one source per row, variables as columns, empty cells mean
//! no claim. This is not a general CSV parser (quoting, escaping, and
//! encoding detection are an external loader's problem) — just enough to
//! let the core's own round-trip tests and examples read back what they
//! wrote.

use std::hash::Hash;

use td_core::{CoreError, Dataset};

use crate::matrix::build_matrix_dataset;

fn parse_grid(text: &str) -> Result<Vec<Vec<Option<String>>>, CoreError> {
    let mut grid = Vec::new();
    let mut width = None;
    for (i, line) in text.lines().enumerate() {
        let row: Vec<Option<String>> = line
            .split(',')
            .map(|cell| {
                let cell = cell.trim();
                if cell.is_empty() {
                    None
                } else {
                    Some(cell.to_string())
                }
            })
            .collect();
        match width {
            None => width = Some(row.len()),
            Some(w) if w != row.len() => {
                return Err(CoreError::BadShape(format!(
                    "row {i} has width {}, expected {w}",
                    row.len()
                )))
            }
            Some(_) => {}
        }
        grid.push(row);
    }
    Ok(grid)
}

/// Parse unsupervised CSV text straight into a dataset: every line is a
/// source, every column a variable.
pub fn parse_dataset(text: &str) -> Result<Dataset<usize, usize, String>, CoreError> {
    build_matrix_dataset(&parse_grid(text)?)
}

/// Parse supervised CSV text: the first line holds the true value per
/// variable (empty cells allowed, meaning "no ground truth for this
/// variable"), subsequent lines are sources.
pub fn parse_supervised(
    text: &str,
) -> Result<(std::collections::HashMap<usize, String>, Dataset<usize, usize, String>), CoreError>
{
    let grid = parse_grid(text)?;
    let Some((truth_row, source_rows)) = grid.split_first() else {
        return Ok((std::collections::HashMap::new(), build_matrix_dataset(&Vec::new())?));
    };
    let truth = truth_row
        .iter()
        .enumerate()
        .filter_map(|(v, cell)| cell.clone().map(|val| (v, val)))
        .collect();
    let dataset = build_matrix_dataset(source_rows)?;
    Ok((truth, dataset))
}

/// Render a dataset back to the same grid layout it would have been parsed
/// from: source order and variable order follow their internal IDs, which
/// is a consistent (if arbitrary) relabelling, not necessarily the order
/// the triples first appeared in.
pub fn render_dataset<Val>(dataset: &Dataset<usize, usize, Val>) -> String
where
    Val: Eq + Hash + Clone + std::fmt::Display,
{
    let num_vars = dataset.num_variables();
    let mut lines = Vec::with_capacity(dataset.num_sources());
    for s in 0..dataset.num_sources() {
        let mut row = vec![String::new(); num_vars];
        let (claim_ids, _) = dataset.sc().row(s);
        for &claim_id in claim_ids {
            if let Some((&var_id, val)) = dataset.var_of_claim(claim_id as u32) {
                row[var_id] = val.to_string();
            }
        }
        lines.push(row.join(","));
    }
    lines.join("\n")
}
