//! A minimal compressed-sparse-row matrix, enough to express the
//! incidence and update-rule matrices the algorithm kernels need:
//! matrix-vector products, transposition, and iteration over nonzeros.
//!
//! `SC` is typically extremely sparse (each source only asserts a handful
//! of claims out of the total), so kernels route everything through this
//! type rather than densifying.

/// A sparse matrix in compressed-sparse-row layout. Column indices within
/// a row are kept sorted, which lets `get` use binary search and keeps
/// `nonzeros()` iteration order deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix {
    rows: usize,
    cols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<f64>,
}

impl CsrMatrix {
    /// Build a matrix from `(row, col, value)` triplets. Duplicate
    /// `(row, col)` pairs are coalesced by summing their values, matching
    /// the usual sparse-matrix-from-COO convention.
    pub fn from_triplets(rows: usize, cols: usize, triplets: &[(usize, usize, f64)]) -> Self {
        let mut by_row: Vec<Vec<(usize, f64)>> = vec![Vec::new(); rows];
        for &(r, c, v) in triplets {
            assert!(r < rows && c < cols, "triplet index out of bounds");
            by_row[r].push((c, v));
        }

        let mut indptr = Vec::with_capacity(rows + 1);
        let mut indices = Vec::with_capacity(triplets.len());
        let mut data = Vec::with_capacity(triplets.len());
        indptr.push(0);

        for row in by_row.iter_mut() {
            row.sort_unstable_by_key(|&(c, _)| c);
            let mut last: Option<usize> = None;
            for (c, v) in row.drain(..) {
                if last == Some(c) {
                    *data.last_mut().unwrap() += v;
                } else {
                    indices.push(c);
                    data.push(v);
                    last = Some(c);
                }
            }
            indptr.push(indices.len());
        }

        CsrMatrix {
            rows,
            cols,
            indptr,
            indices,
            data,
        }
    }

    /// An all-zero matrix of the given shape (used when an optional
    /// matrix, e.g. `IMP`, is not supplied).
    pub fn zeros(rows: usize, cols: usize) -> Self {
        CsrMatrix {
            rows,
            cols,
            indptr: vec![0; rows + 1],
            indices: Vec::new(),
            data: Vec::new(),
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    /// The `(indices, data)` slices for row `r`.
    pub fn row(&self, r: usize) -> (&[usize], &[f64]) {
        let start = self.indptr[r];
        let end = self.indptr[r + 1];
        (&self.indices[start..end], &self.data[start..end])
    }

    pub fn get(&self, r: usize, c: usize) -> f64 {
        let (idx, vals) = self.row(r);
        match idx.binary_search(&c) {
            Ok(pos) => vals[pos],
            Err(_) => 0.0,
        }
    }

    /// Dense matrix-vector product `y = A * x`.
    pub fn mat_vec(&self, x: &[f64]) -> Vec<f64> {
        assert_eq!(x.len(), self.cols, "mat_vec: dimension mismatch");
        let mut y = vec![0.0; self.rows];
        for r in 0..self.rows {
            let (idx, vals) = self.row(r);
            let mut acc = 0.0;
            for (&c, &v) in idx.iter().zip(vals) {
                acc += v * x[c];
            }
            y[r] = acc;
        }
        y
    }

    /// `A^T`, built fresh (not a view): transposition swaps the roles of
    /// rows and columns, which this type cannot express lazily.
    pub fn transpose(&self) -> CsrMatrix {
        let mut triplets = Vec::with_capacity(self.nnz());
        for r in 0..self.rows {
            let (idx, vals) = self.row(r);
            for (&c, &v) in idx.iter().zip(vals) {
                triplets.push((c, r, v));
            }
        }
        CsrMatrix::from_triplets(self.cols, self.rows, &triplets)
    }

    /// Iterate over `(row, col, value)` for every stored (nonzero) entry,
    /// in row-major, column-ascending order.
    pub fn nonzeros(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.rows).flat_map(move |r| {
            let (idx, vals) = self.row(r);
            idx.iter().zip(vals).map(move |(&c, &v)| (r, c, v))
        })
    }

    pub fn is_symmetric(&self) -> bool {
        if self.rows != self.cols {
            return false;
        }
        self.nonzeros().all(|(r, c, v)| self.get(c, r) == v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mat_vec_basic() {
        // [[1, 0, 2], [0, 3, 0]]
        let m = CsrMatrix::from_triplets(2, 3, &[(0, 0, 1.0), (0, 2, 2.0), (1, 1, 3.0)]);
        let y = m.mat_vec(&[1.0, 1.0, 1.0]);
        assert_eq!(y, vec![3.0, 3.0]);
    }

    #[test]
    fn transpose_round_trips() {
        let m = CsrMatrix::from_triplets(2, 3, &[(0, 0, 1.0), (0, 2, 2.0), (1, 1, 3.0)]);
        let t = m.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.get(2, 0), 2.0);
        assert_eq!(t.get(1, 1), 3.0);
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn duplicate_triplets_are_summed() {
        let m = CsrMatrix::from_triplets(1, 1, &[(0, 0, 1.0), (0, 0, 4.0)]);
        assert_eq!(m.get(0, 0), 5.0);
    }

    #[test]
    fn symmetry_check() {
        let m = CsrMatrix::from_triplets(2, 2, &[(0, 1, 1.0), (1, 0, 1.0), (0, 0, 1.0)]);
        assert!(m.is_symmetric());
        let n = CsrMatrix::from_triplets(2, 2, &[(0, 1, 1.0)]);
        assert!(!n.is_symmetric());
    }
}
