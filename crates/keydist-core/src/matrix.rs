// Keydist Distance Matrix
// Dense (m+1) x (n+1) cost grid filled by the distance engine

use std::fmt;

/// Cost grid for one source/target pair
///
/// Cell `(i, j)` holds the cheapest way to turn the first `i` source
/// characters into the first `j` target characters.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<f64>,
}

impl DistanceMatrix {
    /// Zeroed matrix for a source of `m` and a target of `n` characters
    pub fn new(m: usize, n: usize) -> Self {
        let rows = m + 1;
        let cols = n + 1;
        Self {
            rows,
            cols,
            cells: vec![0.0; rows * cols],
        }
    }

    /// Number of rows (source length + 1)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (target length + 1)
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Read a cell; panics on out-of-range indices like slice indexing
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[self.offset(i, j)]
    }

    pub fn set(&mut self, i: usize, j: usize, cost: f64) {
        let offset = self.offset(i, j);
        self.cells[offset] = cost;
    }

    /// One row of the grid
    pub fn row(&self, i: usize) -> &[f64] {
        let start = self.offset(i, 0);
        &self.cells[start..start + self.cols]
    }

    /// The bottom-right cell: the full edit distance
    pub fn final_cost(&self) -> f64 {
        self.get(self.rows - 1, self.cols - 1)
    }

    fn offset(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.rows && j < self.cols,
            "cell ({}, {}) outside {}x{} matrix",
            i,
            j,
            self.rows,
            self.cols
        );
        i * self.cols + j
    }
}

impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            let line: Vec<String> = self.row(i).iter().map(|c| format!("{:6.2}", c)).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
