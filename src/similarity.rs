//! Pairwise similarity between categorical records.
//!
//! For two records `i ≠ j`, only attributes where *both* values are present
//! are compared:
//!
//! ```text
//! S[i][j] = matches − mismatches = 2·matches − present
//! ```
//!
//! where `present` counts attributes with neither value missing. The result
//! lies in `[-m, m]`. The diagonal is never computed and holds the sentinel
//! `-m-1`.
//!
//! Building the matrix is `O(n²m)` and dominates the pipeline for wide
//! datasets; it is computed once and shared read-only afterwards.

use crate::dataset::Dataset;
use crate::error::{Error, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Symmetric `n × n` integer similarity matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimilarityMatrix {
    n: usize,
    m: usize,
    values: Vec<i32>,
}

impl SimilarityMatrix {
    /// Compute the similarity matrix of a dataset.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let n = dataset.n_records();
        let m = dataset.n_attributes();

        #[cfg(feature = "parallel")]
        let upper: Vec<Vec<i32>> = (0..n)
            .into_par_iter()
            .map(|i| {
                ((i + 1)..n)
                    .map(|j| pair_similarity(dataset.row(i), dataset.row(j)))
                    .collect()
            })
            .collect();

        #[cfg(not(feature = "parallel"))]
        let upper: Vec<Vec<i32>> = (0..n)
            .map(|i| {
                ((i + 1)..n)
                    .map(|j| pair_similarity(dataset.row(i), dataset.row(j)))
                    .collect()
            })
            .collect();

        Self::from_upper(n, m, upper)
    }

    /// Build a matrix from a closure evaluated on every pair `i < j`.
    ///
    /// The lower triangle mirrors the upper one.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if a value falls outside `[-m, m]`.
    pub fn from_fn<F>(n: usize, m: usize, f: F) -> Result<Self>
    where
        F: Fn(usize, usize) -> i32,
    {
        let bound = m as i64;
        let mut upper = Vec::with_capacity(n);
        for i in 0..n {
            let mut row = Vec::with_capacity(n.saturating_sub(i + 1));
            for j in (i + 1)..n {
                let v = f(i, j);
                if (v as i64).abs() > bound {
                    return Err(Error::InvalidParameter {
                        name: "similarity",
                        message: "value outside [-m, m]",
                    });
                }
                row.push(v);
            }
            upper.push(row);
        }
        Ok(Self::from_upper(n, m, upper))
    }

    fn from_upper(n: usize, m: usize, upper: Vec<Vec<i32>>) -> Self {
        let sentinel = -(m as i32) - 1;
        let mut values = vec![sentinel; n * n];
        for (i, row) in upper.into_iter().enumerate() {
            for (offset, v) in row.into_iter().enumerate() {
                let j = i + 1 + offset;
                values[i * n + j] = v;
                values[j * n + i] = v;
            }
        }
        Self { n, m, values }
    }

    /// Number of records.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of attributes the similarities were computed over.
    pub fn m(&self) -> usize {
        self.m
    }

    /// Value stored in cells that carry no similarity (the diagonal).
    pub fn sentinel(&self) -> i32 {
        -(self.m as i32) - 1
    }

    /// `S[i][j]`. Returns the sentinel for `i == j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> i32 {
        self.values[i * self.n + j]
    }

    /// Iterate `(i, j, S[i][j])` over `i < j` in ascending order.
    pub fn upper_pairs(&self) -> impl Iterator<Item = (usize, usize, i32)> + '_ {
        (0..self.n).flat_map(move |i| ((i + 1)..self.n).map(move |j| (i, j, self.get(i, j))))
    }
}

/// Similarity of two encoded rows of equal length.
#[inline]
fn pair_similarity(a: &[Option<u32>], b: &[Option<u32>]) -> i32 {
    let mut present = 0i32;
    let mut matches = 0i32;
    for (x, y) in a.iter().zip(b) {
        if let (Some(x), Some(y)) = (x, y) {
            present += 1;
            if x == y {
                matches += 1;
            }
        }
    }
    2 * matches - present
}
