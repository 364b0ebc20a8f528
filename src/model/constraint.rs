//! Triangle inequalities and the redundancy filters.
//!
//! For a triple `i < j < k` there are three candidate inequalities, one per
//! edge carrying the `−1` coefficient:
//!
//! ```text
//! OpenIk:   x_ij + x_jk − x_ik ≤ 1
//! OpenJk:   x_ij − x_jk + x_ik ≤ 1
//! OpenIj:  −x_ij + x_jk + x_ik ≤ 1
//! ```
//!
//! Each says: if the two `+1` edges are "together", the `−1` edge must be too.
//!
//! | Filter | OpenIk | OpenJk | OpenIj |
//! |--------|--------|--------|--------|
//! | All | always | always | always |
//! | α(c) | `s_ij≥c ∨ s_jk≥c` | `s_ij≥c ∨ s_ik≥c` | `s_jk≥c ∨ s_ik≥c` |
//! | β(c) | `s_ij+s_jk≥c` | `s_ij+s_ik≥c` | `s_jk+s_ik≥c` |
//! | γ(c) | `s_ij≥0 ∧ s_jk≥c ∧ s_ik≤0` | `s_ij≥0 ∧ s_jk≤0 ∧ s_ik≥c` | `s_ij≤0 ∧ s_jk≥c ∧ s_ik≥0` |
//!
//! The α and β filters are from Miyauchi & Sukegawa (2015), "Redundant
//! constraints in the standard formulation for the clique partitioning
//! problem", Optimization Letters 9(1).

use super::variables::{VarId, VariableMap};

/// Which edge of a triple carries the negative coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Triangle {
    /// `x_ij + x_jk − x_ik ≤ 1`.
    OpenIk,
    /// `x_ij − x_jk + x_ik ≤ 1`.
    OpenJk,
    /// `−x_ij + x_jk + x_ik ≤ 1`.
    OpenIj,
}

impl Triangle {
    /// The three triangles in emission order.
    pub const ALL: [Triangle; 3] = [Triangle::OpenIk, Triangle::OpenJk, Triangle::OpenIj];

    /// Coefficients of `(x_ij, x_jk, x_ik)`.
    pub fn coefficients(self) -> [i8; 3] {
        match self {
            Triangle::OpenIk => [1, 1, -1],
            Triangle::OpenJk => [1, -1, 1],
            Triangle::OpenIj => [-1, 1, 1],
        }
    }
}

/// Constraint sense. Triangle inequalities are always `≤`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sense {
    /// `≤`.
    LessEqual,
}

/// A linear triangle inequality over one triple.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    /// Triple `(i, j, k)` with `i < j < k`.
    pub triple: (usize, usize, usize),
    /// Which inequality of the triple.
    pub triangle: Triangle,
    /// `(variable, coefficient)` for `x_ij`, `x_jk`, `x_ik` in that order.
    pub terms: [(VarId, i8); 3],
    /// Sense.
    pub sense: Sense,
    /// Right-hand side.
    pub rhs: i8,
}

impl Constraint {
    /// Build the `triangle` inequality of `i < j < k`.
    pub fn triangle(map: &VariableMap, i: usize, j: usize, k: usize, triangle: Triangle) -> Self {
        let [a, b, c] = triangle.coefficients();
        Self {
            triple: (i, j, k),
            triangle,
            terms: [
                (map.id_unchecked(i, j), a),
                (map.id_unchecked(j, k), b),
                (map.id_unchecked(i, k), c),
            ],
            sense: Sense::LessEqual,
            rhs: 1,
        }
    }

    /// Whether `values` (indexed by variable id) satisfy the inequality.
    pub fn is_satisfied_by(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs: f64 = self
            .terms
            .iter()
            .map(|&(id, coef)| f64::from(coef) * values[id.index()])
            .sum();
        lhs <= f64::from(self.rhs) + tolerance
    }
}

/// Resolved redundancy filter with its concrete cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriangleFilter {
    /// Keep everything.
    All,
    /// α rule with cut.
    Alpha(i32),
    /// β rule with cut.
    Beta(i32),
    /// γ rule with cut.
    Gamma(i32),
}

impl TriangleFilter {
    /// The cut, if the filter uses one.
    pub fn cut(self) -> Option<i32> {
        match self {
            TriangleFilter::All => None,
            TriangleFilter::Alpha(c) | TriangleFilter::Beta(c) | TriangleFilter::Gamma(c) => {
                Some(c)
            }
        }
    }

    /// Which of `[OpenIk, OpenJk, OpenIj]` to keep for similarities `s_ij, s_jk, s_ik`.
    #[inline]
    pub fn keep(self, s_ij: i32, s_jk: i32, s_ik: i32) -> [bool; 3] {
        match self {
            TriangleFilter::All => [true; 3],
            TriangleFilter::Alpha(c) => [
                s_ij >= c || s_jk >= c,
                s_ij >= c || s_ik >= c,
                s_jk >= c || s_ik >= c,
            ],
            TriangleFilter::Beta(c) => [
                s_ij + s_jk >= c,
                s_ij + s_ik >= c,
                s_jk + s_ik >= c,
            ],
            TriangleFilter::Gamma(c) => [
                s_ij >= 0 && s_jk >= c && s_ik <= 0,
                s_ij >= 0 && s_jk <= 0 && s_ik >= c,
                s_ij <= 0 && s_jk >= c && s_ik >= 0,
            ],
        }
    }
}
