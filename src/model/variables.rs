//! Pairwise decision variables.
//!
//! Pair `(i, j)` with `i < j` gets id
//!
//! ```text
//! id(i, j) = i·(2n − i − 1)/2 + (j − i − 1)
//! ```
//!
//! which enumerates the upper triangle row by row. Pairs with `i ≥ j` have no
//! id at all: [`VariableMap::index`] returns `None` for them, so no caller can
//! mistake an absent cell for variable `0`.

use std::fmt;

/// Identity of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarId(pub usize);

impl VarId {
    /// Position in the solver's value vector.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Domain of the decision variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VarKind {
    /// `{0, 1}`.
    Binary,
    /// `[0, 1]` (LP relaxation).
    Continuous,
}

/// One pairwise "same cluster" variable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variable {
    /// Identity.
    pub id: VarId,
    /// Smaller record index.
    pub i: usize,
    /// Larger record index.
    pub j: usize,
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
    /// Domain.
    pub kind: VarKind,
    /// Objective coefficient, `S[i][j]`.
    pub objective: i32,
}

impl Variable {
    /// LP-format name, `v.<i>.<j>`.
    pub fn name(&self) -> VarName {
        VarName(self.i, self.j)
    }
}

/// Display adapter for variable names.
#[derive(Debug, Clone, Copy)]
pub struct VarName(usize, usize);

impl VarName {
    /// Name of pair `(i, j)`.
    pub fn new(i: usize, j: usize) -> Self {
        Self(i, j)
    }
}

impl fmt::Display for VarName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v.{}.{}", self.0, self.1)
    }
}

/// Bijection between pairs `i < j` of `n` records and variable ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableMap {
    n: usize,
}

impl VariableMap {
    /// Map for `n` records.
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    /// Number of records.
    pub fn n_records(&self) -> usize {
        self.n
    }

    /// Number of variables, `n(n−1)/2`.
    pub fn len(&self) -> usize {
        self.n * self.n.saturating_sub(1) / 2
    }

    /// Whether there are no variables (fewer than two records).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Variable of pair `(i, j)`; `None` unless `i < j < n`.
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> Option<VarId> {
        if i < j && j < self.n {
            Some(self.id_unchecked(i, j))
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn id_unchecked(&self, i: usize, j: usize) -> VarId {
        VarId(i * (2 * self.n - i - 1) / 2 + (j - i - 1))
    }

    /// Pair of a variable id.
    pub fn pair(&self, id: VarId) -> Option<(usize, usize)> {
        if id.0 >= self.len() {
            return None;
        }
        // Walk rows; row i holds n - i - 1 ids.
        let mut start = 0;
        for i in 0..self.n {
            let width = self.n - i - 1;
            if id.0 < start + width {
                return Some((i, i + 1 + (id.0 - start)));
            }
            start += width;
        }
        None
    }

    /// Iterate `(i, j, id)` in id order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize, VarId)> + '_ {
        let n = self.n;
        (0..n)
            .flat_map(move |i| ((i + 1)..n).map(move |j| (i, j)))
            .enumerate()
            .map(|(id, (i, j))| (i, j, VarId(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_enumerate_upper_triangle() {
        let map = VariableMap::new(4);
        assert_eq!(map.len(), 6);
        let expected = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
        for (id, &(i, j)) in expected.iter().enumerate() {
            assert_eq!(map.index(i, j), Some(VarId(id)));
            assert_eq!(map.pair(VarId(id)), Some((i, j)));
        }
        assert_eq!(map.pair(VarId(6)), None);
    }

    #[test]
    fn no_variable_outside_upper_triangle() {
        let map = VariableMap::new(3);
        assert_eq!(map.index(0, 0), None);
        assert_eq!(map.index(1, 0), None);
        assert_eq!(map.index(2, 3), None);
    }

    #[test]
    fn pairs_match_index() {
        let map = VariableMap::new(7);
        let mut count = 0;
        for (i, j, id) in map.pairs() {
            assert_eq!(map.index(i, j), Some(id));
            count += 1;
        }
        assert_eq!(count, map.len());
    }

    #[test]
    fn degenerate_sizes() {
        assert!(VariableMap::new(0).is_empty());
        assert!(VariableMap::new(1).is_empty());
        assert_eq!(VariableMap::new(2).len(), 1);
    }

    #[test]
    fn variable_name_format() {
        let v = Variable {
            id: VarId(0),
            i: 3,
            j: 11,
            lower: 0.0,
            upper: 1.0,
            kind: VarKind::Binary,
            objective: -2,
        };
        assert_eq!(v.name().to_string(), "v.3.11");
    }
}
