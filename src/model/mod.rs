//! Clique-partitioning models with redundant triangle elimination.
//!
//! Every pair `i < j` of records gets a variable `x_ij ∈ {0, 1}` ("same
//! cluster"), and the model maximizes
//!
//! ```text
//! Σ_{i<j} S[i][j] · x_ij
//! ```
//!
//! subject to the triangle inequalities that make "same cluster" transitive.
//! The full set has `3·C(n, 3)` constraints, which is what limits the size of
//! instances a solver can take. The reduced formulations keep only the
//! constraints that the redundancy results cannot rule out, selected by a
//! [`TriangleFilter`] and a cut:
//!
//! | Formulation | Filter | Cut |
//! |-------------|--------|-----|
//! | [`Formulation::Base`] | all | — |
//! | [`Formulation::Alpha`] | α | explicit, default 0 |
//! | [`Formulation::AlphaPlus`] | α | positive connectivity cut |
//! | [`Formulation::Beta`] | β | explicit, default 0 |
//! | [`Formulation::BetaPlus`] | β | positive connectivity cut |
//! | [`Formulation::Gamma`] | γ | negative connectivity cut |
//!
//! ## Usage
//!
//! ```rust
//! use regnier::dataset::Dataset;
//! use regnier::model::{Formulation, Model, ModelConfig};
//! use regnier::similarity::SimilarityMatrix;
//!
//! let ds = Dataset::parse("a b\na b\nx y\nx b\n").unwrap();
//! let s = SimilarityMatrix::from_dataset(&ds);
//!
//! let base = Model::build(&s, &ModelConfig::new(Formulation::Base)).unwrap();
//! assert_eq!(base.num_constraints(), 3 * 4);
//!
//! let alpha = Model::build(&s, &ModelConfig::new(Formulation::Alpha)).unwrap();
//! assert!(alpha.num_constraints() <= base.num_constraints());
//! ```

mod constraint;
mod formulation;
mod lp;
mod variables;

pub use constraint::{Constraint, Sense, Triangle, TriangleFilter};
pub use formulation::{Formulation, ModelConfig};
pub use lp::write_lp;
pub use variables::{VarId, VarKind, VarName, Variable, VariableMap};

use crate::error::Result;
use crate::heuristic::CutHeuristicResult;
use crate::similarity::SimilarityMatrix;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Objective direction. Clique partitioning always maximizes agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectiveSense {
    /// Maximize.
    Maximize,
}

/// A generated model, ready for a [`Solver`](crate::solver::Solver).
#[derive(Debug, Clone)]
pub struct Model {
    formulation: Formulation,
    filter: TriangleFilter,
    kind: VarKind,
    map: VariableMap,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    heuristic: Option<CutHeuristicResult>,
}

impl Model {
    /// Generate the variables and filtered constraints for `config`.
    ///
    /// # Errors
    ///
    /// [`Error::UnexpectedCut`](crate::Error::UnexpectedCut) for an explicit cut
    /// on a formulation that does not take one.
    pub fn build(similarity: &SimilarityMatrix, config: &ModelConfig) -> Result<Self> {
        let (filter, heuristic) = config.resolve(similarity)?;
        let kind = if config.relaxation {
            VarKind::Continuous
        } else {
            VarKind::Binary
        };

        let map = VariableMap::new(similarity.n());
        let variables = map
            .pairs()
            .map(|(i, j, id)| Variable {
                id,
                i,
                j,
                lower: 0.0,
                upper: 1.0,
                kind,
                objective: similarity.get(i, j),
            })
            .collect();
        let constraints = triangle_constraints(similarity, &map, filter);

        let n = similarity.n();
        tracing::debug!(
            formulation = %config.formulation,
            cut = ?filter.cut(),
            variables = map.len(),
            constraints = constraints.len(),
            candidates = base_constraint_count(n),
            "model generated"
        );

        Ok(Self {
            formulation: config.formulation,
            filter,
            kind,
            map,
            variables,
            constraints,
            heuristic,
        })
    }

    /// Formulation the model was generated for.
    pub fn formulation(&self) -> Formulation {
        self.formulation
    }

    /// Resolved filter.
    pub fn filter(&self) -> TriangleFilter {
        self.filter
    }

    /// Cut the filter used, if any.
    pub fn cut(&self) -> Option<i32> {
        self.filter.cut()
    }

    /// Heuristic diagnostics, for heuristic-derived cuts.
    pub fn heuristic(&self) -> Option<&CutHeuristicResult> {
        self.heuristic.as_ref()
    }

    /// Variable domain.
    pub fn kind(&self) -> VarKind {
        self.kind
    }

    /// Objective direction.
    pub fn sense(&self) -> ObjectiveSense {
        ObjectiveSense::Maximize
    }

    /// Pair ↔ variable mapping.
    pub fn variable_map(&self) -> &VariableMap {
        &self.map
    }

    /// Variables in id order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Emitted constraints, triples in ascending order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Number of variables.
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Number of emitted constraints.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Objective value of an assignment indexed by variable id.
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.variables
            .iter()
            .zip(values)
            .map(|(v, x)| f64::from(v.objective) * x)
            .sum()
    }

    /// Render the model in LP text format.
    pub fn to_lp_string(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = write_lp(self, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// `3·C(n, 3)`: size of the unfiltered constraint set.
pub fn base_constraint_count(n: usize) -> usize {
    if n < 3 {
        return 0;
    }
    n * (n - 1) * (n - 2) / 2
}

fn triangle_constraints(
    similarity: &SimilarityMatrix,
    map: &VariableMap,
    filter: TriangleFilter,
) -> Vec<Constraint> {
    let n = similarity.n();

    #[cfg(feature = "parallel")]
    {
        (0..n)
            .into_par_iter()
            .flat_map_iter(|i| triples_from(similarity, map, filter, i))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        (0..n)
            .flat_map(|i| triples_from(similarity, map, filter, i))
            .collect()
    }
}

/// Constraints of every triple whose smallest index is `i`.
fn triples_from(
    similarity: &SimilarityMatrix,
    map: &VariableMap,
    filter: TriangleFilter,
    i: usize,
) -> Vec<Constraint> {
    let n = similarity.n();
    let mut out = Vec::new();
    for j in (i + 1)..n {
        let s_ij = similarity.get(i, j);
        for k in (j + 1)..n {
            let s_jk = similarity.get(j, k);
            let s_ik = similarity.get(i, k);
            let keep = filter.keep(s_ij, s_jk, s_ik);
            for (triangle, kept) in Triangle::ALL.into_iter().zip(keep) {
                if kept {
                    out.push(Constraint::triangle(map, i, j, k, triangle));
                }
            }
        }
    }
    out
}
