//! Exact enumeration over binary assignments.
//!
//! Tries all `2^V` assignments of a binary model and keeps the first one (in
//! ascending bit-mask order) with the best objective. Only viable for a
//! handful of records: `n = 6` already means 15 variables.

use super::{SolveStatus, Solver, SolverOutput};
use crate::model::{Model, VarKind};
use std::time::Instant;

/// Brute-force reference solver for small binary models.
#[derive(Debug, Clone)]
pub struct ExhaustiveSolver {
    /// Largest variable count accepted.
    max_variables: usize,
}

impl ExhaustiveSolver {
    /// Create a solver accepting up to 20 variables.
    pub fn new() -> Self {
        Self { max_variables: 20 }
    }

    /// Set the largest variable count accepted (capped at 30).
    pub fn with_max_variables(mut self, max_variables: usize) -> Self {
        self.max_variables = max_variables.min(30);
        self
    }
}

impl Default for ExhaustiveSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for ExhaustiveSolver {
    fn name(&self) -> &str {
        "exhaustive"
    }

    fn solve(&self, model: &Model) -> SolverOutput {
        let started = Instant::now();
        let v = model.num_variables();

        if model.kind() != VarKind::Binary {
            return SolverOutput::failed(
                SolveStatus::Error,
                "exhaustive solver only handles binary models",
                started.elapsed(),
            );
        }
        if v > self.max_variables {
            return SolverOutput::failed(
                SolveStatus::Error,
                format!(
                    "{v} variables exceed the exhaustive limit of {}",
                    self.max_variables
                ),
                started.elapsed(),
            );
        }

        // Constraint terms as (bit index, coefficient).
        let rows: Vec<[(u32, i32); 3]> = model
            .constraints()
            .iter()
            .map(|c| c.terms.map(|(id, coef)| (id.index() as u32, i32::from(coef))))
            .collect();
        let weights: Vec<i64> = model
            .variables()
            .iter()
            .map(|var| i64::from(var.objective))
            .collect();

        let mut best: Option<(i64, u64)> = None;
        for mask in 0u64..(1u64 << v) {
            let feasible = rows.iter().all(|row| {
                let lhs: i32 = row
                    .iter()
                    .map(|&(bit, coef)| if (mask >> bit) & 1 == 1 { coef } else { 0 })
                    .sum();
                lhs <= 1
            });
            if !feasible {
                continue;
            }
            let objective: i64 = weights
                .iter()
                .enumerate()
                .filter(|&(bit, _)| (mask >> bit) & 1 == 1)
                .map(|(_, w)| w)
                .sum();
            if best.map_or(true, |(b, _)| objective > b) {
                best = Some((objective, mask));
            }
        }

        match best {
            Some((objective, mask)) => {
                let values = (0..v)
                    .map(|bit| if (mask >> bit) & 1 == 1 { 1.0 } else { 0.0 })
                    .collect();
                SolverOutput::solved(
                    SolveStatus::Optimal,
                    objective as f64,
                    values,
                    started.elapsed(),
                )
            }
            None => SolverOutput::failed(
                SolveStatus::Infeasible,
                "no assignment satisfies the constraints",
                started.elapsed(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Formulation, ModelConfig};
    use crate::similarity::SimilarityMatrix;

    fn triangle(s01: i32, s02: i32, s12: i32) -> SimilarityMatrix {
        SimilarityMatrix::from_fn(3, 3, |i, j| match (i, j) {
            (0, 1) => s01,
            (0, 2) => s02,
            _ => s12,
        })
        .unwrap()
    }

    #[test]
    fn enforces_transitivity() {
        // Unconstrained optimum x01 = x12 = 1, x02 = 0 is intransitive.
        let s = triangle(2, -1, 2);
        let model = Model::build(&s, &ModelConfig::new(Formulation::Base)).unwrap();
        let out = ExhaustiveSolver::new().solve(&model);
        assert_eq!(out.status, SolveStatus::Optimal);
        // Best transitive choice: all together, 2 - 1 + 2 = 3.
        assert_eq!(out.objective_value, 3.0);
        assert_eq!(out.values, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn rejects_continuous_models() {
        let s = triangle(1, 1, 1);
        let model = Model::build(
            &s,
            &ModelConfig::new(Formulation::Base).with_relaxation(true),
        )
        .unwrap();
        let out = ExhaustiveSolver::new().solve(&model);
        assert_eq!(out.status, SolveStatus::Error);
        assert!(out.values.is_empty());
    }

    #[test]
    fn rejects_oversize_models() {
        let s = triangle(1, 1, 1);
        let model = Model::build(&s, &ModelConfig::new(Formulation::Base)).unwrap();
        let out = ExhaustiveSolver::new().with_max_variables(2).solve(&model);
        assert_eq!(out.status, SolveStatus::Error);
        assert!(out.message.unwrap().contains("exceed"));
    }
}
