//! `good_lp` backend using the pure-Rust `microlp` solver.

use super::{SolveStatus, Solver, SolverOutput};
use crate::model::{Model, VarKind};
use good_lp::solvers::microlp::microlp;
use good_lp::{variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel};
use std::time::Instant;

/// MILP/LP backend through `good_lp`.
#[derive(Debug, Clone, Default)]
pub struct GoodLpSolver;

impl GoodLpSolver {
    /// Create the backend.
    pub fn new() -> Self {
        Self
    }
}

impl Solver for GoodLpSolver {
    fn name(&self) -> &str {
        "good_lp/microlp"
    }

    fn solve(&self, model: &Model) -> SolverOutput {
        let started = Instant::now();

        let mut vars = ProblemVariables::new();
        let handles: Vec<good_lp::Variable> = model
            .variables()
            .iter()
            .map(|v| {
                let def = match v.kind {
                    VarKind::Binary => variable().binary(),
                    VarKind::Continuous => variable().min(v.lower).max(v.upper),
                };
                vars.add(def)
            })
            .collect();

        let mut objective = Expression::with_capacity(handles.len());
        for (v, &x) in model.variables().iter().zip(&handles) {
            objective.add_mul(f64::from(v.objective), x);
        }

        let mut problem = vars.maximise(objective).using(microlp);
        for c in model.constraints() {
            let mut lhs = Expression::with_capacity(3);
            for &(id, coef) in &c.terms {
                lhs.add_mul(f64::from(coef), handles[id.index()]);
            }
            problem = problem.with(lhs.leq(f64::from(c.rhs)));
        }

        match problem.solve() {
            Ok(solution) => {
                let values: Vec<f64> = handles.iter().map(|&x| solution.value(x)).collect();
                let objective_value = model.objective_value(&values);
                SolverOutput::solved(
                    SolveStatus::Optimal,
                    objective_value,
                    values,
                    started.elapsed(),
                )
            }
            Err(ResolutionError::Infeasible) => SolverOutput::failed(
                SolveStatus::Infeasible,
                "model is infeasible",
                started.elapsed(),
            ),
            Err(err) => SolverOutput::failed(SolveStatus::Error, err.to_string(), started.elapsed()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Formulation, ModelConfig};
    use crate::similarity::SimilarityMatrix;

    #[test]
    fn solves_small_binary_model() {
        let s = SimilarityMatrix::from_fn(3, 3, |i, j| match (i, j) {
            (0, 1) => 2,
            (0, 2) => -1,
            _ => 2,
        })
        .unwrap();
        let model = Model::build(&s, &ModelConfig::new(Formulation::Base)).unwrap();
        let out = GoodLpSolver::new().solve(&model);
        assert_eq!(out.status, SolveStatus::Optimal);
        assert!((out.objective_value - 3.0).abs() < 1e-6);
    }
}
