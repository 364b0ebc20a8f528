//! Solver boundary.
//!
//! The core never solves the program itself: it hands a [`Model`] to a
//! [`Solver`] and reads back a [`SolverOutput`] whose `values` are indexed by
//! [`VarId`](crate::model::VarId). Failures are statuses, not panics and not
//! default values; [`RegnierProblem::solve`](crate::RegnierProblem::solve)
//! refuses to decode anything but [`SolveStatus::Optimal`] or
//! [`SolveStatus::Feasible`].
//!
//! Backends:
//!
//! - [`ExhaustiveSolver`]: exact enumeration for tiny binary models. Useful as
//!   a reference and in tests.
//! - `GoodLpSolver` (feature `good_lp`): `good_lp` with the pure-Rust
//!   `microlp` backend, binary or continuous.

mod exhaustive;
#[cfg(feature = "good_lp")]
mod milp;

pub use exhaustive::ExhaustiveSolver;
#[cfg(feature = "good_lp")]
pub use milp::GoodLpSolver;

use crate::model::Model;
use std::fmt;
use std::time::Duration;

/// Outcome class reported by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SolveStatus {
    /// Proven optimal.
    Optimal,
    /// Feasible, optimality not proven (e.g. a limit was hit).
    Feasible,
    /// No feasible assignment exists.
    Infeasible,
    /// Backend failure or unsupported model.
    Error,
}

impl SolveStatus {
    /// Whether the values may be decoded.
    pub fn is_success(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Feasible => "feasible",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Error => "error",
        };
        f.pad(s)
    }
}

/// What a backend returns.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverOutput {
    /// Outcome.
    pub status: SolveStatus,
    /// Objective value (meaningless unless the status is a success).
    pub objective_value: f64,
    /// Variable values by id.
    pub values: Vec<f64>,
    /// Time spent inside the backend.
    pub elapsed: Duration,
    /// Backend diagnostic.
    pub message: Option<String>,
}

impl SolverOutput {
    /// A successful output.
    pub fn solved(
        status: SolveStatus,
        objective_value: f64,
        values: Vec<f64>,
        elapsed: Duration,
    ) -> Self {
        Self {
            status,
            objective_value,
            values,
            elapsed,
            message: None,
        }
    }

    /// A failed output carrying no values.
    pub fn failed(status: SolveStatus, message: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            status,
            objective_value: 0.0,
            values: Vec::new(),
            elapsed,
            message: Some(message.into()),
        }
    }
}

/// A MILP/LP backend.
pub trait Solver {
    /// Short backend name for diagnostics.
    fn name(&self) -> &str;

    /// Maximize `model`'s objective subject to its constraints.
    fn solve(&self, model: &Model) -> SolverOutput;
}

impl<S: Solver + ?Sized> Solver for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn solve(&self, model: &Model) -> SolverOutput {
        (**self).solve(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_statuses() {
        assert!(SolveStatus::Optimal.is_success());
        assert!(SolveStatus::Feasible.is_success());
        assert!(!SolveStatus::Infeasible.is_success());
        assert!(!SolveStatus::Error.is_success());
    }

    #[test]
    fn failed_output_has_no_values() {
        let out = SolverOutput::failed(SolveStatus::Error, "boom", Duration::ZERO);
        assert!(out.values.is_empty());
        assert_eq!(out.message.as_deref(), Some("boom"));
    }
}
