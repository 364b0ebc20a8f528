//! End-to-end front-end: dataset → similarity → model → solver → partition.

use crate::dataset::{Dataset, DatasetReader};
use crate::decode::{decode_partition, Partition};
use crate::error::{Error, Result};
use crate::heuristic::CutHeuristicResult;
use crate::model::{write_lp, Model, ModelConfig};
use crate::similarity::SimilarityMatrix;
use crate::solver::{SolveStatus, Solver};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Result of one solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Status reported by the backend (always a success status).
    pub status: SolveStatus,
    /// Constraints in the generated model.
    pub num_constraints: usize,
    /// Variables in the generated model.
    pub num_variables: usize,
    /// Objective value reported by the backend.
    pub objective_value: f64,
    /// Time spent inside the backend.
    pub solver_time: Duration,
    /// Cut heuristic diagnostics, for heuristic-derived formulations.
    pub heuristic: Option<CutHeuristicResult>,
    /// Group label per record.
    pub partition: Partition,
}

/// A clique-partitioning instance over categorical records.
///
/// The similarity matrix is computed once on construction; every model built
/// afterwards reads it.
///
/// ```rust
/// use regnier::{Dataset, ExhaustiveSolver, Formulation, ModelConfig, RegnierProblem};
///
/// let data = Dataset::parse("a b\na b\nx y\n").unwrap();
/// let problem = RegnierProblem::new(&data);
///
/// let solution = problem
///     .solve(&ModelConfig::new(Formulation::Base), &ExhaustiveSolver::new())
///     .unwrap();
/// assert!(solution.partition.same_group(0, 1));
/// assert!(!solution.partition.same_group(0, 2));
/// ```
#[derive(Debug, Clone)]
pub struct RegnierProblem {
    similarity: SimilarityMatrix,
}

impl RegnierProblem {
    /// Build from a dataset.
    pub fn new(dataset: &Dataset) -> Self {
        Self {
            similarity: SimilarityMatrix::from_dataset(dataset),
        }
    }

    /// Build from a precomputed similarity matrix.
    pub fn from_similarity(similarity: SimilarityMatrix) -> Self {
        Self { similarity }
    }

    /// Load a whitespace-delimited dataset with the default `?` missing token.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let dataset = DatasetReader::new().read_path(path)?;
        Ok(Self::new(&dataset))
    }

    /// The similarity matrix.
    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Number of records.
    pub fn n_records(&self) -> usize {
        self.similarity.n()
    }

    /// Generate the model for `config` without solving it.
    pub fn build_model(&self, config: &ModelConfig) -> Result<Model> {
        Model::build(&self.similarity, config)
    }

    /// Generate the model for `config` and write it in LP format.
    ///
    /// Returns the heuristic diagnostics of the generated model, if any.
    pub fn write_lp<W: Write>(
        &self,
        config: &ModelConfig,
        out: &mut W,
    ) -> Result<Option<CutHeuristicResult>> {
        let model = self.build_model(config)?;
        write_lp(&model, out)?;
        Ok(model.heuristic().copied())
    }

    /// Generate, solve, and decode.
    ///
    /// # Errors
    ///
    /// - configuration errors from [`Model::build`];
    /// - [`Error::Solver`] if the backend does not report a success status;
    /// - [`Error::DimensionMismatch`] if the backend returns the wrong number of values.
    pub fn solve<S: Solver + ?Sized>(&self, config: &ModelConfig, solver: &S) -> Result<Solution> {
        let span = tracing::info_span!(
            "solve",
            formulation = %config.formulation,
            solver = solver.name(),
            n = self.n_records()
        );
        let _guard = span.enter();

        let model = self.build_model(config)?;
        let output = solver.solve(&model);

        if !output.status.is_success() {
            tracing::warn!(status = %output.status, message = ?output.message, "solver failed");
            return Err(Error::Solver {
                status: output.status,
                message: output.message,
            });
        }

        let partition = decode_partition(model.variable_map(), &output.values)?;

        tracing::info!(
            status = %output.status,
            variables = model.num_variables(),
            constraints = model.num_constraints(),
            objective = output.objective_value,
            groups = partition.n_groups(),
            solver_time = ?output.elapsed,
            "solved"
        );

        Ok(Solution {
            status: output.status,
            num_constraints: model.num_constraints(),
            num_variables: model.num_variables(),
            objective_value: output.objective_value,
            solver_time: output.elapsed,
            heuristic: model.heuristic().copied(),
            partition,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Formulation;
    use crate::solver::{ExhaustiveSolver, SolverOutput};

    struct Failing(SolveStatus);

    impl Solver for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn solve(&self, _model: &Model) -> SolverOutput {
            SolverOutput::failed(self.0, "stub", Duration::ZERO)
        }
    }

    struct Truncated;

    impl Solver for Truncated {
        fn name(&self) -> &str {
            "truncated"
        }

        fn solve(&self, _model: &Model) -> SolverOutput {
            SolverOutput::solved(SolveStatus::Feasible, 0.0, vec![1.0], Duration::ZERO)
        }
    }

    fn problem() -> RegnierProblem {
        RegnierProblem::new(&Dataset::parse("a b\na b\nx y\n").unwrap())
    }

    #[test]
    fn failed_status_never_decodes() {
        for status in [SolveStatus::Infeasible, SolveStatus::Error] {
            let err = problem()
                .solve(&ModelConfig::new(Formulation::Base), &Failing(status))
                .unwrap_err();
            assert_eq!(
                err,
                Error::Solver {
                    status,
                    message: Some("stub".into())
                }
            );
        }
    }

    #[test]
    fn wrong_value_count_is_an_error() {
        let err = problem()
            .solve(&ModelConfig::new(Formulation::Base), &Truncated)
            .unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { expected: 3, found: 1 }));
    }

    #[test]
    fn configuration_errors_precede_solving() {
        let err = problem()
            .solve(
                &ModelConfig::new(Formulation::Gamma).with_cut(1),
                &ExhaustiveSolver::new(),
            )
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnexpectedCut {
                formulation: Formulation::Gamma
            }
        );
    }

    #[test]
    fn solution_reports_model_size() {
        let s = problem()
            .solve(&ModelConfig::new(Formulation::Base), &ExhaustiveSolver::new())
            .unwrap();
        assert_eq!(s.num_variables, 3);
        assert_eq!(s.num_constraints, 3);
        assert!(s.heuristic.is_none());
        assert_eq!(s.status, SolveStatus::Optimal);
    }

    #[test]
    fn write_lp_returns_heuristic() {
        let mut buf = Vec::new();
        let h = problem()
            .write_lp(&ModelConfig::new(Formulation::AlphaPlus), &mut buf)
            .unwrap();
        assert!(h.is_some());
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("\\ENCODING"));
        assert!(text.contains("alpha-plus model"));
    }

    #[test]
    fn from_path_reports_io_errors() {
        let err = RegnierProblem::from_path("/nonexistent/regnier/data.txt").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
