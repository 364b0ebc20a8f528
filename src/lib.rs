//! # regnier
//!
//! Clustering of categorical data as clique partitioning (the Régnier problem).
//!
//! Every pair of records gets a binary "same cluster" variable weighted by the
//! pair's similarity; triangle inequalities over all triples make membership
//! transitive; a MILP solver maximizes total agreement. The reduced
//! formulations drop triangle constraints that are provably redundant, with a
//! connectivity heuristic choosing the threshold.
//!
//! ```text
//! Dataset → SimilarityMatrix → (ConnectivityCut) → Model → Solver → Partition
//! ```
//!
//! The solver is a seam: [`Solver`] is implemented by the small exact
//! [`ExhaustiveSolver`] and, with feature `good_lp`, by `GoodLpSolver`.
//!
//! **Default build** includes `parallel` (rayon sharding of similarity and
//! triangle generation). `serde` derives (de)serialization for configuration
//! and result types; `cli` builds the `regnier` binary.

pub mod dataset;
pub mod decode;
/// Error types used across `regnier`.
pub mod error;
pub mod heuristic;
pub mod model;
pub mod problem;
pub mod similarity;
pub mod solver;

#[cfg(test)]
mod pipeline_tests;

pub use dataset::{Dataset, DatasetReader, MISSING};
pub use decode::{decode_partition, Partition};
pub use error::{Error, Result};
pub use heuristic::{
    find_cut, ConnectivityCut, CutHeuristicResult, CutSearch, EdgeSign, HeuristicTimings,
};
pub use model::{Formulation, Model, ModelConfig, TriangleFilter, VarKind, VariableMap};
pub use problem::{RegnierProblem, Solution};
pub use similarity::SimilarityMatrix;
pub use solver::{ExhaustiveSolver, SolveStatus, Solver, SolverOutput};

#[cfg(feature = "good_lp")]
pub use solver::GoodLpSolver;
