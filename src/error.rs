use crate::model::Formulation;
use crate::solver::SolveStatus;
use thiserror::Error;

/// Result alias for `regnier`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by dataset loading, model construction and solving.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Input was empty.
    #[error("empty input provided")]
    EmptyInput,

    /// A dataset row does not have the column count fixed by the first row.
    #[error("ragged row at line {line}: expected {expected} columns, found {found}")]
    RaggedRow {
        /// 1-based line number in the source.
        line: usize,
        /// Column count of the first row.
        expected: usize,
        /// Column count of the offending row.
        found: usize,
    },

    /// Dimension mismatch (usize).
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// An explicit cut was given to a formulation that derives (or ignores) its own.
    #[error("formulation '{formulation}' does not accept an explicit cut")]
    UnexpectedCut {
        /// The offending formulation.
        formulation: Formulation,
    },

    /// The solver did not report a usable solution.
    #[error("solver finished with status {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Solver {
        /// Status reported by the backend.
        status: SolveStatus,
        /// Backend diagnostic, if any.
        message: Option<String>,
    },

    /// I/O failure while reading a dataset or writing a model.
    #[error("i/o error: {0}")]
    Io(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
