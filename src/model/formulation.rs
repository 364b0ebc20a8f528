//! Model variants and their configuration.

use crate::error::{Error, Result};
use crate::heuristic::{ConnectivityCut, CutHeuristicResult, CutSearch, EdgeSign};
use crate::similarity::SimilarityMatrix;
use std::fmt;
use std::str::FromStr;

use super::constraint::TriangleFilter;

/// Which triangle constraints a model keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Formulation {
    /// Every triangle constraint.
    Base,
    /// Drop a constraint unless one of its two positive edges reaches the cut.
    Alpha,
    /// [`Formulation::Alpha`] with the positive connectivity cut.
    AlphaPlus,
    /// Drop a constraint unless its two positive edges sum to the cut.
    Beta,
    /// [`Formulation::Beta`] with the positive connectivity cut.
    BetaPlus,
    /// Sign-pattern filter with the negative connectivity cut.
    Gamma,
}

impl Formulation {
    /// All formulations, base first.
    pub const ALL: [Formulation; 6] = [
        Formulation::Base,
        Formulation::Alpha,
        Formulation::AlphaPlus,
        Formulation::Beta,
        Formulation::BetaPlus,
        Formulation::Gamma,
    ];

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Formulation::Base => "base",
            Formulation::Alpha => "alpha",
            Formulation::AlphaPlus => "alpha-plus",
            Formulation::Beta => "beta",
            Formulation::BetaPlus => "beta-plus",
            Formulation::Gamma => "gamma",
        }
    }

    /// Edge selection of the heuristic this formulation derives its cut from.
    pub fn heuristic_sign(self) -> Option<EdgeSign> {
        match self {
            Formulation::AlphaPlus | Formulation::BetaPlus => Some(EdgeSign::Positive),
            Formulation::Gamma => Some(EdgeSign::Negative),
            Formulation::Base | Formulation::Alpha | Formulation::Beta => None,
        }
    }

    /// Whether a caller may pass an explicit cut.
    pub fn accepts_cut(self) -> bool {
        matches!(self, Formulation::Alpha | Formulation::Beta)
    }
}

impl fmt::Display for Formulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Formulation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Formulation::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| Error::Other(format!("unknown formulation '{s}'")))
    }
}

/// Configuration of one model-generation call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelConfig {
    /// Constraint-filtering variant.
    pub formulation: Formulation,
    /// Explicit cut for [`Formulation::Alpha`] / [`Formulation::Beta`].
    pub cut: Option<i32>,
    /// Continuous `[0, 1]` variables instead of binaries.
    pub relaxation: bool,
    /// Search strategy for heuristic-derived cuts.
    pub cut_search: CutSearch,
}

impl ModelConfig {
    /// Integral model of the given formulation, default cut.
    pub fn new(formulation: Formulation) -> Self {
        Self {
            formulation,
            cut: None,
            relaxation: false,
            cut_search: CutSearch::default(),
        }
    }

    /// Set an explicit cut.
    pub fn with_cut(mut self, cut: i32) -> Self {
        self.cut = Some(cut);
        self
    }

    /// Solve the LP relaxation instead of the integer program.
    pub fn with_relaxation(mut self, relaxation: bool) -> Self {
        self.relaxation = relaxation;
        self
    }

    /// Set the heuristic search strategy.
    pub fn with_cut_search(mut self, cut_search: CutSearch) -> Self {
        self.cut_search = cut_search;
        self
    }

    /// Check the formulation/cut combination without running anything.
    pub fn validate(&self) -> Result<()> {
        if self.cut.is_some() && !self.formulation.accepts_cut() {
            return Err(Error::UnexpectedCut {
                formulation: self.formulation,
            });
        }
        Ok(())
    }

    /// Turn the configuration into a concrete filter, running the heuristic if needed.
    pub(crate) fn resolve(
        &self,
        similarity: &SimilarityMatrix,
    ) -> Result<(TriangleFilter, Option<CutHeuristicResult>)> {
        self.validate()?;

        let heuristic = self.formulation.heuristic_sign().map(|sign| {
            ConnectivityCut::new(sign)
                .with_search(self.cut_search)
                .find(similarity)
        });
        let derived = heuristic.map(|h| h.cut);
        let explicit = self.cut.unwrap_or(0);

        let filter = match self.formulation {
            Formulation::Base => TriangleFilter::All,
            Formulation::Alpha => TriangleFilter::Alpha(explicit),
            Formulation::Beta => TriangleFilter::Beta(explicit),
            Formulation::AlphaPlus => TriangleFilter::Alpha(derived.unwrap_or(0)),
            Formulation::BetaPlus => TriangleFilter::Beta(derived.unwrap_or(0)),
            Formulation::Gamma => TriangleFilter::Gamma(derived.unwrap_or(0)),
        };

        Ok((filter, heuristic))
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::new(Formulation::Base)
    }
}
