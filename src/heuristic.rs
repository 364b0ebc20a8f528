//! Connectivity-preserving cut heuristic.
//!
//! The reduced formulations drop triangle constraints whose similarities fall
//! below a threshold. This module picks that threshold: the largest weight
//! `c` such that the graph of selected edges with weight `≥ c` still spans
//! every record.
//!
//! Two edge selections are used:
//!
//! | Sign | Edges | Consumer |
//! |------|-------|----------|
//! | [`EdgeSign::Positive`] | `S[i][j] ≥ 0` | α⁺, β⁺ |
//! | [`EdgeSign::Negative`] | `S[i][j] ≤ 0` | γ |
//!
//! ## Search strategies
//!
//! The threshold is the minimum edge of a maximum-bottleneck spanning tree.
//! [`CutSearch::Bottleneck`] finds it with one Kruskal pass over the edges in
//! descending weight order: the weight of the union that first joins the
//! graph into a single component is the cut. `O(E log E)`.
//!
//! [`CutSearch::ThresholdSweep`] walks the distinct weights in ascending
//! order, cumulatively dropping edges below each candidate, and stops at the
//! first candidate that disconnects the graph. It costs a connectivity check
//! per distinct weight and exists mostly as a cross-check.
//!
//! If the selected graph is never connected (in particular when no edge is
//! selected) the cut falls back to `0`. That fallback is not verified to keep
//! the graph connected.

use crate::similarity::SimilarityMatrix;
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use std::fmt;
use std::time::{Duration, Instant};

/// Which similarities become edges of the connectivity graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeSign {
    /// Edges with `S[i][j] ≥ 0`.
    Positive,
    /// Edges with `S[i][j] ≤ 0`.
    Negative,
}

impl EdgeSign {
    #[inline]
    fn admits(self, weight: i32) -> bool {
        match self {
            EdgeSign::Positive => weight >= 0,
            EdgeSign::Negative => weight <= 0,
        }
    }
}

impl fmt::Display for EdgeSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeSign::Positive => write!(f, "positive"),
            EdgeSign::Negative => write!(f, "negative"),
        }
    }
}

/// Algorithm used to locate the cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CutSearch {
    /// Kruskal pass with union-find (default).
    #[default]
    Bottleneck,
    /// Ascending sweep with a connectivity check per candidate.
    ThresholdSweep,
}

/// Wall-clock breakdown of one heuristic run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeuristicTimings {
    /// Whole run.
    pub total: Duration,
    /// Building the graph and its weight list.
    pub graph_construction: Duration,
    /// Searching for the cut.
    pub search: Duration,
}

/// Output of the cut heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CutHeuristicResult {
    /// Edge selection the cut was computed over.
    pub sign: EdgeSign,
    /// The cut value.
    pub cut: i32,
    /// Timing diagnostics.
    pub timings: HeuristicTimings,
}

/// Connectivity cut heuristic.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectivityCut {
    /// Edge selection.
    sign: EdgeSign,
    /// Search strategy.
    search: CutSearch,
}

impl ConnectivityCut {
    /// Create a heuristic over the given edge selection.
    pub fn new(sign: EdgeSign) -> Self {
        Self {
            sign,
            search: CutSearch::default(),
        }
    }

    /// Heuristic over non-negative similarities.
    pub fn positive() -> Self {
        Self::new(EdgeSign::Positive)
    }

    /// Heuristic over non-positive similarities.
    pub fn negative() -> Self {
        Self::new(EdgeSign::Negative)
    }

    /// Set the search strategy.
    pub fn with_search(mut self, search: CutSearch) -> Self {
        self.search = search;
        self
    }

    /// Run the heuristic.
    pub fn find(&self, similarity: &SimilarityMatrix) -> CutHeuristicResult {
        let started = Instant::now();

        let mut graph = self.build_graph(similarity);
        let graph_construction = started.elapsed();

        let search_started = Instant::now();
        let cut = match self.search {
            CutSearch::Bottleneck => bottleneck_cut(&graph),
            CutSearch::ThresholdSweep => sweep_cut(&mut graph),
        };
        let search = search_started.elapsed();

        let timings = HeuristicTimings {
            total: started.elapsed(),
            graph_construction,
            search,
        };

        tracing::debug!(
            sign = %self.sign,
            cut,
            graph_construction = ?timings.graph_construction,
            search = ?timings.search,
            total = ?timings.total,
            "connectivity cut found"
        );

        CutHeuristicResult {
            sign: self.sign,
            cut,
            timings,
        }
    }

    fn build_graph(&self, similarity: &SimilarityMatrix) -> UnGraph<(), i32> {
        let n = similarity.n();
        let mut graph = UnGraph::<(), i32>::with_capacity(n, 0);
        for _ in 0..n {
            let _ = graph.add_node(());
        }
        for (i, j, w) in similarity.upper_pairs() {
            if self.sign.admits(w) {
                let _ = graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), w);
            }
        }
        graph
    }
}

/// Run the heuristic with the default search strategy.
pub fn find_cut(similarity: &SimilarityMatrix, sign: EdgeSign) -> CutHeuristicResult {
    ConnectivityCut::new(sign).find(similarity)
}

fn bottleneck_cut(graph: &UnGraph<(), i32>) -> i32 {
    let n = graph.node_count();
    let mut edges: Vec<(usize, usize, i32)> = graph
        .edge_references()
        .map(|e| (e.source().index(), e.target().index(), *e.weight()))
        .collect();
    if edges.is_empty() {
        return 0;
    }
    edges.sort_unstable_by(|a, b| b.2.cmp(&a.2));

    let mut components = UnionFind::<usize>::new(n);
    let mut remaining = n;
    for (a, b, w) in edges {
        if components.union(a, b) {
            remaining -= 1;
            if remaining == 1 {
                return w;
            }
        }
    }
    0
}

fn sweep_cut(graph: &mut UnGraph<(), i32>) -> i32 {
    let mut candidates: Vec<i32> = graph.edge_weights().copied().collect();
    candidates.sort_unstable();
    candidates.dedup();

    let mut best = 0;
    for candidate in candidates {
        graph.retain_edges(|g, e| g[e] >= candidate);
        if connected_components(&*graph) == 1 {
            best = candidate;
        } else {
            break;
        }
    }
    best
}
