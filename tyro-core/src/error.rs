//! Error types for the Tyro core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::graph::VertexId;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::Graph`] mutations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// The vertex is not part of the graph.
    #[error("vertex {vertex} is not part of the graph")]
    UnknownVertex {
        /// The vertex that could not be resolved.
        vertex: VertexId,
    },
    /// An edge would connect a vertex to itself.
    #[error("self-loop on vertex {vertex} is not allowed")]
    SelfLoop {
        /// The vertex named on both ends of the edge.
        vertex: VertexId,
    },
    /// The edge already exists.
    #[error("edge {left} -- {right} already exists")]
    DuplicateEdge {
        /// First endpoint as supplied by the caller.
        left: VertexId,
        /// Second endpoint as supplied by the caller.
        right: VertexId,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// The vertex is not part of the graph.
        UnknownVertex => UnknownVertex { .. } => "GRAPH_UNKNOWN_VERTEX",
        /// An edge would connect a vertex to itself.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
        /// The edge already exists.
        DuplicateEdge => DuplicateEdge { .. } => "GRAPH_DUPLICATE_EDGE",
    }
}

/// An error produced by [`crate::GraphSource`] implementations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphSourceError {
    /// The source produced a graph without vertices.
    #[error("graph source produced no vertices")]
    EmptyGraph,
    /// Building the graph violated a graph invariant.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

define_error_codes! {
    /// Stable codes describing [`GraphSourceError`] variants.
    enum GraphSourceErrorCode for GraphSourceError {
        /// The source produced a graph without vertices.
        EmptyGraph => EmptyGraph => "GRAPH_SOURCE_EMPTY",
        /// Building the graph violated a graph invariant.
        Graph => Graph { .. } => "GRAPH_SOURCE_GRAPH",
    }
}

/// An error produced while a strategy attaches the newcomer.
///
/// Exhaustion of candidates is not an error; strategies simply stop early.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum StrategyError {
    /// The graph rejected an edge insertion.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// A strategy tried to add more edges than its budget allows.
    #[error("edge budget of {budget} is exhausted")]
    BudgetExhausted {
        /// The configured edge budget.
        budget: usize,
    },
    /// The community oracle never produced a defined partition.
    #[error("community oracle produced no partition after {attempts} attempts")]
    NoPartition {
        /// Number of oracle invocations performed.
        attempts: usize,
    },
    /// The resolution search stopped without hitting the target count.
    #[error(
        "resolution search did not reach {target} communities; closest was {closest} at resolution {resolution}"
    )]
    ResolutionNotConverged {
        /// Number of communities required.
        target: usize,
        /// Closest community count observed.
        closest: usize,
        /// Resolution that produced the closest count.
        resolution: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`StrategyError`] variants.
    enum StrategyErrorCode for StrategyError {
        /// The graph rejected an edge insertion.
        Graph => Graph { .. } => "STRATEGY_GRAPH",
        /// A strategy tried to add more edges than its budget allows.
        BudgetExhausted => BudgetExhausted { .. } => "STRATEGY_BUDGET_EXHAUSTED",
        /// The community oracle never produced a defined partition.
        NoPartition => NoPartition { .. } => "STRATEGY_NO_PARTITION",
        /// The resolution search stopped without hitting the target count.
        ResolutionNotConverged => ResolutionNotConverged { .. } => "STRATEGY_RESOLUTION_NOT_CONVERGED",
    }
}

/// Error type produced when configuring or running a [`crate::StrategyRunner`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TyroError {
    /// The edge budget must be greater than zero.
    #[error("edge_budget must be at least 1 (got {got})")]
    InvalidEdgeBudget {
        /// The invalid budget supplied by the caller.
        got: usize,
    },
    /// The graph source yielded a graph without vertices.
    #[error("graph source `{graph_source}` contains no vertices")]
    EmptyGraph {
        /// Identifier for the empty graph source.
        graph_source: Arc<str>,
    },
    /// Loading the graph failed.
    #[error("graph source `{graph_source}` failed: {error}")]
    GraphSource {
        /// Identifier for the graph source that failed.
        graph_source: Arc<str>,
        #[source]
        /// Underlying error raised by the source.
        error: GraphSourceError,
    },
    /// The strategy failed while attaching the newcomer.
    #[error("strategy `{strategy}` failed: {error}")]
    Strategy {
        /// Name of the strategy that failed.
        strategy: &'static str,
        #[source]
        /// Underlying strategy error.
        error: StrategyError,
    },
}

define_error_codes! {
    /// Stable codes describing [`TyroError`] variants.
    enum TyroErrorCode for TyroError {
        /// The edge budget must be greater than zero.
        InvalidEdgeBudget => InvalidEdgeBudget { .. } => "TYRO_INVALID_EDGE_BUDGET",
        /// The graph source yielded a graph without vertices.
        EmptyGraph => EmptyGraph { .. } => "TYRO_EMPTY_GRAPH",
        /// Loading the graph failed.
        GraphSourceFailure => GraphSource { .. } => "TYRO_GRAPH_SOURCE_FAILURE",
        /// The strategy failed while attaching the newcomer.
        StrategyFailure => Strategy { .. } => "TYRO_STRATEGY_FAILURE",
    }
}

impl TyroError {
    /// Retrieve the inner [`StrategyErrorCode`] when the error originated in a strategy.
    pub const fn strategy_code(&self) -> Option<StrategyErrorCode> {
        match self {
            Self::Strategy { error, .. } => Some(error.code()),
            _ => None,
        }
    }

    /// Retrieve the inner [`GraphSourceErrorCode`] when the error originated in a source.
    pub const fn graph_source_code(&self) -> Option<GraphSourceErrorCode> {
        match self {
            Self::GraphSource { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, TyroError>;
