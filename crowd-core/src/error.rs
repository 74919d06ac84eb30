//! Error types for the crowd core library.
//!
//! Defines the error enums exposed by the public API, their stable codes, and
//! a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::executor::{PoolError, PoolErrorCode};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
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
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while building or querying a [`crate::GraphSource`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
    /// A vertex id was not below the graph's vertex count.
    #[error("vertex {vertex} is out of bounds for a graph with {vertex_count} vertices")]
    VertexOutOfBounds {
        /// The offending vertex id.
        vertex: usize,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
    /// An edge weight was negative, NaN, or infinite.
    #[error("edge ({source_vertex}, {target_vertex}) has invalid weight {weight}")]
    InvalidWeight {
        /// Tail of the rejected edge.
        source_vertex: usize,
        /// Head of the rejected edge.
        target_vertex: usize,
        /// The rejected weight.
        weight: f64,
    },
    /// Vertex labels were supplied for a different number of vertices.
    #[error("{labels} labels were supplied for {vertex_count} vertices")]
    LabelCountMismatch {
        /// Number of labels supplied.
        labels: usize,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// A vertex id was not below the graph's vertex count.
        VertexOutOfBounds => VertexOutOfBounds { .. } => "GRAPH_VERTEX_OUT_OF_BOUNDS",
        /// An edge weight was negative, NaN, or infinite.
        InvalidWeight => InvalidWeight { .. } => "GRAPH_INVALID_WEIGHT",
        /// Vertex labels were supplied for a different number of vertices.
        LabelCountMismatch => LabelCountMismatch { .. } => "GRAPH_LABEL_COUNT_MISMATCH",
    }
}

/// Error type produced when evaluating observers or running batch passes.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CrowdError {
    /// `m` must be at least 1 and `k` must exceed 1.
    #[error(
        "invalid m or k value (m={m}, k={k}); m needs to be an integer >= 1 and k an integer > 1"
    )]
    InvalidParameter {
        /// The minimum independent path length supplied by the caller.
        m: u32,
        /// The minimum informant count supplied by the caller.
        k: u32,
    },
    /// The queried vertex does not exist in the graph.
    #[error("vertex {vertex} does not exist in a graph with {vertex_count} vertices")]
    VertexOutOfBounds {
        /// The queried vertex id.
        vertex: usize,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
    /// A [`crate::GraphSource`] operation failed.
    #[error("graph `{graph}` failed: {error}")]
    Graph {
        /// Name of the graph that produced the error.
        graph: Arc<str>,
        #[source]
        /// Underlying graph error.
        error: GraphError,
    },
    /// The task pool could not complete a distributed pass.
    #[error("task pool failure: {0}")]
    Pool(#[from] PoolError),
}

define_error_codes! {
    /// Stable codes describing [`CrowdError`] variants.
    enum CrowdErrorCode for CrowdError {
        /// `m` must be at least 1 and `k` must exceed 1.
        InvalidParameter => InvalidParameter { .. } => "CROWD_INVALID_PARAMETER",
        /// The queried vertex does not exist in the graph.
        VertexOutOfBounds => VertexOutOfBounds { .. } => "CROWD_VERTEX_OUT_OF_BOUNDS",
        /// A [`crate::GraphSource`] operation failed.
        GraphFailure => Graph { .. } => "CROWD_GRAPH_FAILURE",
        /// The task pool could not complete a distributed pass.
        PoolFailure => Pool(..) => "CROWD_POOL_FAILURE",
    }
}

impl CrowdError {
    /// Retrieve the inner [`GraphErrorCode`] when the error came from the graph.
    pub const fn graph_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::Graph { error, .. } => Some(error.code()),
            _ => None,
        }
    }

    /// Retrieve the inner [`PoolErrorCode`] when the error came from the pool.
    pub const fn pool_code(&self) -> Option<PoolErrorCode> {
        match self {
            Self::Pool(error) => Some(error.code()),
            _ => None,
        }
    }

    pub(crate) fn graph(name: &str, error: GraphError) -> Self {
        Self::Graph {
            graph: Arc::from(name),
            error,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, CrowdError>;
