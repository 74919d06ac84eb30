use std::io;

use crowd_core::GraphError;
use thiserror::Error;

/// Errors raised while reading an edge list.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EdgeListError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error("edge list contained no edges")]
    EmptyInput,
    #[error("edge list produced an invalid graph: {0}")]
    Graph(#[from] GraphError),
}

impl EdgeListError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> EdgeListErrorCode {
        match self {
            Self::Io(_) => EdgeListErrorCode::Io,
            Self::Parse { .. } => EdgeListErrorCode::Parse,
            Self::EmptyInput => EdgeListErrorCode::EmptyInput,
            Self::Graph(_) => EdgeListErrorCode::Graph,
        }
    }

    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }
}

/// Machine-readable error codes for [`EdgeListError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum EdgeListErrorCode {
    Io,
    Parse,
    EmptyInput,
    Graph,
}

impl EdgeListErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Io => "EDGELIST_IO",
            Self::Parse => "EDGELIST_PARSE",
            Self::EmptyInput => "EDGELIST_EMPTY_INPUT",
            Self::Graph => "EDGELIST_INVALID_GRAPH",
        }
    }
}
