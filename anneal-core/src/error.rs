//! Error types for the anneal core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::{fmt, num::NonZeroUsize};

use thiserror::Error;

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

/// Role a vertex identifier plays in a search request.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum VertexRole {
    /// The requested path must begin at this vertex.
    Start,
    /// The requested path must finish at this vertex.
    End,
}

impl fmt::Display for VertexRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// An error produced while loading or validating an input graph document.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GraphError {
    /// The document could not be parsed as a JSON adjacency object.
    #[error("failed to parse graph document: {source}")]
    Parse {
        /// Underlying deserialization failure.
        #[source]
        source: serde_json::Error,
    },
    /// The adjacency object contained no vertices.
    #[error("graph contains no vertices")]
    Empty,
    /// An adjacency list referenced a vertex id that is not a key.
    #[error("vertex `{vertex}` lists successor `{successor}` which is not a graph vertex")]
    UnknownSuccessor {
        /// Vertex whose adjacency list holds the dangling reference.
        vertex: String,
        /// The successor id that is not a key of the adjacency object.
        successor: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// The document could not be parsed as a JSON adjacency object.
        Parse => Parse { .. } => "GRAPH_PARSE",
        /// The adjacency object contained no vertices.
        Empty => Empty => "GRAPH_EMPTY",
        /// An adjacency list referenced a vertex id that is not a key.
        UnknownSuccessor => UnknownSuccessor { .. } => "GRAPH_UNKNOWN_SUCCESSOR",
    }
}

/// Error type produced when configuring or running [`crate::Anneal`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum AnnealError {
    /// The bounded retry count for strand encoding must be at least one.
    #[error("max_encode_attempts must be at least 1 (got {got})")]
    InvalidMaxEncodeAttempts {
        /// The invalid attempt count supplied by the caller.
        got: usize,
    },
    /// The enumeration safety valve must admit at least one edge.
    #[error("max_edges must be at least 1 (got {got})")]
    InvalidMaxEdges {
        /// The invalid edge cap supplied by the caller.
        got: usize,
    },
    /// A requested start or end vertex is not a key of the graph.
    #[error("{role} vertex `{vertex}` is not present in the graph")]
    UnknownVertex {
        /// The missing vertex identifier.
        vertex: String,
        /// Whether the identifier was requested as start or end.
        role: VertexRole,
    },
    /// Cycle mode requires the search to start and finish at the same vertex.
    #[error("cycle mode requires start == end (got `{start}` and `{end}`)")]
    CycleEndpointsDiffer {
        /// Requested start vertex.
        start: String,
        /// Requested end vertex.
        end: String,
    },
    /// Rejection sampling failed to find collision-free halves for a vertex.
    #[error(
        "exhausted {attempts} attempts to encode vertex `{vertex}` with unique strand halves"
    )]
    HalfSpaceExhausted {
        /// Vertex that could not be encoded.
        vertex: String,
        /// Number of rejection-sampling attempts that were made.
        attempts: NonZeroUsize,
    },
    /// The graph synthesised more edge strands than the configured cap.
    #[error(
        "graph produced {edges} edge strands but enumeration is capped at {max_edges}; \
         raise max_edges to proceed"
    )]
    EdgeBankTooLarge {
        /// Number of distinct edge strands synthesised from the graph.
        edges: usize,
        /// Configured enumeration cap.
        max_edges: NonZeroUsize,
    },
    /// A graph vertex had no registered strand when one was required.
    #[error("vertex `{vertex}` has no registered strand encoding")]
    MissingEncoding {
        /// Vertex whose encoding was expected but absent.
        vertex: String,
    },
    /// A validated path referenced a strand outside the vertex library.
    #[error("strand `{strand}` does not map back to any encoded vertex")]
    UnregisteredStrand {
        /// Display form of the unmapped strand.
        strand: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`AnnealError`] variants.
    enum AnnealErrorCode for AnnealError {
        /// The bounded retry count for strand encoding must be at least one.
        InvalidMaxEncodeAttempts => InvalidMaxEncodeAttempts { .. } => "ANNEAL_INVALID_MAX_ENCODE_ATTEMPTS",
        /// The enumeration safety valve must admit at least one edge.
        InvalidMaxEdges => InvalidMaxEdges { .. } => "ANNEAL_INVALID_MAX_EDGES",
        /// A requested start or end vertex is not a key of the graph.
        UnknownVertex => UnknownVertex { .. } => "ANNEAL_UNKNOWN_VERTEX",
        /// Cycle mode requires the search to start and finish at the same vertex.
        CycleEndpointsDiffer => CycleEndpointsDiffer { .. } => "ANNEAL_CYCLE_ENDPOINTS_DIFFER",
        /// Rejection sampling failed to find collision-free halves for a vertex.
        HalfSpaceExhausted => HalfSpaceExhausted { .. } => "ANNEAL_HALF_SPACE_EXHAUSTED",
        /// The graph synthesised more edge strands than the configured cap.
        EdgeBankTooLarge => EdgeBankTooLarge { .. } => "ANNEAL_EDGE_BANK_TOO_LARGE",
        /// A graph vertex had no registered strand when one was required.
        MissingEncoding => MissingEncoding { .. } => "ANNEAL_MISSING_ENCODING",
        /// A validated path referenced a strand outside the vertex library.
        UnregisteredStrand => UnregisteredStrand { .. } => "ANNEAL_UNREGISTERED_STRAND",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, AnnealError>;
