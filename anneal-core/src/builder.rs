//! Builder utilities for configuring the anneal search.
//!
//! Exposes the traversal-mode selection surface and builder validation used
//! before constructing [`Anneal`] instances.

use std::num::NonZeroUsize;

use crate::{Result, anneal::Anneal, error::AnnealError};

/// Default bounded retry budget for rejection-sampled strand encoding.
pub const DEFAULT_MAX_ENCODE_ATTEMPTS: usize = 64;

/// Default cap on distinct edge strands before enumeration is refused.
///
/// Six edges double to a bank of twelve strands, which keeps the worst-case
/// enumeration in the low millions of candidates.
pub const DEFAULT_MAX_EDGES: usize = 6;

/// Whether surviving paths must form an open path or a closed cycle.
///
/// A Hamiltonian path visits every vertex exactly once, so its vertex
/// sequence is exactly as long as the vertex set. A Hamiltonian cycle
/// additionally returns to its start, so the reconstructed sequence carries
/// the start vertex twice.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TraversalMode {
    /// Require an open path: survivor length equals the vertex count.
    Path,
    /// Require a closed cycle: start and end must be the same vertex and
    /// survivor length equals the vertex count plus one.
    Cycle,
}

impl TraversalMode {
    /// Returns the survivor vertex-sequence length this mode requires for a
    /// graph of `vertex_count` vertices.
    ///
    /// # Examples
    /// ```
    /// use anneal_core::TraversalMode;
    ///
    /// assert_eq!(TraversalMode::Path.required_len(4), 4);
    /// assert_eq!(TraversalMode::Cycle.required_len(4), 5);
    /// ```
    #[must_use]
    pub fn required_len(self, vertex_count: usize) -> usize {
        match self {
            Self::Path => vertex_count,
            Self::Cycle => vertex_count + 1,
        }
    }
}

/// Configures and constructs [`Anneal`] instances.
///
/// # Examples
/// ```
/// use anneal_core::{AnnealBuilder, TraversalMode};
///
/// let anneal = AnnealBuilder::new()
///     .with_seed(7)
///     .with_max_edges(4)
///     .with_mode(TraversalMode::Path)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(anneal.max_edges().get(), 4);
/// assert_eq!(anneal.mode(), TraversalMode::Path);
/// ```
#[derive(Clone, Debug)]
pub struct AnnealBuilder {
    seed: Option<u64>,
    max_encode_attempts: usize,
    max_edges: usize,
    mode: TraversalMode,
}

impl Default for AnnealBuilder {
    fn default() -> Self {
        Self {
            seed: None,
            max_encode_attempts: DEFAULT_MAX_ENCODE_ATTEMPTS,
            max_edges: DEFAULT_MAX_EDGES,
            mode: TraversalMode::Path,
        }
    }
}

impl AnnealBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the RNG seed so strand assignment is reproducible.
    ///
    /// Without a seed the codec draws from operating-system entropy.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Overrides the bounded retry budget for strand encoding.
    #[must_use]
    pub fn with_max_encode_attempts(mut self, attempts: usize) -> Self {
        self.max_encode_attempts = attempts;
        self
    }

    /// Returns the configured encode retry budget.
    #[must_use]
    pub fn max_encode_attempts(&self) -> usize {
        self.max_encode_attempts
    }

    /// Overrides the enumeration safety valve.
    ///
    /// Graphs that synthesise more distinct edge strands than this cap are
    /// rejected before enumeration starts, so oversized inputs fail fast
    /// instead of hanging in the combinatorial search.
    #[must_use]
    pub fn with_max_edges(mut self, max_edges: usize) -> Self {
        self.max_edges = max_edges;
        self
    }

    /// Returns the configured edge cap.
    #[must_use]
    pub fn max_edges(&self) -> usize {
        self.max_edges
    }

    /// Selects path or cycle semantics for the length filter.
    #[must_use]
    pub fn with_mode(mut self, mode: TraversalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the configured traversal mode.
    #[must_use]
    pub fn mode(&self) -> TraversalMode {
        self.mode
    }

    /// Validates the configuration and constructs an [`Anneal`] instance.
    ///
    /// # Errors
    /// Returns [`AnnealError::InvalidMaxEncodeAttempts`] or
    /// [`AnnealError::InvalidMaxEdges`] when either knob is zero.
    pub fn build(self) -> Result<Anneal> {
        let max_encode_attempts = NonZeroUsize::new(self.max_encode_attempts).ok_or(
            AnnealError::InvalidMaxEncodeAttempts {
                got: self.max_encode_attempts,
            },
        )?;
        let max_edges =
            NonZeroUsize::new(self.max_edges).ok_or(AnnealError::InvalidMaxEdges {
                got: self.max_edges,
            })?;

        Ok(Anneal::new(self.seed, max_encode_attempts, max_edges, self.mode))
    }
}
