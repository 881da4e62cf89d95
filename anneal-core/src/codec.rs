//! Vertex strand encoding: rejection-sampling codec and the strand registry.
//!
//! The codec assigns each vertex a random strand whose halves are globally
//! unique across the whole vertex set. Uniqueness is what makes the later
//! chain-matching unambiguous, so colliding draws are rejected and retried up
//! to a bounded attempt count. All registry state lives in [`VertexLibrary`],
//! owned by the orchestrator rather than in process-wide globals.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    num::NonZeroUsize,
};

use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{
    error::{AnnealError, Result},
    strand::{Half, STRAND_LEN, Strand},
};

/// Registry of every strand assigned during one search run.
///
/// Holds the vertex-id ↔ strand maps, the per-polarity half lookup tables
/// used by the path validator, and the used-half set consulted by the codec.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use anneal_core::{StrandCodec, VertexLibrary};
///
/// let attempts = NonZeroUsize::new(64).expect("attempt budget is non-zero");
/// let mut codec = StrandCodec::with_seed(7, attempts);
/// let mut library = VertexLibrary::default();
/// let strand = codec.encode("A", &mut library)?;
/// assert_eq!(library.vertex_id(&strand), Some("A"));
/// assert_eq!(library.strand_of("A"), Some(&strand));
/// # Ok::<(), anneal_core::AnnealError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct VertexLibrary {
    by_id: BTreeMap<String, Strand>,
    by_strand: HashMap<Strand, String>,
    by_five_half: HashMap<Half, Strand>,
    by_three_half: HashMap<Half, Strand>,
    used_halves: HashSet<Half>,
}

impl VertexLibrary {
    /// Returns the number of encoded vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns whether no vertex has been encoded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Returns the strand assigned to `vertex`, if any.
    #[must_use]
    pub fn strand_of(&self, vertex: &str) -> Option<&Strand> {
        self.by_id.get(vertex)
    }

    /// Reverse lookup from a strand to its originating vertex id.
    #[must_use]
    pub fn vertex_id(&self, strand: &Strand) -> Option<&str> {
        self.by_strand.get(strand).map(String::as_str)
    }

    /// Returns whether `strand` encodes some vertex.
    #[must_use]
    pub fn contains_strand(&self, strand: &Strand) -> bool {
        self.by_strand.contains_key(strand)
    }

    /// Looks up the vertex strand whose 5'-half equals `half`.
    #[must_use]
    pub fn strand_by_five_half(&self, half: &Half) -> Option<&Strand> {
        self.by_five_half.get(half)
    }

    /// Looks up the vertex strand whose 3'-half equals `half`.
    #[must_use]
    pub fn strand_by_three_half(&self, half: &Half) -> Option<&Strand> {
        self.by_three_half.get(half)
    }

    /// Returns whether `half` collides with any previously registered half,
    /// of either polarity.
    #[must_use]
    pub fn half_in_use(&self, half: &Half) -> bool {
        self.used_halves.contains(half)
    }

    /// Iterates over `(vertex id, strand)` pairs in sorted id order.
    pub fn encodings(&self) -> impl Iterator<Item = (&str, &Strand)> {
        self.by_id.iter().map(|(id, strand)| (id.as_str(), strand))
    }

    /// Iterates over every registered vertex strand in sorted id order.
    pub fn strands(&self) -> impl Iterator<Item = &Strand> {
        self.by_id.values()
    }

    fn register(&mut self, vertex: &str, strand: Strand) {
        self.used_halves.insert(strand.five_half());
        self.used_halves.insert(strand.three_half());
        self.by_five_half.insert(strand.five_half(), strand);
        self.by_three_half.insert(strand.three_half(), strand);
        self.by_strand.insert(strand, vertex.to_owned());
        self.by_id.insert(vertex.to_owned(), strand);
    }
}

/// Random strand generator with bounded collision retries.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use anneal_core::{StrandCodec, VertexLibrary};
///
/// let attempts = NonZeroUsize::new(64).expect("attempt budget is non-zero");
/// let mut codec = StrandCodec::with_seed(42, attempts);
/// let mut library = VertexLibrary::default();
/// codec.encode("A", &mut library)?;
/// codec.encode("B", &mut library)?;
/// let a = library.strand_of("A").copied().expect("A is encoded");
/// let b = library.strand_of("B").copied().expect("B is encoded");
/// assert_ne!(a.five_half(), b.five_half());
/// assert_ne!(a.three_half(), b.three_half());
/// # Ok::<(), anneal_core::AnnealError>(())
/// ```
#[derive(Debug)]
pub struct StrandCodec {
    rng: SmallRng,
    max_attempts: NonZeroUsize,
}

impl StrandCodec {
    /// Creates a codec seeded from operating-system entropy.
    #[must_use]
    pub fn from_entropy(max_attempts: NonZeroUsize) -> Self {
        Self {
            rng: SmallRng::from_entropy(),
            max_attempts,
        }
    }

    /// Creates a codec with a fixed seed for reproducible strand assignment.
    #[must_use]
    pub fn with_seed(seed: u64, max_attempts: NonZeroUsize) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            max_attempts,
        }
    }

    /// Draws a fresh strand for `vertex` and registers it in `library`.
    ///
    /// Draws are rejected while either half collides with a half already in
    /// use; after `max_attempts` rejected draws the codec fails explicitly
    /// instead of looping forever.
    ///
    /// # Errors
    /// Returns [`AnnealError::HalfSpaceExhausted`] when no collision-free
    /// strand was found within the attempt budget.
    pub fn encode(&mut self, vertex: &str, library: &mut VertexLibrary) -> Result<Strand> {
        for _ in 0..self.max_attempts.get() {
            let strand = self.random_strand();
            if library.half_in_use(&strand.five_half()) || library.half_in_use(&strand.three_half())
            {
                continue;
            }
            library.register(vertex, strand);
            return Ok(strand);
        }
        Err(AnnealError::HalfSpaceExhausted {
            vertex: vertex.to_owned(),
            attempts: self.max_attempts,
        })
    }

    fn random_strand(&mut self) -> Strand {
        let mut symbols = [0u8; STRAND_LEN];
        for symbol in &mut symbols {
            *symbol = self.rng.gen_range(0..4);
        }
        Strand::from_raw(symbols)
    }
}
