//! Edge strand synthesis and the deduplicating edge bank.

use std::collections::BTreeSet;

use crate::{
    codec::VertexLibrary,
    error::{AnnealError, Result},
    graph::Graph,
    strand::Strand,
};

/// Derives the edge strand for a directed `(source, destination)` pair.
///
/// The edge strand is the complement of the source's 3'-half followed by the
/// complement of the destination's 5'-half, so that it can hybridise with the
/// exposed halves of both endpoint strands. Pure function of the two inputs.
///
/// # Examples
/// ```
/// use anneal_core::{Strand, synthesize};
///
/// let source: Strand = "00000000002222222222".parse()?;
/// let dest: Strand = "11111111113333333333".parse()?;
/// assert_eq!(synthesize(&source, &dest).to_string(), "33333333330000000000");
/// # Ok::<(), anneal_core::StrandError>(())
/// ```
#[must_use]
pub fn synthesize(source: &Strand, dest: &Strand) -> Strand {
    Strand::from_halves(
        source.three_half().complement(),
        dest.five_half().complement(),
    )
}

/// The deduplicated set of edge strands synthesised from a graph.
///
/// Duplicate adjacency entries collapse to a single strand; iteration order
/// is deterministic.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EdgeBank {
    strands: BTreeSet<Strand>,
}

impl EdgeBank {
    /// Synthesises one edge strand per adjacency pair of `graph`.
    ///
    /// Every graph vertex must already be encoded in `library`.
    ///
    /// # Errors
    /// Returns [`AnnealError::MissingEncoding`] when an adjacency pair names
    /// a vertex the library has not encoded.
    pub fn from_graph(graph: &Graph, library: &VertexLibrary) -> Result<Self> {
        let mut strands = BTreeSet::new();
        for (source, dest) in graph.edges() {
            let source_strand = library
                .strand_of(source)
                .ok_or_else(|| AnnealError::MissingEncoding {
                    vertex: source.to_owned(),
                })?;
            let dest_strand = library
                .strand_of(dest)
                .ok_or_else(|| AnnealError::MissingEncoding {
                    vertex: dest.to_owned(),
                })?;
            strands.insert(synthesize(source_strand, dest_strand));
        }
        Ok(Self { strands })
    }

    /// Returns the number of distinct edge strands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strands.len()
    }

    /// Returns whether the bank holds no edge strands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strands.is_empty()
    }

    /// Returns whether `strand` was synthesised from some adjacency pair.
    #[must_use]
    pub fn contains(&self, strand: &Strand) -> bool {
        self.strands.contains(strand)
    }

    /// Iterates over the edge strands in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &Strand> {
        self.strands.iter()
    }
}
