//! Candidate generation: the simulated hybridisation soup.
//!
//! Models an uncontrolled wet-lab reaction by enumerating every ordered
//! arrangement of edge strands the reagent pool could assemble. The pool
//! ("bank") holds each edge strand twice, modeling excess reagent, and
//! candidates are drawn without replacement from that doubled bank, so one
//! edge strand can appear up to twice in a single candidate. The enumeration
//! is combinatorially explosive by design; callers bound it by capping the
//! number of distinct edges, not by pruning the search.

use itertools::Itertools;

use crate::{edge::EdgeBank, strand::Strand};

/// Smallest candidate length the soup assembles.
pub const MIN_CANDIDATE_LEN: usize = 2;

/// Lazy enumerator of candidate edge-strand sequences.
///
/// # Examples
/// ```
/// use anneal_core::{CandidateSoup, EdgeBank};
///
/// let soup = CandidateSoup::new(&EdgeBank::default());
/// assert_eq!(soup.candidates().count(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct CandidateSoup {
    bank: Vec<Strand>,
    edge_count: usize,
}

impl CandidateSoup {
    /// Builds the doubled reagent bank from the distinct edge strands.
    #[must_use]
    pub fn new(edges: &EdgeBank) -> Self {
        let mut bank = Vec::with_capacity(edges.len() * 2);
        for strand in edges.iter() {
            bank.push(*strand);
            bank.push(*strand);
        }
        Self {
            bank,
            edge_count: edges.len(),
        }
    }

    /// Returns the number of strands in the doubled bank.
    #[must_use]
    pub fn bank_len(&self) -> usize {
        self.bank.len()
    }

    /// Candidate lengths enumerated by [`Self::candidates`]:
    /// `[MIN_CANDIDATE_LEN, edge_count + 2)`.
    #[must_use]
    pub fn lengths(&self) -> std::ops::Range<usize> {
        MIN_CANDIDATE_LEN..self.edge_count + 2
    }

    /// Lazily enumerates every candidate, shortest lengths first.
    ///
    /// The iterator is restartable and never materialises the permutation
    /// space; callers are expected to validate and discard candidates as they
    /// stream past. Because the bank holds duplicates, positionally distinct
    /// permutations may yield equal candidates; downstream deduplication
    /// happens on validated paths.
    pub fn candidates(&self) -> impl Iterator<Item = Vec<Strand>> + '_ {
        self.lengths()
            .flat_map(move |len| self.bank.iter().copied().permutations(len))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::num::NonZeroUsize;

    use super::*;
    use crate::{
        codec::{StrandCodec, VertexLibrary},
        graph::Graph,
    };

    fn bank_for(document: &str) -> EdgeBank {
        let graph = Graph::from_reader(document.as_bytes()).expect("document is valid");
        let mut codec =
            StrandCodec::with_seed(3, NonZeroUsize::new(64).expect("non-zero attempts"));
        let mut library = VertexLibrary::default();
        for vertex in graph.vertices() {
            codec.encode(vertex, &mut library).expect("encoding succeeds");
        }
        EdgeBank::from_graph(&graph, &library).expect("bank builds")
    }

    #[test]
    fn empty_bank_yields_no_candidates() {
        let soup = CandidateSoup::new(&EdgeBank::default());
        assert_eq!(soup.bank_len(), 0);
        assert!(soup.lengths().is_empty());
    }

    #[test]
    fn single_edge_bank_yields_only_doubled_pairs() {
        let soup = CandidateSoup::new(&bank_for(r#"{"A": ["B"], "B": []}"#));
        assert_eq!(soup.bank_len(), 2);
        assert_eq!(soup.lengths(), 2..3);
        // Two positional permutations of the doubled strand, both equal.
        let candidates: Vec<_> = soup.candidates().collect();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0], candidates[1]);
    }

    #[test]
    fn candidate_counts_match_the_permutation_arithmetic() {
        // Two distinct edges double to a bank of four: 4P2 + 4P3 = 12 + 24.
        let soup = CandidateSoup::new(&bank_for(r#"{"A": ["B"], "B": ["C"], "C": []}"#));
        assert_eq!(soup.bank_len(), 4);
        assert_eq!(soup.candidates().count(), 36);
    }

    #[test]
    fn each_edge_appears_at_most_twice_per_candidate() {
        let soup = CandidateSoup::new(&bank_for(r#"{"A": ["B"], "B": ["C"], "C": []}"#));
        for candidate in soup.candidates() {
            let distinct: BTreeSet<_> = candidate.iter().collect();
            for strand in distinct {
                assert!(candidate.iter().filter(|s| *s == strand).count() <= 2);
            }
        }
    }

    #[test]
    fn enumeration_is_restartable() {
        let soup = CandidateSoup::new(&bank_for(r#"{"A": ["B"], "B": ["C"], "C": []}"#));
        let first: Vec<_> = soup.candidates().take(5).collect();
        let second: Vec<_> = soup.candidates().take(5).collect();
        assert_eq!(first, second);
    }
}
