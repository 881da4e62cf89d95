//! Chain validation: turning candidate edge sequences into vertex paths.

use crate::{
    codec::VertexLibrary,
    strand::Strand,
};

/// An ordered vertex-strand sequence reconstructed from a valid candidate.
///
/// A candidate of `k` edge strands reconstructs to `k + 1` vertex strands.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ValidatedPath {
    vertices: Vec<Strand>,
}

impl ValidatedPath {
    pub(crate) fn new(vertices: Vec<Strand>) -> Self {
        Self { vertices }
    }

    /// Returns the number of vertices on the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns whether the path holds no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the vertex strands in path order.
    #[must_use]
    pub fn vertices(&self) -> &[Strand] {
        &self.vertices
    }

    /// Returns the first vertex strand on the path.
    #[must_use]
    pub fn first(&self) -> Option<&Strand> {
        self.vertices.first()
    }

    /// Returns the last vertex strand on the path.
    #[must_use]
    pub fn last(&self) -> Option<&Strand> {
        self.vertices.last()
    }

    /// Returns whether `strand` appears anywhere on the path.
    #[must_use]
    pub fn contains(&self, strand: &Strand) -> bool {
        self.vertices.contains(strand)
    }

    /// Concatenates the vertex strands into one raw symbol string.
    #[must_use]
    pub fn concatenated(&self) -> String {
        self.vertices.iter().map(Strand::to_string).collect()
    }
}

/// Checks whether candidate edge sequences form strand-complementary chains.
///
/// Borrowed from the orchestrator for the duration of one enumeration pass;
/// all lookups go against the registered vertex encodings in the library.
#[derive(Clone, Copy, Debug)]
pub struct PathValidator<'a> {
    library: &'a VertexLibrary,
}

impl<'a> PathValidator<'a> {
    /// Creates a validator over the given vertex library.
    #[must_use]
    pub fn new(library: &'a VertexLibrary) -> Self {
        Self { library }
    }

    /// Validates an ordered edge-strand sequence.
    ///
    /// The leading vertex is reconstructed from the complement of the first
    /// edge's 5'-half (looked up by 3'-half), every adjacent pair must form a
    /// connector that is a registered vertex strand, and the trailing vertex
    /// is reconstructed from the complement of the last edge's 3'-half
    /// (looked up by 5'-half). Any failed lookup rejects the whole sequence
    /// immediately.
    ///
    /// A single-edge sequence has no adjacent pairs; it is valid exactly when
    /// both endpoint lookups resolve, yielding a two-vertex path. An empty
    /// sequence is always invalid.
    pub fn validate(&self, candidate: &[Strand]) -> Option<ValidatedPath> {
        let first = candidate.first()?;
        let last = candidate.last()?;

        let mut vertices = Vec::with_capacity(candidate.len() + 1);
        let leading = self
            .library
            .strand_by_three_half(&first.five_half().complement())?;
        vertices.push(*leading);

        for pair in candidate.windows(2) {
            let connector = Strand::from_halves(
                pair[0].three_half().complement(),
                pair[1].five_half().complement(),
            );
            if !self.library.contains_strand(&connector) {
                return None;
            }
            vertices.push(connector);
        }

        let trailing = self
            .library
            .strand_by_five_half(&last.three_half().complement())?;
        vertices.push(*trailing);

        Some(ValidatedPath::new(vertices))
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;
    use crate::{
        codec::StrandCodec,
        edge::synthesize,
        graph::Graph,
    };

    struct Fixture {
        library: VertexLibrary,
    }

    impl Fixture {
        fn chain() -> Self {
            let graph = Graph::from_reader(
                r#"{"A": ["B"], "B": ["C"], "C": ["D"], "D": []}"#.as_bytes(),
            )
            .expect("document is valid");
            let mut codec =
                StrandCodec::with_seed(23, NonZeroUsize::new(64).expect("non-zero attempts"));
            let mut library = VertexLibrary::default();
            for vertex in graph.vertices() {
                codec.encode(vertex, &mut library).expect("encoding succeeds");
            }
            Self { library }
        }

        fn strand(&self, vertex: &str) -> Strand {
            *self.library.strand_of(vertex).expect("vertex is encoded")
        }

        fn edge(&self, source: &str, dest: &str) -> Strand {
            synthesize(&self.strand(source), &self.strand(dest))
        }
    }

    #[test]
    fn accepts_a_complementary_chain() {
        let fixture = Fixture::chain();
        let validator = PathValidator::new(&fixture.library);
        let candidate = [
            fixture.edge("A", "B"),
            fixture.edge("B", "C"),
            fixture.edge("C", "D"),
        ];
        let path = validator.validate(&candidate).expect("chain is valid");
        assert_eq!(path.len(), 4);
        assert_eq!(
            path.vertices(),
            [
                fixture.strand("A"),
                fixture.strand("B"),
                fixture.strand("C"),
                fixture.strand("D"),
            ]
        );
    }

    #[test]
    fn every_connector_of_an_accepted_candidate_is_registered() {
        let fixture = Fixture::chain();
        let validator = PathValidator::new(&fixture.library);
        let candidate = [fixture.edge("A", "B"), fixture.edge("B", "C")];
        let path = validator.validate(&candidate).expect("chain is valid");
        for vertex in path.vertices() {
            assert!(fixture.library.contains_strand(vertex));
        }
    }

    #[test]
    fn rejects_a_broken_adjacent_pair() {
        let fixture = Fixture::chain();
        let validator = PathValidator::new(&fixture.library);
        // B→C cannot follow C→D: the connector would be a chimera of C's
        // 5'-half and B's 3'-half, which encodes no vertex.
        let candidate = [fixture.edge("C", "D"), fixture.edge("B", "C")];
        assert!(validator.validate(&candidate).is_none());
    }

    #[test]
    fn rejects_the_whole_sequence_on_one_bad_link() {
        let fixture = Fixture::chain();
        let validator = PathValidator::new(&fixture.library);
        let candidate = [
            fixture.edge("A", "B"),
            fixture.edge("B", "C"),
            fixture.edge("A", "B"),
        ];
        assert!(validator.validate(&candidate).is_none());
    }

    #[test]
    fn single_edge_sequences_resolve_their_endpoints() {
        let fixture = Fixture::chain();
        let validator = PathValidator::new(&fixture.library);
        let path = validator
            .validate(&[fixture.edge("B", "C")])
            .expect("both endpoints resolve");
        assert_eq!(path.vertices(), [fixture.strand("B"), fixture.strand("C")]);
    }

    #[test]
    fn empty_sequences_are_invalid() {
        let fixture = Fixture::chain();
        let validator = PathValidator::new(&fixture.library);
        assert!(validator.validate(&[]).is_none());
    }

    #[test]
    fn foreign_edges_fail_the_endpoint_lookup() {
        let fixture = Fixture::chain();
        let validator = PathValidator::new(&fixture.library);
        let foreign: Strand = "01230123012301230123".parse().expect("fixture parses");
        assert!(validator.validate(&[foreign, foreign]).is_none());
    }
}
