//! Search orchestration for the simulated DNA computation.
//!
//! Provides the [`Anneal`] runtime entry point: encode the graph's vertices,
//! synthesise edge strands, stream the candidate soup through the validator,
//! and filter the validated pool down to Hamiltonian solutions.

use std::{collections::BTreeSet, num::NonZeroUsize};

use tracing::{info, instrument};

use crate::{
    Result,
    builder::TraversalMode,
    codec::{StrandCodec, VertexLibrary},
    edge::EdgeBank,
    error::{AnnealError, VertexRole},
    filter::{FilterTrace, retain_coverage, retain_endpoints, retain_length},
    graph::Graph,
    soup::CandidateSoup,
    strand::Strand,
    validator::{PathValidator, ValidatedPath},
};

/// One surviving Hamiltonian solution, reported in both notations.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct SolutionPath {
    path: ValidatedPath,
    vertex_sequence: String,
}

impl SolutionPath {
    /// Returns the underlying vertex-strand sequence.
    #[must_use]
    pub fn path(&self) -> &ValidatedPath {
        &self.path
    }

    /// Returns the raw concatenation of the vertex strands.
    #[must_use]
    pub fn raw(&self) -> String {
        self.path.concatenated()
    }

    /// Returns the concatenated originating vertex ids.
    #[must_use]
    pub fn vertex_sequence(&self) -> &str {
        &self.vertex_sequence
    }
}

/// The full record of one search run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SearchOutcome {
    encodings: Vec<(String, Strand)>,
    edge_count: usize,
    trace: FilterTrace,
    solutions: Vec<SolutionPath>,
}

impl SearchOutcome {
    /// Returns the `(vertex id, strand)` assignments in sorted id order.
    #[must_use]
    pub fn encodings(&self) -> &[(String, Strand)] {
        &self.encodings
    }

    /// Returns the number of distinct edge strands synthesised.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns the survivor counts recorded after each filter stage.
    #[must_use]
    pub fn trace(&self) -> FilterTrace {
        self.trace
    }

    /// Returns the surviving solutions in deterministic order.
    #[must_use]
    pub fn solutions(&self) -> &[SolutionPath] {
        &self.solutions
    }

    /// Returns whether any candidate survived all three filters.
    #[must_use]
    pub fn is_hamiltonian(&self) -> bool {
        !self.solutions.is_empty()
    }
}

/// Entry point for running the generate-then-filter search pipeline.
///
/// # Examples
/// ```
/// use anneal_core::{AnnealBuilder, Graph};
///
/// let graph = Graph::from_reader(r#"{"A": ["B"], "B": ["C"], "C": []}"#.as_bytes())?;
/// let anneal = AnnealBuilder::new().with_seed(7).build()?;
/// let outcome = anneal.run(&graph, "A", "C")?;
/// assert!(outcome.is_hamiltonian());
/// assert_eq!(outcome.solutions().len(), 1);
/// assert_eq!(outcome.solutions()[0].vertex_sequence(), "ABC");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Anneal {
    seed: Option<u64>,
    max_encode_attempts: NonZeroUsize,
    max_edges: NonZeroUsize,
    mode: TraversalMode,
}

impl Anneal {
    pub(crate) fn new(
        seed: Option<u64>,
        max_encode_attempts: NonZeroUsize,
        max_edges: NonZeroUsize,
        mode: TraversalMode,
    ) -> Self {
        Self {
            seed,
            max_encode_attempts,
            max_edges,
            mode,
        }
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the bounded retry budget used when encoding vertices.
    #[must_use]
    pub fn max_encode_attempts(&self) -> NonZeroUsize {
        self.max_encode_attempts
    }

    /// Returns the enumeration safety valve.
    #[must_use]
    pub fn max_edges(&self) -> NonZeroUsize {
        self.max_edges
    }

    /// Returns the traversal mode applied by the length filter.
    #[must_use]
    pub fn mode(&self) -> TraversalMode {
        self.mode
    }

    /// Runs the whole pipeline against `graph` for the requested endpoints.
    ///
    /// An empty survivor set is a normal negative result, not an error; the
    /// returned [`SearchOutcome`] reports it through
    /// [`SearchOutcome::is_hamiltonian`] and the per-stage [`FilterTrace`].
    ///
    /// # Errors
    /// Returns [`AnnealError::UnknownVertex`] when `start` or `end` is not a
    /// graph vertex, [`AnnealError::CycleEndpointsDiffer`] in cycle mode with
    /// distinct endpoints, [`AnnealError::HalfSpaceExhausted`] when encoding
    /// runs out of retry budget, and [`AnnealError::EdgeBankTooLarge`] when
    /// the graph exceeds the configured edge cap.
    #[instrument(
        name = "core.run",
        err,
        skip(self, graph),
        fields(vertices = graph.vertex_count()),
    )]
    pub fn run(&self, graph: &Graph, start: &str, end: &str) -> Result<SearchOutcome> {
        self.check_endpoints(graph, start, end)?;

        let library = self.encode_vertices(graph)?;
        info!(vertices = library.len(), "vertex strands encoded");

        let edges = EdgeBank::from_graph(graph, &library)?;
        if edges.len() > self.max_edges.get() {
            return Err(AnnealError::EdgeBankTooLarge {
                edges: edges.len(),
                max_edges: self.max_edges,
            });
        }
        info!(edges = edges.len(), "edge strands synthesised");

        let validated = Self::hybridise(&edges, &library);
        info!(validated = validated.len(), "candidate soup validated");

        let (trace, survivors) = self.filter(graph, &library, start, end, validated)?;
        let solutions = Self::report(&library, survivors)?;
        info!(
            survivors = solutions.len(),
            hamiltonian = !solutions.is_empty(),
            "filter pipeline completed"
        );

        Ok(SearchOutcome {
            encodings: library
                .encodings()
                .map(|(id, strand)| (id.to_owned(), *strand))
                .collect(),
            edge_count: edges.len(),
            trace,
            solutions,
        })
    }

    fn check_endpoints(&self, graph: &Graph, start: &str, end: &str) -> Result<()> {
        if !graph.contains(start) {
            return Err(AnnealError::UnknownVertex {
                vertex: start.to_owned(),
                role: VertexRole::Start,
            });
        }
        if !graph.contains(end) {
            return Err(AnnealError::UnknownVertex {
                vertex: end.to_owned(),
                role: VertexRole::End,
            });
        }
        if self.mode == TraversalMode::Cycle && start != end {
            return Err(AnnealError::CycleEndpointsDiffer {
                start: start.to_owned(),
                end: end.to_owned(),
            });
        }
        Ok(())
    }

    fn encode_vertices(&self, graph: &Graph) -> Result<VertexLibrary> {
        let mut codec = match self.seed {
            Some(seed) => StrandCodec::with_seed(seed, self.max_encode_attempts),
            None => StrandCodec::from_entropy(self.max_encode_attempts),
        };
        let mut library = VertexLibrary::default();
        for vertex in graph.vertices() {
            codec.encode(vertex, &mut library)?;
        }
        Ok(library)
    }

    /// Streams the candidate soup through the validator, keeping only the
    /// distinct validated paths. Rejected candidates are never retained.
    fn hybridise(edges: &EdgeBank, library: &VertexLibrary) -> BTreeSet<ValidatedPath> {
        let soup = CandidateSoup::new(edges);
        let validator = PathValidator::new(library);
        soup.candidates()
            .filter_map(|candidate| validator.validate(&candidate))
            .collect()
    }

    fn filter(
        &self,
        graph: &Graph,
        library: &VertexLibrary,
        start: &str,
        end: &str,
        validated: BTreeSet<ValidatedPath>,
    ) -> Result<(FilterTrace, BTreeSet<ValidatedPath>)> {
        let start_strand = Self::strand_of(library, start)?;
        let end_strand = Self::strand_of(library, end)?;

        let mut trace = FilterTrace {
            validated: validated.len(),
            ..FilterTrace::default()
        };

        let survivors = retain_endpoints(&validated, &start_strand, &end_strand);
        trace.after_endpoints = survivors.len();

        let required = self.mode.required_len(graph.vertex_count());
        let survivors = retain_length(&survivors, required);
        trace.after_length = survivors.len();

        let all_strands: Vec<Strand> = library.strands().copied().collect();
        let survivors = retain_coverage(&survivors, &all_strands);
        trace.after_coverage = survivors.len();

        Ok((trace, survivors))
    }

    fn report(
        library: &VertexLibrary,
        survivors: BTreeSet<ValidatedPath>,
    ) -> Result<Vec<SolutionPath>> {
        survivors
            .into_iter()
            .map(|path| {
                let vertex_sequence = to_human_readable(&path, library)?;
                Ok(SolutionPath {
                    path,
                    vertex_sequence,
                })
            })
            .collect()
    }

    fn strand_of(library: &VertexLibrary, vertex: &str) -> Result<Strand> {
        library
            .strand_of(vertex)
            .copied()
            .ok_or_else(|| AnnealError::MissingEncoding {
                vertex: vertex.to_owned(),
            })
    }
}

/// Maps each strand of a validated path back to its originating vertex id
/// and concatenates the ids. Deterministic for a fixed library.
///
/// # Errors
/// Returns [`AnnealError::UnregisteredStrand`] when a strand on the path does
/// not encode any vertex in `library`.
pub fn to_human_readable(path: &ValidatedPath, library: &VertexLibrary) -> Result<String> {
    let mut readable = String::new();
    for strand in path.vertices() {
        let id = library
            .vertex_id(strand)
            .ok_or_else(|| AnnealError::UnregisteredStrand {
                strand: strand.to_string(),
            })?;
        readable.push_str(id);
    }
    Ok(readable)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::AnnealBuilder;

    fn graph(document: &str) -> Graph {
        Graph::from_reader(document.as_bytes()).expect("document is valid")
    }

    fn seeded() -> Anneal {
        AnnealBuilder::new()
            .with_seed(7)
            .build()
            .expect("configuration is valid")
    }

    #[test]
    fn linear_chain_yields_exactly_one_path() {
        let outcome = seeded()
            .run(&graph(r#"{"A": ["B"], "B": ["C"], "C": []}"#), "A", "C")
            .expect("run succeeds");
        assert!(outcome.is_hamiltonian());
        assert_eq!(outcome.solutions().len(), 1);
        let solution = &outcome.solutions()[0];
        assert_eq!(solution.vertex_sequence(), "ABC");
        assert_eq!(solution.raw().len(), 60);
        assert_eq!(outcome.trace().after_coverage, 1);
    }

    #[test]
    fn two_cycle_has_no_hamiltonian_path_of_length_two() {
        // The soup's minimum candidate length is two edges, so a two-vertex
        // path (one edge) can never be assembled.
        let outcome = seeded()
            .run(&graph(r#"{"A": ["B"], "B": ["A"]}"#), "A", "B")
            .expect("run succeeds");
        assert!(!outcome.is_hamiltonian());
    }

    #[test]
    fn single_vertex_graph_is_a_negative_result() {
        let outcome = seeded()
            .run(&graph(r#"{"A": []}"#), "A", "A")
            .expect("run succeeds");
        assert!(!outcome.is_hamiltonian());
        assert_eq!(outcome.edge_count(), 0);
        assert_eq!(outcome.trace(), FilterTrace::default());
    }

    #[test]
    fn branching_graph_reports_the_trace_stage_that_emptied() {
        // A reaches C two ways, but nothing continues from C, so no
        // candidate both starts at A and ends at B.
        let outcome = seeded()
            .run(
                &graph(r#"{"A": ["B", "C"], "B": ["C"], "C": []}"#),
                "A",
                "B",
            )
            .expect("run succeeds");
        assert!(!outcome.is_hamiltonian());
        assert!(outcome.trace().validated > 0);
        assert_eq!(outcome.trace().after_endpoints, 0);
    }

    #[test]
    fn diamond_graph_finds_both_hamiltonian_paths_or_none() {
        // A->B->D and A->C->D are both valid three-vertex paths, but neither
        // covers all four vertices.
        let outcome = seeded()
            .run(
                &graph(r#"{"A": ["B", "C"], "B": ["D"], "C": ["D"], "D": []}"#),
                "A",
                "D",
            )
            .expect("run succeeds");
        assert!(!outcome.is_hamiltonian());
        assert!(outcome.trace().after_endpoints >= 2);
        assert_eq!(outcome.trace().after_length, 0);
    }

    #[test]
    fn four_vertex_chain_with_detour_finds_the_full_path() {
        let outcome = seeded()
            .run(
                &graph(r#"{"A": ["B", "C"], "B": ["C"], "C": ["D"], "D": []}"#),
                "A",
                "D",
            )
            .expect("run succeeds");
        assert!(outcome.is_hamiltonian());
        assert_eq!(outcome.solutions().len(), 1);
        assert_eq!(outcome.solutions()[0].vertex_sequence(), "ABCD");
    }

    #[rstest]
    #[case::start("Q", "C", VertexRole::Start)]
    #[case::end("A", "Q", VertexRole::End)]
    fn unknown_endpoints_are_hard_errors(
        #[case] start: &str,
        #[case] end: &str,
        #[case] role: VertexRole,
    ) {
        let err = seeded()
            .run(&graph(r#"{"A": ["B"], "B": ["C"], "C": []}"#), start, end)
            .expect_err("unknown endpoint must be rejected");
        assert_eq!(
            err,
            AnnealError::UnknownVertex {
                vertex: "Q".to_owned(),
                role,
            }
        );
    }

    #[test]
    fn cycle_mode_requires_matching_endpoints() {
        let anneal = AnnealBuilder::new()
            .with_seed(7)
            .with_mode(TraversalMode::Cycle)
            .build()
            .expect("configuration is valid");
        let err = anneal
            .run(&graph(r#"{"A": ["B"], "B": ["A"]}"#), "A", "B")
            .expect_err("distinct endpoints must be rejected in cycle mode");
        assert_eq!(err.code(), crate::AnnealErrorCode::CycleEndpointsDiffer);
    }

    #[test]
    fn cycle_mode_finds_a_closed_tour() {
        let anneal = AnnealBuilder::new()
            .with_seed(7)
            .with_mode(TraversalMode::Cycle)
            .build()
            .expect("configuration is valid");
        let outcome = anneal
            .run(&graph(r#"{"A": ["B"], "B": ["C"], "C": ["A"]}"#), "A", "A")
            .expect("run succeeds");
        assert!(outcome.is_hamiltonian());
        assert_eq!(outcome.solutions()[0].vertex_sequence(), "ABCA");
    }

    #[test]
    fn edge_cap_rejects_oversized_graphs() {
        let anneal = AnnealBuilder::new()
            .with_seed(7)
            .with_max_edges(1)
            .build()
            .expect("configuration is valid");
        let err = anneal
            .run(&graph(r#"{"A": ["B"], "B": ["C"], "C": []}"#), "A", "C")
            .expect_err("two edges exceed the cap of one");
        assert!(matches!(err, AnnealError::EdgeBankTooLarge { edges: 2, .. }));
    }

    #[test]
    fn reporter_is_idempotent() {
        let outcome = seeded()
            .run(&graph(r#"{"A": ["B"], "B": ["C"], "C": []}"#), "A", "C")
            .expect("run succeeds");
        let solution = &outcome.solutions()[0];
        assert_eq!(solution.vertex_sequence(), solution.vertex_sequence());
        assert_eq!(solution.raw(), solution.raw());
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let document = r#"{"A": ["B"], "B": ["C"], "C": []}"#;
        let first = seeded().run(&graph(document), "A", "C").expect("run succeeds");
        let second = seeded().run(&graph(document), "A", "C").expect("run succeeds");
        assert_eq!(first, second);
    }
}
