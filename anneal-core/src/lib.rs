//! Anneal core library.
//!
//! Simulates the Adleman-style DNA-computing approach to the Hamiltonian-path
//! problem: vertices are encoded as random strands with globally unique
//! halves, edges as complementary splint strands, and the search proceeds by
//! brute-force enumeration of a simulated hybridisation soup followed by a
//! three-stage filter pipeline.

mod anneal;
mod builder;
mod codec;
mod edge;
mod error;
mod filter;
mod graph;
mod soup;
mod strand;
mod validator;

pub use crate::{
    anneal::{Anneal, SearchOutcome, SolutionPath, to_human_readable},
    builder::{
        AnnealBuilder, DEFAULT_MAX_EDGES, DEFAULT_MAX_ENCODE_ATTEMPTS, TraversalMode,
    },
    codec::{StrandCodec, VertexLibrary},
    edge::{EdgeBank, synthesize},
    error::{AnnealError, AnnealErrorCode, GraphError, GraphErrorCode, Result, VertexRole},
    filter::{FilterTrace, retain_coverage, retain_endpoints, retain_length},
    graph::Graph,
    soup::{CandidateSoup, MIN_CANDIDATE_LEN},
    strand::{HALF_LEN, Half, STRAND_LEN, Strand, StrandError},
    validator::{PathValidator, ValidatedPath},
};
