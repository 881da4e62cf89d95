//! Directed input graphs loaded from JSON adjacency documents.

use std::{collections::BTreeMap, io::Read};

use serde::Deserialize;

use crate::error::GraphError;

/// Raw adjacency document as it appears on disk, before validation.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct AdjacencyDocument(BTreeMap<String, Vec<String>>);

/// A directed graph described by an adjacency map from vertex id to an
/// ordered list of successor ids.
///
/// The graph is read-only once loaded. Self-loops and parallel edges are
/// accepted; successor ids must themselves be keys of the adjacency map.
///
/// # Examples
/// ```
/// use anneal_core::Graph;
///
/// let graph = Graph::from_reader(r#"{"A": ["B"], "B": []}"#.as_bytes())?;
/// assert_eq!(graph.vertex_count(), 2);
/// assert_eq!(graph.successors("A"), Some(&["B".to_owned()][..]));
/// # Ok::<(), anneal_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Graph {
    adjacency: BTreeMap<String, Vec<String>>,
}

impl Graph {
    /// Parses and validates an adjacency document from `reader`.
    ///
    /// # Errors
    /// Returns [`GraphError::Parse`] when the document is not a JSON object
    /// of string arrays, [`GraphError::Empty`] when it holds no vertices, and
    /// [`GraphError::UnknownSuccessor`] when an adjacency list references an
    /// id that is not a key.
    pub fn from_reader(reader: impl Read) -> Result<Self, GraphError> {
        let document: AdjacencyDocument =
            serde_json::from_reader(reader).map_err(|source| GraphError::Parse { source })?;
        Self::try_from_adjacency(document.0)
    }

    /// Validates an already-parsed adjacency map.
    ///
    /// # Errors
    /// Returns [`GraphError::Empty`] or [`GraphError::UnknownSuccessor`] as
    /// described on [`Self::from_reader`].
    ///
    /// # Examples
    /// ```
    /// use std::collections::BTreeMap;
    /// use anneal_core::{Graph, GraphError};
    ///
    /// let mut adjacency = BTreeMap::new();
    /// adjacency.insert("A".to_owned(), vec!["Z".to_owned()]);
    /// assert!(matches!(
    ///     Graph::try_from_adjacency(adjacency),
    ///     Err(GraphError::UnknownSuccessor { .. })
    /// ));
    /// ```
    pub fn try_from_adjacency(
        adjacency: BTreeMap<String, Vec<String>>,
    ) -> Result<Self, GraphError> {
        if adjacency.is_empty() {
            return Err(GraphError::Empty);
        }
        for (vertex, successors) in &adjacency {
            if let Some(successor) = successors.iter().find(|s| !adjacency.contains_key(*s)) {
                return Err(GraphError::UnknownSuccessor {
                    vertex: vertex.clone(),
                    successor: successor.clone(),
                });
            }
        }
        Ok(Self { adjacency })
    }

    /// Returns the number of distinct vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns whether `vertex` is a key of the adjacency map.
    #[must_use]
    pub fn contains(&self, vertex: &str) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Iterates over vertex ids in deterministic (sorted) order.
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// Returns the ordered successor list of `vertex`, if present.
    #[must_use]
    pub fn successors(&self, vertex: &str) -> Option<&[String]> {
        self.adjacency.get(vertex).map(Vec::as_slice)
    }

    /// Iterates over every directed `(source, destination)` pair, in vertex
    /// order and then adjacency-list order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.adjacency.iter().flat_map(|(vertex, successors)| {
            successors
                .iter()
                .map(move |successor| (vertex.as_str(), successor.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::error::GraphErrorCode;

    #[test]
    fn loads_adjacency_documents() {
        let graph = Graph::from_reader(r#"{"A": ["B", "C"], "B": ["C"], "C": []}"#.as_bytes())
            .expect("document is valid");
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(
            graph.edges().collect::<Vec<_>>(),
            vec![("A", "B"), ("A", "C"), ("B", "C")]
        );
    }

    #[test]
    fn preserves_successor_order() {
        let graph = Graph::from_reader(r#"{"A": ["C", "B"], "B": [], "C": []}"#.as_bytes())
            .expect("document is valid");
        assert_eq!(graph.successors("A"), Some(&["C".to_owned(), "B".to_owned()][..]));
    }

    #[test]
    fn accepts_self_loops_and_parallel_edges() {
        let graph = Graph::from_reader(r#"{"A": ["A", "B", "B"], "B": []}"#.as_bytes())
            .expect("document is valid");
        assert_eq!(graph.edges().count(), 3);
    }

    #[rstest]
    #[case::not_json("not json", GraphErrorCode::Parse)]
    #[case::wrong_shape(r#"{"A": "B"}"#, GraphErrorCode::Parse)]
    #[case::empty("{}", GraphErrorCode::Empty)]
    #[case::dangling(r#"{"A": ["Z"]}"#, GraphErrorCode::UnknownSuccessor)]
    fn rejects_invalid_documents(#[case] document: &str, #[case] code: GraphErrorCode) {
        let err = Graph::from_reader(document.as_bytes()).expect_err("document must be rejected");
        assert_eq!(err.code(), code);
    }

    #[test]
    fn dangling_successor_names_both_vertices() {
        let err = Graph::from_reader(r#"{"A": ["Z"]}"#.as_bytes())
            .expect_err("dangling successor must be rejected");
        match err {
            GraphError::UnknownSuccessor { vertex, successor } => {
                assert_eq!(vertex, "A");
                assert_eq!(successor, "Z");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
