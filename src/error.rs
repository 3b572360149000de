//! Error types of the decomposition.
//!
//! Two classes are kept apart: [`InvalidInputError`] is the caller's fault and is
//! detected before any traversal starts, [`AlgorithmError`] means an internal
//! invariant broke while decomposing and the whole run is discarded.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error(transparent)]
    Algorithm(#[from] AlgorithmError),

    #[error("failed to render graph: {0}")]
    Io(#[from] std::io::Error),
}

/// Precondition violations of the input graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInputError {
    #[error("graph has {found} vertices, at least 2 are required")]
    TooFewVertices { found: usize },

    #[error("graph has {found} edges, at least 3 are required")]
    TooFewEdges { found: usize },

    #[error("edge {edge} has endpoint {vertex} but the graph has only {n} vertices")]
    VertexOutOfRange { edge: usize, vertex: usize, n: usize },

    #[error("root {root} is not a vertex of a graph with {n} vertices")]
    RootOutOfRange { root: usize, n: usize },

    #[error("edge {edge} is a self-loop at vertex {vertex}")]
    SelfLoop { edge: usize, vertex: usize },

    #[error("graph is not connected, vertex {vertex} is unreachable from vertex {root}")]
    Disconnected { root: usize, vertex: usize },

    #[error("graph is not biconnected, vertex {vertex} is a cut vertex")]
    CutVertex { vertex: usize },
}

/// Broken internal invariants. Seeing one of these is a bug in the decomposition,
/// never a property of the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlgorithmError {
    #[error(
        "adjacency list of vertex {vertex} is not ordered: edge {edge} has key {key} after key {previous_key}"
    )]
    AdjacencyOrder {
        vertex: usize,
        edge: usize,
        key: usize,
        previous_key: usize,
    },

    #[error(
        "tree arcs {first} and {second} of vertex {vertex} violate newnum({vertex}) < newnum(second child) < newnum(first child)"
    )]
    TreeArcOrder {
        vertex: usize,
        first: usize,
        second: usize,
    },

    #[error("{stack} is empty while processing vertex {vertex}")]
    EmptyStack { stack: &'static str, vertex: usize },

    #[error("edge {edge} at vertex {vertex} was expected to be a {expected}")]
    UnexpectedEdgeType {
        vertex: usize,
        edge: usize,
        expected: &'static str,
    },

    #[error("split component {component} has only {edges} edges")]
    DegenerateComponent { component: usize, edges: usize },

    #[error("split component {component} with {vertices} vertices and {edges} edges matches no split component shape")]
    UnclassifiableComponent {
        component: usize,
        vertices: usize,
        edges: usize,
    },

    #[error("edge {edge} appears in {found} split components, expected {expected}")]
    EdgeMultiplicity {
        edge: usize,
        found: usize,
        expected: usize,
    },
}
