use hashbrown::HashMap;

use crate::EdgeLabel;

/// Represents the type of a component in the triconnected decomposition.
///
/// The first three appear among the raw split components, merging turns triple bonds
/// into bonds and triangles into rings.
///
/// - `TripleBond`: two vertices with exactly three edges between them
/// - `Triangle`: three vertices, three edges
/// - `Ring`: simple cycle, the S node of an SPQR tree
/// - `Bond`: two vertices with at least three edges between them, the P node
/// - `TriconnectedGraph`: triconnected component, the R node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    TripleBond,
    Triangle,
    Ring,
    Bond,
    TriconnectedGraph,
}

impl ComponentType {
    /// Letter of the matching SPQR tree node.
    pub fn spqr_letter(&self) -> char {
        match self {
            ComponentType::TripleBond | ComponentType::Bond => 'P',
            ComponentType::Triangle | ComponentType::Ring => 'S',
            ComponentType::TriconnectedGraph => 'R',
        }
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentType::TripleBond => write!(f, "triple bond"),
            ComponentType::Triangle => write!(f, "triangle"),
            ComponentType::Ring => write!(f, "ring"),
            ComponentType::Bond => write!(f, "bond"),
            ComponentType::TriconnectedGraph => write!(f, "triconnected graph"),
        }
    }
}

/// A split component (or, after merging, a triconnected component).
///
/// Edges are ids into [`Decomposition::edges`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitComponent {
    /// Real edges, in the order they were split off.
    pub edges: Vec<usize>,
    /// Virtual edges shared with neighbouring components.
    pub virtual_edges: Vec<usize>,
    pub component_type: ComponentType,
}

impl SplitComponent {
    /// Number of edges, real and virtual.
    pub fn len(&self) -> usize {
        self.edges.len() + self.virtual_edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All edges, real ones first.
    pub fn all_edges(&self) -> impl Iterator<Item = usize> + '_ {
        self.edges.iter().chain(self.virtual_edges.iter()).copied()
    }
}

/// How a separation pair was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeparationPairType {
    /// A tree arc and a frond meet, or the pair carries parallel edges.
    Type1,
    /// Found through a triple on the triple stack.
    Type2,
}

impl SeparationPairType {
    pub fn as_number(&self) -> u8 {
        match self {
            SeparationPairType::Type1 => 1,
            SeparationPairType::Type2 => 2,
        }
    }
}

/// A separation pair `{a, b}` with `a < b`, as original vertex indices.
///
/// A pair discovered several times is reported once and owns every virtual edge
/// created for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparationPair {
    pub a: usize,
    pub b: usize,
    pub pair_type: SeparationPairType,
    pub virtual_edges: Vec<usize>,
}

/// Result of the decomposition.
///
/// - `edges`: endpoints of every edge. Ids below `real_edge_count` are the input edges
///   in input order, the rest are virtual edges in creation order.
/// - `split_components`: components as produced by the splitting, before merging.
/// - `virtual_edge_components`: maps each virtual edge to the split components holding it.
/// - `components`: triconnected components, i.e. bonds, rings and triconnected graphs.
/// - `real_to_component`: index into `components` for each real edge.
#[derive(Debug, Clone)]
pub struct Decomposition {
    pub real_edge_count: usize,
    pub edges: Vec<(usize, usize)>,
    pub edge_labels: Vec<EdgeLabel>,
    pub separation_pairs: Vec<SeparationPair>,
    pub split_components: Vec<SplitComponent>,
    pub virtual_edge_components: HashMap<usize, Vec<usize>>,
    pub components: Vec<SplitComponent>,
    pub real_to_component: Vec<usize>,
}

impl Decomposition {
    pub fn is_real(&self, eid: usize) -> bool {
        eid < self.real_edge_count
    }

    /// Sorted vertex set of a component.
    pub fn vertices_of(&self, component: &SplitComponent) -> Vec<usize> {
        let mut vertices: Vec<usize> = component
            .all_edges()
            .flat_map(|eid| {
                let (s, t) = self.edges[eid];
                [s, t]
            })
            .collect();
        vertices.sort_unstable();
        vertices.dedup();
        vertices
    }

    /// Virtual edge to owning components map over the merged `components`.
    ///
    /// Only virtual edges still shared by two triconnected components appear here; this is
    /// the adjacency of the SPQR tree.
    pub fn triconnected_virtual_edge_components(&self) -> HashMap<usize, Vec<usize>> {
        virtual_edge_component_map(&self.components)
    }

    /// Separation pairs whose pair type matches.
    pub fn pairs_of_type(
        &self,
        pair_type: SeparationPairType,
    ) -> impl Iterator<Item = &SeparationPair> + '_ {
        self.separation_pairs
            .iter()
            .filter(move |p| p.pair_type == pair_type)
    }
}

/// One pass over all virtual edges of `components`.
pub(crate) fn virtual_edge_component_map(
    components: &[SplitComponent],
) -> HashMap<usize, Vec<usize>> {
    let mut map: HashMap<usize, Vec<usize>> = HashMap::new();
    for (i, component) in components.iter().enumerate() {
        for &eid in &component.virtual_edges {
            let owners = map.entry(eid).or_default();
            if !owners.contains(&i) {
                owners.push(i);
            }
        }
    }
    map
}
