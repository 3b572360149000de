use hashbrown::HashMap;

use crate::error::AlgorithmError;
use crate::triconnected_blocks::outside_structures::{
    ComponentType, SeparationPair, SeparationPairType, SplitComponent,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EdgeType {
    Tree,
    Back,
    Killed,
}

/// Working state shared by every phase of the decomposition.
///
/// Vertices are the caller's indices. Numbers (`number`, `newnum`, `low1`, `low2`, highpoint
/// values) are 1-based so that 0 can mean "none".
#[derive(Debug, Clone)]
pub(crate) struct GraphInternal {
    pub n: usize,
    pub root: usize,
    pub m_real: usize,                    // ids below this are input edges
    pub edges: Vec<(usize, usize)>,       // (source, target), oriented by the palm tree dfs
    pub edge_type: Vec<Option<EdgeType>>, // None means not visited yet
    pub adj: Vec<Vec<usize>>,             // undirected before ordering, out-lists after
    pub adj_slot: Vec<Option<(usize, usize)>>, // (vertex, index) of the edge in `adj`
    pub starts_path: Vec<bool>,

    pub number: Vec<usize>, // palm tree preorder, 0 = unvisited
    pub newnum: Vec<usize>,
    pub node_at: Vec<usize>, // newnum -> vertex, index 0 unused

    pub par_edge: Vec<Option<usize>>,
    pub par: Vec<Option<usize>>,
    pub low1: Vec<usize>,
    pub low2: Vec<usize>,
    pub sub: Vec<usize>,
    pub deg: Vec<usize>,

    high: Vec<Vec<usize>>,             // per vertex, slot ids, last one is the front
    high_value: Vec<usize>,            // per slot
    high_alive: Vec<bool>,             // per slot
    high_slot: Vec<Option<usize>>,     // per edge

    pub split_components: Vec<SplitComponent>,
    pub pairs: Vec<SeparationPair>,
    pair_index: HashMap<(usize, usize), usize>,
}

impl GraphInternal {
    pub fn new(n: usize, root: usize) -> Self {
        Self {
            n,
            root,
            m_real: 0,
            edges: Vec::new(),
            edge_type: Vec::new(),
            adj: vec![Vec::new(); n],
            adj_slot: Vec::new(),
            starts_path: Vec::new(),

            number: vec![0; n],
            newnum: vec![0; n],
            node_at: vec![0; n + 1],

            par_edge: vec![None; n],
            par: vec![None; n],
            low1: vec![0; n],
            low2: vec![0; n],
            sub: vec![0; n],
            deg: vec![0; n],

            high: vec![Vec::new(); n],
            high_value: Vec::new(),
            high_alive: Vec::new(),
            high_slot: Vec::new(),

            split_components: Vec::new(),
            pairs: Vec::new(),
            pair_index: HashMap::new(),
        }
    }

    pub fn from_edges(n: usize, edges: &[(usize, usize)], root: usize) -> Self {
        let mut ret = Self::new(n, root);
        for &(s, t) in edges {
            ret.new_edge(s, t);
        }
        ret.m_real = edges.len();
        ret
    }

    /// Appends an edge without linking it into any adjacency list.
    pub fn new_edge(&mut self, s: usize, t: usize) -> usize {
        let eid = self.edges.len();

        self.edges.push((s, t));
        self.edge_type.push(None);
        self.adj_slot.push(None);
        self.starts_path.push(false);
        self.high_slot.push(None);

        eid
    }

    /// Creates a virtual edge for the pair `{s, t}` and records it in the pair table.
    ///
    /// The first discovery of a pair fixes its type.
    pub fn new_virtual_edge(&mut self, s: usize, t: usize, pair_type: SeparationPairType) -> usize {
        let eid = self.new_edge(s, t);

        let key = (s.min(t), s.max(t));
        let idx = *self.pair_index.entry(key).or_insert_with(|| {
            self.pairs.push(SeparationPair {
                a: key.0,
                b: key.1,
                pair_type,
                virtual_edges: Vec::new(),
            });
            self.pairs.len() - 1
        });
        self.pairs[idx].virtual_edges.push(eid);

        eid
    }

    pub fn is_virtual(&self, eid: usize) -> bool {
        eid >= self.m_real
    }

    pub fn get_other_vertex(&self, eid: usize, u: usize) -> usize {
        let (s, t) = self.edges[eid];
        if s == u { t } else { s }
    }

    pub fn has_endpoints(&self, eid: usize, x: usize, y: usize) -> bool {
        let (s, t) = self.edges[eid];
        (s == x && t == y) || (s == y && t == x)
    }

    pub fn make_tedge(&mut self, eid: usize) {
        self.edge_type[eid] = Some(EdgeType::Tree);
        let (s, t) = self.edges[eid];

        self.par_edge[t] = Some(eid);
        self.par[t] = Some(s);
    }

    pub fn kill_edge(&mut self, eid: usize) {
        self.edge_type[eid] = Some(EdgeType::Killed);
    }

    /// Makes `new` the tree arc into `v` in place of `old`, taking over its slot at the father.
    pub fn replace_tree_arc(&mut self, v: usize, old: usize, new: usize) {
        self.kill_edge(old);
        self.edge_type[new] = Some(EdgeType::Tree);
        self.par_edge[v] = Some(new);
        if let Some((pv, pi)) = self.adj_slot[old] {
            self.set_slot(pv, pi, new);
        }
    }

    /// Rebuilds `adj_slot` from `adj`, after the lists got their final order.
    pub fn index_slots(&mut self) {
        self.adj_slot.iter_mut().for_each(|slot| *slot = None);
        for (v, list) in self.adj.iter().enumerate() {
            for (i, &eid) in list.iter().enumerate() {
                self.adj_slot[eid] = Some((v, i));
            }
        }
    }

    pub fn is_live_slot(&self, v: usize, i: usize) -> bool {
        self.adj_slot[self.adj[v][i]] == Some((v, i))
    }

    /// Puts `eid` into slot `i` of `v`, evicting the edge held there.
    /// A live edge that moves leaves a dead slot behind.
    pub fn set_slot(&mut self, v: usize, i: usize, eid: usize) {
        if self.is_live_slot(v, i) {
            let old = self.adj[v][i];
            self.adj_slot[old] = None;
        }
        self.adj[v][i] = eid;
        self.adj_slot[eid] = Some((v, i));
    }

    /// Unlinks `eid` from the adjacency structure. No-op for unlinked edges.
    pub fn del_slot(&mut self, eid: usize) {
        self.adj_slot[eid] = None;
    }

    /// Target of the first live edge of `u`, the `A1(u)` of the path search.
    pub fn first_child(&self, u: usize) -> Option<usize> {
        (0..self.adj[u].len())
            .find(|&i| self.is_live_slot(u, i))
            .map(|i| self.edges[self.adj[u][i]].1)
    }

    /// Pushes a highpoint value for `w` on behalf of frond `eid`.
    pub fn push_high(&mut self, w: usize, value: usize, eid: usize) {
        let slot = self.high_value.len();
        self.high_value.push(value);
        self.high_alive.push(true);
        self.high[w].push(slot);
        self.high_slot[eid] = Some(slot);
    }

    /// Front of the highpoint list of `u`, 0 if the list is empty.
    pub fn get_high(&mut self, u: usize) -> usize {
        while let Some(&slot) = self.high[u].last() {
            if self.high_alive[slot] {
                return self.high_value[slot];
            }
            self.high[u].pop();
        }
        0
    }

    pub fn has_high(&self, eid: usize) -> bool {
        self.high_slot[eid].is_some()
    }

    pub fn del_high(&mut self, eid: usize) {
        if let Some(slot) = self.high_slot[eid].take() {
            self.high_alive[slot] = false;
        }
    }

    /// Lets `to` own the highpoint entry of `from`.
    pub fn transfer_high(&mut self, from: usize, to: usize) {
        self.high_slot[to] = self.high_slot[from].take();
    }

    /// Reverses every highpoint list, for lists collected back to front.
    pub(crate) fn reverse_highs(&mut self) {
        for list in &mut self.high {
            list.reverse();
        }
    }

    pub(crate) fn highs_of(&self, u: usize) -> impl Iterator<Item = usize> + '_ {
        self.high[u]
            .iter()
            .rev()
            .filter(|&&slot| self.high_alive[slot])
            .map(|&slot| self.high_value[slot])
    }
}

/// A split component that is still being collected.
///
/// `component_type` stays `None` until [`Component::commit`] classifies it.
#[derive(Debug, Clone, Default)]
pub(crate) struct Component {
    pub edges: Vec<usize>,
    pub component_type: Option<ComponentType>,
}

impl Component {
    pub fn new(component_type: Option<ComponentType>) -> Self {
        Self {
            edges: Vec::new(),
            component_type,
        }
    }

    pub fn push_edge(&mut self, eid: usize) {
        self.edges.push(eid);
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Classifies the component and stores it as a split component of `graph`.
    pub fn commit(self, graph: &mut GraphInternal) -> Result<(), AlgorithmError> {
        let idx = graph.split_components.len();
        if self.edges.len() < 3 {
            return Err(AlgorithmError::DegenerateComponent {
                component: idx,
                edges: self.edges.len(),
            });
        }

        let component_type = match self.component_type {
            Some(t) => t,
            None => {
                let mut vertices: Vec<usize> = self
                    .edges
                    .iter()
                    .flat_map(|&eid| {
                        let (s, t) = graph.edges[eid];
                        [s, t]
                    })
                    .collect();
                vertices.sort_unstable();
                vertices.dedup();

                // a simple triconnected graph has minimum degree 3, so |E| > |V|
                match (vertices.len(), self.edges.len()) {
                    (2, 3) => ComponentType::TripleBond,
                    (3, 3) => ComponentType::Triangle,
                    (nv, ne) if nv >= 4 && ne > nv => ComponentType::TriconnectedGraph,
                    (vertices, edges) => {
                        return Err(AlgorithmError::UnclassifiableComponent {
                            component: idx,
                            vertices,
                            edges,
                        });
                    }
                }
            }
        };

        let (virtual_edges, edges): (Vec<usize>, Vec<usize>) =
            self.edges.iter().partition(|&&eid| graph.is_virtual(eid));
        graph.split_components.push(SplitComponent {
            edges,
            virtual_edges,
            component_type,
        });

        Ok(())
    }
}
