use crate::error::InvalidInputError;
use crate::{EdgeLabel, UnGraph};
use fixedbitset::FixedBitSet;
use petgraph::visit::EdgeRef;

/// Represents the blocks (biconnected components) and cut vertices of a graph.
#[derive(Debug, Clone)]
pub struct BlockCutTree {
    /// Number of blocks in the graph.
    pub block_count: usize,
    /// Number of cut vertices in the graph.
    pub cut_count: usize,
    /// Blocks of the graph, each one given by the ids of its edges.
    /// A block is defined by set of edges, this way we avoid problem with cut vertices multi membership.
    pub blocks: Vec<Vec<usize>>,
    /// `is_cut[v]` tells whether `v` is a cut vertex.
    pub is_cut: FixedBitSet,
    /// Vertices the search from the first root does not reach, i.e. everything outside
    /// its connected component (isolated vertices included). Blocks cover every component.
    pub unreached: Vec<usize>,
}

impl BlockCutTree {
    /// Returns block `i` as a standalone graph.
    ///
    /// Vertices are renumbered densely in order of first appearance, node weights keep the
    /// original vertex index. Parallel edges are kept.
    pub fn block_graph(&self, edges: &[(usize, usize)], i: usize) -> UnGraph {
        let mut graph = UnGraph::new_undirected();
        let mut new_id = hashbrown::HashMap::new();

        let mut id_of = |v: usize, graph: &mut UnGraph| {
            *new_id
                .entry(v)
                .or_insert_with(|| graph.add_node(v as u32))
        };

        let mut block = self.blocks[i].clone();
        block.sort_unstable();
        for eid in block {
            let (s, t) = edges[eid];
            let (s, t) = (id_of(s, &mut graph), id_of(t, &mut graph));
            graph.add_edge(s, t, EdgeLabel::Real);
        }

        graph
    }
}

struct Frame {
    u: usize,
    parent_edge: Option<usize>,
    next: usize,
}

/// Hopcroft-Tarjan biconnected components with an explicit stack.
///
/// Parallel edges are told apart by edge id, so a second edge to the parent is a back edge.
/// Self-loops are ignored.
fn search_blocks(n: usize, edges: &[(usize, usize)], roots: impl Iterator<Item = usize>) -> BlockCutTree {
    let mut adj = vec![Vec::new(); n];
    for (eid, &(s, t)) in edges.iter().enumerate() {
        if s == t {
            continue;
        }
        adj[s].push((eid, t));
        adj[t].push((eid, s));
    }

    let mut time = 0;
    let mut preorder = vec![usize::MAX; n];
    let mut low = vec![0; n];
    let mut is_cut = FixedBitSet::with_capacity(n);
    let mut edge_stack: Vec<usize> = Vec::new();
    let mut blocks = Vec::new();
    let mut unreached = None;

    for root in roots {
        if preorder[root] != usize::MAX {
            continue;
        }
        preorder[root] = time;
        low[root] = time;
        time += 1;

        let mut root_children = 0;
        let mut stack = vec![Frame {
            u: root,
            parent_edge: None,
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let u = frame.u;
            if frame.next < adj[u].len() {
                let (eid, v) = adj[u][frame.next];
                frame.next += 1;

                if Some(eid) == frame.parent_edge {
                    continue;
                }
                if preorder[v] == usize::MAX {
                    edge_stack.push(eid);
                    preorder[v] = time;
                    low[v] = time;
                    time += 1;
                    if u == root {
                        root_children += 1;
                    }
                    stack.push(Frame {
                        u: v,
                        parent_edge: Some(eid),
                        next: 0,
                    });
                } else if preorder[v] < preorder[u] {
                    // back edge, the descendant end pushes it
                    edge_stack.push(eid);
                    low[u] = low[u].min(preorder[v]);
                }
                continue;
            }

            let Some(Frame { u, parent_edge, .. }) = stack.pop() else {
                break;
            };
            let (Some(parent_edge), Some(parent)) = (parent_edge, stack.last().map(|f| f.u)) else {
                continue;
            };

            low[parent] = low[parent].min(low[u]);
            if low[u] >= preorder[parent] {
                // parent separates the subtree of u, unless it is a root with a single child
                if parent != root {
                    is_cut.insert(parent);
                }
                let mut block = Vec::new();
                while let Some(eid) = edge_stack.pop() {
                    block.push(eid);
                    if eid == parent_edge {
                        break;
                    }
                }
                blocks.push(block);
            }
        }

        if root_children > 1 {
            is_cut.insert(root);
        }
        if unreached.is_none() {
            unreached = Some((0..n).filter(|&v| preorder[v] == usize::MAX).collect());
        }
    }

    BlockCutTree {
        block_count: blocks.len(),
        cut_count: is_cut.count_ones(..),
        blocks,
        is_cut,
        unreached: unreached.unwrap_or_default(),
    }
}

/// Returns the blocks and cut vertices of a graph given as an edge list.
pub fn get_block_cut_tree_of_edges(n: usize, edges: &[(usize, usize)]) -> BlockCutTree {
    search_blocks(n, edges, 0..n)
}

/// Returns the blocks and cut vertices of a petgraph graph.
///
/// Block edge ids are petgraph's edge indices.
pub fn get_block_cut_tree<N, E>(graph: &petgraph::graph::UnGraph<N, E>) -> BlockCutTree {
    let edges: Vec<_> = graph
        .edge_references()
        .map(|e| (e.source().index(), e.target().index()))
        .collect();
    get_block_cut_tree_of_edges(graph.node_count(), &edges)
}

/// Checks that the root and every endpoint are vertices of the graph.
pub(crate) fn check_ranges(
    n: usize,
    edges: &[(usize, usize)],
    root: usize,
) -> Result<(), InvalidInputError> {
    if root >= n {
        return Err(InvalidInputError::RootOutOfRange { root, n });
    }
    for (edge, &(s, t)) in edges.iter().enumerate() {
        if let Some(vertex) = [s, t].into_iter().find(|&x| x >= n) {
            return Err(InvalidInputError::VertexOutOfRange { edge, vertex, n });
        }
    }
    Ok(())
}

/// Checks every precondition of the decomposition: sizes, endpoints, no self-loops,
/// connectivity and absence of cut vertices.
pub(crate) fn check_biconnected(
    n: usize,
    edges: &[(usize, usize)],
    root: usize,
) -> Result<(), InvalidInputError> {
    if n < 2 {
        return Err(InvalidInputError::TooFewVertices { found: n });
    }
    if edges.len() < 3 {
        return Err(InvalidInputError::TooFewEdges { found: edges.len() });
    }
    check_ranges(n, edges, root)?;
    if let Some((edge, &(s, _))) = edges.iter().enumerate().find(|(_, (s, t))| s == t) {
        return Err(InvalidInputError::SelfLoop { edge, vertex: s });
    }

    let bct = search_blocks(n, edges, std::iter::once(root));
    if let Some(&vertex) = bct.unreached.first() {
        return Err(InvalidInputError::Disconnected { root, vertex });
    }
    if let Some(vertex) = bct.is_cut.ones().next() {
        return Err(InvalidInputError::CutVertex { vertex });
    }

    Ok(())
}
