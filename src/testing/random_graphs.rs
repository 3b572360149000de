use crate::EdgeLabel;
use crate::UnGraph;
use crate::block_cut::get_block_cut_tree_of_edges;
use petgraph::visit::NodeIndexable;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Random connected multigraph: a random spanning tree plus `m - n + 1` random extra edges.
/// Self-loops are skipped, parallel edges are kept.
pub fn random_graph_edges(n: usize, m: usize, seed: usize) -> Vec<(usize, usize)> {
    let mut rng = StdRng::seed_from_u64(seed as u64);
    let mut edges = Vec::with_capacity(m);

    for i in 1..n {
        let j = rng.random_range(0..i);
        edges.push((i, j));
    }

    while edges.len() < m.max(n - 1) {
        let s = rng.random_range(0..n);
        let t = rng.random_range(0..n);
        if s != t {
            edges.push((s, t));
        }
    }

    edges
}

/// Largest block of a random multigraph, with vertices renumbered densely.
pub fn random_biconnected_graph(n: usize, m: usize, seed: usize) -> UnGraph {
    let edges = random_graph_edges(n, m, seed);
    let bct = get_block_cut_tree_of_edges(n, &edges);

    let largest = (0..bct.block_count)
        .max_by_key(|&i| bct.blocks[i].len())
        .unwrap();
    bct.block_graph(&edges, largest)
}

/// The same graph with vertex `v` renamed to `perm[v]`; edge ids are kept.
pub fn relabel(graph: &UnGraph, perm: &[usize]) -> UnGraph {
    let mut ret = UnGraph::new_undirected();
    for v in 0..graph.node_count() {
        ret.add_node(v as u32);
    }
    for e in graph.raw_edges() {
        let (s, t) = (e.source().index(), e.target().index());
        ret.add_edge(ret.from_index(perm[s]), ret.from_index(perm[t]), EdgeLabel::Real);
    }
    ret
}

/// Random permutation of `0..n`.
pub fn random_permutation(n: usize, seed: usize) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed as u64);
    let mut perm: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = rng.random_range(0..=i);
        perm.swap(i, j);
    }
    perm
}

#[test]
fn test_random_biconnected_graph() {
    use crate::block_cut::get_block_cut_tree;

    for seed in 0..20 {
        let graph = random_biconnected_graph(10, 20, seed);
        let bct = get_block_cut_tree(&graph);
        assert!(bct.block_count <= 1);
        assert_eq!(bct.cut_count, 0);
    }
}
