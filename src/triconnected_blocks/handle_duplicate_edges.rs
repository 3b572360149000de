use tracing::debug;

use crate::error::AlgorithmError;
use crate::triconnected_blocks::graph_internal::{Component, GraphInternal};
use crate::triconnected_blocks::outside_structures::{ComponentType, SeparationPairType};

fn endpoints_key(edge: (usize, usize)) -> u64 {
    let (s, t) = (edge.0.min(edge.1), edge.0.max(edge.1));
    ((s as u64) << 32) | t as u64
}

/// Splits a bundle of `k >= 2` parallel edges into a chain of triple bonds.
///
/// Each bond holds the edge carried from the previous bond, one more edge of the bundle and
/// a fresh virtual edge, which is carried on. The last virtual edge stays in the graph as the
/// bundle's representative. When the bundle is the whole graph there is nothing to represent,
/// so the chain closes with the last two real edges instead.
fn split_bundle(graph: &mut GraphInternal, bundle: &[usize]) -> Result<(), AlgorithmError> {
    let (s, t) = graph.edges[bundle[0]];
    let whole_graph = graph.n == 2;

    for &eid in bundle {
        graph.kill_edge(eid);
    }

    let mut carry = bundle[0];
    for idx in 1..bundle.len() {
        let mut component = Component::new(Some(ComponentType::TripleBond));
        component.push_edge(carry);
        component.push_edge(bundle[idx]);

        if whole_graph && idx + 2 == bundle.len() {
            component.push_edge(bundle[idx + 1]);
            component.commit(graph)?;
            return Ok(());
        }

        let evirt = graph.new_virtual_edge(s, t, SeparationPairType::Type1);
        component.push_edge(evirt);
        component.commit(graph)?;

        graph.kill_edge(evirt);
        carry = evirt;
    }

    // the representative takes part in the search
    graph.edge_type[carry] = None;
    Ok(())
}

/// Replaces every bundle of parallel edges with a single virtual edge and builds the
/// undirected adjacency lists of what remains.
///
/// Bundles are found by sorting edge ids by their unordered endpoints, so edge ids never
/// change. Adjacency lists list edges in id order.
pub(crate) fn handle_duplicate_edges(graph: &mut GraphInternal) -> Result<(), AlgorithmError> {
    let m = graph.edges.len();
    let mut ids: Vec<usize> = (0..m).collect();
    radsort::sort_by_key(&mut ids, |&eid| endpoints_key(graph.edges[eid]));

    let mut i = 0;
    while i < m {
        let key = endpoints_key(graph.edges[ids[i]]);
        let mut j = i + 1;
        while j < m && endpoints_key(graph.edges[ids[j]]) == key {
            j += 1;
        }

        if j - i >= 2 {
            let mut bundle = ids[i..j].to_vec();
            bundle.sort_unstable();
            debug!(edges = ?bundle, "splitting off parallel edges");
            split_bundle(graph, &bundle)?;
        }
        i = j;
    }

    graph.adj = vec![Vec::new(); graph.n];
    graph.deg.fill(0);
    for eid in 0..graph.edges.len() {
        if graph.edge_type[eid].is_some() {
            continue;
        }
        let (s, t) = graph.edges[eid];
        graph.adj[s].push(eid);
        graph.adj[t].push(eid);
        graph.deg[s] += 1;
        graph.deg[t] += 1;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_duplicates() {
        let mut graph = GraphInternal::from_edges(3, &[(0, 1), (1, 2), (2, 0)], 0);
        handle_duplicate_edges(&mut graph).unwrap();

        assert!(graph.split_components.is_empty());
        assert!(graph.pairs.is_empty());
        assert_eq!(graph.adj, vec![vec![0, 2], vec![0, 1], vec![1, 2]]);
        assert_eq!(graph.deg, vec![2, 2, 2]);
    }

    #[test]
    fn test_bundle_becomes_chain() {
        // three edges between 0 and 1 inside a triangle
        let edges = [(0, 1), (1, 2), (1, 0), (2, 0), (0, 1)];
        let mut graph = GraphInternal::from_edges(3, &edges, 0);
        handle_duplicate_edges(&mut graph).unwrap();

        // {0, 2, v5}, {v5, 4, v6}, v6 stays
        assert_eq!(graph.split_components.len(), 2);
        assert_eq!(graph.split_components[0].edges, vec![0, 2]);
        assert_eq!(graph.split_components[0].virtual_edges, vec![5]);
        assert_eq!(graph.split_components[1].edges, vec![4]);
        assert_eq!(graph.split_components[1].virtual_edges, vec![5, 6]);
        assert!(
            graph
                .split_components
                .iter()
                .all(|c| c.component_type == ComponentType::TripleBond)
        );

        assert_eq!(graph.pairs.len(), 1);
        assert_eq!((graph.pairs[0].a, graph.pairs[0].b), (0, 1));
        assert_eq!(graph.pairs[0].pair_type, SeparationPairType::Type1);

        assert_eq!(graph.adj[0], vec![3, 6]);
        assert_eq!(graph.deg, vec![2, 2, 2]);
    }

    #[test]
    fn test_whole_graph_bundle() {
        let mut graph = GraphInternal::from_edges(2, &[(0, 1), (1, 0), (0, 1)], 0);
        handle_duplicate_edges(&mut graph).unwrap();

        assert_eq!(graph.split_components.len(), 1);
        assert_eq!(graph.split_components[0].edges, vec![0, 1, 2]);
        assert!(graph.split_components[0].virtual_edges.is_empty());
        assert!(graph.pairs.is_empty());
        assert_eq!(graph.adj, vec![Vec::<usize>::new(), vec![]]);
    }

    #[test]
    fn test_whole_graph_long_bundle() {
        let mut graph = GraphInternal::from_edges(2, &[(0, 1); 5], 0);
        handle_duplicate_edges(&mut graph).unwrap();

        // {0, 1, v5}, {v5, 2, v6}, {v6, 3, 4}
        assert_eq!(graph.split_components.len(), 3);
        assert_eq!(graph.split_components[2].edges, vec![3, 4]);
        assert_eq!(graph.split_components[2].virtual_edges, vec![6]);
        assert_eq!(graph.pairs.len(), 1);
        assert_eq!(graph.pairs[0].virtual_edges, vec![5, 6]);
    }
}
