use crate::triconnected_blocks::graph_internal::{EdgeType, GraphInternal};

/// Order value of an outgoing edge, given the numbering used by `number`.
///
/// Fronds to `w` take bucket `2 * w + 1`, tree arcs take `2 * lowpt1` when `lowpt2` lies
/// above the source and `2 * lowpt1 + 1` otherwise. Inside a bucket fronds come first.
pub(crate) fn phi(graph: &GraphInternal, number: &[usize], eid: usize) -> usize {
    let (u, to) = graph.edges[eid];
    let (bucket, is_tree) = match graph.edge_type[eid] {
        Some(EdgeType::Tree) if graph.low2[to] < number[u] => (2 * graph.low1[to], 1),
        Some(EdgeType::Tree) => (2 * graph.low1[to] + 1, 1),
        _ => (2 * number[to] + 1, 0),
    };
    2 * bucket + is_tree
}

/// Rebuilds `adj` as ordered out-lists, the order the path search relies on.
///
/// Edge ids are radix sorted by [`phi`], which is stable, so the result only depends on the
/// input edge order.
pub(crate) fn make_adjacency_lists_acceptable(graph: &mut GraphInternal) {
    let mut ids: Vec<usize> = (0..graph.edges.len())
        .filter(|&eid| {
            matches!(
                graph.edge_type[eid],
                Some(EdgeType::Tree) | Some(EdgeType::Back)
            )
        })
        .collect();
    radsort::sort_by_key(&mut ids, |&eid| phi(graph, &graph.number, eid) as u64);

    let mut new_adj = vec![Vec::new(); graph.n];
    for eid in ids {
        let (s, _) = graph.edges[eid];
        new_adj[s].push(eid);
    }

    graph.adj = new_adj;
    graph.index_slots();
}
