use crate::error::AlgorithmError;
use crate::triconnected_blocks::acceptable_adj::phi;
use crate::triconnected_blocks::graph_internal::{EdgeType, GraphInternal};

struct Frame {
    u: usize,
    next: usize,
}

/// Second DFS, over the ordered adjacency lists.
///
/// Vertices get `newnum[u] = m - sub[u] + 1`, where `m` starts at `n` and drops on every
/// return through a tree arc. This numbers each subtree after the subtrees of later tree
/// arcs, which the path search relies on. The first edge of each path is marked in
/// `starts_path` and every frond `u -> w` adds `newnum[u]` to the highpoint list of `w`.
fn dfs(graph: &mut GraphInternal) {
    let root = graph.root;
    let mut m = graph.n;
    let mut new_path = true;

    graph.newnum[root] = m - graph.sub[root] + 1;
    let mut stack = vec![Frame { u: root, next: 0 }];

    while let Some(frame) = stack.last_mut() {
        let u = frame.u;
        if frame.next == graph.adj[u].len() {
            stack.pop();
            if !stack.is_empty() {
                m -= 1;
            }
            continue;
        }

        let eid = graph.adj[u][frame.next];
        frame.next += 1;

        if new_path {
            new_path = false;
            graph.starts_path[eid] = true;
        }

        let to = graph.edges[eid].1;
        if graph.edge_type[eid] == Some(EdgeType::Tree) {
            graph.newnum[to] = m - graph.sub[to] + 1;
            stack.push(Frame { u: to, next: 0 });
        } else {
            let value = graph.newnum[u];
            graph.push_high(to, value, eid);
            new_path = true;
        }
    }

    // lists were filled front first
    graph.reverse_highs();
}

/// Checks that the adjacency lists are still ordered under `newnum`, and that consecutive
/// tree arcs `u -> v`, `u -> w` satisfy `newnum[u] < newnum[w] < newnum[v]`.
fn check_adjacency(graph: &GraphInternal) -> Result<(), AlgorithmError> {
    for (u, list) in graph.adj.iter().enumerate() {
        let mut previous_key = 0;
        let mut previous_child: Option<usize> = None;

        for &eid in list {
            let key = phi(graph, &graph.newnum, eid);
            if key < previous_key {
                return Err(AlgorithmError::AdjacencyOrder {
                    vertex: u,
                    edge: eid,
                    key,
                    previous_key,
                });
            }
            previous_key = key;

            if graph.edge_type[eid] != Some(EdgeType::Tree) {
                continue;
            }
            let w = graph.edges[eid].1;
            let upper = previous_child.map_or(usize::MAX, |e| graph.newnum[graph.edges[e].1]);
            if !(graph.newnum[u] < graph.newnum[w] && graph.newnum[w] < upper) {
                return Err(AlgorithmError::TreeArcOrder {
                    vertex: u,
                    first: previous_child.unwrap_or(eid),
                    second: eid,
                });
            }
            previous_child = Some(eid);
        }
    }

    Ok(())
}

/// Runs the path finder, renumbers `low1` and `low2` to `newnum`, fills `node_at` and
/// verifies the adjacency order.
pub(crate) fn run_pathfinder(graph: &mut GraphInternal) -> Result<(), AlgorithmError> {
    dfs(graph);

    let mut num2newnum = vec![0; graph.n + 1];
    for u in 0..graph.n {
        num2newnum[graph.number[u]] = graph.newnum[u];
    }

    for u in 0..graph.n {
        graph.low1[u] = num2newnum[graph.low1[u]];
        graph.low2[u] = num2newnum[graph.low2[u]];
        graph.node_at[graph.newnum[u]] = u;
    }

    check_adjacency(graph)
}
