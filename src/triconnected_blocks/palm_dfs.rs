use crate::triconnected_blocks::graph_internal::{EdgeType, GraphInternal};

struct Frame {
    u: usize,
    next: usize,
}

fn fold_child(graph: &mut GraphInternal, u: usize, to: usize) {
    graph.sub[u] += graph.sub[to];

    if graph.low1[to] < graph.low1[u] {
        graph.low2[u] = graph.low1[u].min(graph.low2[to]);
        graph.low1[u] = graph.low1[to];
    } else if graph.low1[to] == graph.low1[u] {
        graph.low2[u] = graph.low2[u].min(graph.low2[to]);
    } else {
        graph.low2[u] = graph.low2[u].min(graph.low1[to]);
    }
}

fn fold_frond(graph: &mut GraphInternal, u: usize, to: usize) {
    if graph.number[to] < graph.low1[u] {
        graph.low2[u] = graph.low1[u];
        graph.low1[u] = graph.number[to];
    } else if graph.number[to] > graph.low1[u] {
        graph.low2[u] = graph.low2[u].min(graph.number[to]);
    }
}

/// Given a graph, this function calculates the `palm tree` of the graph using a DFS.
///
/// In particular, it calculates the values needed further in the algorithm:
/// - `number[u]` - preorder number of `u`, starting at 1 for the root
/// - `low1[u]` - the lowest `number` reachable from `u` through its subtree and one frond
/// - `low2[u]` - the second lowest such value, excluding `low1[u]`
/// - `sub[u]` - the size of the subtree rooted at `u`
/// - `par[u]`, `par_edge[u]` - the father and the tree arc entering `u`
///
/// It also determines the type of each live edge, either `Tree` or `Back`, and orients it:
/// tree arcs point away from the root, fronds point towards it.
///
/// The traversal uses an explicit stack, so long paths don't overflow the call stack.
pub(crate) fn run_palm_dfs(graph: &mut GraphInternal) {
    let root = graph.root;
    let mut time = 1;

    let mut visit = |graph: &mut GraphInternal, u: usize| {
        graph.number[u] = time;
        graph.low1[u] = time;
        graph.low2[u] = time;
        graph.sub[u] = 1;
        time += 1;
    };

    visit(graph, root);
    let mut stack = vec![Frame { u: root, next: 0 }];

    while let Some(frame) = stack.last_mut() {
        let u = frame.u;
        if frame.next == graph.adj[u].len() {
            stack.pop();
            if let Some(parent) = stack.last() {
                fold_child(graph, parent.u, u);
            }
            continue;
        }

        let eid = graph.adj[u][frame.next];
        frame.next += 1;

        if graph.edge_type[eid].is_some() {
            continue; // already seen from the other side, or split off
        }

        // a finished descendant has typed all its edges, so `to` is unvisited or an ancestor
        let to = graph.get_other_vertex(eid, u);
        graph.edges[eid] = (u, to);
        if graph.number[to] == 0 {
            graph.make_tedge(eid);
            visit(graph, to);
            stack.push(Frame { u: to, next: 0 });
        } else {
            graph.edge_type[eid] = Some(EdgeType::Back);
            fold_frond(graph, u, to);
        }
    }
}
