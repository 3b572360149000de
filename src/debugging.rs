//! Graphviz rendering of the palm tree the decomposition works on.

use std::io;

use dot::{Edges, GraphWalk, Labeller, Nodes};
use petgraph::visit::EdgeRef;

use crate::block_cut::check_biconnected;
use crate::error::Result;
use crate::triconnected_blocks::{
    acceptable_adj::make_adjacency_lists_acceptable,
    graph_internal::{EdgeType, GraphInternal},
    handle_duplicate_edges::handle_duplicate_edges,
    palm_dfs::run_palm_dfs,
    pathfinder::run_pathfinder,
};

type Node = usize;

#[derive(Debug, Clone)]
struct Edge {
    id: usize,
    slot: usize,
    source: Node,
    target: Node,
    edge_type: Option<EdgeType>,
    start_path: bool,
}

struct PalmTree<'a> {
    graph: &'a GraphInternal,
    edges: Vec<Edge>,
    highs: Vec<Vec<usize>>,
}

impl<'a> Labeller<'a, Node, Edge> for PalmTree<'a> {
    fn graph_id(&self) -> dot::Id<'_> {
        dot::Id::new("G").unwrap()
    }

    fn node_id(&self, n: &Node) -> dot::Id<'_> {
        dot::Id::new(format!("N{}", n)).unwrap()
    }

    fn node_label(&self, n: &Node) -> dot::LabelText<'a> {
        let graph = self.graph;
        dot::LabelText::label(format!(
            "{}\nnum:{} new:{}\nhigh:{:?}\nl1:{} l2:{}\np:{} sz:{}",
            n,
            graph.number[*n],
            graph.newnum[*n],
            self.highs[*n],
            graph.low1[*n],
            graph.low2[*n],
            graph.par[*n].map_or("Root".to_string(), |p| p.to_string()),
            graph.sub[*n]
        ))
    }

    fn edge_label(&self, e: &Edge) -> dot::LabelText<'a> {
        let etype = match &e.edge_type {
            Some(t) => format!("{:?}", t),
            None => "None".to_string(),
        };
        dot::LabelText::label(format!(
            "{}({}) {} {}",
            e.id,
            e.slot,
            etype,
            if e.start_path { "start" } else { "" }
        ))
    }
}

impl<'a> GraphWalk<'a, Node, Edge> for PalmTree<'a> {
    fn nodes(&self) -> Nodes<'_, Node> {
        (0..self.graph.n).collect()
    }

    fn edges(&self) -> Edges<'_, Edge> {
        self.edges.as_slice().into()
    }

    fn source(&self, e: &Edge) -> Node {
        e.source
    }

    fn target(&self, e: &Edge) -> Node {
        e.target
    }
}

/// Renders the palm tree of `graph` rooted at `root` in DOT format.
///
/// Vertices show their preorder and path finder numbers, lowpoints (in path finder
/// numbering), father, subtree size and highpoint list. Edges show their id, position in the
/// ordered adjacency list, type and whether they start a path. Parallel edges appear as the
/// single virtual edge that stands for them.
pub fn palm_tree_dot<N, E>(graph: &petgraph::graph::UnGraph<N, E>, root: usize) -> Result<String> {
    let edges: Vec<(usize, usize)> = graph
        .edge_references()
        .map(|e| (e.source().index(), e.target().index()))
        .collect();
    check_biconnected(graph.node_count(), &edges, root)?;

    let mut internal = GraphInternal::from_edges(graph.node_count(), &edges, root);
    handle_duplicate_edges(&mut internal)?;
    run_palm_dfs(&mut internal);
    make_adjacency_lists_acceptable(&mut internal);
    run_pathfinder(&mut internal)?;

    let mut palm = PalmTree {
        graph: &internal,
        edges: Vec::new(),
        highs: (0..internal.n).map(|v| internal.highs_of(v).collect()).collect(),
    };
    for (v, eids) in internal.adj.iter().enumerate() {
        for (slot, &eid) in eids.iter().enumerate() {
            debug_assert_eq!(internal.edges[eid].0, v);
            let (source, target) = internal.edges[eid];
            palm.edges.push(Edge {
                id: eid,
                slot,
                source,
                target,
                edge_type: internal.edge_type[eid],
                start_path: internal.starts_path[eid],
            });
        }
    }

    let mut buffer = io::Cursor::new(Vec::new());
    dot::render(&palm, &mut buffer)?;
    let rendered = String::from_utf8(buffer.into_inner())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    Ok(rendered)
}
