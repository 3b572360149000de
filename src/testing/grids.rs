use crate::{EdgeLabel, UnGraph};
use petgraph::graph::NodeIndex;

/// Generates a grid graph with the specified number of rows and columns.
pub fn generate_grid_graph(rows: usize, cols: usize) -> UnGraph {
    assert!(rows > 1 && cols > 1); // we want biconnected graph
    let mut graph = UnGraph::new_undirected();

    for r in 0..rows {
        for c in 0..cols {
            graph.add_node((r * cols + c) as u32);
        }
    }

    for r in 0..rows {
        for c in 0..cols {
            if r + 1 < rows {
                graph.add_edge(
                    NodeIndex::new(r * cols + c),
                    NodeIndex::new((r + 1) * cols + c),
                    EdgeLabel::Real,
                );
            }
            if c + 1 < cols {
                graph.add_edge(
                    NodeIndex::new(r * cols + c),
                    NodeIndex::new(r * cols + c + 1),
                    EdgeLabel::Real,
                );
            }
        }
    }

    graph
}

/// Wheel with hub 0 and rim `1..=spokes`, triconnected for `spokes >= 3`.
pub fn generate_wheel_graph(spokes: usize) -> UnGraph {
    let mut graph = UnGraph::new_undirected();
    for v in 0..=spokes {
        graph.add_node(v as u32);
    }
    for i in 1..=spokes {
        let next = i % spokes + 1;
        graph.add_edge(NodeIndex::new(0), NodeIndex::new(i), EdgeLabel::Real);
        graph.add_edge(NodeIndex::new(i), NodeIndex::new(next), EdgeLabel::Real);
    }
    graph
}
