use petgraph::visit::NodeIndexable;

use crate::{EdgeLabel, UnGraph};

/// Enumerates every simple graph on `n` labelled vertices, one bit of `mask` per vertex pair.
pub(crate) struct GraphEnumeratorState {
    pub n: usize,
    pub mask: usize,
    pub last_mask: usize,
}

impl GraphEnumeratorState {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            mask: 0,
            last_mask: 1 << (n * (n - 1) / 2),
        }
    }
}

impl Iterator for GraphEnumeratorState {
    type Item = UnGraph;

    fn next(&mut self) -> Option<Self::Item> {
        if self.mask == self.last_mask {
            return None;
        }

        let mut graph = UnGraph::new_undirected();
        for i in 0..self.n {
            graph.add_node(i as u32);
        }

        let mut check = 0;
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                if self.mask & (1 << check) != 0 {
                    graph.add_edge(graph.from_index(i), graph.from_index(j), EdgeLabel::Real);
                }
                check += 1;
            }
        }

        self.mask += 1;
        Some(graph)
    }
}

#[test]
fn test_counts_all_graphs() {
    assert_eq!(GraphEnumeratorState::new(3).count(), 8);
    assert_eq!(
        GraphEnumeratorState::new(4)
            .filter(|g| g.edge_count() == 6)
            .count(),
        1
    );
}
