use tracing::trace;

use crate::error::AlgorithmError;
use crate::triconnected_blocks::graph_internal::{Component, EdgeType, GraphInternal};
use crate::triconnected_blocks::outside_structures::{ComponentType, SeparationPairType};

/// Entry of the triple stack: a candidate type-2 pair `(a, b)` whose split-off part
/// reaches up to `h`. All three are `newnum` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Triple {
    h: usize,
    a: usize,
    b: usize,
}

/// End-of-stack marker, pushed when a path starts with a tree arc.
const EOS: Triple = Triple { h: 0, a: 0, b: 0 };

impl Triple {
    fn is_eos(&self) -> bool {
        self.a == 0
    }
}

struct TStack(Vec<Triple>);

impl TStack {
    /// Top of the stack, the marker when empty.
    fn top(&self) -> Triple {
        self.0.last().copied().unwrap_or(EOS)
    }

    fn push(&mut self, triple: Triple) {
        self.0.push(triple);
    }

    fn pop(&mut self, vertex: usize) -> Result<Triple, AlgorithmError> {
        self.0.pop().ok_or(AlgorithmError::EmptyStack {
            stack: "triple stack",
            vertex,
        })
    }

    /// Pops while `a` lies above `bound`; returns the largest `h` and the last `b` popped.
    fn pop_above(&mut self, bound: usize, vertex: usize) -> Result<Option<(usize, usize)>, AlgorithmError> {
        let mut popped = None;
        while self.top().a > bound {
            let t = self.pop(vertex)?;
            let y = popped.map_or(0, |(y, _)| y);
            popped = Some((y.max(t.h), t.b));
        }
        Ok(popped)
    }
}

fn pop_edge(estack: &mut Vec<usize>, vertex: usize) -> Result<usize, AlgorithmError> {
    estack.pop().ok_or(AlgorithmError::EmptyStack {
        stack: "edge stack",
        vertex,
    })
}

/// Locals of one `pathsearch(v)` call.
struct Frame {
    v: usize,
    next: usize,
    tree_arcs_left: usize,
    pending_start: bool,
}

impl Frame {
    fn new(graph: &GraphInternal, v: usize) -> Self {
        let tree_arcs_left = graph.adj[v]
            .iter()
            .filter(|&&eid| graph.edge_type[eid] == Some(EdgeType::Tree))
            .count();
        Self {
            v,
            next: 0,
            tree_arcs_left,
            pending_start: false,
        }
    }
}

struct PathSearch<'a> {
    graph: &'a mut GraphInternal,
    estack: Vec<usize>,
    tstack: TStack,
}

impl PathSearch<'_> {
    fn run(&mut self) -> Result<(), AlgorithmError> {
        let root = self.graph.root;
        let mut frames = vec![Frame::new(self.graph, root)];

        while let Some(frame) = frames.last_mut() {
            let v = frame.v;
            let i = frame.next;

            if i == self.graph.adj[v].len() {
                frames.pop();
                if let Some(parent) = frames.last_mut() {
                    parent.tree_arcs_left -= 1;
                    self.after_tree_arc(
                        parent.v,
                        parent.next,
                        v,
                        parent.pending_start,
                        parent.tree_arcs_left,
                    )?;
                    parent.next += 1;
                }
                continue;
            }

            if !self.graph.is_live_slot(v, i) {
                frame.next += 1;
                continue;
            }

            let eid = self.graph.adj[v][i];
            match self.graph.edge_type[eid] {
                Some(EdgeType::Tree) => {
                    let w = self.graph.edges[eid].1;
                    let start = self.graph.starts_path[eid];
                    if start {
                        self.open_tree_path(v, w)?;
                    }
                    frame.pending_start = start;
                    frames.push(Frame::new(self.graph, w));
                }
                Some(EdgeType::Back) => {
                    self.frond(v, i, eid)?;
                    frame.next += 1;
                }
                _ => {
                    return Err(AlgorithmError::UnexpectedEdgeType {
                        vertex: v,
                        edge: eid,
                        expected: "tree arc or frond",
                    });
                }
            }
        }

        let mut component = Component::new(None);
        while let Some(eid) = self.estack.pop() {
            component.push_edge(eid);
        }
        if !component.is_empty() {
            component.commit(self.graph)?;
        }

        Ok(())
    }

    /// Triples for a path that starts with the tree arc `v -> w`, then the scope marker.
    fn open_tree_path(&mut self, v: usize, w: usize) -> Result<(), AlgorithmError> {
        let graph = &*self.graph;
        let (vnum, wnum) = (graph.newnum[v], graph.newnum[w]);
        let (low1, last) = (graph.low1[w], wnum + graph.sub[w] - 1);

        let triple = match self.tstack.pop_above(low1, v)? {
            Some((y, b)) => Triple {
                h: y.max(last),
                a: low1,
                b,
            },
            None => Triple {
                h: last,
                a: low1,
                b: vnum,
            },
        };
        self.tstack.push(triple);
        self.tstack.push(EOS);

        Ok(())
    }

    fn frond(&mut self, v: usize, i: usize, eid: usize) -> Result<(), AlgorithmError> {
        let Self {
            graph,
            estack,
            tstack,
        } = self;
        let w = graph.edges[eid].1;
        let (vnum, wnum) = (graph.newnum[v], graph.newnum[w]);

        if graph.starts_path[eid] {
            let triple = match tstack.pop_above(wnum, v)? {
                Some((y, b)) => Triple { h: y, a: wnum, b },
                None => Triple {
                    h: vnum,
                    a: wnum,
                    b: vnum,
                },
            };
            tstack.push(triple);
        }

        if graph.par[v] != Some(w) {
            estack.push(eid);
            return Ok(());
        }

        // frond parallel to the tree arc into v
        let eh = graph.par_edge[v].ok_or(AlgorithmError::UnexpectedEdgeType {
            vertex: v,
            edge: eid,
            expected: "frond below a tree arc",
        })?;
        trace!(a = w, b = v, "frond closes a bond with the tree arc");

        debug_assert_eq!(graph.adj_slot[eid], Some((v, i)));
        graph.del_slot(eid);
        graph.del_high(eid);
        let evirt = graph.new_virtual_edge(w, v, SeparationPairType::Type1);

        let mut bond = Component::new(Some(ComponentType::TripleBond));
        bond.push_edge(eid);
        bond.push_edge(eh);
        bond.push_edge(evirt);
        bond.commit(graph)?;

        graph.kill_edge(eid);
        graph.replace_tree_arc(v, eh, evirt);
        graph.deg[v] -= 1;
        graph.deg[w] -= 1;

        Ok(())
    }

    fn after_tree_arc(
        &mut self,
        v: usize,
        i: usize,
        child: usize,
        start: bool,
        tree_arcs_left: usize,
    ) -> Result<(), AlgorithmError> {
        let vnum = self.graph.newnum[v];

        // the arc may have been replaced by a virtual edge while below
        let tree_arc = self.graph.par_edge[child].ok_or(AlgorithmError::UnexpectedEdgeType {
            vertex: child,
            edge: self.graph.adj[v][i],
            expected: "tree arc",
        })?;
        self.estack.push(tree_arc);

        let w = self.type_2_pairs(v, i, child)?;
        self.type_1_pair(v, i, w, tree_arcs_left)?;

        if start {
            while !self.tstack.top().is_eos() {
                self.tstack.pop(v)?;
            }
            self.tstack.pop(v)?;
        }

        loop {
            let top = self.tstack.top();
            if top.is_eos() || top.b == vnum || self.graph.get_high(v) <= top.h {
                break;
            }
            self.tstack.pop(v)?;
        }

        Ok(())
    }

    /// Splits off every type-2 pair `{v, x}` found after returning from `child`.
    ///
    /// Each split replaces the tree arc at slot `i` of `v` by a virtual tree arc `v -> x`,
    /// returns the last such `x` (or `child` itself).
    fn type_2_pairs(&mut self, v: usize, i: usize, child: usize) -> Result<usize, AlgorithmError> {
        let Self {
            graph,
            estack,
            tstack,
        } = self;
        let vnum = graph.newnum[v];
        let mut w = child;

        while vnum != 1 {
            let top = tstack.top();
            let wnum = graph.newnum[w];
            let degree_two = graph.deg[w] == 2
                && graph
                    .first_child(w)
                    .is_some_and(|x| graph.newnum[x] > wnum);
            if top.a != vnum && !degree_two {
                break;
            }

            if top.a == vnum && graph.par[graph.node_at[top.b]] == Some(graph.node_at[top.a]) {
                tstack.pop(v)?;
                continue;
            }

            let mut parallel = Vec::new();
            let x;
            let mut evirt;

            if degree_two {
                let e1 = pop_edge(estack, v)?;
                let e2 = pop_edge(estack, v)?;
                if graph.edges[e2].0 != w {
                    return Err(AlgorithmError::UnexpectedEdgeType {
                        vertex: w,
                        edge: e2,
                        expected: "tree arc leaving a degree-2 vertex",
                    });
                }
                graph.del_slot(e2);

                x = graph.edges[e2].1;
                trace!(a = v, b = x, "type-2 pair around a degree-2 vertex");
                evirt = graph.new_virtual_edge(v, x, SeparationPairType::Type2);
                graph.deg[x] -= 1;
                graph.deg[v] -= 1;

                let mut component = Component::new(Some(ComponentType::Triangle));
                component.push_edge(e1);
                component.push_edge(e2);
                component.push_edge(evirt);
                component.commit(graph)?;

                if let Some(&top_edge) = estack.last() {
                    if graph.has_endpoints(top_edge, x, v) {
                        estack.pop();
                        graph.del_slot(top_edge);
                        graph.del_high(top_edge);
                        parallel.push(top_edge);
                    }
                }
            } else {
                let Triple { h, a, b } = tstack.pop(v)?;
                let inside = |n: usize| a <= n && n <= h;

                let mut component = Component::new(None);
                while let Some(&xy) = estack.last() {
                    let (s, t) = graph.edges[xy];
                    let (sn, tn) = (graph.newnum[s], graph.newnum[t]);
                    if !(inside(sn) && inside(tn)) {
                        break;
                    }
                    estack.pop();

                    if (sn == a && tn == b) || (sn == b && tn == a) {
                        graph.del_slot(xy);
                        graph.del_high(xy);
                        parallel.push(xy);
                    } else {
                        if graph.adj_slot[xy] != Some((v, i)) {
                            graph.del_slot(xy);
                            graph.del_high(xy);
                        }
                        component.push_edge(xy);
                        graph.deg[s] -= 1;
                        graph.deg[t] -= 1;
                    }
                }

                x = graph.node_at[b];
                trace!(a = v, b = x, "type-2 pair");
                evirt = graph.new_virtual_edge(v, x, SeparationPairType::Type2);
                component.push_edge(evirt);
                component.commit(graph)?;
            }

            if !parallel.is_empty() {
                let mut bond = Component::new(Some(ComponentType::TripleBond));
                for &eid in &parallel {
                    bond.push_edge(eid);
                    graph.deg[x] -= 1;
                    graph.deg[v] -= 1;
                }
                bond.push_edge(evirt);
                evirt = graph.new_virtual_edge(v, x, SeparationPairType::Type2);
                bond.push_edge(evirt);
                bond.commit(graph)?;
            }

            estack.push(evirt);
            graph.set_slot(v, i, evirt);
            graph.deg[x] += 1;
            graph.deg[v] += 1;
            graph.par[x] = Some(v);
            graph.par_edge[x] = Some(evirt);
            graph.edge_type[evirt] = Some(EdgeType::Tree);

            w = x;
        }

        Ok(w)
    }

    /// Splits off the subtree of `w` when `{v, lowpt1(w)}` is a type-1 pair.
    fn type_1_pair(
        &mut self,
        v: usize,
        i: usize,
        w: usize,
        tree_arcs_left: usize,
    ) -> Result<(), AlgorithmError> {
        let Self { graph, estack, .. } = self;
        let (vnum, wnum) = (graph.newnum[v], graph.newnum[w]);
        let low1 = graph.low1[w];

        let root_child_done = graph.par[v] == Some(graph.root) && tree_arcs_left == 0;
        if !(graph.low2[w] >= vnum && low1 < vnum && !root_child_done) {
            return Ok(());
        }

        let subtree = wnum..wnum + graph.sub[w];
        let mut component = Component::new(None);
        while let Some(&xy) = estack.last() {
            let (s, t) = graph.edges[xy];
            if !(subtree.contains(&graph.newnum[s]) || subtree.contains(&graph.newnum[t])) {
                break;
            }
            estack.pop();
            component.push_edge(xy);
            graph.del_high(xy);
            graph.deg[s] -= 1;
            graph.deg[t] -= 1;
        }

        let lv = graph.node_at[low1];
        trace!(a = v, b = lv, "type-1 pair");
        let mut evirt = graph.new_virtual_edge(v, lv, SeparationPairType::Type1);
        component.push_edge(evirt);
        component.commit(graph)?;

        if let Some(&eh) = estack.last() {
            if graph.has_endpoints(eh, v, lv) {
                estack.pop();
                if graph.adj_slot[eh] != Some((v, i)) {
                    graph.del_slot(eh);
                }

                let mut bond = Component::new(Some(ComponentType::TripleBond));
                bond.push_edge(eh);
                bond.push_edge(evirt);
                evirt = graph.new_virtual_edge(v, lv, SeparationPairType::Type1);
                bond.push_edge(evirt);
                bond.commit(graph)?;

                graph.transfer_high(eh, evirt);
                graph.deg[v] -= 1;
                graph.deg[lv] -= 1;
            }
        }

        if graph.par[v] != Some(lv) {
            estack.push(evirt);
            graph.set_slot(v, i, evirt);
            graph.edge_type[evirt] = Some(EdgeType::Back);
            if !graph.has_high(evirt) && graph.get_high(lv) < vnum {
                graph.push_high(lv, vnum, evirt);
            }
            graph.deg[v] += 1;
            graph.deg[lv] += 1;
            return Ok(());
        }

        // the virtual edge runs parallel to the tree arc into v
        if graph.is_live_slot(v, i) {
            let old = graph.adj[v][i];
            graph.del_slot(old);
        }
        let eh = graph.par_edge[v].ok_or(AlgorithmError::UnexpectedEdgeType {
            vertex: v,
            edge: evirt,
            expected: "tree arc into a non-root vertex",
        })?;
        let tree_arc = graph.new_virtual_edge(lv, v, SeparationPairType::Type1);

        let mut bond = Component::new(Some(ComponentType::TripleBond));
        bond.push_edge(evirt);
        bond.push_edge(tree_arc);
        bond.push_edge(eh);
        bond.commit(graph)?;

        graph.replace_tree_arc(v, eh, tree_arc);

        Ok(())
    }
}

/// Splits the prepared graph into triple bonds, triangles and triconnected graphs,
/// recording every separation pair met on the way.
///
/// Expects the ordered adjacency lists and the numbering of the path finder.
pub(crate) fn find_split_components(graph: &mut GraphInternal) -> Result<(), AlgorithmError> {
    let mut search = PathSearch {
        graph,
        estack: Vec::new(),
        tstack: TStack(vec![EOS]),
    };
    search.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triconnected_blocks::{
        acceptable_adj::make_adjacency_lists_acceptable,
        handle_duplicate_edges::handle_duplicate_edges, palm_dfs::run_palm_dfs,
        pathfinder::run_pathfinder,
    };

    fn split(n: usize, edges: &[(usize, usize)]) -> GraphInternal {
        let mut graph = GraphInternal::from_edges(n, edges, 0);
        handle_duplicate_edges(&mut graph).unwrap();
        run_palm_dfs(&mut graph);
        make_adjacency_lists_acceptable(&mut graph);
        run_pathfinder(&mut graph).unwrap();
        find_split_components(&mut graph).unwrap();
        graph
    }

    fn types(graph: &GraphInternal) -> Vec<ComponentType> {
        let mut types: Vec<_> = graph
            .split_components
            .iter()
            .map(|c| c.component_type)
            .collect();
        types.sort_by_key(|t| t.to_string());
        types
    }

    #[test]
    fn test_triangle() {
        let graph = split(3, &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(types(&graph), vec![ComponentType::Triangle]);
        assert!(graph.pairs.is_empty());
    }

    #[test]
    fn test_k4_is_one_component() {
        let edges = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
        let graph = split(4, &edges);

        assert_eq!(types(&graph), vec![ComponentType::TriconnectedGraph]);
        let mut all = graph.split_components[0].edges.clone();
        all.sort();
        assert_eq!(all, vec![0, 1, 2, 3, 4, 5]);
        assert!(graph.pairs.is_empty());
    }

    #[test]
    fn test_square_splits_into_triangles() {
        let graph = split(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);

        assert_eq!(
            types(&graph),
            vec![ComponentType::Triangle, ComponentType::Triangle]
        );
        assert_eq!(graph.pairs.len(), 1);
        let shared = graph.pairs[0].virtual_edges[0];
        assert!(
            graph
                .split_components
                .iter()
                .all(|c| c.virtual_edges == vec![shared])
        );
    }

    #[test]
    fn test_every_edge_is_accounted_for() {
        // two K4 sharing the edge (0, 1), plus a path 0 - 6 - 1
        let edges = [
            (0, 1),
            (0, 2),
            (0, 3),
            (1, 2),
            (1, 3),
            (2, 3),
            (0, 4),
            (0, 5),
            (1, 4),
            (1, 5),
            (4, 5),
            (0, 6),
            (6, 1),
        ];
        let graph = split(7, &edges);

        let mut count = vec![0; graph.edges.len()];
        for component in &graph.split_components {
            assert!(component.len() >= 3);
            for eid in component.all_edges() {
                count[eid] += 1;
            }
        }
        for (eid, &c) in count.iter().enumerate() {
            if eid < edges.len() {
                assert_eq!(c, 1, "real edge {eid}");
            } else if c > 0 {
                assert_eq!(c, 2, "virtual edge {eid}");
            }
        }
        assert_eq!(graph.pairs.len(), 1);
        assert_eq!((graph.pairs[0].a, graph.pairs[0].b), (0, 1));
    }
}
