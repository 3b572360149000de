use petgraph::visit::EdgeRef;
use tracing::{debug, info, instrument};

use crate::{
    EdgeLabel,
    block_cut::{check_biconnected, check_ranges},
    error::{AlgorithmError, Result},
    options::DecompositionOptions,
    triconnected_blocks::{
        acceptable_adj::make_adjacency_lists_acceptable,
        graph_internal::GraphInternal,
        handle_duplicate_edges::handle_duplicate_edges,
        merge_components::merge_components,
        outside_structures::{Decomposition, SeparationPair, virtual_edge_component_map},
        palm_dfs::run_palm_dfs,
        path_search::find_split_components,
        pathfinder::run_pathfinder,
    },
};

/// Every real edge must sit in exactly one split component, every virtual edge in two.
fn check_multiplicities(graph: &GraphInternal) -> std::result::Result<(), AlgorithmError> {
    let mut found = vec![0; graph.edges.len()];
    for component in &graph.split_components {
        for eid in component.all_edges() {
            found[eid] += 1;
        }
    }

    for (edge, &found) in found.iter().enumerate() {
        let expected = if graph.is_virtual(edge) { 2 } else { 1 };
        if found != expected {
            return Err(AlgorithmError::EdgeMultiplicity {
                edge,
                found,
                expected,
            });
        }
    }

    Ok(())
}

/// Computes the split components and triconnected components of a biconnected multigraph
/// given as an edge list over the vertices `0..n`.
///
/// # Overview
///
/// A pair of vertices `{a, b}` is a *separation pair* if removing both disconnects the graph,
/// or if several edges join `a` and `b`. Splitting the graph at a separation pair gives two
/// parts, each receiving a new *virtual* edge `(a, b)` so that they can be glued back later.
///
/// Splitting until no separation pair is left gives the split components, each one a
/// - **triple bond**: two vertices and three edges between them,
/// - **triangle**: three vertices joined by three edges,
/// - **triconnected graph**: a simple triconnected graph.
///
/// Merging triple bonds that share a virtual edge into bonds, and triangles into rings, gives
/// the triconnected components, which are unique for the graph.
///
/// # Errors
///
/// [`InvalidInputError`](crate::InvalidInputError) when the graph has fewer than 2 vertices
/// or 3 edges, a self-loop, an endpoint out of range, or is not biconnected.
/// [`AlgorithmError`] when an internal invariant breaks.
///
/// # Reference
/// - [Hopcroft, J., & Tarjan, R. (1973). Dividing a Graph into Triconnected Components. SIAM Journal on Computing, 2(3), 135–158.](https://epubs.siam.org/doi/10.1137/0202012)
/// - Gutwenger, C., & Mutzel, P. (2001). A Linear Time Implementation of SPQR-Trees. Graph Drawing 2000, LNCS 1984, 77–90.
#[instrument(skip(edges), fields(m = edges.len()))]
pub fn decompose_edge_list(
    n: usize,
    edges: &[(usize, usize)],
    options: DecompositionOptions,
) -> Result<Decomposition> {
    if options.check_input {
        check_biconnected(n, edges, options.root)?;
    } else {
        check_ranges(n, edges, options.root)?;
    }

    let mut graph = GraphInternal::from_edges(n, edges, options.root);

    // parallel edges become chains of triple bonds, one virtual edge stays
    handle_duplicate_edges(&mut graph)?;

    // with two vertices the bundle was the whole graph
    if n > 2 {
        // first dfs, computes number, low1, low2, sub, par and edge_type, orients the edges
        run_palm_dfs(&mut graph);

        // order adjacency lists by lowpoints
        make_adjacency_lists_acceptable(&mut graph);

        // pathfinder part: newnum, starts_path and highpoint lists, then the order is rechecked
        run_pathfinder(&mut graph)?;

        find_split_components(&mut graph)?;
    }

    check_multiplicities(&graph)?;
    debug!(
        split_components = graph.split_components.len(),
        separation_pairs = graph.pairs.len(),
        "graph split"
    );

    let components = merge_components(
        graph.edges.len(),
        &graph.split_components,
        options.merge_virtual_triangles,
    );
    info!(components = components.len(), "triconnected components found");

    let mut real_to_component = vec![0; edges.len()];
    for (i, component) in components.iter().enumerate() {
        for &eid in &component.edges {
            real_to_component[eid] = i;
        }
    }

    // real edges keep the caller's orientation
    let mut all_edges = graph.edges;
    all_edges[..edges.len()].copy_from_slice(edges);

    let edge_labels = (0..all_edges.len())
        .map(|eid| {
            if eid < edges.len() {
                EdgeLabel::Real
            } else {
                EdgeLabel::Virtual
            }
        })
        .collect();

    Ok(Decomposition {
        real_edge_count: edges.len(),
        edges: all_edges,
        edge_labels,
        separation_pairs: graph.pairs,
        virtual_edge_components: virtual_edge_component_map(&graph.split_components),
        split_components: graph.split_components,
        components,
        real_to_component,
    })
}

/// [`decompose_edge_list`] on a petgraph graph. Edge ids are petgraph's edge indices.
pub fn get_triconnected_components_with<N, E>(
    graph: &petgraph::graph::UnGraph<N, E>,
    options: DecompositionOptions,
) -> Result<Decomposition> {
    let edges: Vec<(usize, usize)> = graph
        .edge_references()
        .map(|e| (e.source().index(), e.target().index()))
        .collect();
    decompose_edge_list(graph.node_count(), &edges, options)
}

/// Computes the triconnected components of a biconnected multigraph with default options.
///
/// See [`decompose_edge_list`].
pub fn get_triconnected_components<N, E>(
    graph: &petgraph::graph::UnGraph<N, E>,
) -> Result<Decomposition> {
    get_triconnected_components_with(graph, DecompositionOptions::default())
}

/// Separation pairs found while decomposing `graph`, each listed once.
///
/// The list is not every separation pair of the graph: two non-adjacent vertices of a ring
/// separate it too, but only pairs the splitting actually used are reported.
pub fn separation_pairs<N, E>(graph: &petgraph::graph::UnGraph<N, E>) -> Result<Vec<SeparationPair>> {
    Ok(get_triconnected_components(graph)?.separation_pairs)
}
