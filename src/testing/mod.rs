pub(crate) mod graph_enumerator;
pub(crate) mod grids;
pub(crate) mod random_graphs;
