// #![warn(missing_docs)]

//! # triconnectivity
//!
//! Splits a biconnected multigraph into its split components and triconnected components
//! with the linear time algorithm of Hopcroft and Tarjan, including the corrections of
//! Gutwenger and Mutzel.
//!
//! Based on [`petgraph`](https://docs.rs/petgraph).
//!
//! ```
//! use triconnectivity::{ComponentType, DecompositionOptions, decompose_edge_list};
//!
//! // two triangles sharing the edge 0-1
//! let edges = [(0, 1), (0, 2), (1, 2), (0, 3), (1, 3)];
//! let decomposition = decompose_edge_list(4, &edges, DecompositionOptions::default()).unwrap();
//!
//! assert_eq!(decomposition.separation_pairs.len(), 1);
//! assert_eq!(decomposition.components.len(), 3);
//! assert!(
//!     decomposition
//!         .components
//!         .iter()
//!         .any(|c| c.component_type == ComponentType::Bond)
//! );
//! ```
//!
//! Papers:
//! - Hopcroft, J., & Tarjan, R. (1973). Dividing a Graph into Triconnected Components.
//! - Gutwenger, C., & Mutzel, P. (2001). A Linear Time Implementation of SPQR-Trees.

pub mod block_cut;
pub mod debugging;
pub mod error;
pub mod input;
pub mod options;
pub mod triconnected;
pub mod triconnected_blocks;
pub mod types;

#[cfg(test)]
mod testing;

pub use debugging::palm_tree_dot;
pub use error::{AlgorithmError, Error, InvalidInputError, Result};
pub use options::DecompositionOptions;
pub use triconnected::{
    decompose_edge_list, get_triconnected_components, get_triconnected_components_with,
    separation_pairs,
};
pub use triconnected_blocks::outside_structures::{
    ComponentType, Decomposition, SeparationPair, SeparationPairType, SplitComponent,
};
pub use triconnected_blocks::visualize::visualize_decomposition;
pub use types::EdgeLabel;
pub use types::UnGraph;
