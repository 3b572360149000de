//! Decomposition configuration.

#[derive(Debug, Clone, Copy)]
pub struct DecompositionOptions {
    /// Vertex the depth-first searches start from.
    pub root: usize,
    /// Run the biconnectivity / self-loop / size checks before decomposing.
    /// Turning this off on an invalid graph yields unspecified components or an
    /// [`AlgorithmError`](crate::AlgorithmError).
    pub check_input: bool,
    /// Merge triangles whose three edges are all virtual into neighbouring rings.
    /// With `false` such triangles stay separate rings.
    pub merge_virtual_triangles: bool,
}

impl Default for DecompositionOptions {
    fn default() -> Self {
        Self {
            root: 0,
            check_input: true,
            merge_virtual_triangles: true,
        }
    }
}

impl DecompositionOptions {
    pub fn with_root(self, root: usize) -> Self {
        Self { root, ..self }
    }

    /// Skips input validation, for callers that already hold a block.
    pub fn unchecked(self) -> Self {
        Self {
            check_input: false,
            ..self
        }
    }
}
