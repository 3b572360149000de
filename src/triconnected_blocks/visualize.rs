use std::fmt;

use crate::triconnected_blocks::outside_structures::{ComponentType, Decomposition, SplitComponent};

/// Graphviz rendering of a decomposition: the input graph first, then one cluster per
/// triconnected component. Virtual edges are dashed.
pub struct DecompositionDot<'a>(pub &'a Decomposition);

fn style(component_type: ComponentType) -> (&'static str, &'static str) {
    match component_type {
        ComponentType::TriconnectedGraph => ("#e6e6ff", "#ccccff"),
        ComponentType::Bond | ComponentType::TripleBond => ("#e6ffe6", "#ccffcc"),
        ComponentType::Ring | ComponentType::Triangle => ("#ffe6e6", "#ffcccc"),
    }
}

impl DecompositionDot<'_> {
    fn write_component(
        &self,
        f: &mut fmt::Formatter<'_>,
        i: usize,
        component: &SplitComponent,
    ) -> fmt::Result {
        let decomposition = self.0;
        let prefix = format!("{}{}", component.component_type.spqr_letter(), i + 1);
        let (fillcolor, nodecolor) = style(component.component_type);

        writeln!(f, "  subgraph cluster_{prefix} {{")?;
        writeln!(f, "    label=\"{} ({})\";", component.component_type, i + 1)?;
        writeln!(f, "    style=filled; fillcolor=\"{fillcolor}\";")?;

        for v in decomposition.vertices_of(component) {
            writeln!(
                f,
                "    {prefix}_{v} [label=\"{v}\", shape=circle, fillcolor=\"{nodecolor}\", style=filled];"
            )?;
        }
        writeln!(f)?;

        for eid in component.all_edges() {
            let (from, to) = decomposition.edges[eid];
            let attributes = if decomposition.is_real(eid) {
                ", color=black"
            } else {
                ", style=dashed, color=gray"
            };
            writeln!(
                f,
                "    {prefix}_{from} -- {prefix}_{to} [label=\"{eid}\"{attributes}];"
            )?;
        }

        writeln!(f, "  }}")?;
        writeln!(f)
    }
}

impl fmt::Display for DecompositionDot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decomposition = self.0;

        writeln!(f, "graph components {{")?;
        writeln!(f, "  graph [splines=true, rankdir=LR];")?;
        writeln!(f, "  node [fontname=\"Helvetica\"];")?;
        writeln!(f)?;

        writeln!(f, "  subgraph cluster_graph {{")?;
        writeln!(f, "    label=\"Graph\";")?;
        writeln!(f, "    style=filled; fillcolor=\"#f0f0f0\";")?;

        let real = &decomposition.edges[..decomposition.real_edge_count];
        let mut nodes: Vec<usize> = real.iter().flat_map(|&(s, t)| [s, t]).collect();
        nodes.sort_unstable();
        nodes.dedup();
        for v in nodes {
            writeln!(
                f,
                "    {v} [label=\"{v}\", shape=circle, fillcolor=\"#ffffff\", style=filled];"
            )?;
        }
        writeln!(f)?;
        for (eid, (from, to)) in real.iter().enumerate() {
            writeln!(f, "    {from} -- {to} [label=\"{eid}\", color=black];")?;
        }
        writeln!(f, "  }}")?;
        writeln!(f)?;

        for (i, component) in decomposition.components.iter().enumerate() {
            self.write_component(f, i, component)?;
        }

        writeln!(f, "}}")
    }
}

/// Renders the triconnected components of `decomposition` in DOT format.
pub fn visualize_decomposition(decomposition: &Decomposition) -> String {
    DecompositionDot(decomposition).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DecompositionOptions, decompose_edge_list};

    #[test]
    fn test_bowtie_clusters() {
        let edges = [(0, 1), (0, 2), (1, 2), (0, 3), (1, 3)];
        let decomposition = decompose_edge_list(4, &edges, DecompositionOptions::default()).unwrap();
        let rendered = visualize_decomposition(&decomposition);

        assert!(rendered.starts_with("graph components {"));
        assert!(rendered.trim_end().ends_with('}'));
        assert_eq!(rendered.matches("subgraph cluster_").count(), 4);
        assert_eq!(rendered.matches("style=dashed").count(), 4);
        assert!(rendered.contains("label=\"bond"));
    }
}
