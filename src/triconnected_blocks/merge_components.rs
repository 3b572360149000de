use std::collections::VecDeque;

use fixedbitset::FixedBitSet;

use crate::triconnected_blocks::outside_structures::{
    ComponentType, SplitComponent, virtual_edge_component_map,
};

fn merged_type(component_type: ComponentType) -> ComponentType {
    match component_type {
        ComponentType::TripleBond | ComponentType::Bond => ComponentType::Bond,
        ComponentType::Triangle | ComponentType::Ring => ComponentType::Ring,
        ComponentType::TriconnectedGraph => ComponentType::TriconnectedGraph,
    }
}

/// Merges split components into triconnected components.
///
/// Triple bonds sharing a virtual edge are glued into bonds, triangles into rings. The
/// components form a tree over their virtual edges, so each group is collected with a BFS and
/// every virtual edge inside a group is dropped. Triconnected graphs are kept as they are.
///
/// With `merge_virtual_triangles` unset, polygons without a real edge don't take part.
pub(crate) fn merge_components(
    edge_count: usize,
    split_components: &[SplitComponent],
    merge_virtual_triangles: bool,
) -> Vec<SplitComponent> {
    let owners = virtual_edge_component_map(split_components);

    let mergeable = |c: &SplitComponent| match c.component_type {
        ComponentType::TriconnectedGraph => false,
        ComponentType::Triangle | ComponentType::Ring => {
            merge_virtual_triangles || !c.edges.is_empty()
        }
        ComponentType::TripleBond | ComponentType::Bond => true,
    };

    let mut merged_already = FixedBitSet::with_capacity(split_components.len());
    let mut inner_edge = FixedBitSet::with_capacity(edge_count);
    let mut ret = Vec::new();

    for (i, component) in split_components.iter().enumerate() {
        if merged_already.contains(i) {
            continue;
        }
        merged_already.insert(i);

        if !mergeable(component) {
            ret.push(SplitComponent {
                component_type: merged_type(component.component_type),
                ..component.clone()
            });
            continue;
        }

        let letter = component.component_type.spqr_letter();
        let mut edges = Vec::new();
        let mut virtual_edges = Vec::new();
        let mut queue = VecDeque::from([i]);

        while let Some(j) = queue.pop_front() {
            let current = &split_components[j];
            edges.extend_from_slice(&current.edges);

            for &eid in &current.virtual_edges {
                if inner_edge.contains(eid) {
                    continue;
                }
                let other = owners
                    .get(&eid)
                    .and_then(|o| o.iter().copied().find(|&k| k != j));

                match other {
                    Some(k)
                        if !merged_already.contains(k)
                            && split_components[k].component_type.spqr_letter() == letter
                            && mergeable(&split_components[k]) =>
                    {
                        merged_already.insert(k);
                        inner_edge.insert(eid);
                        queue.push_back(k);
                    }
                    _ => virtual_edges.push(eid),
                }
            }
        }

        ret.push(SplitComponent {
            edges,
            virtual_edges,
            component_type: merged_type(component.component_type),
        });
    }

    ret
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(
        edges: &[usize],
        virtual_edges: &[usize],
        component_type: ComponentType,
    ) -> SplitComponent {
        SplitComponent {
            edges: edges.to_vec(),
            virtual_edges: virtual_edges.to_vec(),
            component_type,
        }
    }

    #[test]
    fn test_triangles_become_ring() {
        // square 0-1-2-3 split along the diagonal, virtual edge 4
        let split = [
            component(&[0, 1], &[4], ComponentType::Triangle),
            component(&[2, 3], &[4], ComponentType::Triangle),
        ];
        let merged = merge_components(5, &split, true);

        assert_eq!(merged, vec![component(&[0, 1, 2, 3], &[], ComponentType::Ring)]);
    }

    #[test]
    fn test_bond_chain() {
        let split = [
            component(&[0, 1], &[5], ComponentType::TripleBond),
            component(&[2], &[5, 6], ComponentType::TripleBond),
            component(&[3, 4], &[6], ComponentType::TripleBond),
        ];
        let merged = merge_components(7, &split, true);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].component_type, ComponentType::Bond);
        let mut edges = merged[0].edges.clone();
        edges.sort();
        assert_eq!(edges, vec![0, 1, 2, 3, 4]);
        assert!(merged[0].virtual_edges.is_empty());
    }

    #[test]
    fn test_mixed_types_stay_apart() {
        // a bond between a ring and a triconnected graph
        let split = [
            component(&[0, 1], &[10], ComponentType::Triangle),
            component(&[2], &[10, 11], ComponentType::TripleBond),
            component(&[3, 4, 5, 6, 7], &[11], ComponentType::TriconnectedGraph),
        ];
        let merged = merge_components(12, &split, true);

        let types: Vec<_> = merged.iter().map(|c| c.component_type).collect();
        assert_eq!(
            types,
            vec![
                ComponentType::Ring,
                ComponentType::Bond,
                ComponentType::TriconnectedGraph
            ]
        );
        assert_eq!(merged[1].virtual_edges, vec![10, 11]);
    }

    #[test]
    fn test_virtual_triangle_option() {
        // three triangles hanging off an all-virtual one
        let split = [
            component(&[0, 1], &[6], ComponentType::Triangle),
            component(&[], &[6, 7, 8], ComponentType::Triangle),
            component(&[2, 3], &[7], ComponentType::Triangle),
            component(&[4, 5], &[8], ComponentType::Triangle),
        ];

        let merged = merge_components(9, &split, true);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].edges.len(), 6);
        assert!(merged[0].virtual_edges.is_empty());

        let kept = merge_components(9, &split, false);
        assert_eq!(kept.len(), 4);
        assert!(kept.iter().all(|c| c.component_type == ComponentType::Ring));
        assert_eq!(kept[1].virtual_edges, vec![6, 7, 8]);
        assert!(kept.iter().all(|c| !c.is_empty()));
    }
}
