use crate::host::{VertexGroupList, VertexWeightIndex};

/// Indices of groups no vertex belongs to, in ascending order.
pub fn collect_unused_groups<W: VertexWeightIndex + ?Sized>(
    weights: &W,
    group_count: usize,
) -> Vec<usize> {
    (0..group_count)
        .filter(|&index| !weights.group_has_members(index))
        .collect()
}

/// Remove every vertex group with no member vertex.
///
/// The full scan finishes before anything is removed, and removal runs from the
/// highest index down, so the indices found by the scan stay valid.
///
/// # Returns
/// Names of the removed groups, in their original order
pub fn remove_zero_weight_groups<O>(obj: &mut O) -> Vec<String>
where
    O: VertexGroupList + VertexWeightIndex + ?Sized,
{
    let count = obj.group_count();
    let unused = collect_unused_groups(&*obj, count);

    let mut removed = Vec::with_capacity(unused.len());
    for &index in unused.iter().rev() {
        let name = obj.group_name(index).to_string();
        tracing::info!(" >> Removing Zero-Weight VG: {}", name);
        obj.remove_group(index);
        removed.push(name);
    }

    removed.reverse();
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MockVertexWeightIndex;
    use crate::models::SceneObject;
    use mockall::predicate::eq;

    #[test]
    fn test_collect_queries_every_group_once() {
        let mut weights = MockVertexWeightIndex::new();
        weights
            .expect_group_has_members()
            .with(eq(0))
            .times(1)
            .return_const(true);
        weights
            .expect_group_has_members()
            .with(eq(1))
            .times(1)
            .return_const(false);
        weights
            .expect_group_has_members()
            .with(eq(2))
            .times(1)
            .return_const(false);

        assert_eq!(collect_unused_groups(&weights, 3), vec![1, 2]);
    }

    #[test]
    fn test_collect_with_no_groups() {
        let weights = MockVertexWeightIndex::new();
        assert!(collect_unused_groups(&weights, 0).is_empty());
    }

    #[test]
    fn test_remove_zero_weight_groups() {
        let mut obj = SceneObject::mesh("Component 0", &["0", "1", "2", "Head", "4"])
            .with_vertex(&[(0, 1.0), (3, 0.4)])
            .with_vertex(&[(3, 0.6)]);

        let removed = remove_zero_weight_groups(&mut obj);

        assert_eq!(removed, vec!["1", "2", "4"]);
        assert_eq!(obj.vertex_groups, vec!["0", "Head"]);
        // Memberships still point at the right groups after removal.
        assert!(obj.group_has_members(0));
        assert!(obj.group_has_members(1));
        assert_eq!(obj.vertices[0].groups[1].group, 1);
    }

    #[test]
    fn test_zero_valued_membership_survives() {
        let mut obj = SceneObject::mesh("Component 0", &["5", "6"]).with_vertex(&[(1, 0.0)]);

        let removed = remove_zero_weight_groups(&mut obj);

        assert_eq!(removed, vec!["5"]);
        assert_eq!(obj.vertex_groups, vec!["6"]);
    }
}
