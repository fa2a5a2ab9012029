//! Capability interfaces the renamer consumes from the host environment.
//!
//! The renaming logic never touches a concrete mesh type. Anything that can list
//! selected objects, expose their vertex group names and answer "does any vertex
//! belong to group `i`" can be fixed. [`crate::models::Scene`] is the in-memory
//! implementation used by the command line host and the tests.

/// Ordered, mutable list of vertex group names on one object.
///
/// Indices are positions in the list. Renaming never changes an index;
/// removing a group shifts every later index down by one.
pub trait VertexGroupList {
    fn group_count(&self) -> usize;

    /// Name of the group at `index`.
    ///
    /// Callers only pass indices below [`group_count`](Self::group_count).
    fn group_name(&self, index: usize) -> &str;

    fn set_group_name(&mut self, index: usize, name: String);

    fn remove_group(&mut self, index: usize);
}

/// Membership query over an object's vertices.
#[cfg_attr(test, mockall::automock)]
pub trait VertexWeightIndex {
    /// True when at least one vertex lists `group_index` among its groups,
    /// whatever the weight value.
    fn group_has_members(&self, group_index: usize) -> bool;
}

/// A selected scene object.
pub trait MeshObject: VertexGroupList + VertexWeightIndex {
    fn object_name(&self) -> &str;

    /// Only mesh objects carry vertex groups worth fixing.
    fn is_mesh(&self) -> bool {
        true
    }
}

/// The current selection, in selection order.
pub trait MeshObjectSelection {
    type Object: MeshObject;

    fn selected_objects(&mut self) -> impl Iterator<Item = &mut Self::Object>;
}
