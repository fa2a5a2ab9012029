use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Contents of a `metadata.json` exported by the WWMI reverse tools.
///
/// Only the `components` list is consumed; every other key is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub components: Vec<Component>,
}

/// A single component entry.
///
/// The position of the component in [`Metadata::components`] is its id, matched
/// against the `Component <n>` token in mesh object names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Component {
    /// Arbitrary key → vertex group index. Values may repeat.
    #[serde(default)]
    pub vg_map: IndexMap<String, u32>,
}

impl Component {
    /// The set of vertex group indices this component reserves.
    pub fn exception_set(&self) -> HashSet<u32> {
        self.vg_map.values().copied().collect()
    }

    /// Highest reserved index, or `None` for an empty `vg_map`.
    pub fn max_vg(&self) -> Option<u32> {
        self.vg_map.values().copied().max()
    }
}

impl Metadata {
    /// Maximum index across every component's `vg_map`.
    pub fn merged_max_vg(&self) -> Option<u32> {
        self.components.iter().filter_map(Component::max_vg).max()
    }

    pub fn component(&self, id: usize) -> Option<&Component> {
        self.components.get(id)
    }
}
