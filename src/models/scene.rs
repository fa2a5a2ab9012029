use crate::host::{MeshObject, MeshObjectSelection, VertexGroupList, VertexWeightIndex};
use anyhow::{Context, Result};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use std::fs;

/// A scene document: the objects the command line host operates on.
///
/// ```json
/// {"objects": [{
///     "name": "Component 1",
///     "type": "MESH",
///     "vertex_groups": ["257", "258"],
///     "vertices": [{"groups": [{"group": 0, "weight": 0.5}]}]
/// }]}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    #[default]
    #[serde(rename = "MESH")]
    Mesh,
    #[serde(rename = "ARMATURE")]
    Armature,
    #[serde(rename = "EMPTY")]
    Empty,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: ObjectKind,

    #[serde(default = "default_selected")]
    pub selected: bool,

    #[serde(default)]
    pub vertex_groups: Vec<String>,

    #[serde(default)]
    pub vertices: Vec<Vertex>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    #[serde(default)]
    pub groups: Vec<GroupWeight>,
}

/// One vertex → group membership.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupWeight {
    pub group: usize,
    pub weight: f32,
}

fn default_selected() -> bool {
    true
}

impl Scene {
    /// Load a scene document from disk.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene: {}", path))?;

        let scene: Scene = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse scene: {}", path))?;

        tracing::info!("Loaded scene from {} ({} objects)", path, scene.objects.len());
        Ok(scene)
    }

    /// Write the scene document back to disk as pretty JSON.
    pub fn save(&self, path: &Utf8Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize scene")?;

        fs::write(path, json).with_context(|| format!("Failed to write scene: {}", path))?;

        tracing::info!("Saved scene to {}", path);
        Ok(())
    }
}

impl SceneObject {
    /// A selected mesh object with the given group names and no vertices.
    pub fn mesh(name: impl Into<String>, groups: &[&str]) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Mesh,
            selected: true,
            vertex_groups: groups.iter().map(|g| g.to_string()).collect(),
            vertices: Vec::new(),
        }
    }

    /// Add one vertex belonging to `groups` with the given weights.
    pub fn with_vertex(mut self, groups: &[(usize, f32)]) -> Self {
        self.vertices.push(Vertex {
            groups: groups
                .iter()
                .map(|&(group, weight)| GroupWeight { group, weight })
                .collect(),
        });
        self
    }
}

impl VertexGroupList for SceneObject {
    fn group_count(&self) -> usize {
        self.vertex_groups.len()
    }

    fn group_name(&self, index: usize) -> &str {
        &self.vertex_groups[index]
    }

    fn set_group_name(&mut self, index: usize, name: String) {
        self.vertex_groups[index] = name;
    }

    fn remove_group(&mut self, index: usize) {
        self.vertex_groups.remove(index);

        // Memberships follow the host: references to the removed group vanish,
        // later groups slide down one slot.
        for vertex in &mut self.vertices {
            vertex.groups.retain(|g| g.group != index);
            for g in &mut vertex.groups {
                if g.group > index {
                    g.group -= 1;
                }
            }
        }
    }
}

impl VertexWeightIndex for SceneObject {
    fn group_has_members(&self, group_index: usize) -> bool {
        self.vertices
            .iter()
            .any(|v| v.groups.iter().any(|g| g.group == group_index))
    }
}

impl MeshObject for SceneObject {
    fn object_name(&self) -> &str {
        &self.name
    }

    fn is_mesh(&self) -> bool {
        self.kind == ObjectKind::Mesh
    }
}

impl MeshObjectSelection for Scene {
    type Object = SceneObject;

    fn selected_objects(&mut self) -> impl Iterator<Item = &mut SceneObject> {
        self.objects.iter_mut().filter(|o| o.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{"objects": [{"name": "Component 0"}, {"name": "Armature", "type": "ARMATURE", "selected": false}]}"#;
        let scene: Scene = serde_json::from_str(json).unwrap();

        assert_eq!(scene.objects[0].kind, ObjectKind::Mesh);
        assert!(scene.objects[0].selected);
        assert!(scene.objects[0].vertex_groups.is_empty());
        assert_eq!(scene.objects[1].kind, ObjectKind::Armature);
        assert!(!scene.objects[1].selected);
    }

    #[test]
    fn test_unknown_object_type() {
        let json = r#"{"objects": [{"name": "Camera", "type": "CAMERA"}]}"#;
        let scene: Scene = serde_json::from_str(json).unwrap();

        assert_eq!(scene.objects[0].kind, ObjectKind::Other);
        assert!(!scene.objects[0].is_mesh());
    }

    #[test]
    fn test_membership_ignores_weight_value() {
        let obj = SceneObject::mesh("Component 0", &["0", "1", "2"])
            .with_vertex(&[(0, 1.0)])
            .with_vertex(&[(2, 0.0)]);

        assert!(obj.group_has_members(0));
        assert!(!obj.group_has_members(1));
        assert!(obj.group_has_members(2));
    }

    #[test]
    fn test_remove_group_shifts_memberships() {
        let mut obj = SceneObject::mesh("Component 0", &["a", "b", "c"])
            .with_vertex(&[(0, 0.3), (1, 0.2), (2, 0.5)]);

        obj.remove_group(1);

        assert_eq!(obj.vertex_groups, vec!["a", "c"]);
        assert_eq!(
            obj.vertices[0].groups,
            vec![
                GroupWeight { group: 0, weight: 0.3 },
                GroupWeight { group: 1, weight: 0.5 },
            ]
        );
    }

    #[test]
    fn test_selection_skips_unselected() {
        let mut hidden = SceneObject::mesh("Component 1", &[]);
        hidden.selected = false;
        let mut scene = Scene {
            objects: vec![SceneObject::mesh("Component 0", &[]), hidden],
        };

        let names: Vec<String> = scene.selected_objects().map(|o| o.name.clone()).collect();
        assert_eq!(names, vec!["Component 0"]);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = camino::Utf8PathBuf::try_from(temp_dir.path().join("scene.json")).unwrap();

        let scene = Scene {
            objects: vec![SceneObject::mesh("Component 2", &["7", "Head"]).with_vertex(&[(1, 1.0)])],
        };
        scene.save(&path).unwrap();

        let loaded = Scene::load(&path).unwrap();
        assert_eq!(loaded, scene);
    }
}
