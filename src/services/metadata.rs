use crate::models::{ExceptionPolicy, Metadata};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashSet;
use std::fs;
use thiserror::Error;

/// Offset added to ordinary vertex group indices so that per-component index
/// spaces stay disjoint once components are merged into one mesh.
pub const MERGE_OFFSET: i64 = 256;

/// Marker prefixed to exception groups that need manual review.
pub const CHECK_MARKER: &str = "Check";

/// Components at or after this position contribute to the global exception set.
pub const GLOBAL_EXCEPTION_MIN_COMPONENT: usize = 3;

/// Coarse classification of [`MetadataError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Parse,
    Compute,
}

/// Errors raised while loading metadata. All of them abort an auto fix run
/// before any object is touched.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Metadata JSON path is not set")]
    PathNotSet,

    #[error("File not found: {0}")]
    NotFound(Utf8PathBuf),

    #[error("Failed to read metadata JSON {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse metadata JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid metadata: {0}")]
    Invalid(String),

    #[error("Failed to compute max VG: no vertex group indices in metadata")]
    NoVertexGroups,
}

impl MetadataError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MetadataError::PathNotSet | MetadataError::NotFound(_) | MetadataError::Io { .. } => {
                ErrorCategory::Io
            }
            MetadataError::Parse(_) | MetadataError::Invalid(_) => ErrorCategory::Parse,
            MetadataError::NoVertexGroups => ErrorCategory::Compute,
        }
    }
}

/// Resolve a configured metadata path to an absolute path.
///
/// A leading `//` means "relative to the scene file", which is how the host
/// stores paths next to a saved scene. `base_dir` is that scene's directory;
/// without one, the working directory is used.
pub fn resolve_metadata_path(
    raw: &str,
    base_dir: Option<&Utf8Path>,
) -> Result<Utf8PathBuf, MetadataError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(MetadataError::PathNotSet);
    }

    let joined = match (raw.strip_prefix("//"), base_dir) {
        (Some(rest), Some(base)) => base.join(rest),
        (Some(rest), None) => Utf8PathBuf::from(rest),
        (None, _) => Utf8PathBuf::from(raw),
    };

    if joined.is_absolute() {
        return Ok(joined);
    }

    let absolute = std::path::absolute(joined.as_std_path()).map_err(|source| MetadataError::Io {
        path: joined.clone(),
        source,
    })?;

    Utf8PathBuf::from_path_buf(absolute)
        .map_err(|p| MetadataError::Invalid(format!("path is not UTF-8: {}", p.display())))
}

/// Read and validate `metadata.json`.
pub fn load_metadata(path: &Utf8Path) -> Result<Metadata, MetadataError> {
    if !path.is_file() {
        return Err(MetadataError::NotFound(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path).map_err(|source| MetadataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let value: serde_json::Value = serde_json::from_str(&contents)?;
    match value.get("components") {
        Some(serde_json::Value::Array(list)) if !list.is_empty() => {}
        _ => return Err(MetadataError::Invalid("no 'components'".to_string())),
    }

    let metadata: Metadata = serde_json::from_value(value)?;

    if let Some(id) = metadata.components.iter().position(|c| c.vg_map.is_empty()) {
        return Err(MetadataError::Invalid(format!(
            "component {} has an empty 'vg_map'",
            id
        )));
    }

    tracing::info!(
        "Loaded metadata from {} ({} components)",
        path,
        metadata.components.len()
    );
    Ok(metadata)
}

/// Values derived once per run from the metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapRules {
    pub merged_max_vg: u32,

    /// `merged_max_vg - 256`. Groups numbered above this are never touched.
    /// Negative when every index is below the offset.
    pub threshold: i64,

    /// Indices shared by every object. Empty under [`ExceptionPolicy::LocalOnly`].
    pub global_exceptions: HashSet<u32>,

    pub policy: ExceptionPolicy,
}

impl RemapRules {
    pub fn derive(metadata: &Metadata, policy: ExceptionPolicy) -> Result<Self, MetadataError> {
        let merged_max_vg = metadata
            .merged_max_vg()
            .ok_or(MetadataError::NoVertexGroups)?;
        let threshold = i64::from(merged_max_vg) - MERGE_OFFSET;

        let global_exceptions = match policy {
            ExceptionPolicy::LocalOnly => HashSet::new(),
            ExceptionPolicy::LocalAndGlobal => metadata
                .components
                .iter()
                .skip(GLOBAL_EXCEPTION_MIN_COMPONENT)
                .flat_map(|c| c.vg_map.values().copied())
                .collect(),
        };

        tracing::info!("Merged Max VG: {}  -> threshold {}", merged_max_vg, threshold);
        if policy == ExceptionPolicy::LocalAndGlobal {
            tracing::info!("Global shared exceptions: {} items", global_exceptions.len());
        }

        Ok(Self {
            merged_max_vg,
            threshold,
            global_exceptions,
            policy,
        })
    }

    pub fn is_global_exception(&self, n: i64) -> bool {
        u32::try_from(n).is_ok_and(|n| self.global_exceptions.contains(&n))
    }
}

/// Per-object view of one component's reserved indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRules {
    pub component_id: usize,
    pub local_exceptions: HashSet<u32>,
    pub component_max_vg: u32,
}

impl ComponentRules {
    /// `None` when the component reserves nothing.
    pub fn for_component(metadata: &Metadata, component_id: usize) -> Option<Self> {
        let component = metadata.component(component_id)?;
        let component_max_vg = component.max_vg()?;

        Some(Self {
            component_id,
            local_exceptions: component.exception_set(),
            component_max_vg,
        })
    }

    pub fn is_local_exception(&self, n: i64) -> bool {
        u32::try_from(n).is_ok_and(|n| self.local_exceptions.contains(&n))
    }

    /// Exception groups only get the marker on components reaching past the offset.
    pub fn needs_check_marker(&self) -> bool {
        i64::from(self.component_max_vg) >= MERGE_OFFSET
    }
}
