use serde::{Deserialize, Serialize};
use std::fmt;

/// Which exception indices count for an object.
///
/// The add-on shipped two behaviours; both are kept and selected explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionPolicy {
    /// Only the object's own component `vg_map` values are exceptions.
    LocalOnly,

    /// The object's own values plus every value reserved by components with
    /// id >= [`GLOBAL_EXCEPTION_MIN_COMPONENT`](crate::services::GLOBAL_EXCEPTION_MIN_COMPONENT).
    #[default]
    LocalAndGlobal,
}

impl fmt::Display for ExceptionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExceptionPolicy::LocalOnly => write!(f, "local_only"),
            ExceptionPolicy::LocalAndGlobal => write!(f, "local_and_global"),
        }
    }
}

/// Persisted settings from `VG Fixer Settings.yaml`.
///
/// Field names double as `WWMI_VG_*` environment variable suffixes, so they
/// stay plain snake_case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixerSettings {
    /// Path to `metadata.json`. A leading `//` is relative to the scene file.
    pub metadata_path: String,

    /// Remove vertex groups no vertex belongs to after renaming.
    pub remove_zero: bool,

    pub exception_policy: ExceptionPolicy,

    pub debug_mode: bool,
}

impl Default for FixerSettings {
    fn default() -> Self {
        Self {
            metadata_path: String::new(),
            remove_zero: true,
            exception_policy: ExceptionPolicy::default(),
            debug_mode: false,
        }
    }
}
