//! Data models for the VG fixer.
//!
//! - [`Metadata`]: the `components` / `vg_map` description read from `metadata.json`
//! - [`FixerSettings`]: persisted settings (metadata path, zero-weight cleanup, policy)
//! - [`Scene`]: an in-memory scene document implementing the [`crate::host`] interfaces

pub mod config;
pub mod metadata;
pub mod scene;

pub use config::{ExceptionPolicy, FixerSettings};
pub use metadata::{Component, Metadata};
pub use scene::{GroupWeight, ObjectKind, Scene, SceneObject, Vertex};
