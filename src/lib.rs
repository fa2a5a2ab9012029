// WWMI VG Fixer - vertex group renaming for WWMI reverse meshes
//
// This is the library crate containing the renaming logic and data structures.
// The binary crate (main.rs) provides the command line host.

pub mod config;
pub mod host;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use host::{MeshObject, MeshObjectSelection, VertexGroupList, VertexWeightIndex};
pub use models::{ExceptionPolicy, FixerSettings, Metadata, Scene};
pub use services::{MetadataError, VertexGroupRenamer};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
