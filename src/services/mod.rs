//! Services module - the vertex group fixing logic.
//!
//! Nothing in here knows about a concrete scene type; everything works through
//! the [`crate::host`] interfaces, so the same code runs against the JSON scene
//! documents of the command line host and against fakes in tests.
//!
//! # Components
//!
//! - [`metadata`]: loads `metadata.json` and derives the per-run [`RemapRules`]
//!   (merged max VG, threshold, global exception set) and per-object
//!   [`ComponentRules`].
//! - [`renamer`]: [`VertexGroupRenamer`], the auto fix pass and the reverse
//!   "remove Check prefix" pass.
//! - [`zero_weight`]: deferred removal of groups no vertex belongs to.
//!
//! # Auto fix, per group
//!
//! 1. Non-integer names are left alone.
//! 2. Indices above `threshold` (merged max VG − 256) are left alone.
//! 3. Exception indices get the `Check` marker when the object's component
//!    reaches index 256 or higher, and are left alone otherwise.
//! 4. Everything else is renamed to `index + 256`.
//!
//! Running auto fix twice shifts ordinary groups twice. Name collisions
//! produced by the shift are not detected.

pub mod metadata;
pub mod renamer;
pub mod zero_weight;

pub use metadata::{
    CHECK_MARKER, ComponentRules, ErrorCategory, GLOBAL_EXCEPTION_MIN_COMPONENT, MERGE_OFFSET,
    MetadataError, RemapRules, load_metadata, resolve_metadata_path,
};
pub use renamer::{
    AutoFixReport, GroupAction, PrefixReport, RenameStats, SkipReason, VertexGroupRenamer,
    classify_group, parse_group_number,
};
pub use zero_weight::{collect_unused_groups, remove_zero_weight_groups};
