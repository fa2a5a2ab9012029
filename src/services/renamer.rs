use crate::host::{MeshObject, MeshObjectSelection, VertexGroupList};
use crate::models::{FixerSettings, Metadata};
use crate::services::metadata::{
    CHECK_MARKER, ComponentRules, MERGE_OFFSET, MetadataError, RemapRules, load_metadata,
    resolve_metadata_path,
};
use crate::services::zero_weight::remove_zero_weight_groups;
use camino::Utf8Path;
use regex::Regex;
use std::fmt;

/// What the auto fix pass does with one vertex group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupAction {
    /// Name is not an integer; semantic or hand-made group.
    SkipText,

    /// Index above the remap window.
    KeepAboveThreshold,

    /// Exception group on a component reaching past the offset: gets the marker.
    MarkCheck(String),

    /// Exception group that already carries the marker.
    KeepCheckExists,

    /// Exception group on a component below the offset.
    KeepException,

    /// Ordinary group, shifted by the merge offset.
    Remap(String),
}

impl GroupAction {
    pub fn new_name(&self) -> Option<&str> {
        match self {
            GroupAction::MarkCheck(name) | GroupAction::Remap(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

/// Why an object was left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoComponentId,
    ComponentOutOfRange(usize),
    EmptyVgMap(usize),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoComponentId => write!(f, "No Component ID"),
            SkipReason::ComponentOutOfRange(id) => write!(f, "CompID {} out of range", id),
            SkipReason::EmptyVgMap(id) => write!(f, "No vg_map for component {}", id),
        }
    }
}

/// Per-group counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameStats {
    pub remapped: usize,
    pub marked: usize,
    pub kept: usize,
    pub text: usize,
    pub removed: usize,
}

impl RenameStats {
    fn record(&mut self, action: &GroupAction) {
        match action {
            GroupAction::SkipText => self.text += 1,
            GroupAction::Remap(_) => self.remapped += 1,
            GroupAction::MarkCheck(_) => self.marked += 1,
            GroupAction::KeepAboveThreshold
            | GroupAction::KeepCheckExists
            | GroupAction::KeepException => self.kept += 1,
        }
    }

    fn merge(&mut self, other: &RenameStats) {
        self.remapped += other.remapped;
        self.marked += other.marked;
        self.kept += other.kept;
        self.text += other.text;
        self.removed += other.removed;
    }

    pub fn has_changes(&self) -> bool {
        self.remapped > 0 || self.marked > 0 || self.removed > 0
    }

    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if self.remapped > 0 {
            parts.push(format!("{} remapped (+{})", self.remapped, MERGE_OFFSET));
        }
        if self.marked > 0 {
            parts.push(format!("{} marked {}", self.marked, CHECK_MARKER));
        }
        if self.removed > 0 {
            parts.push(format!("{} zero-weight removed", self.removed));
        }

        if parts.is_empty() {
            "Nothing to fix".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Outcome of an auto fix run.
#[derive(Debug, Clone, Default)]
pub struct AutoFixReport {
    /// Mesh objects whose groups were classified. Skipped objects do not count.
    pub processed: usize,
    pub skipped: Vec<(String, SkipReason)>,
    pub stats: RenameStats,
}

impl AutoFixReport {
    pub fn summary(&self) -> String {
        format!("Processed {} objects", self.processed)
    }
}

/// Outcome of a prefix removal run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixReport {
    /// Objects with at least one renamed group.
    pub updated: usize,
    pub renamed_groups: usize,
}

impl PrefixReport {
    pub fn summary(&self) -> String {
        format!("Updated {} objects", self.updated)
    }
}

/// Parse a vertex group name as a base-10 integer.
///
/// Surrounding whitespace and a leading sign are accepted; anything else makes
/// the name a text group.
pub fn parse_group_number(name: &str) -> Option<i64> {
    name.trim().parse::<i64>().ok()
}

/// Decide what happens to a single group name.
pub fn classify_group(name: &str, rules: &RemapRules, component: &ComponentRules) -> GroupAction {
    let Some(n) = parse_group_number(name) else {
        return GroupAction::SkipText;
    };

    if n > rules.threshold {
        return GroupAction::KeepAboveThreshold;
    }

    if component.is_local_exception(n) || rules.is_global_exception(n) {
        if !component.needs_check_marker() {
            return GroupAction::KeepException;
        }
        if name.starts_with(CHECK_MARKER) {
            return GroupAction::KeepCheckExists;
        }
        return GroupAction::MarkCheck(format!("{}{}", CHECK_MARKER, name));
    }

    GroupAction::Remap((n + MERGE_OFFSET).to_string())
}

/// Renames vertex groups on selected mesh objects.
///
/// Holds the two name patterns, compiled once:
///
/// - `component_pattern`: `Component\s*(\d+)`, first match anywhere in the object name
///   - Example match: "Body Component 3 .001" → 3
/// - `check_pattern`: `^Check(\d+)$`, the whole group name
///   - Example match: "Check257" → "257"
pub struct VertexGroupRenamer {
    component_pattern: Regex,
    check_pattern: Regex,
}

impl VertexGroupRenamer {
    pub fn new() -> Self {
        Self {
            component_pattern: Regex::new(r"Component\s*(\d+)").expect("Invalid component regex"),
            check_pattern: Regex::new(r"^Check(\d+)$").expect("Invalid Check regex"),
        }
    }

    /// Component id from an object name.
    ///
    /// A number too large for `usize` can never index the component list, so it
    /// comes back as `usize::MAX` and is reported out of range.
    pub fn extract_component_id(&self, object_name: &str) -> Option<usize> {
        let caps = self.component_pattern.captures(object_name)?;
        Some(caps[1].parse().unwrap_or(usize::MAX))
    }

    /// `Check<digits>` → `<digits>`; `None` for any other name.
    pub fn strip_check_prefix(&self, name: &str) -> Option<String> {
        self.check_pattern
            .captures(name)
            .map(|caps| caps[1].to_string())
    }

    /// Rename the groups of one object in place, then optionally drop unused groups.
    pub fn fix_object<O: MeshObject + ?Sized>(
        &self,
        obj: &mut O,
        rules: &RemapRules,
        component: &ComponentRules,
        remove_zero: bool,
    ) -> RenameStats {
        let mut stats = RenameStats::default();

        for index in 0..obj.group_count() {
            let original = obj.group_name(index).to_string();
            let action = classify_group(&original, rules, component);

            match &action {
                GroupAction::SkipText => tracing::debug!(" - {}: skip text", original),
                GroupAction::KeepAboveThreshold => {
                    tracing::info!(" - {} keep (>threshold)", original)
                }
                GroupAction::MarkCheck(new_name) => {
                    tracing::info!(" - {} → {} (exception)", original, new_name)
                }
                GroupAction::KeepCheckExists => {
                    tracing::info!(" - {} keep (Check exists)", original)
                }
                GroupAction::KeepException => {
                    tracing::info!(" - {} keep (exception no Check)", original)
                }
                GroupAction::Remap(new_name) => {
                    tracing::info!(" - {} → {} (+{})", original, new_name, MERGE_OFFSET)
                }
            }

            if let Some(new_name) = action.new_name() {
                obj.set_group_name(index, new_name.to_string());
            }
            stats.record(&action);
        }

        if remove_zero {
            tracing::info!(" >> Zero-Weight VGs Cleanup for {}", obj.object_name());
            stats.removed = remove_zero_weight_groups(obj).len();
        }

        stats
    }

    /// Auto fix every selected mesh object.
    ///
    /// Objects without a usable component id are skipped and logged; the run
    /// carries on with the rest of the selection.
    pub fn auto_fix<S: MeshObjectSelection + ?Sized>(
        &self,
        selection: &mut S,
        metadata: &Metadata,
        rules: &RemapRules,
        remove_zero: bool,
    ) -> AutoFixReport {
        let mut report = AutoFixReport::default();

        for obj in selection.selected_objects() {
            if !obj.is_mesh() {
                continue;
            }

            let name = obj.object_name().to_string();
            let component = match self.component_rules(&name, metadata) {
                Ok(component) => component,
                Err(reason) => {
                    tracing::info!("[{}] {}, skipped", name, reason);
                    report.skipped.push((name, reason));
                    continue;
                }
            };

            tracing::info!(
                "[{}] CompID={} MaxVG={}",
                name,
                component.component_id,
                component.component_max_vg
            );

            let stats = self.fix_object(obj, rules, &component, remove_zero);
            report.stats.merge(&stats);
            report.processed += 1;
        }

        tracing::info!("Auto fix totals: {}", report.stats.summary());
        report
    }

    fn component_rules(
        &self,
        object_name: &str,
        metadata: &Metadata,
    ) -> Result<ComponentRules, SkipReason> {
        let id = self
            .extract_component_id(object_name)
            .ok_or(SkipReason::NoComponentId)?;

        if id >= metadata.components.len() {
            return Err(SkipReason::ComponentOutOfRange(id));
        }

        ComponentRules::for_component(metadata, id).ok_or(SkipReason::EmptyVgMap(id))
    }

    /// Load metadata per `settings` and auto fix the selection.
    ///
    /// Every metadata problem is reported before the first object is touched.
    /// `base_dir` anchors `//` relative metadata paths.
    pub fn run_auto_fix<S: MeshObjectSelection + ?Sized>(
        &self,
        settings: &FixerSettings,
        base_dir: Option<&Utf8Path>,
        selection: &mut S,
    ) -> Result<AutoFixReport, MetadataError> {
        let metadata_path = resolve_metadata_path(&settings.metadata_path, base_dir)?;

        tracing::info!("=== WWMI VG Fixer: Auto Fix Begin ===");
        tracing::info!("Metadata: {}", metadata_path);
        tracing::info!(
            "Remove zero-weight VG: {}, policy: {}",
            settings.remove_zero,
            settings.exception_policy
        );

        let metadata = load_metadata(&metadata_path)?;
        let rules = RemapRules::derive(&metadata, settings.exception_policy)?;

        let report = self.auto_fix(selection, &metadata, &rules, settings.remove_zero);

        tracing::info!("=== Auto Fix Complete ===");
        Ok(report)
    }

    /// Strip the `Check` marker from every selected mesh object.
    pub fn remove_check_prefix<S: MeshObjectSelection + ?Sized>(
        &self,
        selection: &mut S,
    ) -> PrefixReport {
        let mut report = PrefixReport::default();

        tracing::info!("=== WWMI VG Fixer: Remove 'Check' Prefix Begin ===");

        for obj in selection.selected_objects() {
            if !obj.is_mesh() {
                continue;
            }

            let mut changed = false;
            for index in 0..obj.group_count() {
                if let Some(new_name) = self.strip_check_prefix(obj.group_name(index)) {
                    tracing::info!("[{}] {} → {}", obj.object_name(), obj.group_name(index), new_name);
                    obj.set_group_name(index, new_name);
                    report.renamed_groups += 1;
                    changed = true;
                }
            }

            if changed {
                report.updated += 1;
            }
        }

        tracing::info!("=== Remove 'Check' Prefix Done ===");
        report
    }
}

impl Default for VertexGroupRenamer {
    fn default() -> Self {
        Self::new()
    }
}
