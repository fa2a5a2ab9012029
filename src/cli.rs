//! Command line arguments and command handlers.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand, ValueEnum};
use wwmi_vg_fixer::{ConfigManager, ExceptionPolicy, FixerSettings, Scene, VertexGroupRenamer};

/// Fix vertex groups on WWMI reverse meshes using metadata.json
#[derive(Parser)]
#[command(name = "wwmi-vg-fixer")]
#[command(version = wwmi_vg_fixer::VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding `VG Fixer Settings.yaml`
    #[arg(long, global = true, env = "WWMI_VG_CONFIG_DIR", default_value = "VG Fixer Data")]
    pub config_dir: Utf8PathBuf,

    /// Directory for rotating log files
    #[arg(long, global = true, default_value = "logs")]
    pub log_dir: Utf8PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Renumber and mark vertex groups on the selected mesh objects
    #[command(name = "auto-fix")]
    AutoFix(AutoFixArgs),

    /// Turn `Check<n>` vertex groups back into `<n>`
    #[command(name = "remove-check-prefix")]
    RemoveCheckPrefix(SceneArgs),

    /// Print the effective settings as YAML
    #[command(name = "show-config")]
    ShowConfig,
}

#[derive(Args)]
pub struct SceneArgs {
    /// Scene document (JSON) to operate on
    pub scene: Utf8PathBuf,

    /// Write the result here instead of overwriting the scene
    #[arg(short, long)]
    pub output: Option<Utf8PathBuf>,
}

#[derive(Args)]
pub struct AutoFixArgs {
    #[command(flatten)]
    pub scene: SceneArgs,

    /// Path to metadata.json (`//` prefix = relative to the scene file)
    #[arg(short, long)]
    pub metadata: Option<String>,

    /// Keep vertex groups that no vertex belongs to
    #[arg(long, conflicts_with = "remove_zero")]
    pub keep_zero: bool,

    /// Remove vertex groups that no vertex belongs to
    #[arg(long)]
    pub remove_zero: bool,

    /// Which exception indices apply to each object
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Persist the effective settings for later runs
    #[arg(long)]
    pub save: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// Own component's vg_map only
    Local,
    /// Own component plus components 3 and up
    Global,
}

impl From<PolicyArg> for ExceptionPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Local => ExceptionPolicy::LocalOnly,
            PolicyArg::Global => ExceptionPolicy::LocalAndGlobal,
        }
    }
}

impl AutoFixArgs {
    /// Apply command line overrides on top of the loaded settings.
    pub fn apply(&self, settings: &mut FixerSettings) {
        if let Some(metadata) = &self.metadata {
            settings.metadata_path = metadata.clone();
        }
        if self.keep_zero {
            settings.remove_zero = false;
        }
        if self.remove_zero {
            settings.remove_zero = true;
        }
        if let Some(policy) = self.policy {
            settings.exception_policy = policy.into();
        }
    }
}

fn output_path(args: &SceneArgs) -> &Utf8Path {
    args.output.as_deref().unwrap_or(&args.scene)
}

pub fn auto_fix_command(
    args: AutoFixArgs,
    manager: &ConfigManager,
    mut settings: FixerSettings,
) -> Result<()> {
    args.apply(&mut settings);

    let mut scene = Scene::load(&args.scene.scene)?;
    let base_dir = args.scene.scene.parent();

    let renamer = VertexGroupRenamer::new();
    let report = renamer
        .run_auto_fix(&settings, base_dir, &mut scene)
        .with_context(|| format!("Auto fix cancelled for {}", args.scene.scene))?;

    for (name, reason) in &report.skipped {
        tracing::warn!("Skipped {}: {}", name, reason);
    }

    scene.save(output_path(&args.scene))?;
    if args.save {
        manager.save_settings(&settings)?;
    }

    println!("{}", report.summary());
    Ok(())
}

pub fn remove_check_prefix_command(args: SceneArgs) -> Result<()> {
    let mut scene = Scene::load(&args.scene)?;

    let report = VertexGroupRenamer::new().remove_check_prefix(&mut scene);

    scene.save(output_path(&args))?;
    println!("{}", report.summary());
    Ok(())
}

pub fn show_config_command(settings: &FixerSettings) -> Result<()> {
    let yaml = serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")?;
    print!("{}", yaml);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "wwmi-vg-fixer",
            "auto-fix",
            "scene.json",
            "--metadata",
            "//metadata.json",
            "--keep-zero",
            "--policy",
            "local",
        ]);
        let Commands::AutoFix(args) = cli.command else {
            panic!("expected auto-fix");
        };

        let mut settings = FixerSettings::default();
        args.apply(&mut settings);

        assert_eq!(settings.metadata_path, "//metadata.json");
        assert!(!settings.remove_zero);
        assert_eq!(settings.exception_policy, ExceptionPolicy::LocalOnly);
    }

    fn auto_fix_args(scene: &Utf8Path, metadata: &str) -> AutoFixArgs {
        let cli = Cli::parse_from([
            "wwmi-vg-fixer",
            "auto-fix",
            scene.as_str(),
            "--metadata",
            metadata,
            "--keep-zero",
            "--save",
        ]);
        match cli.command {
            Commands::AutoFix(args) => args,
            _ => panic!("expected auto-fix"),
        }
    }

    #[test]
    fn test_failed_run_does_not_save_settings() {
        let temp_dir = TempDir::new().unwrap();
        let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let manager = ConfigManager::new(dir.join("config")).unwrap();
        let scene_path = dir.join("scene.json");
        fs::write(&scene_path, r#"{"objects": [{"name": "Component 0", "vertex_groups": ["1"]}]}"#)
            .unwrap();

        let args = auto_fix_args(&scene_path, "//missing.json");
        assert!(auto_fix_command(args, &manager, FixerSettings::default()).is_err());

        assert!(!manager.settings_path().exists());
        assert_eq!(Scene::load(&scene_path).unwrap().objects[0].vertex_groups, vec!["1"]);
    }

    #[test]
    fn test_successful_run_saves_settings() {
        let temp_dir = TempDir::new().unwrap();
        let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let manager = ConfigManager::new(dir.join("config")).unwrap();
        let scene_path = dir.join("scene.json");
        fs::write(&scene_path, r#"{"objects": [{"name": "Component 0", "vertex_groups": ["1"]}]}"#)
            .unwrap();
        fs::write(
            dir.join("metadata.json"),
            r#"{"components": [{"vg_map": {"a": 0}}, {"vg_map": {"a": 900}}]}"#,
        )
        .unwrap();

        let args = auto_fix_args(&scene_path, "//metadata.json");
        auto_fix_command(args, &manager, FixerSettings::default()).unwrap();

        let saved = manager.load_settings().unwrap();
        assert_eq!(saved.metadata_path, "//metadata.json");
        assert!(!saved.remove_zero);
        assert_eq!(Scene::load(&scene_path).unwrap().objects[0].vertex_groups, vec!["257"]);
    }

    #[test]
    fn test_output_defaults_to_scene() {
        let args = SceneArgs {
            scene: Utf8PathBuf::from("scene.json"),
            output: None,
        };
        assert_eq!(output_path(&args), Utf8Path::new("scene.json"));
    }
}
