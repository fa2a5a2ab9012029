//! WWMI VG Fixer - command line host.
//!
//! # Overview
//!
//! The library does the renaming; this binary plays the host: it reads a scene
//! document listing the selected objects, their vertex groups and vertex
//! memberships, runs one operation over it and writes the scene back.
//!
//! # Execution Flow
//!
//! 1. Parse arguments
//! 2. Initialize logging → `<log-dir>/wwmi-vg-fixer.<date>` + stderr
//! 3. Load settings from `<config-dir>/VG Fixer Settings.yaml` + `WWMI_VG_*` env;
//!    `debug_mode` there raises the log level
//! 4. Run the requested command and print its summary line

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use wwmi_vg_fixer::{APP_NAME, ConfigManager, VERSION};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = wwmi_vg_fixer::logging::setup_logging(&cli.log_dir, APP_NAME, cli.verbose, true)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let config_manager = ConfigManager::new(&cli.config_dir)?;
    let settings = config_manager.load_settings()?;

    if settings.debug_mode && !cli.verbose {
        logging.set_debug_mode(true)?;
        tracing::debug!("Debug logging enabled by settings");
    }

    let result = match cli.command {
        Commands::AutoFix(args) => cli::auto_fix_command(args, &config_manager, settings),
        Commands::RemoveCheckPrefix(args) => cli::remove_check_prefix_command(args),
        Commands::ShowConfig => cli::show_config_command(&settings),
    };

    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }
    result
}
