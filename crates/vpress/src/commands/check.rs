//! `vpress check` command implementation.

use std::path::PathBuf;

use clap::Args;
use vpress_config::{CliSettings, Config};
use vpress_site::build_sidebar;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub struct CheckArgs {
    /// Path to configuration file (default: auto-discover vpress.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Notes source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the notes
    /// directory cannot be read.
    pub fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            ..Default::default()
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        config.validate()?;

        match &config.config_path {
            Some(path) => output.info(&format!("Config: {}", path.display())),
            None => output.info("Config: built-in defaults"),
        }

        let docs = &config.docs_resolved;
        let groups = build_sidebar(&docs.source_dir, &docs.route_prefix)?;

        output.highlight(&format!(
            "Sidebar for /{}/ ({} groups)",
            docs.route_prefix,
            groups.len()
        ));
        let mut total = 0;
        for group in &groups {
            output.group_line(&group.text, group.items.len(), group.collapsed);
            total += group.items.len();
        }
        output.success(&format!("OK: {total} notes across {} groups", groups.len()));

        Ok(())
    }
}
