//! `vpress generate` command implementation.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use vpress_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args)]
pub struct GenerateArgs {
    /// Path to configuration file (default: auto-discover vpress.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Notes source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Site base path (overrides config).
    #[arg(short, long)]
    base: Option<String>,

    /// Google Analytics measurement id (overrides config).
    #[arg(long, env = "VPRESS_MEASUREMENT_ID")]
    measurement_id: Option<String>,

    /// Write the configuration to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,
}

impl GenerateArgs {
    /// Execute the generate command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, sidebar generation, or
    /// writing the output fails.
    pub fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            base: self.base,
            measurement_id: self.measurement_id,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        config.validate()?;

        tracing::info!(
            source_dir = %config.docs_resolved.source_dir.display(),
            route_prefix = %config.docs_resolved.route_prefix,
            "generating VitePress configuration"
        );

        let vitepress = vpress_site::generate(&config)?;

        let json = if self.compact {
            serde_json::to_string(&vitepress)?
        } else {
            serde_json::to_string_pretty(&vitepress)?
        };

        match &self.output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(path, format!("{json}\n"))?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => {
                // JSON goes to stdout so it can be piped; messages stay on stderr
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{json}")?;
            }
        }

        Ok(())
    }
}
