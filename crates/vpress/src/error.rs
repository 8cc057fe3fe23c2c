//! CLI error types.

use vpress_config::ConfigError;
use vpress_site::{GenerateError, SidebarError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Sidebar(#[from] SidebarError),

    #[error("{0}")]
    Generate(#[from] GenerateError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
