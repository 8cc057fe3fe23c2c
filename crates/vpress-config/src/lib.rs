//! Configuration management for vpress.
//!
//! Parses `vpress.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.base`
//! - `analytics.measurement_id`

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override notes source directory.
    pub source_dir: Option<PathBuf>,
    /// Override site base path.
    pub base: Option<String>,
    /// Override Google Analytics measurement id.
    pub measurement_id: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "vpress.toml";

/// Mermaid themes accepted by the VitePress mermaid plugin.
const MERMAID_THEMES: &[&str] = &["default", "neutral", "dark", "forest", "base"];

/// Supported search providers.
const SEARCH_PROVIDERS: &[&str] = &["local", "none"];

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site metadata (title, description, base path).
    pub site: SiteConfig,
    /// Notes configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Google Analytics configuration (optional section).
    /// When present, `measurement_id` is required.
    pub analytics: Option<AnalyticsConfig>,
    /// Search configuration.
    pub search: SearchConfig,
    /// Top navigation entries.
    pub nav: Vec<NavLink>,
    /// Social links.
    pub social: Vec<SocialLink>,
    /// Footer configuration.
    pub footer: FooterConfig,
    /// Heading outline configuration.
    pub outline: OutlineConfig,
    /// Diagram rendering configuration.
    pub diagrams: DiagramsConfig,

    /// Resolved notes configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site metadata.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Site description.
    pub description: String,
    /// Base path the site is served under (e.g. GitHub Pages project path).
    pub base: String,
    /// VitePress source directory.
    pub src_dir: String,
    /// Logo path relative to the public directory.
    pub logo: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Tech Research".to_owned(),
            description: "Technical research, overviews, and earning opportunities".to_owned(),
            base: "/tech-research/".to_owned(),
            src_dir: ".".to_owned(),
            logo: "/logo.svg".to_owned(),
        }
    }
}

/// Raw notes configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
}

/// Default notes directory name.
const DEFAULT_SOURCE_DIR: &str = "researching";

/// Resolved notes configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Directory containing markdown notes.
    pub source_dir: PathBuf,
    /// Route prefix notes are served under (directory name, no slashes).
    pub route_prefix: String,
}

/// Google Analytics configuration.
#[derive(Debug, Deserialize)]
pub struct AnalyticsConfig {
    /// GA4 measurement id (e.g. `G-XXXXXXXXXX`).
    pub measurement_id: String,
}

/// Search configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search provider: `local` or `none`.
    pub provider: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            provider: "local".to_owned(),
        }
    }
}

/// Top navigation entry.
#[derive(Debug, Clone, Deserialize)]
pub struct NavLink {
    /// Display text.
    pub text: String,
    /// Link target.
    pub link: String,
}

/// Social link entry.
#[derive(Debug, Clone, Deserialize)]
pub struct SocialLink {
    /// Icon name (e.g. `github`).
    pub icon: String,
    /// Link URL.
    pub link: String,
}

/// Footer configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    /// Footer message line.
    pub message: String,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            message: "Technical research and documentation".to_owned(),
        }
    }
}

/// Heading outline configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Minimum heading level shown in the outline.
    pub min_level: u8,
    /// Maximum heading level shown in the outline.
    pub max_level: u8,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            min_level: 2,
            max_level: 3,
        }
    }
}

/// Diagram rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DiagramsConfig {
    /// Mermaid theme passed through to the mermaid plugin.
    pub mermaid_theme: String,
}

impl Default for DiagramsConfig {
    fn default() -> Self {
        Self {
            mermaid_theme: "neutral".to_owned(),
        }
    }
}

fn default_nav() -> Vec<NavLink> {
    vec![
        NavLink {
            text: "Home".to_owned(),
            link: "/".to_owned(),
        },
        NavLink {
            text: "Overviews".to_owned(),
            link: "/researching/bitcoin-overview".to_owned(),
        },
        NavLink {
            text: "Earning Ideas".to_owned(),
            link: "/researching/clawdbot-earning-ideas".to_owned(),
        },
    ]
}

fn default_social() -> Vec<SocialLink> {
    vec![SocialLink {
        icon: "github".to_owned(),
        link: "https://github.com/quochuydev/tech-research".to_owned(),
    }]
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`analytics.measurement_id`").
        field: String,
        /// Error message (e.g., "${`GA_MEASUREMENT_ID`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Expand `${VAR}` / `${VAR:-default}` references in a config field.
///
/// The field is rewritten in place. Values without a `${` are left
/// untouched, as is bare `$VAR` syntax (only the braced form expands).
/// An unset variable without a default fails with the field path in the
/// error, e.g. `analytics.measurement_id`.
fn expand_field(value: &mut String, field: &str) -> Result<(), ConfigError> {
    if !value.contains("${") {
        return Ok(());
    }

    let expanded = shellexpand::env_with_context(value.as_str(), |var| {
        std::env::var(var).map(Some)
    })
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.var_name),
    })?;

    *value = expanded.into_owned();
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `vpress.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
            if let Some(name) = source_dir.file_name() {
                self.docs_resolved.route_prefix = name.to_string_lossy().into_owned();
            }
        }
        if let Some(base) = &settings.base {
            self.site.base.clone_from(base);
        }
        if let Some(measurement_id) = &settings.measurement_id {
            self.analytics = Some(AnalyticsConfig {
                measurement_id: measurement_id.clone(),
            });
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            docs: DocsConfigRaw::default(),
            analytics: None,
            search: SearchConfig::default(),
            nav: default_nav(),
            social: default_social(),
            footer: FooterConfig::default(),
            outline: OutlineConfig::default(),
            diagrams: DiagramsConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join(DEFAULT_SOURCE_DIR),
                route_prefix: DEFAULT_SOURCE_DIR.to_owned(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid values.
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_analytics()?;
        self.validate_search()?;
        self.validate_links()?;
        self.validate_outline()?;
        self.validate_diagrams()?;
        Ok(())
    }

    /// Validate site metadata.
    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        require_non_empty(&self.site.base, "site.base")?;

        // VitePress requires the base path to be wrapped in slashes
        if !self.site.base.starts_with('/') || !self.site.base.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.base must start and end with '/'".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate analytics configuration.
    fn validate_analytics(&self) -> Result<(), ConfigError> {
        if let Some(analytics) = &self.analytics {
            require_non_empty(&analytics.measurement_id, "analytics.measurement_id")?;
        }
        Ok(())
    }

    /// Validate search configuration.
    fn validate_search(&self) -> Result<(), ConfigError> {
        if !SEARCH_PROVIDERS.contains(&self.search.provider.as_str()) {
            return Err(ConfigError::Validation(format!(
                "search.provider must be one of: {}",
                SEARCH_PROVIDERS.join(", ")
            )));
        }
        Ok(())
    }

    /// Validate navigation and social link entries.
    fn validate_links(&self) -> Result<(), ConfigError> {
        for nav in &self.nav {
            require_non_empty(&nav.text, "nav.text")?;
            require_non_empty(&nav.link, "nav.link")?;
        }
        for social in &self.social {
            require_non_empty(&social.icon, "social.icon")?;
            require_http_url(&social.link, "social.link")?;
        }
        Ok(())
    }

    /// Validate outline levels.
    fn validate_outline(&self) -> Result<(), ConfigError> {
        let OutlineConfig {
            min_level,
            max_level,
        } = self.outline;
        if !(1..=6).contains(&min_level) || !(1..=6).contains(&max_level) {
            return Err(ConfigError::Validation(
                "outline levels must be between 1 and 6".to_owned(),
            ));
        }
        if min_level > max_level {
            return Err(ConfigError::Validation(
                "outline.min_level cannot exceed outline.max_level".to_owned(),
            ));
        }
        Ok(())
    }

    /// Validate diagrams configuration.
    fn validate_diagrams(&self) -> Result<(), ConfigError> {
        if !MERMAID_THEMES.contains(&self.diagrams.mermaid_theme.as_str()) {
            return Err(ConfigError::Validation(format!(
                "diagrams.mermaid_theme must be one of: {}",
                MERMAID_THEMES.join(", ")
            )));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    ///
    /// Only `site.base` and `analytics.measurement_id` are expanded; the
    /// measurement id in particular is usually injected from CI secrets.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand_field(&mut self.site.base, "site.base")?;

        if let Some(ref mut analytics) = self.analytics {
            expand_field(&mut analytics.measurement_id, "analytics.measurement_id")?;
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let raw = self.docs.source_dir.as_deref().unwrap_or(DEFAULT_SOURCE_DIR);
        let source_dir = config_dir.join(raw);
        // Route prefix is the directory name, not the full relative path
        let route_prefix = source_dir
            .file_name()
            .map_or_else(|| DEFAULT_SOURCE_DIR.to_owned(), |n| {
                n.to_string_lossy().into_owned()
            });

        self.docs_resolved = DocsConfig {
            source_dir,
            route_prefix,
        };
    }
}
