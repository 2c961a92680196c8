//! Configuration management for Strata.
//!
//! Parses `strata.toml` configuration files with serde and provides
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
//! - `site.url`
//! - `catalog.manifest`

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use strata_catalog::HtmlExtensionStyle;

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the absolute site URL.
    pub site_url: Option<String>,
    /// Override the catalog manifest path.
    pub manifest: Option<PathBuf>,
    /// Override relative link output.
    pub relativize: Option<bool>,
}

const CONFIG_FILENAME: &str = "strata.toml";

const DEFAULT_MANIFEST: &str = "catalog.yaml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub urls: UrlsConfig,
    pub xref: XrefConfig,
    /// Catalog configuration (paths are relative strings from TOML).
    catalog: CatalogConfigRaw,

    /// Resolved catalog configuration (set after loading).
    #[serde(skip)]
    pub catalog_resolved: CatalogConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Absolute base URL (`https://...`) or root path (`/...`).
    pub url: Option<String>,
    pub title: Option<String>,
    /// Resource ID of the site home page (e.g. `docs::index.adoc`).
    pub start_page: Option<String>,
}

impl SiteConfig {
    /// Base URL when it is absolute; canonical URLs need one.
    #[must_use]
    pub fn absolute_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .filter(|url| url.starts_with("http://") || url.starts_with("https://"))
    }
}

/// URL configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UrlsConfig {
    pub html_extension_style: HtmlExtensionStyle,
}

/// Reference output configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct XrefConfig {
    /// Emit links relative to the current page instead of root-relative.
    pub relativize: bool,
}

impl Default for XrefConfig {
    fn default() -> Self {
        Self { relativize: true }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogConfigRaw {
    manifest: Option<String>,
}

/// Resolved catalog configuration with absolute paths.
#[derive(Debug, Default)]
pub struct CatalogConfig {
    /// Catalog manifest file.
    pub manifest: PathBuf,
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
        /// Config field path (e.g., "`site.url`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require an http(s) URL or a root-relative path.
fn require_site_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") && !url.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http://, https:// or /"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `strata.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or a value is invalid.
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
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(url) = &settings.site_url {
            self.site.url = Some(url.clone());
        }
        if let Some(manifest) = &settings.manifest {
            self.catalog_resolved.manifest.clone_from(manifest);
        }
        if let Some(relativize) = settings.relativize {
            self.xref.relativize = relativize;
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

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            urls: UrlsConfig::default(),
            xref: XrefConfig::default(),
            catalog: CatalogConfigRaw::default(),
            catalog_resolved: CatalogConfig {
                manifest: base.join(DEFAULT_MANIFEST),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.site.url {
            require_non_empty(url, "site.url")?;
            require_site_url(url, "site.url")?;
        }
        if let Some(start_page) = &self.site.start_page {
            require_non_empty(start_page, "site.start_page")?;
        }
        if let Some(manifest) = &self.catalog.manifest {
            require_non_empty(manifest, "catalog.manifest")?;
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(url) = &self.site.url {
            self.site.url = Some(expand::expand_env(url, "site.url")?);
        }
        if let Some(manifest) = &self.catalog.manifest {
            self.catalog.manifest = Some(expand::expand_env(manifest, "catalog.manifest")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let manifest = self.catalog.manifest.as_deref().unwrap_or(DEFAULT_MANIFEST);
        self.catalog_resolved = CatalogConfig {
            manifest: config_dir.join(manifest),
        };
    }
}
