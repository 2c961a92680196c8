//! CLI command implementations.

mod check;
mod page;
mod xref;

use std::path::PathBuf;

use clap::Args;
use strata_catalog::{Catalog, CatalogEntry, ContentCatalog, Family, ROOT_MODULE, ResourceId};
use strata_config::{CliSettings, Config};
use strata_nav::SiteSettings;

pub(crate) use check::CheckArgs;
pub(crate) use page::PageArgs;
pub(crate) use xref::XrefArgs;

use crate::error::CliError;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct CatalogArgs {
    /// Path to configuration file (default: auto-discover strata.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Catalog manifest (overrides config).
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Absolute site URL used for canonical URLs (overrides config).
    #[arg(long, env = "STRATA_SITE_URL")]
    site_url: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CatalogArgs {
    /// Load configuration and the catalog it points at.
    pub(crate) fn load(&self, relativize: Option<bool>) -> Result<Session, CliError> {
        let cli_settings = CliSettings {
            site_url: self.site_url.clone(),
            manifest: self.manifest.clone(),
            relativize,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let catalog = Catalog::load(
            &config.catalog_resolved.manifest,
            config.urls.html_extension_style,
        )?;
        Ok(Session { config, catalog })
    }
}

/// Loaded configuration and catalog.
pub(crate) struct Session {
    pub config: Config,
    pub catalog: Catalog,
}

impl Session {
    /// Look up the file a command operates on.
    ///
    /// The ID must name a component; a missing version means the latest.
    /// An empty `permitted` list allows every family.
    pub(crate) fn entry(&self, spec: &str, permitted: &[Family]) -> Result<&CatalogEntry, CliError> {
        let context = ResourceId::new("", "", ROOT_MODULE, Family::Page, "");
        self.catalog
            .resolve_resource(spec, &context, Family::Page, permitted)
            .map_err(|source| CliError::InvalidPage {
                spec: spec.to_owned(),
                source,
            })?
            .ok_or_else(|| CliError::PageNotFound(spec.to_owned()))
    }

    pub(crate) fn site_settings(&self) -> SiteSettings {
        let home_url = self.config.site.start_page.as_deref().and_then(|spec| {
            match self.entry(spec, &[Family::Page]) {
                Ok(entry) => entry.url.clone(),
                Err(err) => {
                    tracing::warn!(start_page = spec, error = %err, "Start page not resolved");
                    None
                }
            }
        });
        SiteSettings {
            url: self.config.site.absolute_url().map(str::to_owned),
            home_url,
        }
    }
}
