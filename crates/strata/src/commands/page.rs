//! `strata page` command implementation.

use clap::Args;
use strata_catalog::{Family, TracingDiagnostics};
use strata_nav::PageModelBuilder;

use super::CatalogArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the page command.
#[derive(Args)]
pub(crate) struct PageArgs {
    /// Resource ID of the page (e.g. `2.0@docs::install.adoc`).
    #[arg(long)]
    page: String,

    #[command(flatten)]
    pub catalog: CatalogArgs,
}

impl PageArgs {
    /// Execute the page command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or the page is unknown or
    /// unpublished.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let session = self.catalog.load(None)?;
        let page = session.entry(&self.page, &[Family::Page])?;

        let builder =
            PageModelBuilder::new(&session.catalog, &TracingDiagnostics).site(session.site_settings());
        let model = builder
            .build(page)
            .ok_or_else(|| CliError::PageNotFound(self.page.clone()))?;

        output.data(&serde_json::to_string_pretty(&model)?)?;
        Ok(())
    }
}
