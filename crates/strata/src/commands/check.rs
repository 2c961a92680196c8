//! `strata check` command implementation.

use clap::Args;
use rayon::prelude::*;
use strata_catalog::{
    AliasScope, CatalogEntry, CollectedDiagnostics, Diagnostic, Diagnostics, Family, follow_alias,
};
use strata_nav::PageModelBuilder;

use super::CatalogArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Exit with an error when problems are found.
    #[arg(long)]
    strict: bool,

    #[command(flatten)]
    pub catalog: CatalogArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Builds the model of every publishable page on the rayon pool and
    /// follows every alias, collecting diagnostics.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails, or in strict mode when problems
    /// are found.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let session = self.catalog.load(None)?;
        output.info(&format!(
            "Catalog: {}",
            session.config.catalog_resolved.manifest.display()
        ));

        let diagnostics = CollectedDiagnostics::new();
        let builder =
            PageModelBuilder::new(&session.catalog, &diagnostics).site(session.site_settings());

        let entries = session.catalog.entries();
        let pages: Vec<&CatalogEntry> = entries
            .iter()
            .copied()
            .filter(|entry| entry.id.family == Family::Page && entry.is_publishable())
            .collect();
        let built = pages
            .par_iter()
            .filter(|page| builder.build(page).is_some())
            .count();

        for alias in entries.iter().filter(|entry| entry.is_alias()) {
            if let Err(error) = follow_alias(&session.catalog, alias, AliasScope::Any) {
                diagnostics.report(Diagnostic::alias(alias.id.to_string(), alias.version(), error));
            }
        }

        let mut problems = diagnostics.take();
        problems.sort_by(|a, b| a.page().cmp(b.page()));
        for problem in &problems {
            output.warning(&format!("{}: {problem}", problem.page()));
        }

        let summary = format!("Checked {built} pages: {} problems", problems.len());
        if problems.is_empty() {
            output.success(&summary);
        } else {
            output.warning(&summary);
        }

        if self.strict && !problems.is_empty() {
            return Err(CliError::Validation(format!(
                "{} problems found",
                problems.len()
            )));
        }
        Ok(())
    }
}
