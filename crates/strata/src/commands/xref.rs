//! `strata xref` command implementation.

use clap::{Args, ValueEnum};
use strata_catalog::TracingDiagnostics;
use strata_xref::{ReferenceConverter, ReferenceKind};

use super::CatalogArgs;
use crate::error::CliError;
use crate::output::Output;

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Xref,
    Image,
    Include,
}

impl From<Kind> for ReferenceKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Xref => Self::Xref,
            Kind::Image => Self::Image,
            Kind::Include => Self::Include,
        }
    }
}

/// Arguments for the xref command.
#[derive(Args)]
pub(crate) struct XrefArgs {
    /// Resource ID of the file containing the reference.
    #[arg(long)]
    page: String,

    /// Macro the reference comes from.
    #[arg(long, value_enum, default_value_t = Kind::Xref)]
    kind: Kind,

    /// Explicit link text (or image alt text).
    #[arg(long)]
    content: Option<String>,

    /// Emit root-relative URLs instead of page-relative ones.
    #[arg(long)]
    root_relative: bool,

    /// Reference target as written in the source.
    spec: String,

    #[command(flatten)]
    pub catalog: CatalogArgs,
}

impl XrefArgs {
    /// Execute the xref command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or the page is unknown. An
    /// unresolved reference is printed, not returned as an error.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let session = self.catalog.load(self.root_relative.then_some(false))?;
        let current = session.entry(&self.page, &[])?;

        let converter = ReferenceConverter::new(&session.catalog, &TracingDiagnostics)
            .relativize(session.config.xref.relativize);
        let reference = converter.convert(
            &self.spec,
            self.content.as_deref(),
            current,
            self.kind.into(),
        );

        output.data(&serde_json::to_string_pretty(&reference)?)?;
        if reference.unresolved {
            output.warning(&format!("Unresolved reference: {}", self.spec));
        }
        Ok(())
    }
}
