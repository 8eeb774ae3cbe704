//! `dsweb build` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use dsweb_build::{BuildConfig, StaticSiteBuilder};
use dsweb_config::{CliSettings, Config};
use dsweb_content::{ContentSource, FsContentSource};

use super::indexer_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover dsweb.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown content directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Build documents marked as drafts.
    #[arg(long)]
    drafts: bool,

    /// Prefix sidebar entries with their position.
    #[arg(long)]
    numbers: bool,

    /// Enable verbose output (per-stage logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the build fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            include_drafts: self.drafts.then_some(true),
            sidebar_numbers: self.numbers.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let content = &config.content_resolved;

        output.info(&format!("Source: {}", content.source_dir.display()));
        output.info(&format!("Output: {}", content.output_dir.display()));

        let source: Arc<dyn ContentSource> = Arc::new(FsContentSource::new(
            content.source_dir.clone(),
            config.site.edit_base_url.clone(),
        ));
        let build_config = BuildConfig {
            site_title: config.site.title.clone(),
            site_description: config.site.description.clone(),
            indexer: indexer_config(&config),
            sidebar_numbers: config.sidebar.numbers,
        };

        let report = StaticSiteBuilder::new(source, build_config).build(&content.output_dir)?;

        if report.skipped > 0 {
            output.warning(&format!(
                "Skipped {} pages or redirects with conflicting paths (see log)",
                report.skipped
            ));
        }
        output.success(&format!(
            "Built {} pages, {} listings and {} redirects to {}",
            report.pages,
            report.listings,
            report.redirects,
            content.output_dir.display()
        ));
        Ok(())
    }
}
