//! `dsweb nav` command implementation.
//!
//! Prints a section's navigation tree as JSON, or the sidebar HTML a page
//! at `--location` would get.

use std::path::PathBuf;

use clap::Args;
use console::Term;
use dsweb_config::{CliSettings, Config};
use dsweb_content::FsContentSource;
use dsweb_site::{Indexer, Section, SidebarState, render_sidebar};

use super::indexer_config;
use crate::error::CliError;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    /// Section to show (docs, tutorials, blog, guides, install, releases, info).
    pub section: Section,

    /// Render the sidebar for this page URL instead of printing JSON.
    #[arg(short, long)]
    location: Option<String>,

    /// Path to configuration file (default: auto-discover dsweb.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown content directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Include documents marked as drafts.
    #[arg(long)]
    drafts: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl NavArgs {
    /// Execute the nav command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or indexing fails, or the section
    /// has no navigation entries.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            include_drafts: self.drafts.then_some(true),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let source = FsContentSource::new(
            config.content_resolved.source_dir.clone(),
            config.site.edit_base_url.clone(),
        );
        let index = Indexer::new(indexer_config(&config)).index_source(&source)?;
        tracing::debug!(section = %self.section, pages = index.pages().len(), "Indexed content");
        let navigation = index.navigation(self.section).ok_or_else(|| {
            CliError::Validation(format!(
                "Section `{}` has no navigation entries",
                self.section
            ))
        })?;

        let rendered = match &self.location {
            Some(location) => render_sidebar(
                navigation,
                location,
                &SidebarState::from_location(location),
                config.sidebar.numbers,
            ),
            None => serde_json::to_string_pretty(navigation)?,
        };
        Term::stdout().write_line(rendered.trim_end())?;
        Ok(())
    }
}
