//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod nav;

pub(crate) use build::BuildArgs;
pub(crate) use nav::NavArgs;

use dsweb_config::Config;
use dsweb_site::IndexerConfig;

/// Content filters from the resolved configuration.
pub(crate) fn indexer_config(config: &Config) -> IndexerConfig {
    let content = &config.content_resolved;
    IndexerConfig {
        exclude_versions: content.exclude_versions.clone(),
        exclude_hub: content.exclude_hub,
        include_drafts: content.include_drafts,
    }
}
