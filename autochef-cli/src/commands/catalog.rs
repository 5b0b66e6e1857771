//! Catalog command handler

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::config::SearchConfig;
use crate::output::print_catalog;

/// Catalog arguments
#[derive(Args)]
pub struct CatalogArgs {
    /// Catalog file to inspect; the built-in catalog when omitted
    #[arg(long)]
    catalog: Option<PathBuf>,
}

/// Handle the catalog command
pub fn handle_catalog_command(args: CatalogArgs) -> Result<()> {
    let config = SearchConfig {
        catalog_path: args.catalog,
        ..SearchConfig::default()
    };

    let catalog = config.load_catalog()?;
    print_catalog(&catalog);

    Ok(())
}
