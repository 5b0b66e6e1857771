//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod bake;
mod catalog;
mod magic;
mod search;

pub use bake::BakeArgs;
pub use catalog::CatalogArgs;
pub use magic::MagicCommandArgs;
pub use search::SearchArgs;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Detect a prefix recipe, then try every catalog entry as the last step
    Search(SearchArgs),
    /// Show the service's auto-detected recipes
    Magic(MagicCommandArgs),
    /// Run one recipe against an input
    Bake(BakeArgs),
    /// List the catalog entries
    Catalog(CatalogArgs),
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Search(args) => search::handle_search_command(args, config).await,
        Commands::Magic(args) => magic::handle_magic_command(args, config).await,
        Commands::Bake(args) => bake::handle_bake_command(args, config).await,
        Commands::Catalog(args) => catalog::handle_catalog_command(args),
    }
}
