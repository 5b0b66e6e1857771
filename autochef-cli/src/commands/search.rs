//! Search command handler
//!
//! Runs the catalog-driven recipe search and prints the report.

use anyhow::Result;
use autochef_core::catalog::KeyMaterial;
use autochef_core::classify::ClassifierKind;
use autochef_core::dto::magic::MagicArgs;
use clap::Args;
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{Config, SearchConfig};
use crate::input::resolve_input;
use crate::output::print_report;
use crate::service::{SearchError, SearchService};

/// Search arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Encoded input; prompted for when omitted
    input: Option<String>,

    /// Auto-detection depth
    #[arg(long, default_value = "1")]
    depth: u32,

    /// Let auto-detection try harder
    #[arg(long)]
    intensive: bool,

    /// Catalog file (JSON array of operations); the built-in catalog when omitted
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Key material for key slots
    #[arg(long)]
    key: Option<String>,

    /// IV/nonce material for iv slots
    #[arg(long)]
    iv: Option<String>,

    /// Skip entries with unfilled key/iv slots instead of sending blanks
    #[arg(long)]
    strict_slots: bool,

    /// How to recognize readable output: markers or printable
    #[arg(long, default_value = "markers")]
    classifier: ClassifierKind,

    /// Number of candidates baked at once
    #[arg(long, default_value = "1")]
    concurrency: usize,

    /// Search with no prefix when auto-detection fails
    #[arg(long)]
    allow_blind: bool,

    /// Also list misses, failures and skipped entries
    #[arg(long)]
    show_all: bool,
}

impl SearchArgs {
    fn search_config(&self) -> SearchConfig {
        SearchConfig {
            magic: MagicArgs {
                depth: self.depth,
                intensive: self.intensive,
                ext_lang: false,
            },
            catalog_path: self.catalog.clone(),
            keys: KeyMaterial {
                key: self.key.clone(),
                iv: self.iv.clone(),
            },
            strict_slots: self.strict_slots,
            classifier: self.classifier,
            concurrency: self.concurrency,
            allow_blind: self.allow_blind,
        }
    }
}

/// Handle the search command
pub async fn handle_search_command(args: SearchArgs, config: &Config) -> Result<()> {
    let search_config = args.search_config();
    search_config.validate()?;

    let catalog = search_config.load_catalog()?;
    if catalog.malformed_count() > 0 {
        println!(
            "{}",
            format!(
                "⚠ {} malformed catalog entr(ies) will be skipped",
                catalog.malformed_count()
            )
            .yellow()
        );
    }

    let input = resolve_input(args.input)?;
    let client = Arc::new(config.client(search_config.magic.clone())?);

    let service = SearchService::new(
        client.clone(),
        client,
        Arc::new(catalog),
        Arc::from(search_config.classifier.build()),
        search_config.options(),
    );

    match service.run(&input).await {
        Ok(report) => {
            print_report(&report, args.show_all);
            Ok(())
        }
        Err(SearchError::DetectionUnavailable(e)) => {
            println!("{}", "✗ Detection failed, search not started.".red().bold());
            Err(e.into())
        }
    }
}
