//! Magic command handler
//!
//! Shows what the service's auto-detection makes of an input.

use anyhow::Result;
use autochef_core::dto::magic::MagicArgs;
use clap::Args;

use crate::config::Config;
use crate::input::resolve_input;
use crate::output::print_detection;

/// Magic arguments
#[derive(Args)]
pub struct MagicCommandArgs {
    /// Encoded input; prompted for when omitted
    input: Option<String>,

    /// Auto-detection depth
    #[arg(long, default_value = "1")]
    depth: u32,

    /// Let auto-detection try harder
    #[arg(long)]
    intensive: bool,

    /// Extensive language support
    #[arg(long)]
    ext_lang: bool,
}

/// Handle the magic command
pub async fn handle_magic_command(args: MagicCommandArgs, config: &Config) -> Result<()> {
    if args.depth == 0 {
        anyhow::bail!("depth must be greater than 0");
    }

    let input = resolve_input(args.input)?;
    let client = config.client(MagicArgs {
        depth: args.depth,
        intensive: args.intensive,
        ext_lang: args.ext_lang,
    })?;

    let detection = client.magic(&input).await?;
    print_detection(&detection);

    Ok(())
}
