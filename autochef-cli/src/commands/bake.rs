//! Bake command handler
//!
//! Runs a single recipe, given inline or from a file, and prints the output.

use anyhow::{Context, Result};
use autochef_core::domain::pipeline::Pipeline;
use autochef_core::dto::magic::MagicArgs;
use clap::Args;

use crate::config::Config;
use crate::input::resolve_input;
use crate::output::print_bake_output;

/// Bake arguments
#[derive(Args)]
pub struct BakeArgs {
    /// Encoded input; prompted for when omitted
    input: Option<String>,

    /// Recipe as a JSON array of operations, or @path to read it from a file
    #[arg(short, long)]
    recipe: String,
}

/// Handle the bake command
pub async fn handle_bake_command(args: BakeArgs, config: &Config) -> Result<()> {
    let recipe = load_recipe(&args.recipe)?;
    let input = resolve_input(args.input)?;
    let client = config.client(MagicArgs::default())?;

    let output = client.try_bake(&input, &recipe).await?;
    print_bake_output(&output);

    Ok(())
}

/// Parse a recipe given inline or as `@path`
fn load_recipe(source: &str) -> Result<Pipeline> {
    let json = match source.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read recipe file: {}", path))?,
        None => source.to_string(),
    };

    let recipe: Pipeline = serde_json::from_str(&json).context("Failed to parse recipe")?;
    if recipe.is_empty() {
        anyhow::bail!("recipe cannot be empty");
    }

    Ok(recipe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_recipe() {
        let recipe = load_recipe(
            r#"[{"op":"From Base32","args":["A-Z2-7=",true]},{"op":"From Base64","args":["A-Za-z0-9+/=",true,false]}]"#,
        )
        .unwrap();
        assert_eq!(recipe.summary(), "From Base32 --> From Base64");
    }

    #[test]
    fn test_empty_recipe_is_rejected() {
        assert!(load_recipe("[]").is_err());
    }

    #[test]
    fn test_invalid_recipe_is_rejected() {
        assert!(load_recipe(r#"{"op":"ROT13"}"#).is_err());
    }

    #[test]
    fn test_missing_recipe_file() {
        assert!(load_recipe("@/nonexistent/recipe.json").is_err());
    }
}
