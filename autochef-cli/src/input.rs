//! Input acquisition
//!
//! Commands take the encoded input as an argument or, when it is missing,
//! prompt for it on stdin.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

const PROMPT: &str = "Enter your encrypted message: ";

/// Returns `arg` if given, otherwise prompts on stdin
pub fn resolve_input(arg: Option<String>) -> Result<String> {
    match arg {
        Some(input) => validate(input),
        None => {
            let stdin = io::stdin();
            prompt(&mut stdin.lock(), &mut io::stdout())
        }
    }
}

/// Prints the prompt and reads one line
fn prompt(reader: &mut impl BufRead, writer: &mut impl Write) -> Result<String> {
    write!(writer, "{}", PROMPT).context("Failed to write prompt")?;
    writer.flush().context("Failed to flush prompt")?;

    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("Failed to read input from stdin")?;

    validate(line.trim_end_matches(['\r', '\n']).to_string())
}

fn validate(input: String) -> Result<String> {
    if input.trim().is_empty() {
        anyhow::bail!("input cannot be empty");
    }
    Ok(input)
}
