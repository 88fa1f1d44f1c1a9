//! `vm completions`: shell completion scripts.

use clap::Args;
use clap_complete::{Shell, generate};
use std::io::Write;

/// Binary name the generated scripts complete for.
const BIN_NAME: &str = "vm";

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script generation.
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn write_completions(shell: Shell, command: &mut clap::Command, out: &mut dyn Write) {
    generate(shell, command, BIN_NAME, out);
}

/// Generate the completion script for `shell` on stdout.
pub fn run_completions(shell: Shell, command: &mut clap::Command) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    write_completions(shell, command, &mut stdout.lock());
    tracing::debug!(%shell, "completions written");
    Ok(())
}
