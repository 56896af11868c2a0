use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::aot::Generator;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::error::CliError;

/// Completion script for `shell`, named after the binary clap knows about
pub fn render_completions(shell: Shell) -> Vec<u8> {
    let mut command = Cli::command();
    let bin_name = command.get_name().to_string();
    let mut script = Vec::new();
    generate(shell, &mut command, bin_name, &mut script);
    script
}

/// Resolve `-o`: a directory receives the shell's conventional file name
/// (`inbox.bash`, `_inbox`, `inbox.fish`, ...), anything else is the file itself.
pub fn completion_target(shell: Shell, output: &Path) -> PathBuf {
    if output.is_dir() {
        output.join(shell.file_name(Cli::command().get_name()))
    } else {
        output.to_path_buf()
    }
}

pub fn run_completions(shell: Shell, output_path: Option<&Path>) -> Result<(), CliError> {
    let script = render_completions(shell);

    let Some(output) = output_path else {
        io::stdout().write_all(&script)?;
        return Ok(());
    };

    let target = completion_target(shell, output);
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&target, &script)?;

    tracing::info!("Wrote {shell:?} completions to {}", target.display());
    println!("{}", target.display());
    Ok(())
}
