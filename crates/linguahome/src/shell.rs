// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `linguahome shell` command implementation.
//!
//! Interactive REPL with readline history. `clear` resets the conversation,
//! `quit` or `exit` leaves.

use std::process::ExitCode;

use colored::Colorize;
use linguahome_agent::AgentPipeline;
use linguahome_core::LinguaError;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::info;

use crate::print_response;

/// What a line of input asks the shell to do.
#[derive(Debug, PartialEq, Eq)]
enum ShellInput<'a> {
    Quit,
    Clear,
    Skip,
    Request(&'a str),
}

fn classify(line: &str) -> ShellInput<'_> {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "" => ShellInput::Skip,
        "quit" | "exit" | "q" => ShellInput::Quit,
        "clear" => ShellInput::Clear,
        _ => ShellInput::Request(trimmed),
    }
}

/// Runs the interactive REPL until the user quits.
pub async fn run_shell(mut pipeline: AgentPipeline, debug: bool) -> Result<ExitCode, LinguaError> {
    let mut rl = DefaultEditor::new()
        .map_err(|e| LinguaError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "LinguaHome - smart home assistant".bold().green());
    println!(
        "model {} | type {} to reset, {} to leave\n",
        pipeline.gateway().model().cyan(),
        "clear".yellow(),
        "quit".yellow()
    );
    info!(session_id = %pipeline.session_id(), "shell session started");

    let prompt = format!("{}> ", "you".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => match classify(&line) {
                ShellInput::Quit => break,
                ShellInput::Skip => continue,
                ShellInput::Clear => {
                    pipeline.reset();
                    println!("{}", "conversation cleared".dimmed());
                }
                ShellInput::Request(text) => {
                    let _ = rl.add_history_entry(text);
                    let response = pipeline.process_async(text).await?;
                    print_response(&response, debug);
                }
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_case_insensitive() {
        assert_eq!(classify("QUIT"), ShellInput::Quit);
        assert_eq!(classify(" exit "), ShellInput::Quit);
        assert_eq!(classify("Clear"), ShellInput::Clear);
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(classify("   "), ShellInput::Skip);
    }

    #[test]
    fn requests_are_trimmed() {
        assert_eq!(
            classify("  is the door open?  "),
            ShellInput::Request("is the door open?")
        );
    }
}
