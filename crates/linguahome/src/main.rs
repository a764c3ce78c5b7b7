// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LinguaHome - language-driven smart home automation.
//!
//! This is the binary entry point: it loads configuration, sets up logging
//! and hands requests to the agent pipeline.

mod shell;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use linguahome_agent::{AgentComponents, AgentPipeline};
use linguahome_config::LinguaConfig;
use linguahome_core::{AgentResponse, LinguaError, SessionId};

/// Queries run by `linguahome demo`.
const DEMO_QUERIES: &[&str] = &[
    "What's the temperature in Robot Corner?",
    "List all rooms",
    "Which room is the warmest?",
];

/// LinguaHome - control a smart home in plain language.
#[derive(Parser, Debug)]
#[command(name = "linguahome", version, about, long_about = None)]
struct Cli {
    /// Model to use (alias or full name); overrides `llm.model`.
    #[arg(long, global = true)]
    model: Option<String>,

    /// Print the generated code after each response.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start an interactive session (the default).
    Shell,
    /// Process a single request and exit.
    Ask {
        /// The request text.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Run a few canned requests against the configured home.
    Demo,
    /// Print the effective configuration with secrets redacted.
    Config,
    /// List supported models by provider.
    Models,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match linguahome_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            linguahome_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };
    if let Some(model) = &cli.model {
        config.llm.model = model.clone();
    }

    init_tracing(&config.agent.log_level);

    let result = match cli.command.unwrap_or(Commands::Shell) {
        Commands::Config => print_config(&config),
        Commands::Models => {
            print_models();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Shell => match build_pipeline(&config, "cli") {
            Ok(pipeline) => shell::run_shell(pipeline, cli.debug).await,
            Err(e) => Err(e),
        },
        Commands::Ask { query } => run_ask(&config, &query.join(" "), cli.debug).await,
        Commands::Demo => run_demo(&config, cli.debug).await,
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {e}", "error".red());
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("linguahome={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn build_pipeline(config: &LinguaConfig, channel: &str) -> Result<AgentPipeline, LinguaError> {
    let components = AgentComponents::from_config(config, None)?;
    let session = SessionId(format!("{channel}-{}", uuid::Uuid::new_v4()));
    Ok(components.pipeline(session))
}

async fn run_ask(config: &LinguaConfig, query: &str, debug: bool) -> Result<ExitCode, LinguaError> {
    let mut pipeline = build_pipeline(config, "ask")?;
    let response = pipeline.process_async(query).await?;
    print_response(&response, debug);
    Ok(if response.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn run_demo(config: &LinguaConfig, debug: bool) -> Result<ExitCode, LinguaError> {
    let mut pipeline = build_pipeline(config, "demo")?;
    let mut all_ok = true;
    for query in DEMO_QUERIES {
        println!("{} {query}", "query:".bold());
        let response = pipeline.process_async(query).await?;
        all_ok &= response.success;
        print_response(&response, debug);
        println!();
    }
    Ok(if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_config(config: &LinguaConfig) -> Result<ExitCode, LinguaError> {
    let rendered = toml::to_string_pretty(&config.redacted())
        .map_err(|e| LinguaError::Internal(format!("failed to render config: {e}")))?;
    println!("{rendered}");
    Ok(ExitCode::SUCCESS)
}

fn print_models() {
    for (kind, models) in linguahome_provider::list_supported_models() {
        println!("{}:", kind.label().bold());
        for model in models {
            println!("  - {model}");
        }
    }
    println!("\n{}:", "Aliases".bold());
    for (alias, canonical) in linguahome_provider::MODEL_ALIASES {
        println!("  {alias:<14} -> {canonical}");
    }
}

/// Prints a response, and the generated code when `debug` is set.
pub(crate) fn print_response(response: &AgentResponse, debug: bool) {
    if response.success {
        println!("{}", response.message);
    } else {
        println!("{}", response.message.red());
    }
    if debug {
        if let Some(code) = &response.generated_code {
            println!("{}", "--- generated code ---".dimmed());
            println!("{code}");
            println!("{}", "----------------------".dimmed());
        }
    }
}
