// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rehearse - technical interview simulator.
//!
//! Binary entry point: the HTTP gateway, an interactive terminal interview,
//! and configuration/model inspection commands.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;
mod shell;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use rehearse_config::RehearseConfig;
use rehearse_engine::InterviewEngine;

/// Rehearse - technical interview simulator.
#[derive(Parser, Debug)]
#[command(name = "rehearse", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP gateway.
    Serve,
    /// Run an interview in the terminal.
    Shell(shell::ShellArgs),
    /// Probe the configured providers and print the model priority lists.
    Models,
    /// Print the resolved configuration (secrets redacted).
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config_file {
        Some(path) => rehearse_config::load_and_validate_path(path),
        None => rehearse_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            rehearse_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Shell(args)) => shell::run_shell(config, args).await,
        Some(Commands::Models) => {
            run_models(&config).await;
            Ok(())
        }
        Some(Commands::Config) => print_config(&config),
        None => {
            println!("rehearse: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

async fn run_models(config: &RehearseConfig) {
    serve::init_tracing("warn");
    let engine = InterviewEngine::from_config(config).await;

    println!(
        "configured mode: {}  active mode: {}",
        engine.configured_mode().to_string().bold(),
        engine.active_mode().to_string().bold()
    );
    let tiers = engine.priority_lists();
    if tiers.is_empty() {
        println!("{}", "no model tiers; offline responder only".yellow());
    }
    for tier in tiers {
        println!("{}", format!("[{}]", tier.mode).green());
        for (i, model) in tier.models.iter().enumerate() {
            println!("  {}. {model}", i + 1);
        }
    }
}

fn print_config(config: &RehearseConfig) -> Result<(), rehearse_core::RehearseError> {
    let rendered = toml::to_string_pretty(&config.redacted())
        .map_err(|e| rehearse_core::RehearseError::Internal(format!("failed to render config: {e}")))?;
    print!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_parses_shell_arguments() {
        let cli = Cli::try_parse_from([
            "rehearse", "shell", "--company", "Meta", "--level", "L5", "--round", "design",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Shell(args)) => {
                assert_eq!(args.company, "Meta");
                assert_eq!(args.level, "L5");
                assert_eq!(args.round, "design");
                assert_eq!(args.role, "Software Engineer");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn config_file_flag_is_global() {
        let cli = Cli::try_parse_from(["rehearse", "models", "--config-file", "/tmp/r.toml"]).unwrap();
        assert_eq!(cli.config_file, Some(PathBuf::from("/tmp/r.toml")));
        assert!(matches!(cli.command, Some(Commands::Models)));
    }

    #[test]
    fn redacted_config_renders_as_toml() {
        let config = rehearse_config::load_and_validate_str(
            "[gemini]\napi_key = \"secret-key\"\n",
        )
        .unwrap();
        let rendered = toml::to_string_pretty(&config.redacted()).unwrap();
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("[engine]"));
    }
}
