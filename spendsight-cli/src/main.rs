//! SpendSight CLI - categorize a transaction ledger and ask a language model
//! for spending insights.
//!
//! Usage:
//!   spendsight analyze --file ledger.csv [--tui]   Full dashboard with insights
//!   spendsight summary --file ledger.csv           Offline summary (no API call)
//!   spendsight config init|show                    Manage ~/.spendsight/config.toml

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use spendsight_finance::{InsightClient, analyze, prepare};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod dashboard;
mod state;
mod tui;

#[derive(Parser, Debug)]
#[command(
    name = "spendsight",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SPENDSIGHT_BUILD_SHA"), ")"),
    about = "Personal spending dashboard with language-model insights"
)]
struct Cli {
    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Categorize a ledger, request insights, and show the dashboard
    Analyze {
        /// Transaction file (CSV; PDF is recognized but not supported yet)
        #[arg(long)]
        file: PathBuf,

        /// Show the dashboard in a full-screen terminal UI
        #[arg(long)]
        tui: bool,

        /// Override the configured model
        #[arg(long)]
        model: Option<String>,
    },

    /// Print the categorized table, chart and prompt body without calling the API
    Summary {
        #[arg(long)]
        file: PathBuf,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config file (never overwrites)
    Init,

    /// Print the effective configuration
    Show,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(io::stderr),
        )
        .init();

    match cli.command {
        Command::Analyze {
            file,
            tui: full_screen,
            model,
        } => {
            // Resolve the key before touching the file so a missing secret fails fast
            let cfg = config::load_config()?;
            let insight_config = cfg
                .insights
                .resolve(|name| std::env::var(name).ok(), model.as_deref())?;
            debug!(?insight_config, "resolved insight config");
            let client = InsightClient::new(insight_config);

            let analysis = analyze(&file, &client)
                .await
                .with_context(|| format!("analyzing {}", file.display()))?;

            if full_screen {
                tui::run_dashboard(&analysis)?;
            } else {
                dashboard::render(&mut io::stdout().lock(), &analysis)?;
            }
        }

        Command::Summary { file } => {
            let prepared =
                prepare(&file).with_context(|| format!("summarizing {}", file.display()))?;
            let mut out = io::stdout().lock();

            writeln!(
                out,
                "Parsed {} transactions from {}\n",
                prepared.records.len(),
                file.display()
            )?;
            dashboard::write_table(&mut out, &prepared.records)?;
            writeln!(out, "\n## Spending by Category\n")?;
            dashboard::write_chart(&mut out, &dashboard::chart_rows(&prepared.records))?;
            writeln!(out, "\n## Prompt body\n")?;
            write!(out, "{}", prepared.prompt_body)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}
