//! `batchspec` - compare and rewrite AWS Batch job-definition JSON.
//!
//! Usage:
//!   batchspec equivalent --shape container config.json api.json
//!   batchspec remove-fields job.json plugins tags
//!   batchspec diff a.json b.json
//!
//! `-` reads a document from stdin.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use batchspec::cli::{self, Verdict};
use batchspec::ShapeKind;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "batchspec")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether two documents describe the same job
    Equivalent {
        /// Document shape
        #[arg(short, long, value_enum)]
        shape: ShapeKind,
        /// Configured document
        config: PathBuf,
        /// Document reported by the service
        api: PathBuf,
    },

    /// Drop the named members at every level
    RemoveFields {
        file: PathBuf,
        /// Member names, unquoted
        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// Drop members that are null, "", {} or []
    RemoveEmpty { file: PathBuf },

    /// Lower-case the first letter of every member name
    KeyFirstLower { file: PathBuf },

    /// Strip insignificant whitespace
    Compact { file: PathBuf },

    /// List the differences between two documents
    Diff { a: PathBuf, b: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(command: Commands) -> Result<ExitCode> {
    let output = match command {
        Commands::Equivalent { shape, config, api } => {
            let config = cli::read_input(&config)?;
            let api = cli::read_input(&api)?;
            let verdict = cli::equivalent(shape, &config, &api)?;
            print(&verdict.render()?)?;
            return Ok(match verdict {
                Verdict::Equivalent => ExitCode::SUCCESS,
                Verdict::Different(_) => ExitCode::from(1),
            });
        }
        Commands::RemoveFields { file, fields } => {
            cli::remove_fields(&cli::read_input(&file)?, &fields)?
        }
        Commands::RemoveEmpty { file } => cli::remove_empty(&cli::read_input(&file)?)?,
        Commands::KeyFirstLower { file } => cli::lower_keys(&cli::read_input(&file)?)?,
        Commands::Compact { file } => cli::compact(&cli::read_input(&file)?)?,
        Commands::Diff { a, b } => cli::diff(&cli::read_input(&a)?, &cli::read_input(&b)?)?,
    };
    print(&output)?;
    Ok(ExitCode::SUCCESS)
}

fn print(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.is_empty() && !text.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    Ok(())
}
