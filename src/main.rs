use clap::Parser;
use colored::*;
use phylo_ngram::cli::{Cli, Commands};
use phylo_ngram::PhyloError;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // PHYLO_LOG takes precedence, then -v, then info
    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let log_level = std::env::var("PHYLO_LOG").unwrap_or_else(|_| default_level.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);

        let exit_code = match e.downcast_ref::<PhyloError>() {
            Some(PhyloError::Config(_)) => 2,
            Some(PhyloError::Io(_)) => 3,
            Some(PhyloError::Parse(_)) | Some(PhyloError::DuplicateRecord(_)) => 4,
            Some(PhyloError::InvalidParameter(_)) => 5,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Build(args) => phylo_ngram::cli::commands::build::run(args),
        Commands::Matrix(args) => phylo_ngram::cli::commands::matrix::run(args),
        Commands::Config { command } => phylo_ngram::cli::commands::config::run(command),
    }
}
