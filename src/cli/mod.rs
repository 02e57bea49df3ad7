pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "phylo-ngram",
    version,
    about = "Build similarity trees of organisms from shared sequence n-grams",
    long_about = "phylo-ngram reads organism sequences from a FASTA-like file, compares every pair \
                  by the Jaccard index of their n-gram sets, and joins the closest clusters \
                  (single linkage) until one tree remains."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cluster the organisms of a FASTA file into a tree
    Build(commands::build::BuildArgs),

    /// Print the pairwise n-gram similarity matrix
    Matrix(commands::matrix::MatrixArgs),

    /// Manage configuration files
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}
