use crate::bio::RecordReader;
use crate::cli::output;
use crate::cluster::{ClusterEngine, ClusterOptions, TieBreak};
use crate::core::config::{load_config, Config};
use crate::report::{Format, TreeFormatter};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct BuildArgs {
    /// Input FASTA file (prompted for when missing)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Length of the n-grams compared between sequences (prompted for when missing)
    #[arg(short = 'n', long, value_name = "N")]
    pub ngram_size: Option<usize>,

    /// Output format (text, newick, json)
    #[arg(short, long)]
    pub format: Option<Format>,

    /// Write the tree to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Which pair to join when several tie for the highest similarity (last, first)
    #[arg(long)]
    pub tie_break: Option<TieBreak>,

    /// Character that opens a record header
    #[arg(long, value_name = "C")]
    pub marker: Option<char>,

    /// Print every join before the tree
    #[arg(long)]
    pub show_merges: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Build settings after merging arguments over the config file
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSettings {
    pub input: Option<PathBuf>,
    pub ngram_size: Option<usize>,
    pub format: Format,
    pub options: ClusterOptions,
    pub marker: char,
    pub show_merges: bool,
}

impl BuildSettings {
    /// Command-line values win over config values
    pub fn resolve(args: &BuildArgs, config: &Config) -> Self {
        let mut options = config.cluster_options();
        if let Some(tie_break) = args.tie_break {
            options.tie_break = tie_break;
        }

        Self {
            input: args.input.clone().or_else(|| config.input.path.clone()),
            ngram_size: args.ngram_size.or(config.clustering.ngram_size),
            format: args.format.unwrap_or(config.output.format),
            options,
            marker: args.marker.unwrap_or(config.input.record_marker),
            show_merges: args.show_merges || config.output.show_merges,
        }
    }
}

pub fn run(args: BuildArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    let settings = BuildSettings::resolve(&args, &config);

    let input = match settings.input {
        Some(path) => path,
        None => prompt_input()?,
    };
    let ngram_size = match settings.ngram_size {
        Some(n) => n,
        None => prompt_ngram_size()?,
    };

    let spinner = output::create_spinner(format!("Loading {}...", input.display()));
    let records = RecordReader::new(ngram_size)
        .with_marker(settings.marker)
        .read_path(&input);
    let records = match records {
        Ok(records) => records,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e).with_context(|| format!("Failed to read {}", input.display()));
        }
    };
    spinner.finish_with_message(format!("Loaded {} organisms", records.len()));

    let engine = ClusterEngine::new(settings.options);
    let outcome = engine.run_detailed(&records)?;

    let root = match outcome.root {
        Some(root) => root,
        None => {
            info!("No organisms in {}", input.display());
            return Ok(());
        }
    };

    if settings.show_merges && !outcome.merges.is_empty() {
        output::section_header("Joins");
        eprintln!("{}", output::merge_table(&outcome.merges));
    }

    let formatter = TreeFormatter::new(settings.format);
    let rendered = formatter.render(&root)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", rendered))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            output::success(&format!(
                "Wrote {} tree of {} organisms to {}",
                formatter.format(),
                root.leaf_count(),
                path.display()
            ));
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn prompt_input() -> anyhow::Result<PathBuf> {
    use dialoguer::{theme::ColorfulTheme, Input};

    let path = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("FASTA file")
        .interact_text()?;
    Ok(PathBuf::from(path.trim()))
}

fn prompt_ngram_size() -> anyhow::Result<usize> {
    use dialoguer::{theme::ColorfulTheme, Input};

    let n = Input::<usize>::with_theme(&ColorfulTheme::default())
        .with_prompt("n-gram size")
        .validate_with(|n: &usize| -> Result<(), &str> {
            if *n == 0 {
                Err("Bad value for N")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(n)
}
