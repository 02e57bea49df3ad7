use crate::bio::fasta::{RecordReader, DEFAULT_MARKER};
use crate::cli::output;
use crate::cluster::SimilarityMatrix;
use anyhow::Context;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MatrixFormat {
    Table,
    Csv,
}

#[derive(Args)]
pub struct MatrixArgs {
    /// Input FASTA file
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Length of the n-grams compared between sequences
    #[arg(short = 'n', long, value_name = "N")]
    pub ngram_size: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: MatrixFormat,

    /// Character that opens a record header
    #[arg(long, value_name = "C", default_value_t = DEFAULT_MARKER)]
    pub marker: char,
}

pub fn run(args: MatrixArgs) -> anyhow::Result<()> {
    let spinner = output::create_spinner(format!("Loading {}...", args.input.display()));
    let reader = RecordReader::new(args.ngram_size).with_marker(args.marker);
    let records = reader.read_path(&args.input);
    let records = match records {
        Ok(records) => records,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e).with_context(|| format!("Failed to read {}", args.input.display()));
        }
    };
    spinner.finish_with_message(format!("Loaded {} organisms", records.len()));

    let matrix = SimilarityMatrix::from_records(&records);
    if matrix.is_empty() {
        return Ok(());
    }

    match args.format {
        MatrixFormat::Table => {
            output::section_header(&format!(
                "Jaccard similarity of {}-grams ({} organisms)",
                reader.ngram_size(),
                matrix.len()
            ));
            println!("{}", output::similarity_table(&matrix));
        }
        MatrixFormat::Csv => print!("{}", output::similarity_csv(&matrix)),
    }

    Ok(())
}
