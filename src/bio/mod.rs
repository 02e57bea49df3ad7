pub mod fasta;
pub mod ngram;
pub mod sequence;

pub use fasta::{parse_records, parse_records_from_str, RecordReader};
pub use ngram::{extract_ngrams, jaccard, NGramSet};
pub use sequence::{RecordBuilder, SequenceRecord};
