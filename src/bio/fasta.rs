use crate::bio::sequence::{RecordBuilder, SequenceRecord};
use crate::{PhyloError, Result};
use flate2::read::GzDecoder;
use indexmap::IndexMap;
use nom::{
    bytes::complete::take_till,
    character::complete::{char, space1},
    combinator::{opt, rest},
    sequence::preceded,
    IResult,
};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;
use tracing::{debug, info, trace};

/// Default character introducing a record header
pub const DEFAULT_MARKER: char = '>';

/// Parse a header line into (name, description)
fn parse_header(line: &str, marker: char) -> IResult<&str, (&str, Option<&str>)> {
    let (input, _) = char(marker)(line)?;
    let (input, name) = take_till(|c: char| c.is_whitespace())(input)?;
    let (input, description) = opt(preceded(space1, rest))(input)?;
    let description = description.map(str::trim).filter(|d| !d.is_empty());
    Ok((input, (name, description)))
}

/// Reads FASTA-like text into finished [`SequenceRecord`]s.
///
/// A header line starts a record; the following lines are joined into its
/// sequence with surrounding whitespace dropped. The record is closed by an
/// empty line, by the next header, or by the end of input, at which point its
/// n-gram set is built. A line holding only whitespace does not close it.
#[derive(Debug, Clone, Copy)]
pub struct RecordReader {
    ngram_size: usize,
    marker: char,
}

impl RecordReader {
    pub fn new(ngram_size: usize) -> Self {
        Self {
            ngram_size,
            marker: DEFAULT_MARKER,
        }
    }

    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    pub fn ngram_size(&self) -> usize {
        self.ngram_size
    }

    /// Read records from any buffered source
    pub fn read<R: BufRead>(&self, reader: R) -> Result<Vec<SequenceRecord>> {
        if self.ngram_size == 0 {
            return Err(PhyloError::InvalidParameter(
                "n-gram size must be at least 1".to_string(),
            ));
        }

        let mut records: IndexMap<String, SequenceRecord> = IndexMap::new();
        let mut pending: Option<RecordBuilder> = None;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.strip_suffix('\r').unwrap_or(&line);

            // Only an empty line closes a record; whitespace-only lines add nothing
            if line.is_empty() {
                if let Some(builder) = pending.take() {
                    self.finish_record(builder, &mut records)?;
                }
                continue;
            }
            if line.trim().is_empty() {
                if let Some(builder) = pending.as_mut() {
                    builder.push_line(line);
                }
                continue;
            }

            if line.starts_with(self.marker) {
                if let Some(builder) = pending.take() {
                    self.finish_record(builder, &mut records)?;
                }

                let (_, (name, description)) = parse_header(line.trim_end(), self.marker)
                    .map_err(|e| {
                        PhyloError::Parse(format!("line {}: bad header: {:?}", line_num + 1, e))
                    })?;
                if name.is_empty() {
                    return Err(PhyloError::Parse(format!(
                        "line {}: header has no organism name",
                        line_num + 1
                    )));
                }
                if records.contains_key(name) {
                    return Err(PhyloError::DuplicateRecord(name.to_string()));
                }

                trace!("Line {}: header for '{}'", line_num + 1, name);
                let mut builder = RecordBuilder::new(name);
                if let Some(desc) = description {
                    builder = builder.with_description(desc);
                }
                pending = Some(builder);
                continue;
            }

            match pending.as_mut() {
                Some(builder) => builder.push_line(line),
                None => {
                    return Err(PhyloError::Parse(format!(
                        "line {}: sequence data before any '{}' header",
                        line_num + 1,
                        self.marker
                    )))
                }
            }
        }

        if let Some(builder) = pending.take() {
            self.finish_record(builder, &mut records)?;
        }

        info!(
            "Read {} organisms with n-gram size {}",
            records.len(),
            self.ngram_size
        );
        Ok(records.into_values().collect())
    }

    /// Read records from an in-memory string
    pub fn read_str(&self, text: &str) -> Result<Vec<SequenceRecord>> {
        self.read(Cursor::new(text.as_bytes()))
    }

    /// Read records from a file, decompressing `.gz` input
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<SequenceRecord>> {
        let path = path.as_ref();
        let file = File::open(path)?;

        if path.extension().and_then(|s| s.to_str()) == Some("gz") {
            self.read(BufReader::new(GzDecoder::new(file)))
        } else {
            self.read(BufReader::new(file))
        }
    }

    fn finish_record(
        &self,
        builder: RecordBuilder,
        records: &mut IndexMap<String, SequenceRecord>,
    ) -> Result<()> {
        let record = builder.finish(self.ngram_size)?;
        debug!(
            "Finished '{}': {} residues, {} distinct n-grams",
            record.name(),
            record.len(),
            record.ngrams().len()
        );
        // Names are checked when the header is seen
        records.insert(record.name().to_string(), record);
        Ok(())
    }
}

/// Parse records from a string with the default header marker
pub fn parse_records_from_str(text: &str, ngram_size: usize) -> Result<Vec<SequenceRecord>> {
    RecordReader::new(ngram_size).read_str(text)
}

/// Parse records from a file with the default header marker
pub fn parse_records<P: AsRef<Path>>(path: P, ngram_size: usize) -> Result<Vec<SequenceRecord>> {
    RecordReader::new(ngram_size).read_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        let (_, (name, desc)) = parse_header(">ecoli K-12 substr. MG1655", '>').unwrap();
        assert_eq!(name, "ecoli");
        assert_eq!(desc, Some("K-12 substr. MG1655"));
    }

    #[test]
    fn test_parse_header_without_description() {
        let (_, (name, desc)) = parse_header(">human", '>').unwrap();
        assert_eq!(name, "human");
        assert_eq!(desc, None);
    }

    #[test]
    fn test_parse_header_custom_marker() {
        let (_, (name, _)) = parse_header("@read1 extra", '@').unwrap();
        assert_eq!(name, "read1");
        assert!(parse_header(">read1", '@').is_err());
    }

    #[test]
    fn test_blank_line_terminates_record() {
        let text = ">a first\nACGT\nACGT\n\n>b\nTTTT\n\n";
        let records = parse_records_from_str(text, 2).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name(), "a");
        assert_eq!(records[0].sequence(), "ACGTACGT");
        assert_eq!(records[0].description(), Some("first"));
        assert_eq!(records[1].sequence(), "TTTT");
    }

    #[test]
    fn test_end_of_input_terminates_record() {
        let records = parse_records_from_str(">a\nACGT", 2).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ngrams().len(), 3);
    }

    #[test]
    fn test_header_terminates_pending_record() {
        let records = parse_records_from_str(">a\nACGT\n>b\nGGCC\n", 2).unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_extra_blank_lines_ignored() {
        let records = parse_records_from_str("\n\n>a\nACGT\n\n\n\n>b\nACGT\n", 2).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_whitespace_only_line_stays_inside_record() {
        let text = ">A\nACGT\n   \nTTTT\n\n>B\nACGT\n\n";
        let records = parse_records_from_str(text, 2).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sequence(), "ACGTTTTT");
        assert_eq!(records[1].sequence(), "ACGT");
    }

    #[test]
    fn test_whitespace_only_lines_between_records_skipped() {
        let records = parse_records_from_str("  \n>a\nACGT\n\n \t\n>b\nACGT\n", 2).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_crlf_blank_line_terminates_record() {
        let records = parse_records_from_str(">a\r\nACGT\r\n\r\n>b\r\nGGCC\r\n", 2).unwrap();
        assert_eq!(records[0].sequence(), "ACGT");
        assert_eq!(records[1].sequence(), "GGCC");
    }

    #[test]
    fn test_data_before_header_rejected() {
        let err = parse_records_from_str("ACGT\n>a\nACGT\n", 2).unwrap_err();
        assert!(matches!(err, PhyloError::Parse(_)));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = parse_records_from_str("> nameless\nACGT\n", 2).unwrap_err();
        assert!(matches!(err, PhyloError::Parse(_)));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let err = parse_records_from_str(">a\nACGT\n\n>a\nTTTT\n", 2).unwrap_err();
        assert!(matches!(err, PhyloError::DuplicateRecord(name) if name == "a"));
    }

    #[test]
    fn test_zero_ngram_size_rejected_even_without_records() {
        let err = parse_records_from_str("", 0).unwrap_err();
        assert!(matches!(err, PhyloError::InvalidParameter(_)));
    }

    #[test]
    fn test_empty_input_yields_no_records() {
        assert!(parse_records_from_str("", 3).unwrap().is_empty());
        assert!(parse_records_from_str("\n\n", 3).unwrap().is_empty());
    }
}
