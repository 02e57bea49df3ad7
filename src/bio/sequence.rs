use crate::bio::ngram::{extract_ngrams, jaccard, NGramSet};
use crate::Result;

/// A record whose sequence is still being accumulated line by line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordBuilder {
    name: String,
    description: Option<String>,
    sequence: String,
}

impl RecordBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sequence: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append one sequence line, dropping surrounding whitespace
    pub fn push_line(&mut self, line: &str) {
        self.sequence.push_str(line.trim());
    }

    /// Close the record and derive its n-gram set
    pub fn finish(self, ngram_size: usize) -> Result<SequenceRecord> {
        let ngrams = extract_ngrams(&self.sequence, ngram_size).map_err(|e| match e {
            crate::PhyloError::InvalidParameter(msg) => {
                crate::PhyloError::InvalidParameter(format!("organism '{}': {}", self.name, msg))
            }
            other => other,
        })?;

        Ok(SequenceRecord {
            name: self.name,
            description: self.description,
            sequence: self.sequence,
            ngram_size,
            ngrams,
        })
    }
}

/// One organism: its name, full sequence and n-gram fingerprint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    name: String,
    description: Option<String>,
    sequence: String,
    ngram_size: usize,
    ngrams: NGramSet,
}

impl SequenceRecord {
    /// Build a complete record in one step
    pub fn new(name: impl Into<String>, sequence: &str, ngram_size: usize) -> Result<Self> {
        let mut builder = RecordBuilder::new(name);
        builder.push_line(sequence);
        builder.finish(ngram_size)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn ngram_size(&self) -> usize {
        self.ngram_size
    }

    pub fn ngrams(&self) -> &NGramSet {
        &self.ngrams
    }

    /// Sequence length in characters
    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Jaccard similarity of the two records' n-gram sets
    pub fn similarity(&self, other: &SequenceRecord) -> f64 {
        jaccard(&self.ngrams, &other.ngrams)
    }
}
