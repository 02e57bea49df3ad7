pub mod bio;
pub mod cli;
pub mod cluster;
pub mod core;
pub mod report;

pub use crate::bio::sequence::SequenceRecord;
pub use crate::cluster::{ClusterEngine, ClusterNode, ClusterOptions, SimilarityMatrix, TieBreak};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhyloError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Duplicate organism name: {0}")]
    DuplicateRecord(String),

    #[error("No similarity recorded for pair ({left}, {right})")]
    MissingSimilarity { left: String, right: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PhyloError>;
