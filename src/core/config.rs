use crate::bio::fasta::DEFAULT_MARKER;
use crate::cluster::{ClusterOptions, TieBreak};
use crate::report::Format;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub clustering: ClusteringConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusteringConfig {
    /// n-gram length; prompted for when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ngram_size: Option<usize>,
    /// Rule for equally similar candidate pairs
    #[serde(default)]
    pub tie_break: TieBreak,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Default input file; prompted for when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Character that opens a record header
    #[serde(default = "default_record_marker")]
    pub record_marker: char,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: Format,
    /// Print every join with its similarity before the tree
    #[serde(default)]
    pub show_merges: bool,
}

fn default_record_marker() -> char {
    DEFAULT_MARKER
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: None,
            record_marker: default_record_marker(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), crate::PhyloError> {
        if self.clustering.ngram_size == Some(0) {
            return Err(crate::PhyloError::Config(
                "clustering.ngram_size must be at least 1".to_string(),
            ));
        }
        if self.input.record_marker.is_whitespace() {
            return Err(crate::PhyloError::Config(
                "input.record_marker cannot be whitespace".to_string(),
            ));
        }
        Ok(())
    }

    pub fn cluster_options(&self) -> ClusterOptions {
        ClusterOptions {
            tie_break: self.clustering.tie_break,
        }
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, crate::PhyloError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| crate::PhyloError::Config(format!("Failed to parse config: {}", e)))?;
    config.validate()?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), crate::PhyloError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| crate::PhyloError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = default_config();
        assert_eq!(config.clustering.ngram_size, None);
        assert_eq!(config.clustering.tie_break, TieBreak::Last);
        assert_eq!(config.input.record_marker, '>');
        assert_eq!(config.output.format, Format::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[clustering]\nngram_size = 4\n").unwrap();
        assert_eq!(config.clustering.ngram_size, Some(4));
        assert_eq!(config.input.record_marker, '>');
        assert!(!config.output.show_merges);
    }

    #[test]
    fn test_enums_use_lowercase_names() {
        let config: Config = toml::from_str(
            "[clustering]\ntie_break = \"first\"\n[output]\nformat = \"newick\"\n",
        )
        .unwrap();
        assert_eq!(config.cluster_options().tie_break, TieBreak::First);
        assert_eq!(config.output.format, Format::Newick);
    }

    #[test]
    fn test_zero_ngram_size_invalid() {
        let mut config = default_config();
        config.clustering.ngram_size = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_whitespace_marker_invalid() {
        let mut config = default_config();
        config.input.record_marker = ' ';
        assert!(config.validate().is_err());
    }
}
