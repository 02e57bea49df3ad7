//! Agglomerative single-linkage clustering of organisms into a binary tree
//!
//! The engine starts from one leaf per organism and repeatedly joins the two
//! roots whose closest pair of member organisms is most similar, until a
//! single tree remains.
use super::forest::Forest;
use super::node::ClusterNode;
use super::similarity::SimilarityMatrix;
use crate::bio::sequence::SequenceRecord;
use crate::{PhyloError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

/// How to choose among forest pairs that tie for the highest similarity.
///
/// Pairs are visited in row-major order over the current forest positions,
/// `(0, 1), (0, 2), ..., (1, 0), (1, 2), ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// The last tied pair visited wins
    #[default]
    Last,
    /// The first tied pair visited wins
    First,
}

impl TieBreak {
    pub fn as_str(&self) -> &'static str {
        match self {
            TieBreak::Last => "last",
            TieBreak::First => "first",
        }
    }

    fn prefers(&self, candidate: f64, best: f64) -> bool {
        match self {
            TieBreak::Last => candidate >= best,
            TieBreak::First => candidate > best,
        }
    }
}

impl std::str::FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "last" => Ok(TieBreak::Last),
            "first" => Ok(TieBreak::First),
            _ => Err(format!("Unknown tie-break rule: {} (expected 'last' or 'first')", s)),
        }
    }
}

impl std::fmt::Display for TieBreak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for the clustering engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClusterOptions {
    pub tie_break: TieBreak,
}

/// One join performed by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct MergeStep {
    /// Label of the child placed on the left
    pub left: String,
    /// Label of the child placed on the right
    pub right: String,
    /// Single-linkage similarity of the two joined clusters
    pub similarity: f64,
    /// Number of forest roots after this join
    pub forest_size: usize,
}

/// The finished tree together with the joins that produced it
#[derive(Debug, Clone)]
pub struct ClusterOutcome {
    pub root: Option<ClusterNode>,
    pub merges: Vec<MergeStep>,
}

/// Main clustering engine
pub struct ClusterEngine {
    options: ClusterOptions,
}

impl Default for ClusterEngine {
    fn default() -> Self {
        Self::new(ClusterOptions::default())
    }
}

impl ClusterEngine {
    pub fn new(options: ClusterOptions) -> Self {
        Self { options }
    }

    /// Build records from `(name, sequence)` pairs and cluster them.
    ///
    /// Every sequence is checked against `ngram_size` before any similarity
    /// is computed.
    pub fn run_sequences<I, N, S>(&self, organisms: I, ngram_size: usize) -> Result<Option<ClusterNode>>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: AsRef<str>,
    {
        if ngram_size == 0 {
            return Err(PhyloError::InvalidParameter(
                "n-gram size must be at least 1".to_string(),
            ));
        }

        let records = organisms
            .into_iter()
            .map(|(name, seq)| SequenceRecord::new(name, seq.as_ref(), ngram_size))
            .collect::<Result<Vec<_>>>()?;

        self.run(&records)
    }

    /// Cluster finished records; `None` when there are no records
    pub fn run(&self, records: &[SequenceRecord]) -> Result<Option<ClusterNode>> {
        Ok(self.run_detailed(records)?.root)
    }

    /// Cluster finished records and report every join
    pub fn run_detailed(&self, records: &[SequenceRecord]) -> Result<ClusterOutcome> {
        check_records(records)?;
        let matrix = SimilarityMatrix::from_records(records);
        self.cluster(&matrix)
    }

    /// Cluster all organisms of a precomputed similarity matrix
    pub fn cluster(&self, matrix: &SimilarityMatrix) -> Result<ClusterOutcome> {
        let mut forest = Forest::from_names(matrix.names());
        if forest.is_empty() {
            debug!("No organisms to cluster");
            return Ok(ClusterOutcome {
                root: None,
                merges: Vec::new(),
            });
        }
        let mut merges = Vec::with_capacity(forest.len() - 1);

        info!(
            "Clustering {} organisms (tie-break: {})",
            forest.len(),
            self.options.tie_break
        );

        while forest.len() > 1 {
            let (i, j, similarity) = self.closest_pair(&forest, matrix)?;
            let (a, b) = forest.remove_pair(i, j).ok_or_else(|| {
                PhyloError::Other(format!("forest positions {} and {} not removable", i, j))
            })?;

            let node = ClusterNode::merge(a, b);
            let step = MergeStep {
                left: child_label(node.left_child()),
                right: child_label(node.right_child()),
                similarity,
                forest_size: forest.len() + 1,
            };
            debug!(
                "Joined {} + {} at similarity {:.4} ({} roots left)",
                step.left, step.right, step.similarity, step.forest_size
            );

            merges.push(step);
            forest.push(node);
        }

        let root = forest.into_single();
        if let Some(ref root) = root {
            info!(
                "Built tree over {} organisms with {} joins",
                root.leaf_count(),
                merges.len()
            );
        }

        Ok(ClusterOutcome { root, merges })
    }

    /// Find the forest pair with the highest single-linkage similarity
    fn closest_pair(
        &self,
        forest: &Forest,
        matrix: &SimilarityMatrix,
    ) -> Result<(usize, usize, f64)> {
        let roots: Vec<&ClusterNode> = forest.iter().collect();
        let f = roots.len();

        // Linkage is symmetric, so compute each unordered pair once
        let mut links = vec![0.0; f * f];
        for i in 0..f {
            for j in (i + 1)..f {
                let link = linkage(roots[i], roots[j], matrix)?;
                links[i * f + j] = link;
                links[j * f + i] = link;
            }
        }

        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..f {
            for j in 0..f {
                if i == j {
                    continue;
                }
                let candidate = links[i * f + j];
                let take = match best {
                    None => true,
                    Some((_, _, current)) => self.options.tie_break.prefers(candidate, current),
                };
                if take {
                    best = Some((i, j, candidate));
                }
            }
        }

        best.ok_or_else(|| PhyloError::Other("forest has fewer than two roots".to_string()))
    }
}

/// Single linkage: the highest similarity between any leaf of `a` and any leaf of `b`
pub fn linkage(a: &ClusterNode, b: &ClusterNode, matrix: &SimilarityMatrix) -> Result<f64> {
    let mut max_sim = 0.0_f64;
    for left in a.leaves() {
        for right in b.leaves() {
            let sim = matrix
                .similarity(left, right)
                .ok_or_else(|| PhyloError::MissingSimilarity {
                    left: left.clone(),
                    right: right.clone(),
                })?;
            max_sim = max_sim.max(sim);
        }
    }
    Ok(max_sim)
}

fn child_label(child: Option<&ClusterNode>) -> String {
    child.map(|c| c.label().to_string()).unwrap_or_default()
}

/// Names must be unique and every record must use the same n-gram size
fn check_records(records: &[SequenceRecord]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.name()) {
            return Err(PhyloError::DuplicateRecord(record.name().to_string()));
        }
    }

    if let Some(first) = records.first() {
        if let Some(other) = records
            .iter()
            .find(|r| r.ngram_size() != first.ngram_size())
        {
            return Err(PhyloError::InvalidParameter(format!(
                "organisms '{}' and '{}' use different n-gram sizes ({} vs {})",
                first.name(),
                other.name(),
                first.ngram_size(),
                other.ngram_size()
            )));
        }
    }

    Ok(())
}
