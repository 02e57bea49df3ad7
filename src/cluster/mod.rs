//! Single-linkage hierarchical clustering over n-gram similarity
//!
//! Records are compared pairwise once, into a [`SimilarityMatrix`]. The
//! [`ClusterEngine`] then joins the closest roots of a [`Forest`] until one
//! [`ClusterNode`] tree remains.

pub mod engine;
pub mod forest;
pub mod node;
pub mod similarity;

pub use engine::{linkage, ClusterEngine, ClusterOptions, ClusterOutcome, MergeStep, TieBreak};
pub use forest::Forest;
pub use node::ClusterNode;
pub use similarity::SimilarityMatrix;
