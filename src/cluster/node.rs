use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    Leaf(String),
    Internal {
        left: Box<ClusterNode>,
        right: Box<ClusterNode>,
    },
}

/// A node of the binary cluster tree.
///
/// A leaf stands for one organism. An internal node owns exactly two
/// children and no name of its own. Every node caches the set of organism
/// names below it and its canonical label, which orders siblings: the child
/// with the lexicographically smaller label is always `left`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterNode {
    kind: NodeKind,
    leaves: BTreeSet<String>,
    label: String,
}

impl ClusterNode {
    /// Create a leaf for one organism
    pub fn leaf(name: impl Into<String>) -> Self {
        let name = name.into();
        let mut leaves = BTreeSet::new();
        leaves.insert(name.clone());
        Self {
            label: name.clone(),
            kind: NodeKind::Leaf(name),
            leaves,
        }
    }

    /// Join two subtrees under a new parent, ordering them by label
    pub fn merge(a: ClusterNode, b: ClusterNode) -> Self {
        let (left, right) = if a.label < b.label { (a, b) } else { (b, a) };

        let mut leaves = left.leaves.clone();
        leaves.extend(right.leaves.iter().cloned());
        let label = format!("({}, {})", left.label, right.label);

        Self {
            kind: NodeKind::Internal {
                left: Box::new(left),
                right: Box::new(right),
            },
            leaves,
            label,
        }
    }

    /// Canonical label used for sibling ordering
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Names of all organisms below this node
    pub fn leaves(&self) -> &BTreeSet<String> {
        &self.leaves
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// Organism name, for leaves only
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Leaf(name) => Some(name),
            NodeKind::Internal { .. } => None,
        }
    }

    pub fn left_child(&self) -> Option<&ClusterNode> {
        match &self.kind {
            NodeKind::Leaf(_) => None,
            NodeKind::Internal { left, .. } => Some(left),
        }
    }

    pub fn right_child(&self) -> Option<&ClusterNode> {
        match &self.kind {
            NodeKind::Leaf(_) => None,
            NodeKind::Internal { right, .. } => Some(right),
        }
    }

    /// Both children of an internal node
    pub fn children(&self) -> Option<(&ClusterNode, &ClusterNode)> {
        match &self.kind {
            NodeKind::Leaf(_) => None,
            NodeKind::Internal { left, right } => Some((left, right)),
        }
    }

    /// Number of edges on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        match self.children() {
            None => 0,
            Some((left, right)) => 1 + left.depth().max(right.depth()),
        }
    }

    /// Number of internal nodes in this subtree
    pub fn internal_count(&self) -> usize {
        match self.children() {
            None => 0,
            Some((left, right)) => 1 + left.internal_count() + right.internal_count(),
        }
    }
}
