use super::node::ClusterNode;

/// The ordered set of cluster roots not yet merged.
///
/// Positions are stable between merges; a merge removes two roots and
/// appends their parent at the end.
#[derive(Debug, Clone, Default)]
pub struct Forest {
    roots: Vec<ClusterNode>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    /// One leaf per organism, in the given order
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roots: names.into_iter().map(ClusterNode::leaf).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClusterNode> {
        self.roots.iter()
    }

    pub fn push(&mut self, node: ClusterNode) {
        self.roots.push(node);
    }

    /// Remove the roots at two distinct positions, returning them in the order
    /// the positions were given. The larger position is removed first so the
    /// smaller one still points at the intended root.
    pub fn remove_pair(&mut self, i: usize, j: usize) -> Option<(ClusterNode, ClusterNode)> {
        if i == j || i >= self.roots.len() || j >= self.roots.len() {
            return None;
        }

        if i > j {
            let first = self.roots.remove(i);
            let second = self.roots.remove(j);
            Some((first, second))
        } else {
            let second = self.roots.remove(j);
            let first = self.roots.remove(i);
            Some((first, second))
        }
    }

    /// Take the last remaining root when exactly one is left
    pub fn into_single(mut self) -> Option<ClusterNode> {
        if self.roots.len() == 1 {
            self.roots.pop()
        } else {
            None
        }
    }
}
