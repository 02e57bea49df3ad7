use crate::cluster::ClusterNode;
use std::fmt;

/// Nested text form: a leaf is its name, an internal node is `(left, right)`
pub fn render_text(root: &ClusterNode) -> String {
    let mut output = String::new();
    write_node(&mut output, root);
    output
}

fn write_node(output: &mut String, node: &ClusterNode) {
    match (node.name(), node.children()) {
        (Some(name), _) => output.push_str(name),
        (None, Some((left, right))) => {
            output.push('(');
            write_node(output, left);
            output.push_str(", ");
            write_node(output, right);
            output.push(')');
        }
        (None, None) => {}
    }
}

impl fmt::Display for ClusterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_text(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_is_its_name() {
        assert_eq!(render_text(&ClusterNode::leaf("human")), "human");
    }

    #[test]
    fn test_nested_children_left_first() {
        let ab = ClusterNode::merge(ClusterNode::leaf("b"), ClusterNode::leaf("a"));
        let cd = ClusterNode::merge(ClusterNode::leaf("c"), ClusterNode::leaf("d"));
        let root = ClusterNode::merge(cd, ab);
        assert_eq!(render_text(&root), "((a, b), (c, d))");
        assert_eq!(root.to_string(), "((a, b), (c, d))");
    }
}
