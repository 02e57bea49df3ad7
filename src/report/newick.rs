use crate::cluster::ClusterNode;

/// Characters that force a Newick label to be quoted
const NEWICK_META: &[char] = &['(', ')', '[', ']', '\'', ':', ';', ','];

/// Newick form without branch lengths, terminated by `;`
pub fn render_newick(root: &ClusterNode) -> String {
    let mut output = String::new();
    write_node(&mut output, root);
    output.push(';');
    output
}

fn write_node(output: &mut String, node: &ClusterNode) {
    match (node.name(), node.children()) {
        (Some(name), _) => output.push_str(&quote_label(name)),
        (None, Some((left, right))) => {
            output.push('(');
            write_node(output, left);
            output.push(',');
            write_node(output, right);
            output.push(')');
        }
        (None, None) => {}
    }
}

/// Quote a label when it holds whitespace or Newick punctuation
pub fn quote_label(name: &str) -> String {
    if name.chars().any(|c| c.is_whitespace() || NEWICK_META.contains(&c)) {
        format!("'{}'", name.replace('\'', "''"))
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_leaf() {
        assert_eq!(render_newick(&ClusterNode::leaf("A")), "A;");
    }

    #[test]
    fn test_nested() {
        let ab = ClusterNode::merge(ClusterNode::leaf("A"), ClusterNode::leaf("B"));
        let root = ClusterNode::merge(ClusterNode::leaf("C"), ab);
        assert_eq!(render_newick(&root), "((A,B),C);");
    }

    #[test]
    fn test_quoting() {
        assert_eq!(quote_label("E_coli"), "E_coli");
        assert_eq!(quote_label("strain:K12"), "'strain:K12'");
        assert_eq!(quote_label("O'Brien"), "'O''Brien'");
    }
}
