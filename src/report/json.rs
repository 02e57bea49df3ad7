use crate::cluster::ClusterNode;
use crate::Result;
use serde::Serialize;

#[derive(Serialize)]
#[serde(untagged)]
enum JsonNode<'a> {
    Leaf {
        name: &'a str,
    },
    Internal {
        size: usize,
        left: Box<JsonNode<'a>>,
        right: Box<JsonNode<'a>>,
    },
}

impl<'a> JsonNode<'a> {
    fn from_node(node: &'a ClusterNode) -> Self {
        match (node.name(), node.children()) {
            (None, Some((left, right))) => JsonNode::Internal {
                size: node.leaf_count(),
                left: Box::new(JsonNode::from_node(left)),
                right: Box::new(JsonNode::from_node(right)),
            },
            (name, _) => JsonNode::Leaf {
                name: name.unwrap_or_default(),
            },
        }
    }
}

/// Pretty-printed JSON with nested `left` / `right` objects
pub fn render_json(root: &ClusterNode) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonNode::from_node(root))?)
}
