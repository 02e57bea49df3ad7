use crate::cluster::ClusterNode;
use crate::Result;
use serde::{Deserialize, Serialize};

pub mod json;
pub mod newick;
pub mod text;

/// Output format for a finished tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Nested `(left, right)` text
    #[default]
    Text,
    Newick,
    Json,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Text => "text",
            Format::Newick => "newick",
            Format::Json => "json",
        }
    }
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(Format::Text),
            "newick" | "nwk" => Ok(Format::Newick),
            "json" => Ok(Format::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders cluster trees; never reads a node's ordering label
pub struct TreeFormatter {
    format: Format,
}

impl TreeFormatter {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn render(&self, root: &ClusterNode) -> Result<String> {
        match self.format {
            Format::Text => Ok(text::render_text(root)),
            Format::Newick => Ok(newick::render_newick(root)),
            Format::Json => json::render_json(root),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> ClusterNode {
        let ab = ClusterNode::merge(ClusterNode::leaf("a"), ClusterNode::leaf("b"));
        ClusterNode::merge(ab, ClusterNode::leaf("c"))
    }

    #[test]
    fn test_render_dispatch() {
        let root = tree();
        assert_eq!(TreeFormatter::new(Format::Text).render(&root).unwrap(), "((a, b), c)");
        assert_eq!(TreeFormatter::new(Format::Newick).render(&root).unwrap(), "((a,b),c);");
        assert!(TreeFormatter::new(Format::Json)
            .render(&root)
            .unwrap()
            .contains("\"name\": \"c\""));
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("NWK".parse::<Format>().unwrap(), Format::Newick);
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
        assert!("html".parse::<Format>().is_err());
        assert_eq!(Format::default(), Format::Text);
    }
}
