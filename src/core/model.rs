//! Export tree model
//!
//! The traversal engine produces a tree of `ExportNode`s; every exporter
//! consumes the same tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single note in the export tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportNode {
    /// Canonical vault-relative path. Unique within one traversal and used
    /// as the deduplication key.
    pub id: String,

    /// Display title of the note.
    pub title: String,

    /// BFS layer, root = 0.
    pub depth: usize,

    /// Whether the full note body is included (`depth <= content_depth`).
    /// Fixed at node creation.
    pub include_content: bool,

    /// The note body, present iff `include_content`. Populated by the
    /// hydration pass after the tree shape is complete; `None` means
    /// genuinely absent, never an empty stand-in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Child notes in link-discovery order.
    pub children: Vec<ExportNode>,

    /// Estimated token count. Left at 0 by the engine; filled by the
    /// optional downstream annotation pass.
    pub token_count: usize,

    /// Modification time of the source note at traversal time.
    pub last_modified: DateTime<Utc>,
}

impl ExportNode {
    /// Create a node at the given depth with no content attached yet.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        depth: usize,
        include_content: bool,
        last_modified: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            depth,
            include_content,
            content: None,
            children: Vec::new(),
            token_count: 0,
            last_modified,
        }
    }

    /// Attach content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Append a child, preserving insertion order.
    pub fn with_child(mut self, child: ExportNode) -> Self {
        self.children.push(child);
        self
    }

    /// Total number of nodes in this subtree.
    #[allow(dead_code)]
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(ExportNode::subtree_len)
            .sum::<usize>()
    }
}

/// Result of a successful traversal: the discovered tree plus the names of
/// references that did not resolve to any note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportTree {
    pub root: ExportNode,

    /// Unresolved reference names, deduplicated by literal text. Sorted for
    /// deterministic output; callers must not rely on any particular order.
    pub missing_notes: Vec<String>,
}

impl ExportTree {
    pub fn missing_count(&self) -> usize {
        self.missing_notes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn mtime() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_new_node_has_no_content() {
        let node = ExportNode::new("a.md", "A", 0, true, mtime());
        assert_eq!(node.id, "a.md");
        assert_eq!(node.depth, 0);
        assert!(node.include_content);
        assert!(node.content.is_none());
        assert!(node.children.is_empty());
        assert_eq!(node.token_count, 0);
    }

    #[test]
    fn test_with_child_preserves_order() {
        let node = ExportNode::new("a.md", "A", 0, true, mtime())
            .with_child(ExportNode::new("b.md", "B", 1, true, mtime()))
            .with_child(ExportNode::new("c.md", "C", 1, true, mtime()));

        let ids: Vec<_> = node.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b.md", "c.md"]);
    }

    #[test]
    fn test_subtree_len() {
        let node = ExportNode::new("a.md", "A", 0, true, mtime()).with_child(
            ExportNode::new("b.md", "B", 1, true, mtime())
                .with_child(ExportNode::new("c.md", "C", 2, false, mtime())),
        );
        assert_eq!(node.subtree_len(), 3);
    }

    #[test]
    fn test_absent_content_not_serialized() {
        let node = ExportNode::new("a.md", "A", 0, false, mtime());
        let json = serde_json::to_string(&node).unwrap();
        assert!(!json.contains("\"content\""));

        let with_content = node.with_content("body");
        let json = serde_json::to_string(&with_content).unwrap();
        assert!(json.contains("\"content\":\"body\""));
    }

    #[test]
    fn test_export_tree_missing_count() {
        let tree = ExportTree {
            root: ExportNode::new("a.md", "A", 0, true, mtime()),
            missing_notes: vec!["Ghost".to_string(), "Phantom".to_string()],
        };
        assert_eq!(tree.missing_count(), 2);
    }
}
