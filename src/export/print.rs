//! Print-style markdown exporter
//!
//! Depth-first pre-order rendering of the live tree: one heading per note,
//! heading level = depth + 1, body text under the heading when included.
//! Titles go out raw; this format is for trusted local rendering.
//!
//! Precondition: the tree is acyclic. Engine-built trees always are; a
//! hand-built tree with a genuine cycle would recurse without bound.

use crate::core::model::ExportNode;

/// Render the tree as nested-heading markdown.
pub fn export(root: &ExportNode) -> String {
    build_node(root, 0)
}

fn build_node(node: &ExportNode, depth: usize) -> String {
    let mut output = String::new();
    output.push_str(&"#".repeat(depth + 1));
    output.push(' ');
    output.push_str(&node.title);
    output.push_str("\n\n");

    if node.include_content {
        if let Some(content) = node.content.as_deref() {
            if !content.is_empty() {
                output.push_str(content);
                output.push_str("\n\n");
            }
        }
    }

    for child in &node.children {
        output.push_str(&build_node(child, depth + 1));
    }

    output
}
