//! Export module - renders an export tree to an output string
//!
//! Three independent formats consume the same tree:
//! - llm-md: markdown with a frontmatter metadata block, tuned for LLM input
//! - xml: tagged document with escaped metadata and CDATA note bodies
//! - print: plain nested-heading markdown for human reading
//!
//! The metadata-bearing formats share a level-order flatten of the tree that
//! fixes the `Note 1..N` numbering.

pub mod llm_markdown;
pub mod print;
pub mod xml;

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::collections::VecDeque;

use crate::core::model::ExportNode;
use crate::core::util::export_timestamp;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    LlmMarkdown,
    Xml,
    Print,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "llm-md" | "llm" | "md" | "markdown" => Ok(ExportFormat::LlmMarkdown),
            "xml" => Ok(ExportFormat::Xml),
            "print" | "print-md" => Ok(ExportFormat::Print),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExportFormat::LlmMarkdown => "llm-md",
            ExportFormat::Xml => "xml",
            ExportFormat::Print => "print",
        };
        write!(f, "{}", name)
    }
}

/// Context handed to the metadata-bearing exporters.
#[derive(Debug, Clone)]
pub struct ExportContext {
    /// Vault display name shown in metadata.
    pub vault_name: String,

    /// Count of unresolved references; 0 when the caller has nothing to
    /// report.
    pub missing_notes: usize,

    /// Export timestamp override. `None` means "now"; tests pin it for
    /// byte-stable output.
    pub timestamp: Option<DateTime<Utc>>,
}

impl ExportContext {
    pub fn new(vault_name: impl Into<String>) -> Self {
        Self {
            vault_name: vault_name.into(),
            missing_notes: 0,
            timestamp: None,
        }
    }

    pub fn with_missing_notes(mut self, missing_notes: usize) -> Self {
        self.missing_notes = missing_notes;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub(crate) fn timestamp_string(&self) -> String {
        export_timestamp(self.timestamp.unwrap_or_else(Utc::now))
    }
}

/// Render the tree in the requested format.
pub fn render(format: ExportFormat, root: &ExportNode, ctx: &ExportContext) -> String {
    match format {
        ExportFormat::LlmMarkdown => llm_markdown::export(root, ctx),
        ExportFormat::Xml => xml::export(root, ctx),
        ExportFormat::Print => print::export(root),
    }
}

/// Level-order flatten of the tree, deduplicated by id.
///
/// This is a purely structural BFS over the in-memory tree; it assigns the
/// stable numbering both metadata formats use for cross-references.
pub fn flatten_level_order(root: &ExportNode) -> Vec<&ExportNode> {
    let mut queue: VecDeque<&ExportNode> = VecDeque::new();
    let mut result: Vec<&ExportNode> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    queue.push_back(root);
    while let Some(node) = queue.pop_front() {
        if !seen.insert(node.id.as_str()) {
            continue;
        }
        result.push(node);
        for child in &node.children {
            queue.push_back(child);
        }
    }
    result
}

/// Maximum depth across the flattened list; 0 for a childless root.
pub fn max_depth(notes: &[&ExportNode]) -> usize {
    notes.iter().map(|n| n.depth).max().unwrap_or(0)
}
