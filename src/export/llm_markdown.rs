//! LLM-optimized markdown exporter
//!
//! Frontmatter metadata block, then a numbered structure listing, then the
//! note bodies separated by horizontal rules. Field names and section
//! headers are contract; tests assert on literal substrings.

use crate::core::model::ExportNode;
use crate::export::{flatten_level_order, max_depth, ExportContext};

const DESCRIPTION: &str = "This export contains a knowledge graph of interconnected notes.
Notes are presented in breadth-first order starting from the root note.
Links between notes are preserved as [[wiki-style links]].
Missing notes (referenced but not found) are listed separately.";

/// Render the tree as an LLM-ready markdown report.
pub fn export(root: &ExportNode, ctx: &ExportContext) -> String {
    let notes = flatten_level_order(root);
    let metadata = build_metadata(root, ctx, notes.len(), max_depth(&notes));
    let structure = build_note_structure(&notes);
    let contents = build_note_contents(&notes);

    format!("{}\n\n{}\n\n{}", metadata, structure, contents)
}

fn build_metadata(
    root: &ExportNode,
    ctx: &ExportContext,
    total_notes: usize,
    max_depth: usize,
) -> String {
    format!(
        "---\n\
         export_timestamp: {}\n\
         vault_path: \"{}\"\n\
         starting_note: \"{}\"\n\
         total_notes_exported: {}\n\
         missing_notes_count: {}\n\
         max_depth_used: {}\n\
         processing_order: BFS (Breadth-First Search)\n\
         ---",
        ctx.timestamp_string(),
        ctx.vault_name,
        root.title,
        total_notes,
        ctx.missing_notes,
        max_depth,
    )
}

fn build_note_structure(notes: &[&ExportNode]) -> String {
    let included: Vec<String> = notes
        .iter()
        .enumerate()
        .map(|(index, note)| format!("- Note {}: \"{}\"", index + 1, note.title))
        .collect();

    format!(
        "## Note Structure\n\n**Description**:\n{}\n\n**Included Notes**:\n{}",
        DESCRIPTION,
        included.join("\n")
    )
}

fn build_note_contents(notes: &[&ExportNode]) -> String {
    let bodies: Vec<String> = notes
        .iter()
        .enumerate()
        .map(|(index, note)| {
            format!(
                "## Note {}: \"{}\"\n\n{}",
                index + 1,
                note.title,
                note.content.as_deref().unwrap_or("")
            )
        })
        .collect();

    format!("## Note Contents\n\n{}", bodies.join("\n\n---\n\n"))
}
