//! XML exporter
//!
//! Tagged document for machine consumption: metadata, a numbered structure
//! listing, and note bodies in CDATA sections. Titles and the vault path are
//! entity-escaped; CDATA content only needs the `]]>` terminator rewritten.

use crate::core::model::ExportNode;
use crate::export::{flatten_level_order, max_depth, ExportContext};

const DESCRIPTION: &str = "This export contains a knowledge graph of interconnected notes.
    Notes are presented in breadth-first order starting from the root note.
    Links between notes are preserved as [[wiki-style links]].
    Missing notes (referenced but not found) are listed separately.";

/// Render the tree as an XML document.
pub fn export(root: &ExportNode, ctx: &ExportContext) -> String {
    let notes = flatten_level_order(root);
    let metadata = build_metadata(root, ctx, notes.len(), max_depth(&notes));
    let structure = build_note_structure(&notes);
    let contents = build_note_contents(&notes);

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<vault_export>\n{}\n{}\n{}\n</vault_export>",
        metadata, structure, contents
    )
}

fn build_metadata(
    root: &ExportNode,
    ctx: &ExportContext,
    total_notes: usize,
    max_depth: usize,
) -> String {
    format!(
        "  <metadata>\n\
         \x20   <export_timestamp>{}</export_timestamp>\n\
         \x20   <vault_path>{}</vault_path>\n\
         \x20   <starting_note>{}</starting_note>\n\
         \x20   <total_notes_exported>{}</total_notes_exported>\n\
         \x20   <missing_notes_count>{}</missing_notes_count>\n\
         \x20   <max_depth_used>{}</max_depth_used>\n\
         \x20   <processing_order>BFS (Breadth-First Search)</processing_order>\n\
         \x20 </metadata>",
        ctx.timestamp_string(),
        escape(&ctx.vault_name),
        escape(&root.title),
        total_notes,
        ctx.missing_notes,
        max_depth,
    )
}

fn build_note_structure(notes: &[&ExportNode]) -> String {
    let included: Vec<String> = notes
        .iter()
        .enumerate()
        .map(|(index, note)| {
            format!(
                "      <note id=\"{}\" name=\"{}\" />",
                index + 1,
                escape(&note.title)
            )
        })
        .collect();

    format!(
        "  <note_structure>\n\
         \x20   <description>{}</description>\n\
         \x20   <included_notes>\n{}\n    </included_notes>\n\
         \x20 </note_structure>",
        DESCRIPTION,
        included.join("\n")
    )
}

fn build_note_contents(notes: &[&ExportNode]) -> String {
    let rendered: Vec<String> = notes
        .iter()
        .enumerate()
        .map(|(index, note)| {
            format!(
                "  <note id=\"{}\" name=\"{}\">\n    <![CDATA[{}]]>\n  </note>",
                index + 1,
                escape(&note.title),
                sanitize_cdata(note.content.as_deref().unwrap_or(""))
            )
        })
        .collect();

    format!("  <note_contents>\n{}\n  </note_contents>", rendered.join("\n"))
}

/// Escape the five XML metacharacters in user-controlled text.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// A literal `]]>` inside CDATA would terminate the section early; rewrite
/// the terminator's `>` to its entity form. Nothing else is escaped inside
/// CDATA.
fn sanitize_cdata(text: &str) -> String {
    text.replace("]]>", "]]&gt;")
}
