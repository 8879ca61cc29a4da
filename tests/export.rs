//! Format-stability tests for notepack
//!
//! These run against the committed sample vault and pin down the exact
//! output structure of each export format: section headers, field names,
//! numbering, and escaping are contract, not implementation detail.

use assert_cmd::Command;
use std::path::PathBuf;

/// Get the path to the sample vault fixture
fn sample_vault() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_vault")
}

/// Create a command for running the notepack binary
fn notepack_cmd() -> Command {
    Command::cargo_bin("notepack").expect("Failed to find notepack binary")
}

fn export(format: &str) -> String {
    let mut cmd = notepack_cmd();
    cmd.arg("--vault")
        .arg(sample_vault())
        .arg("--quiet")
        .arg("export")
        .arg("index")
        .arg("--format")
        .arg(format);

    let output = cmd.output().expect("failed to execute");
    assert!(output.status.success(), "export {} failed", format);
    String::from_utf8_lossy(&output.stdout).to_string()
}

// The sample vault: index -> roadmap (alias link), reading, missing-note
// (unresolved); reading links back to index and roadmap, both already
// visited. Expected tree: index{roadmap, reading}, 3 notes, max depth 1.

#[test]
fn golden_llm_md_frontmatter() {
    let stdout = export("llm-md");

    assert!(stdout.starts_with("---\n"));
    assert!(stdout.contains("\nstarting_note: \"index\"\n"));
    assert!(stdout.contains("\ntotal_notes_exported: 3\n"));
    assert!(stdout.contains("\nmissing_notes_count: 1\n"));
    assert!(stdout.contains("\nmax_depth_used: 1\n"));
    assert!(stdout.contains("\nprocessing_order: BFS (Breadth-First Search)\n"));
}

#[test]
fn golden_llm_md_sections() {
    let stdout = export("llm-md");

    let structure = stdout.find("## Note Structure").expect("structure section");
    let contents = stdout.find("## Note Contents").expect("contents section");
    assert!(structure < contents);

    assert!(stdout.contains("- Note 1: \"index\""));
    assert!(stdout.contains("- Note 2: \"roadmap\""));
    assert!(stdout.contains("- Note 3: \"reading\""));
    assert!(!stdout.contains("- Note 4:"));

    assert!(stdout.contains("## Note 2: \"roadmap\"\n\nRoadmap for the quarter."));
    assert!(stdout.contains("\n\n---\n\n"));
}

#[test]
fn golden_xml_document() {
    let stdout = export("xml");

    assert!(stdout.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<vault_export>"));
    assert!(stdout.contains("<total_notes_exported>3</total_notes_exported>"));
    assert!(stdout.contains("<missing_notes_count>1</missing_notes_count>"));
    assert!(stdout.contains("<max_depth_used>1</max_depth_used>"));
    assert!(stdout.contains("<note id=\"1\" name=\"index\" />"));
    assert!(stdout.contains("<note id=\"2\" name=\"roadmap\" />"));
    assert!(stdout.contains("<note id=\"3\" name=\"reading\" />"));
    assert!(stdout.contains("<note id=\"2\" name=\"roadmap\">\n    <![CDATA[Roadmap for the quarter."));
    assert!(stdout.trim_end().ends_with("</vault_export>"));
}

#[test]
fn golden_print_view() {
    let stdout = export("print");

    assert!(stdout.starts_with("# index\n\n"));
    assert!(stdout.contains("\n## roadmap\n\nRoadmap for the quarter."));
    assert!(stdout.contains("\n## reading\n\nReading list."));
    assert!(!stdout.contains("###"));
    assert!(!stdout.contains("export_timestamp"));
}

#[test]
fn golden_deeper_title_depth_does_not_duplicate_notes() {
    // Raising the depth limits cannot inflate the count: every reachable
    // note is already in the tree once.
    let mut cmd = notepack_cmd();
    cmd.arg("--vault")
        .arg(sample_vault())
        .arg("--quiet")
        .arg("export")
        .arg("index")
        .arg("--content-depth")
        .arg("4")
        .arg("--title-depth")
        .arg("6");

    let output = cmd.output().expect("failed to execute");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    assert!(stdout.contains("total_notes_exported: 3"));
}
