//! CLI module - Command-line interface definitions and handlers

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::core::tokenizer::{annotate_tree, tree_token_total, TokenModel};
use crate::engine::traversal::BfsTraversal;
use crate::export::{flatten_level_order, max_depth, render, ExportContext, ExportFormat};
use crate::vault::index::VaultIndex;
use crate::vault::source::NoteSource;

/// notepack - export linked markdown note trees into LLM-ready context formats.
#[derive(Parser, Debug)]
#[command(name = "notepack")]
#[command(
    author,
    version,
    about,
    long_about = r#"notepack discovers the notes reachable from a root note by following
links breadth-first, bounded by two depth limits, and renders the result
as a single document.

Output formats:
- llm-md: markdown with a frontmatter metadata block (best for LLM prompts)
- xml: tagged document with CDATA note bodies (best for tooling)
- print: plain nested-heading markdown (best for reading)

Examples:
    notepack --vault ~/notes export "Project Hub"
    notepack --vault ~/notes export index --content-depth 1 --title-depth 3 --format xml
    notepack --vault ~/notes export index --format print --output context.md
    notepack --vault ~/notes links "Project Hub"
    notepack --vault ~/notes scan
"#
)]
pub struct Cli {
    /// Vault directory containing markdown notes.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "DIR",
        long_help = "Vault directory containing markdown notes (defaults to the current\n\
directory). Notes are addressed by vault-relative path or by file stem."
    )]
    pub vault: PathBuf,

    /// Quiet mode (suppress warnings on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Suppress non-essential stderr output such as the missing-note warning.\n\
The export itself is still printed to stdout or written to --output."
    )]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export the note tree reachable from a root note.
    #[command(
        long_about = "Traverse the vault breadth-first from NOTE and render the discovered\n\
tree in the selected format.\n\n\
Depth limits:\n\
- --content-depth: notes at or above this depth include their full body\n\
- --title-depth: links are followed up to this depth; notes at the limit\n\
  appear by title only\n\n\
Unresolvable links never abort the export; they are counted and reported.\n\n\
Examples:\n\
  notepack export \"Project Hub\"\n\
  notepack export index --content-depth 1 --title-depth 2 --format xml\n"
    )]
    Export {
        /// Root note (vault-relative path or file stem).
        #[arg(value_name = "NOTE")]
        note: String,

        /// Maximum depth at which full note content is included.
        #[arg(long, default_value = "2", value_name = "N")]
        content_depth: usize,

        /// Maximum depth to which links are followed.
        #[arg(
            long,
            default_value = "3",
            value_name = "N",
            long_help = "Maximum depth to which links are followed. Must be at least\n\
--content-depth; notes at this depth are leaves even when they link onward."
        )]
        title_depth: usize,

        /// Output format (llm-md/xml/print).
        #[arg(long, default_value = "llm-md", value_name = "FORMAT")]
        format: String,

        /// Write the export to a file instead of stdout.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Annotate nodes with estimated token counts before rendering.
        #[arg(
            long,
            long_help = "Estimate token counts for every exported note (title + body).\n\
Counts feed the --stats summary; the export text itself is unchanged."
        )]
        count_tokens: bool,

        /// Token model for counting (cl100k/heuristic).
        #[arg(long, default_value = "cl100k", value_name = "MODEL")]
        token_model: String,

        /// Show export statistics on stderr.
        #[arg(long, long_help = "Print note count, missing-link count and token totals to stderr.")]
        stats: bool,
    },

    /// List the notes in the vault.
    #[command(
        long_about = "List every markdown note the vault index knows about, sorted by\n\
vault-relative path.\n\n\
Example:\n\
  notepack scan\n"
    )]
    Scan {
        /// Emit one JSON object per note instead of plain paths.
        #[arg(long)]
        json: bool,
    },

    /// Show outgoing links of a note and how they resolve.
    #[command(
        long_about = "Resolve every outgoing reference of NOTE against the vault index and\n\
report the target path, or mark the reference as missing.\n\n\
Example:\n\
  notepack links \"Project Hub\"\n"
    )]
    Links {
        /// Note to inspect (vault-relative path or file stem).
        #[arg(value_name = "NOTE")]
        note: String,

        /// Emit one JSON object per link instead of plain text.
        #[arg(long)]
        json: bool,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let vault = VaultIndex::open(&cli.vault)?;

    match cli.command {
        Commands::Export {
            note,
            content_depth,
            title_depth,
            format,
            output,
            count_tokens,
            token_model,
            stats,
        } => run_export(
            &vault,
            &note,
            content_depth,
            title_depth,
            &format,
            output.as_deref(),
            count_tokens,
            &token_model,
            stats,
            cli.quiet,
        ),

        Commands::Scan { json } => run_scan(&vault, json),

        Commands::Links { note, json } => run_links(&vault, &note, json),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_export(
    vault: &VaultIndex,
    note: &str,
    content_depth: usize,
    title_depth: usize,
    format: &str,
    output: Option<&std::path::Path>,
    count_tokens: bool,
    token_model: &str,
    stats: bool,
    quiet: bool,
) -> Result<()> {
    if title_depth < content_depth {
        bail!(
            "--title-depth ({}) must be at least --content-depth ({})",
            title_depth,
            content_depth
        );
    }

    let format: ExportFormat = format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let engine = BfsTraversal::new(vault, content_depth, title_depth);
    let tree = match engine.traverse(note) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            bail!("export failed");
        }
    };

    let mut root = tree.root;
    let missing = tree.missing_notes;

    if count_tokens {
        let model: TokenModel = token_model
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;
        annotate_tree(&mut root, model);
    }

    let ctx = ExportContext::new(vault.display_name()).with_missing_notes(missing.len());
    let rendered = render(format, &root, &ctx);

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("cannot write export: {}", path.display()))?;
            if !quiet {
                eprintln!("wrote {} export to {}", format, path.display());
            }
        }
        None => println!("{}", rendered),
    }

    if !missing.is_empty() && !quiet {
        eprintln!(
            "{} {} unresolved link(s): {}",
            "warning:".yellow().bold(),
            missing.len(),
            missing.join(", ")
        );
    }

    if stats {
        let flat = flatten_level_order(&root);
        eprintln!("Export statistics:");
        eprintln!("   Notes: {}", flat.len());
        eprintln!("   Max depth: {}", max_depth(&flat));
        eprintln!("   Missing links: {}", missing.len());
        if count_tokens {
            eprintln!("   Estimated tokens: {}", tree_token_total(&root));
        }
    }

    Ok(())
}

fn run_scan(vault: &VaultIndex, json: bool) -> Result<()> {
    for note in vault.notes() {
        if json {
            println!("{}", serde_json::to_string(note)?);
        } else {
            println!("{}", note.path);
        }
    }
    Ok(())
}

fn run_links(vault: &VaultIndex, note: &str, json: bool) -> Result<()> {
    let handle = match vault.resolve(note) {
        Some(handle) => handle,
        None => {
            eprintln!("{} note not found: {}", "error:".red().bold(), note);
            bail!("links failed");
        }
    };

    for link in vault.outgoing_links(&handle) {
        let resolved = vault.resolve(&link).map(|h| vault.id(&h));
        if json {
            println!(
                "{}",
                serde_json::json!({ "link": link, "resolved": resolved })
            );
        } else {
            match resolved {
                Some(path) => println!("{} -> {}", link, path),
                None => println!("{} -> {}", link, "(missing)".yellow()),
            }
        }
    }
    Ok(())
}
