//! notepack - export linked markdown note trees for LLM context
//!
//! notepack provides:
//! - Breadth-first discovery of linked notes with dual depth limits
//! - Deterministic rendering to llm-md / xml / print formats
//! - Vault inspection helpers (scan, links)

use anyhow::Result;
use clap::Parser;

mod cli;
mod core;
mod engine;
mod export;
mod vault;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
