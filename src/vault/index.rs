//! Filesystem vault index
//!
//! Scans a vault directory for markdown notes and maintains the two lookup
//! structures traversal needs: a name-resolution index (path and stem keys)
//! and a per-note outgoing-link index, built up front from the note bodies.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use ignore::WalkBuilder;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::paths::{is_markdown, make_relative, note_stem, strip_md_extension};
use crate::core::util::file_mtime;
use crate::vault::source::NoteSource;
use crate::vault::wikilinks::extract_links;

/// One indexed note.
#[derive(Debug, Clone, Serialize)]
pub struct NoteEntry {
    /// Vault-relative path with '/' separators; the canonical id.
    pub path: String,

    /// Display title (file stem).
    pub title: String,

    /// Outgoing reference names in document order.
    pub links: Vec<String>,

    /// Filesystem modification time.
    pub last_modified: DateTime<Utc>,

    #[serde(skip)]
    abs_path: PathBuf,
}

/// Index over a directory of markdown notes.
#[derive(Debug)]
pub struct VaultIndex {
    root: PathBuf,
    notes: Vec<NoteEntry>,
    /// Keys: relative path, both with and without the .md extension.
    by_path: HashMap<String, usize>,
    /// Key: file stem. On ambiguity the lexicographically first path wins.
    by_stem: HashMap<String, usize>,
}

impl VaultIndex {
    /// Scan `root` and build the index. Hidden files are skipped and
    /// ignore rules (.gitignore and friends) are respected.
    pub fn open(root: &Path) -> Result<Self> {
        let root = root
            .canonicalize()
            .with_context(|| format!("vault directory not found: {}", root.display()))?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in WalkBuilder::new(&root).build() {
            let entry = match entry {
                Ok(e) => e,
                Err(_) => continue,
            };
            let path = entry.path();
            if path.is_dir() || !is_markdown(path) {
                continue;
            }
            paths.push(path.to_path_buf());
        }

        // Stable ordering keeps listings and ambiguous-stem resolution
        // deterministic across platforms.
        let mut notes: Vec<NoteEntry> = Vec::new();
        for abs_path in paths {
            let rel = match make_relative(&abs_path, &root) {
                Some(r) => r,
                None => continue,
            };
            let body = read_note(&abs_path)?;
            let last_modified = file_mtime(&abs_path).unwrap_or_default();
            notes.push(NoteEntry {
                title: note_stem(&rel).to_string(),
                links: extract_links(&body),
                path: rel,
                last_modified,
                abs_path,
            });
        }
        notes.sort_by(|a, b| a.path.cmp(&b.path));

        let mut by_path = HashMap::new();
        let mut by_stem = HashMap::new();
        for (idx, note) in notes.iter().enumerate() {
            by_path.insert(note.path.clone(), idx);
            by_path
                .entry(strip_md_extension(&note.path).to_string())
                .or_insert(idx);
            by_stem.entry(note.title.clone()).or_insert(idx);
        }

        Ok(Self {
            root,
            notes,
            by_path,
            by_stem,
        })
    }

    /// The canonicalized vault directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Vault display name used in export metadata.
    pub fn display_name(&self) -> String {
        crate::core::paths::normalize_path(&self.root)
    }

    /// All indexed notes, sorted by path.
    pub fn notes(&self) -> &[NoteEntry] {
        &self.notes
    }

    fn lookup(&self, name: &str) -> Option<usize> {
        let name = name.trim().trim_start_matches('/');
        if name.is_empty() {
            return None;
        }
        if let Some(&idx) = self.by_path.get(name) {
            return Some(idx);
        }
        self.by_stem.get(strip_md_extension(name)).copied()
    }
}

/// Read a note body, tolerating invalid UTF-8 via lossy conversion.
fn read_note(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("cannot read note: {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

impl NoteSource for VaultIndex {
    type Handle = usize;

    fn resolve(&self, name: &str) -> Option<usize> {
        self.lookup(name)
    }

    fn id(&self, handle: &usize) -> String {
        self.notes[*handle].path.clone()
    }

    fn outgoing_links(&self, handle: &usize) -> Vec<String> {
        self.notes[*handle].links.clone()
    }

    fn title(&self, handle: &usize) -> String {
        self.notes[*handle].title.clone()
    }

    fn last_modified(&self, handle: &usize) -> DateTime<Utc> {
        self.notes[*handle].last_modified
    }

    fn read_body(&self, handle: &usize) -> std::io::Result<String> {
        let bytes = std::fs::read(&self.notes[*handle].abs_path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
