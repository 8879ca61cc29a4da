//! Note path utilities
//!
//! Note identifiers are vault-relative paths using '/' as separator.

use std::path::Path;

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to the vault root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

/// Strip a trailing `.md` extension from a note path, if present
pub fn strip_md_extension(path: &str) -> &str {
    path.strip_suffix(".md").unwrap_or(path)
}

/// Display title of a note: the final path component without its extension
pub fn note_stem(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    strip_md_extension(name)
}

/// Check if a path has a markdown extension
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        let path = Path::new("topics/alpha.md");
        assert_eq!(normalize_path(path), "topics/alpha.md");
    }

    #[test]
    fn test_make_relative() {
        let root = Path::new("/vault");
        let path = Path::new("/vault/topics/alpha.md");
        assert_eq!(
            make_relative(path, root),
            Some("topics/alpha.md".to_string())
        );
    }

    #[test]
    fn test_make_relative_not_under_root() {
        let root = Path::new("/vault");
        let path = Path::new("/elsewhere/note.md");
        assert_eq!(make_relative(path, root), None);
    }

    #[test]
    fn test_strip_md_extension() {
        assert_eq!(strip_md_extension("alpha.md"), "alpha");
        assert_eq!(strip_md_extension("topics/alpha.md"), "topics/alpha");
        assert_eq!(strip_md_extension("alpha"), "alpha");
        assert_eq!(strip_md_extension("alpha.txt"), "alpha.txt");
    }

    #[test]
    fn test_note_stem() {
        assert_eq!(note_stem("alpha.md"), "alpha");
        assert_eq!(note_stem("topics/alpha.md"), "alpha");
        assert_eq!(note_stem("alpha"), "alpha");
    }

    #[test]
    fn test_is_markdown() {
        assert!(is_markdown(Path::new("note.md")));
        assert!(is_markdown(Path::new("note.MD")));
        assert!(!is_markdown(Path::new("note.txt")));
        assert!(!is_markdown(Path::new("note")));
    }
}
