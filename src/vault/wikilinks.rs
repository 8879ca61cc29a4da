//! Outgoing-link extraction
//!
//! Parses reference targets out of note bodies:
//! - wiki links: [[Target]], [[Target|alias]], [[Target#heading]], ![[embeds]]
//! - relative markdown links: [text](other-note.md)
//!
//! External URLs and non-markdown file targets are not note references.
//! Links inside fenced code blocks are ignored.

use once_cell::sync::Lazy;
use regex::Regex;

/// Static regex for wiki-style links. The optional leading '!' covers embeds.
static WIKI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([^\[\]]+)\]\]").expect("Invalid WIKI_RE regex"));

/// Static regex for inline markdown links: [text](target)
static MD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]\(([^()\s]+)\)").expect("Invalid MD_RE regex"));

/// Extract reference names from a note body, in document order.
///
/// Duplicate occurrences are preserved; deduplication is the traversal
/// engine's job.
pub fn extract_links(body: &str) -> Vec<String> {
    let mut links = Vec::new();
    let mut in_fence = false;

    for line in body.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        // Merge wiki and markdown matches by column so document order holds
        // within a line too.
        let mut found: Vec<(usize, String)> = Vec::new();

        for caps in WIKI_RE.captures_iter(line) {
            let m = caps.get(0).expect("match 0 always present");
            if let Some(target) = clean_wiki_target(&caps[1]) {
                found.push((m.start(), target));
            }
        }

        for caps in MD_RE.captures_iter(line) {
            let m = caps.get(0).expect("match 0 always present");
            if let Some(target) = clean_md_target(&caps[1]) {
                found.push((m.start(), target));
            }
        }

        found.sort_by_key(|(start, _)| *start);
        links.extend(found.into_iter().map(|(_, target)| target));
    }

    links
}

/// Normalize a wiki-link inner text: drop alias and heading parts.
fn clean_wiki_target(inner: &str) -> Option<String> {
    let target = inner.split('|').next().unwrap_or("");
    let target = target.split('#').next().unwrap_or("").trim();
    if target.is_empty() || has_foreign_extension(target) {
        return None;
    }
    Some(target.to_string())
}

/// Normalize a markdown-link target: local markdown files only.
fn clean_md_target(target: &str) -> Option<String> {
    let target = target.trim();
    if target.is_empty() || target.starts_with('#') {
        return None;
    }
    // Scheme-qualified targets (https:, mailto:, ...) are external.
    if target
        .split_once(':')
        .map(|(scheme, _)| scheme.chars().all(|c| c.is_ascii_alphabetic()))
        .unwrap_or(false)
    {
        return None;
    }
    let target = target.split('#').next().unwrap_or("").trim();
    if target.is_empty() || has_foreign_extension(target) {
        return None;
    }
    Some(target.to_string())
}

/// A target with a non-markdown file extension (image, pdf, ...) is not a
/// note reference.
fn has_foreign_extension(target: &str) -> bool {
    let name = target.rsplit('/').next().unwrap_or(target);
    match name.rsplit_once('.') {
        Some((stem, ext)) => {
            !stem.is_empty() && !ext.is_empty() && !ext.eq_ignore_ascii_case("md")
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_wiki_links() {
        let links = extract_links("See [[Alpha]] and [[Beta]].");
        assert_eq!(links, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_alias_and_heading_stripped() {
        let links = extract_links("[[Alpha|the first]] then [[Beta#Setup]]");
        assert_eq!(links, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_embed_counts_as_link() {
        let links = extract_links("Inline: ![[Alpha]]");
        assert_eq!(links, vec!["Alpha"]);
    }

    #[test]
    fn test_markdown_links() {
        let links = extract_links("A [guide](docs/guide.md) and [raw](other)");
        assert_eq!(links, vec!["docs/guide.md", "other"]);
    }

    #[test]
    fn test_external_urls_ignored() {
        let links = extract_links("[site](https://example.com) [mail](mailto:a@b.c) [[Alpha]]");
        assert_eq!(links, vec!["Alpha"]);
    }

    #[test]
    fn test_image_targets_ignored() {
        let links = extract_links("![photo](img/cat.png) and ![[diagram.svg]] but [[Notes]]");
        assert_eq!(links, vec!["Notes"]);
    }

    #[test]
    fn test_heading_only_link_ignored() {
        let links = extract_links("[[#Local heading]] and [same page](#anchor)");
        assert!(links.is_empty());
    }

    #[test]
    fn test_document_order_within_line() {
        let links = extract_links("[md](b.md) before [[A]] after");
        assert_eq!(links, vec!["b.md", "A"]);
    }

    #[test]
    fn test_duplicates_preserved() {
        let links = extract_links("[[Alpha]] [[Alpha]]");
        assert_eq!(links, vec!["Alpha", "Alpha"]);
    }

    #[test]
    fn test_fenced_code_blocks_skipped() {
        let body = "before [[Alpha]]\n```\n[[NotALink]]\n```\nafter [[Beta]]";
        let links = extract_links(body);
        assert_eq!(links, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_empty_body() {
        assert!(extract_links("").is_empty());
    }
}
