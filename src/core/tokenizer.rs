//! Token counting - estimation for LLM context budgeting
//!
//! The traversal engine leaves `token_count` at zero; counting happens here,
//! downstream, over the finished tree. Uses tiktoken (cl100k_base) with a
//! fast character-class heuristic fallback.

use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;
use tiktoken_rs::{cl100k_base, CoreBPE};

use crate::core::model::ExportNode;

/// Supported token models/encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenModel {
    /// cl100k_base encoding (GPT-4, Claude 3 approximation)
    #[default]
    Cl100k,
    /// Fast heuristic estimation (no BPE encoding)
    Heuristic,
}

impl fmt::Display for TokenModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenModel::Cl100k => "cl100k",
            TokenModel::Heuristic => "heuristic",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for TokenModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cl100k" | "cl100k_base" | "default" => Ok(TokenModel::Cl100k),
            "heuristic" | "fast" | "estimate" => Ok(TokenModel::Heuristic),
            _ => Err(format!(
                "Unknown token model: {}. Available: cl100k, heuristic",
                s
            )),
        }
    }
}

// Loaded once on first use; falls back to the heuristic if loading fails.
static CL100K_BPE: Lazy<Option<CoreBPE>> = Lazy::new(|| cl100k_base().ok());

/// Count tokens in text using the specified model
pub fn count_tokens(text: &str, model: TokenModel) -> usize {
    if text.is_empty() {
        return 0;
    }

    match model {
        TokenModel::Cl100k => match CL100K_BPE.as_ref() {
            Some(bpe) => bpe.encode_with_special_tokens(text).len(),
            None => estimate_tokens_heuristic(text),
        },
        TokenModel::Heuristic => estimate_tokens_heuristic(text),
    }
}

/// Estimate tokens without BPE encoding.
///
/// Rough per-class ratios observed in GPT/Claude tokenizers:
/// - ASCII prose: ~4 chars per token
/// - code symbols: ~2 chars per token
/// - CJK: ~1.5 chars per token
/// - other unicode: ~2 chars per token
pub fn estimate_tokens_heuristic(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }

    let mut prose = 0usize;
    let mut symbols = 0usize;
    let mut cjk = 0usize;
    let mut other = 0usize;

    for c in text.chars() {
        if c.is_ascii() {
            if is_code_symbol(c) {
                symbols += 1;
            } else {
                prose += 1;
            }
        } else if is_cjk_char(c) {
            cjk += 1;
        } else {
            other += 1;
        }
    }

    prose.div_ceil(4) + symbols.div_ceil(2) + (cjk * 2).div_ceil(3) + other.div_ceil(2)
}

/// Annotate every node in the tree with a token count for its title and
/// content. Nodes without content get the title-only count.
pub fn annotate_tree(node: &mut ExportNode, model: TokenModel) {
    node.token_count = count_tokens(&node.title, model)
        + node
            .content
            .as_deref()
            .map(|c| count_tokens(c, model))
            .unwrap_or(0);

    for child in &mut node.children {
        annotate_tree(child, model);
    }
}

/// Sum of the annotated token counts across the whole tree
pub fn tree_token_total(node: &ExportNode) -> usize {
    node.token_count
        + node
            .children
            .iter()
            .map(tree_token_total)
            .sum::<usize>()
}

#[inline]
fn is_code_symbol(c: char) -> bool {
    matches!(
        c,
        '(' | ')'
            | '['
            | ']'
            | '{'
            | '}'
            | '<'
            | '>'
            | '='
            | '+'
            | '-'
            | '*'
            | '/'
            | '%'
            | '&'
            | '|'
            | '^'
            | '!'
            | '~'
            | '?'
            | ':'
            | ';'
            | ','
            | '.'
            | '@'
            | '#'
            | '$'
            | '\\'
            | '"'
            | '\''
            | '`'
    )
}

#[inline]
fn is_cjk_char(c: char) -> bool {
    let cp = c as u32;
    (0x4E00..=0x9FFF).contains(&cp)
        || (0x3400..=0x4DBF).contains(&cp)
        || (0x3000..=0x303F).contains(&cp)
        || (0x3040..=0x309F).contains(&cp)
        || (0x30A0..=0x30FF).contains(&cp)
        || (0xAC00..=0xD7AF).contains(&cp)
        || (0xFF00..=0xFFEF).contains(&cp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_count_tokens_empty() {
        assert_eq!(count_tokens("", TokenModel::Cl100k), 0);
        assert_eq!(count_tokens("", TokenModel::Heuristic), 0);
    }

    #[test]
    fn test_count_tokens_ascii() {
        let tokens = count_tokens("Hello, world!", TokenModel::Cl100k);
        assert!(tokens > 0 && tokens < 10);
    }

    #[test]
    fn test_heuristic_prose() {
        let tokens = estimate_tokens_heuristic("Hello world, this is a test.");
        assert!((5..=12).contains(&tokens));
    }

    #[test]
    fn test_heuristic_cjk() {
        let tokens = estimate_tokens_heuristic("这是一个测试文档");
        assert!((4..=8).contains(&tokens));
    }

    #[test]
    fn test_model_from_str() {
        assert_eq!("cl100k".parse::<TokenModel>().unwrap(), TokenModel::Cl100k);
        assert_eq!(
            "heuristic".parse::<TokenModel>().unwrap(),
            TokenModel::Heuristic
        );
        assert!("unknown".parse::<TokenModel>().is_err());
    }

    #[test]
    fn test_model_display() {
        assert_eq!(TokenModel::Cl100k.to_string(), "cl100k");
        assert_eq!(TokenModel::Heuristic.to_string(), "heuristic");
    }

    #[test]
    fn test_annotate_tree() {
        let mtime = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut root = ExportNode::new("a.md", "A", 0, true, mtime)
            .with_content("Some meaningful content here.")
            .with_child(ExportNode::new("b.md", "B", 1, false, mtime));

        annotate_tree(&mut root, TokenModel::Heuristic);

        assert!(root.token_count > 0);
        // Title-only node still gets a nonzero count for its title.
        assert!(root.children[0].token_count > 0);
        assert!(root.token_count > root.children[0].token_count);
        assert_eq!(
            tree_token_total(&root),
            root.token_count + root.children[0].token_count
        );
    }
}
