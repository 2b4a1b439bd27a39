//! Front matter extraction and parsing.
//!
//! Front matter is the block between the first two `---` delimiters. It is
//! read as flat `key: value` lines, split on the first colon, so nested YAML
//! such as
//!
//! ```text
//! title:
//!   zh-CN: 基础按钮
//!   en-US: Basic
//! ```
//!
//! flattens into the keys `title`, `zh-CN` and `en-US`.

use std::collections::BTreeMap;

/// Front matter delimiter.
pub const DELIMITER: &str = "---";

/// Parsed front matter block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    /// Key/value pairs; later duplicates replace earlier ones.
    pub fields: BTreeMap<String, String>,

    /// Byte offset where the document body starts (after the closing delimiter line).
    pub body_start: usize,
}

impl Frontmatter {
    /// Look up a key. Absent keys are `None`, never an error.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Look up a key, treating an absent key as an empty string.
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }
}

/// Extract front matter from a markdown document.
///
/// The closing delimiter's trailing line break is consumed, so
/// `&source[fm.body_start..]` is exactly the post-front-matter document.
pub fn extract_frontmatter(source: &str) -> Result<Frontmatter, FrontmatterError> {
    let Some(open) = source.find(DELIMITER) else {
        return Err(FrontmatterError::Missing);
    };

    let block_start = open + DELIMITER.len();
    let Some(close) = source[block_start..].find(DELIMITER).map(|p| p + block_start) else {
        return Err(FrontmatterError::Unclosed);
    };

    let fields = parse_fields(&source[block_start..close]);

    let mut body_start = close + DELIMITER.len();
    if source[body_start..].starts_with("\r\n") {
        body_start += 2;
    } else if source[body_start..].starts_with('\n') {
        body_start += 1;
    }

    Ok(Frontmatter { fields, body_start })
}

/// Parse `key: value` lines. Lines without a colon become keys with an empty value.
fn parse_fields(block: &str) -> BTreeMap<String, String> {
    block
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.split_once(':') {
            Some((key, value)) => (key.trim().to_string(), value.trim().to_string()),
            None => (line.trim().to_string(), String::new()),
        })
        .collect()
}

/// Errors that can occur when locating front matter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrontmatterError {
    #[error("missing front matter - no '---' delimiter")]
    Missing,

    #[error("unclosed front matter block - missing closing '---'")]
    Unclosed,
}
