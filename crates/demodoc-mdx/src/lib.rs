//! Section extraction for bilingual component documentation.
//!
//! This crate slices demo and index markdown documents into front matter,
//! localized prose spans and demo code, and renders markdown fragments to HTML.

pub mod codeblock;
pub mod frontmatter;
pub mod locale;
pub mod parser;
pub mod render;

pub use codeblock::{find_fenced_block, FencedBlock, CODE_FENCE};
pub use frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};
pub use locale::{Locale, Localized};
pub use parser::{
    display_tag, parse_demo, parse_index, DemoRecord, Diagnostic, IndexRecord, Order, Parsed,
    Severity, API_HEADING,
};
pub use render::render_markdown;
