//! Demo and index document parser.
//!
//! Both document kinds have a fixed section order. Each anchor is searched
//! after the previous one; a missing anchor leaves its span empty and adds an
//! error diagnostic instead of aborting, so one malformed document never
//! stops its siblings from generating.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::codeblock::find_fenced_block;
use crate::frontmatter::{extract_frontmatter, Frontmatter};
use crate::locale::{Locale, Localized};
use crate::render::render_markdown;

/// Heading that separates an index document's overview from its API reference.
pub const API_HEADING: &str = "## API";

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Structural problem; the affected span is empty or partial
    Error,
    /// Advisory only
    Tip,
}

/// A problem found while parsing a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn tip(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Tip,
            message: message.into(),
        }
    }
}

/// A parsed value with the diagnostics collected while producing it.
#[derive(Debug, Clone)]
pub struct Parsed<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Parsed<T> {
    /// Whether any error-level diagnostic was raised.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

/// Display order from a demo's front matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Order {
    /// No `order` key
    Missing,
    /// `order` present but not starting with an integer
    Invalid(String),
    Value(i64),
}

impl Order {
    /// Reads the leading integer of the field, so `1.5` and `3 (after basic)`
    /// give 1 and 3. A field with no leading integer is `Invalid`.
    fn from_field(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Missing;
        };

        let trimmed = raw.trim();
        let sign_len = usize::from(trimmed.starts_with(['-', '+']));
        let digits_len = trimmed[sign_len..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();

        trimmed[..sign_len + digits_len]
            .parse()
            .map(Self::Value)
            .unwrap_or_else(|_| Self::Invalid(raw.to_string()))
    }

    /// The numeric order, if there is one.
    pub fn value(&self) -> Option<i64> {
        match self {
            Self::Value(v) => Some(*v),
            _ => None,
        }
    }
}

/// One usage example of a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoRecord {
    /// Component directory name (e.g. `button`)
    pub component: String,

    /// Demo file name without extension (e.g. `basic`)
    pub name: String,

    pub order: Order,

    /// Title per locale
    pub title: Localized<String>,

    /// Description markdown per locale
    pub description: Localized<String>,

    /// Placeholder element rendering the demo itself
    pub display: String,

    /// The fenced code block, markers included
    pub code_markdown: String,

    /// `code_markdown` rendered to HTML
    pub code_markup: String,

    /// Raw code between the fence markers
    pub code: String,
}

/// Overview and API reference of a component in one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexRecord {
    pub locale: Locale,
    pub title: String,
    pub subtitle: String,

    /// All front matter fields, `title` and `subtitle` included
    pub fields: BTreeMap<String, String>,

    /// Markdown between the front matter and the API heading
    pub before_code: String,

    /// Markdown from the API heading (inclusive) to the end
    pub after_code: String,
}

/// Placeholder element for a demo: `<button-basic></button-basic>`.
pub fn display_tag(component: &str, name: &str) -> String {
    format!("<{component}-{name}></{component}-{name}>")
}

/// Parse a demo document.
///
/// Expected layout, in order: front matter with an `order` key, a `## zh-CN`
/// section, an `## en-US` section, and a ```` fenced code block.
pub fn parse_demo(source: &str, component: &str, name: &str) -> Parsed<DemoRecord> {
    let mut diagnostics = Vec::new();
    let frontmatter = frontmatter_or_default(source, &mut diagnostics);

    let order = Order::from_field(frontmatter.get("order"));
    match &order {
        Order::Missing => diagnostics.push(Diagnostic::tip("front matter should specify `order`")),
        Order::Invalid(raw) => diagnostics.push(Diagnostic::tip(format!(
            "`order` is not an integer: {raw:?}"
        ))),
        Order::Value(_) => {}
    }

    let mut cursor = frontmatter.body_start;
    let zh = find_heading(source, Locale::ZhCn.heading(), cursor);
    if let Some(h) = zh {
        cursor = h.content_start;
    }
    let en = find_heading(source, Locale::EnUs.heading(), cursor);
    if let Some(h) = en {
        cursor = h.content_start;
    }
    let block = find_fenced_block(source, cursor);

    let block_start = block.as_ref().map(|b| b.start);
    let zh_span = section_span(source, zh, en.map(|h| h.start).or(block_start));
    let en_span = section_span(source, en, block_start);

    for (locale, heading) in [(Locale::ZhCn, zh), (Locale::EnUs, en)] {
        if heading.is_none() {
            diagnostics.push(Diagnostic::error(format!(
                "missing `{}` section",
                locale.heading()
            )));
        }
    }

    let (code_markdown, code) = match &block {
        Some(b) => {
            if !b.closed {
                diagnostics.push(Diagnostic::error("code block is not closed"));
            }
            (b.markdown(source).to_string(), b.source.clone())
        }
        None => {
            diagnostics.push(Diagnostic::error("missing code block"));
            (String::new(), String::new())
        }
    };

    let title = Localized {
        zh: demo_title(&frontmatter, Locale::ZhCn, name),
        en: demo_title(&frontmatter, Locale::EnUs, name),
    };

    Parsed {
        value: DemoRecord {
            component: component.to_string(),
            name: name.to_string(),
            order,
            title,
            description: Localized {
                zh: zh_span.to_string(),
                en: en_span.to_string(),
            },
            display: display_tag(component, name),
            code_markup: render_markdown(&code_markdown),
            code_markdown,
            code,
        },
        diagnostics,
    }
}

/// Parse an index document.
///
/// Expected layout: front matter with `title`/`subtitle`, free prose, an
/// `## API` heading, more prose.
pub fn parse_index(source: &str, locale: Locale) -> Parsed<IndexRecord> {
    let mut diagnostics = Vec::new();
    let frontmatter = frontmatter_or_default(source, &mut diagnostics);
    let body_start = frontmatter.body_start;

    let (before_code, after_code) = match source[body_start..].find(API_HEADING) {
        Some(p) => {
            let api = body_start + p;
            (&source[body_start..api], &source[api..])
        }
        None => {
            diagnostics.push(Diagnostic::error(format!("missing `{API_HEADING}` section")));
            (&source[body_start..], "")
        }
    };

    Parsed {
        value: IndexRecord {
            locale,
            title: frontmatter.get_or_empty("title").to_string(),
            subtitle: frontmatter.get_or_empty("subtitle").to_string(),
            before_code: before_code.to_string(),
            after_code: after_code.to_string(),
            fields: frontmatter.fields,
        },
        diagnostics,
    }
}

fn frontmatter_or_default(source: &str, diagnostics: &mut Vec<Diagnostic>) -> Frontmatter {
    match extract_frontmatter(source) {
        Ok(fm) => fm,
        Err(e) => {
            diagnostics.push(Diagnostic::error(e.to_string()));
            Frontmatter::default()
        }
    }
}

fn demo_title(frontmatter: &Frontmatter, locale: Locale, name: &str) -> String {
    [frontmatter.get(locale.tag()), frontmatter.get("title")]
        .into_iter()
        .flatten()
        .find(|t| !t.is_empty())
        .unwrap_or(name)
        .to_string()
}

/// Location of a heading line.
#[derive(Debug, Clone, Copy)]
struct Heading {
    start: usize,
    /// First byte after the heading line
    content_start: usize,
}

fn find_heading(source: &str, heading: &str, from: usize) -> Option<Heading> {
    let start = source.get(from..)?.find(heading)? + from;
    let content_start = source[start..]
        .find('\n')
        .map(|p| start + p + 1)
        .unwrap_or(source.len());
    Some(Heading {
        start,
        content_start,
    })
}

/// Text from the end of `heading` up to `end` (or the end of the document).
fn section_span(source: &str, heading: Option<Heading>, end: Option<usize>) -> &str {
    match heading {
        Some(h) => {
            let end = end.unwrap_or(source.len()).max(h.content_start);
            &source[h.content_start..end]
        }
        None => "",
    }
}
