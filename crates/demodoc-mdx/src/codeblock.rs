//! Demo code fence extraction.

/// Marker that opens and closes a demo code block.
pub const CODE_FENCE: &str = "````";

/// A fenced code block located inside a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedBlock {
    /// Byte offset of the opening fence marker
    pub start: usize,

    /// Byte offset just past the closing fence marker (or end of document if unclosed)
    pub end: usize,

    /// Info string after the opening marker (e.g. `html`)
    pub info: String,

    /// Raw source between the opening line and the closing marker
    pub source: String,

    /// Whether a closing marker was found
    pub closed: bool,
}

impl FencedBlock {
    /// The complete fenced block as markdown, markers included.
    pub fn markdown<'a>(&self, document: &'a str) -> &'a str {
        &document[self.start..self.end]
    }
}

/// Find the first code fence at or after `from`.
///
/// Returns `None` when no opening marker exists. An opening marker without a
/// closing one yields a block running to the end of the document with
/// `closed == false`.
pub fn find_fenced_block(document: &str, from: usize) -> Option<FencedBlock> {
    let start = document.get(from..)?.find(CODE_FENCE)? + from;

    let after_marker = start + CODE_FENCE.len();
    let line_end = document[after_marker..]
        .find('\n')
        .map(|p| after_marker + p)
        .unwrap_or(document.len());
    let info = document[after_marker..line_end].trim().to_string();
    let content_start = (line_end + 1).min(document.len());

    let (content_end, end, closed) = match document[content_start..].find(CODE_FENCE) {
        Some(p) => {
            let close = content_start + p;
            (close, close + CODE_FENCE.len(), true)
        }
        None => (document.len(), document.len(), false),
    };

    let source = strip_final_line_break(&document[content_start..content_end]).to_string();

    Some(FencedBlock {
        start,
        end,
        info,
        source,
        closed,
    })
}

fn strip_final_line_break(s: &str) -> &str {
    s.strip_suffix("\r\n")
        .or_else(|| s.strip_suffix('\n'))
        .unwrap_or(s)
}
