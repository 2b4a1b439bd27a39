//! Markdown to HTML rendering.

use pulldown_cmark::{html, Options, Parser};

/// Render a markdown fragment to HTML.
pub fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(markdown, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_paragraphs_and_tables() {
        let html = render_markdown("Hello **world**\n\n| a |\n|---|\n| 1 |\n");

        assert!(html.contains("<p>Hello <strong>world</strong></p>"));
        assert!(html.contains("<table>"));
    }

    #[test]
    fn renders_four_backtick_fence_as_code() {
        let html = render_markdown("```` html\n<my-button/>\n````");

        assert!(html.contains("<pre><code class=\"language-html\">"));
        assert!(html.contains("&lt;my-button/&gt;"));
    }

    #[test]
    fn empty_input_renders_empty() {
        assert_eq!(render_markdown(""), "");
    }
}
