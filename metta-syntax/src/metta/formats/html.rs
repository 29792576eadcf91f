//! HTML output
//!
//!     Markup uses Prism-style token spans: every classified token becomes
//!     `<span class="token CATEGORY">` with the kebab-case category name, parentheses add
//!     `paren-level-N` (the 0-based depth class) or `paren-error` when unmatched, and plain
//!     text is emitted bare. Composites (lines) are wrapped in `<span class="line">`.

use super::registry::{FormatError, Formatter};
use crate::metta::document::{Block, Document};
use crate::metta::highlight::Highlighter;
use crate::metta::token::{leaves, Category, Token, TokenNode};

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

fn classes(category: Category) -> Option<String> {
    match category {
        Category::PlainText => None,
        Category::BracketOpen(depth) | Category::BracketClose(depth) => Some(format!(
            "token {} paren-level-{}",
            category.name(),
            depth
        )),
        Category::BracketUnmatched => Some(format!("token {} paren-error", category.name())),
        other => Some(format!("token {}", other.name())),
    }
}

#[derive(Debug, Clone, Default)]
pub struct HtmlFormatter {
    /// Add a 1-based `data-line` attribute to every line span.
    pub line_numbers: bool,
}

impl HtmlFormatter {
    pub fn with_line_numbers(line_numbers: bool) -> Self {
        HtmlFormatter { line_numbers }
    }

    /// Render a token tree to HTML markup.
    pub fn render(&self, nodes: &[TokenNode]) -> String {
        let mut out = String::new();
        // Newlines rendered so far; a composite starts on source line `newlines + 1`.
        let mut newlines = 0;
        for node in nodes {
            self.render_node(node, &mut newlines, &mut out);
        }
        out
    }

    fn render_node(&self, node: &TokenNode, newlines: &mut usize, out: &mut String) {
        match node {
            TokenNode::Leaf(token) => {
                *newlines += token.text.matches('\n').count();
                render_token(token, out);
            }
            TokenNode::Composite(children) => {
                let line = *newlines + 1;
                if self.line_numbers {
                    out.push_str(&format!("<span class=\"line\" data-line=\"{}\">", line));
                } else {
                    out.push_str("<span class=\"line\">");
                }
                for child in children {
                    self.render_node(child, newlines, out);
                }
                out.push_str("</span>");
            }
        }
    }
}

fn render_token(token: &Token, out: &mut String) {
    let text = escape_html(&token.text);
    match classes(token.category) {
        Some(class) => {
            out.push_str("<span class=\"");
            out.push_str(&class);
            out.push_str("\">");
            out.push_str(&text);
            out.push_str("</span>");
        }
        None => out.push_str(&text),
    }
}

impl Formatter for HtmlFormatter {
    fn name(&self) -> &str {
        "html"
    }

    fn format_tokens(&self, nodes: &[TokenNode]) -> Result<String, FormatError> {
        Ok(self.render(nodes))
    }

    fn description(&self) -> &str {
        "Prism-style <span class=\"token ...\"> markup"
    }
}

fn is_metta(language: Option<&str>) -> bool {
    matches!(language, None | Some("metta"))
}

/// Render a parsed document: prose as paragraphs, MeTTa code highlighted, other code
/// escaped verbatim, diagrams as mermaid containers.
pub fn render_document_html(document: &Document, highlighter: &Highlighter) -> String {
    let formatter = HtmlFormatter::default();
    let mut out = String::new();

    for block in &document.blocks {
        match block {
            Block::Paragraph { text } => {
                out.push_str("<p>");
                out.push_str(&escape_html(text));
                out.push_str("</p>\n");
            }
            Block::Code { language, code } if is_metta(language.as_deref()) => {
                let tokens = leaves(highlighter.highlight(code));
                out.push_str("<pre class=\"language-metta\"><code class=\"language-metta\">");
                out.push_str(&formatter.render(&tokens));
                out.push_str("</code></pre>\n");
            }
            Block::Code { language, code } => {
                let language = escape_html(language.as_deref().unwrap_or_default());
                out.push_str(&format!(
                    "<pre class=\"language-{0}\"><code class=\"language-{0}\">",
                    language
                ));
                out.push_str(&escape_html(code));
                out.push_str("</code></pre>\n");
            }
            Block::Diagram { source } => {
                out.push_str("<div class=\"mermaid\">");
                out.push_str(&escape_html(source));
                out.push_str("</div>\n");
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metta::document::parse_document;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#039;&amp;&#039;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_render_flat() {
        let tokens = leaves(Highlighter::default().highlight("($x)"));
        insta::assert_snapshot!(
            HtmlFormatter::default().render(&tokens),
            @r#"<span class="token bracket-open paren-level-0">(</span><span class="token variable">$x</span><span class="token bracket-close paren-level-0">)</span>"#
        );
    }

    #[test]
    fn test_render_unmatched_and_plain() {
        let tokens = leaves(Highlighter::default().highlight(") <"));
        assert_eq!(
            HtmlFormatter::default().render(&tokens),
            "<span class=\"token bracket-unmatched paren-error\">)</span> &lt;"
        );
    }

    #[test]
    fn test_render_lines_with_numbers() {
        let lines = Highlighter::default().highlight_lines("1\n2");
        let html = HtmlFormatter::with_line_numbers(true).render(&lines);
        assert_eq!(
            html,
            "<span class=\"line\" data-line=\"1\"><span class=\"token number\">1</span>\n</span>\
             <span class=\"line\" data-line=\"2\"><span class=\"token number\">2</span></span>"
        );
    }

    #[test]
    fn test_line_numbers_follow_multiline_tokens() {
        let lines = Highlighter::default().highlight_lines("/* a\n*/\nx");
        let html = HtmlFormatter::with_line_numbers(true).render(&lines);
        assert_eq!(
            html,
            "<span class=\"line\" data-line=\"1\"><span class=\"token comment\">/* a\n*/</span>\n</span>\
             <span class=\"line\" data-line=\"3\"><span class=\"token function-name\">x</span></span>"
        );
    }

    #[test]
    fn test_render_document() {
        let doc = parse_document("Use <b>\n```metta\n(f)\n```\n```python\nx = '1'\n```\n```mermaid\nA-->B\n```");
        let html = render_document_html(&doc, &Highlighter::default());
        assert_eq!(
            html,
            "<p>Use &lt;b&gt;</p>\n\
             <pre class=\"language-metta\"><code class=\"language-metta\">\
             <span class=\"token bracket-open paren-level-0\">(</span>\
             <span class=\"token function-name\">f</span>\
             <span class=\"token bracket-close paren-level-0\">)</span>\n\
             </code></pre>\n\
             <pre class=\"language-python\"><code class=\"language-python\">x = &#039;1&#039;\n</code></pre>\n\
             <div class=\"mermaid\">A--&gt;B\n</div>\n"
        );
    }
}
