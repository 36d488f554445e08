//! Markdown Rendering
//!
//! Recipe descriptions and step instructions are written in Markdown.
//! Raw HTML in the source is shown as text, never injected.

use pulldown_cmark::{html::push_html, Event, Options, Parser};

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES
}

/// Render Markdown to HTML with embedded HTML neutralized
pub fn render_markdown(text: &str) -> String {
    let events = Parser::new_ext(text, get_options()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut html_output = String::new();
    push_html(&mut html_output, events);
    html_output
}

/// Render for inline use (strips the outer `<p>`)
pub fn render_markdown_inline(text: &str) -> String {
    let html = render_markdown(text);
    html.trim()
        .strip_prefix("<p>")
        .and_then(|s| s.strip_suffix("</p>"))
        .map(|s| s.to_string())
        .unwrap_or(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        assert_eq!(
            render_markdown("**Whisk** the eggs"),
            "<p><strong>Whisk</strong> the eggs</p>\n"
        );
        assert_eq!(render_markdown_inline("Bake ~~20~~ 25 min"), "Bake <del>20</del> 25 min");
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_markdown_inline("Serve <script>alert(1)</script> hot");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
