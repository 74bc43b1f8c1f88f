use pulldown_cmark::{Options, Parser, html};

use swagdoc_core::NotesRenderer;
use swagdoc_core::error::RenderError;

/// Renders notes from CommonMark to HTML, with tables and strikethrough.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownNotes {
    options: Options,
}

impl Default for MarkdownNotes {
    fn default() -> Self {
        Self {
            options: Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH,
        }
    }
}

impl MarkdownNotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: Options) -> Self {
        Self { options }
    }
}

impl NotesRenderer for MarkdownNotes {
    fn render(&self, text: &str) -> Result<String, RenderError> {
        let parser = Parser::new_ext(text, self.options);
        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, parser);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emphasis() {
        assert_eq!(
            MarkdownNotes::new().render("_test_").unwrap(),
            "<p><em>test</em></p>\n"
        );
    }

    #[test]
    fn test_strikethrough_enabled_by_default() {
        assert_eq!(
            MarkdownNotes::new().render("~~gone~~").unwrap(),
            "<p><del>gone</del></p>\n"
        );
        assert_eq!(
            MarkdownNotes::with_options(Options::empty())
                .render("~~gone~~")
                .unwrap(),
            "<p>~~gone~~</p>\n"
        );
    }

    #[test]
    fn test_html_is_escaped_in_code() {
        assert_eq!(
            MarkdownNotes::new().render("`<id>`").unwrap(),
            "<p><code>&lt;id&gt;</code></p>\n"
        );
    }
}
