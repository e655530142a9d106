//! Pulldown-cmark based Markdown renderer.
//!
//! Converts assistant answers to HTML fragments with GitHub-flavoured
//! extensions (tables, strikethrough, task lists). Pure Rust, no external
//! process.

use pulldown_cmark::{html, Options, Parser};

use crate::ports::MarkdownRenderer;

/// Markdown renderer backed by `pulldown-cmark`.
#[derive(Debug, Clone)]
pub struct PulldownMarkdownRenderer {
    options: Options,
}

impl Default for PulldownMarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PulldownMarkdownRenderer {
    /// Create a renderer with GFM-style extensions enabled.
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS,
        }
    }
}

impl MarkdownRenderer for PulldownMarkdownRenderer {
    fn to_html(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);

        let mut html_body = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_body, parser);
        html_body
    }
}
