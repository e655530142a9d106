//! Document adapters.
//!
//! - `PulldownMarkdownRenderer` - Markdown to HTML via pulldown-cmark

mod pulldown_markdown_renderer;

pub use pulldown_markdown_renderer::PulldownMarkdownRenderer;
