//! Markdown Renderer Port - converts assistant answers to HTML.
//!
//! Assistants answer in Markdown; clients receive an HTML fragment. The
//! conversion itself is opaque to the relay and lives behind this trait.

/// Port for Markdown to HTML conversion.
///
/// Implementations return an HTML fragment (no `<html>`/`<body>` wrapper).
/// Conversion is infallible: any input text is valid Markdown.
pub trait MarkdownRenderer: Send + Sync {
    fn to_html(&self, markdown: &str) -> String;
}
