//! Formatter for free-text descriptions written in a small markdown-like dialect.
//!
//! The input is escaped first, so the output is safe to insert as trusted HTML.
//! Supported markup:
//!
//! - `**Heading**` on its own line (or after whitespace in a run-on string) → `<h4>`
//! - `- item` / `• item` → `<ul>`, `1. item` → `<ol>`
//! - `` `code` ``, `**bold**`, `*italic*` and bare `http(s)://` URLs inline
pub mod ast;
pub mod error;
pub mod escape;
pub mod inline;
pub mod logging;
pub mod options;
pub mod parser;
pub mod renderer;
pub mod segment;

pub use ast::Node;
pub use error::Error;
pub use escape::{Escaped, escape_html};
pub use options::{RenderOptions, Styles, Theme};

use parser::Parser;
use renderer::HtmlRenderer;

/// Format a description as HTML with bare tags.
///
/// Absent or empty input yields an empty string.
pub fn format_description<'a>(text: impl Into<Option<&'a str>>) -> String {
    format_description_with(text, &RenderOptions::default())
}

/// Format a description as HTML using the given render options.
pub fn format_description_with<'a>(
    text: impl Into<Option<&'a str>>,
    options: &RenderOptions,
) -> String {
    let text = text.into().unwrap_or_default();
    let parser = Parser::new();
    let ast = parser.parse(text);
    let renderer = HtmlRenderer::with_styles(options.effective_styles());
    renderer.render(&ast)
}
