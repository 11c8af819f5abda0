//! Renderer module: trait-based format dispatch.

pub mod json;
pub mod markdown;
pub mod text;

use anyhow::{anyhow, Result};
use structdoc::Struct;

/// Trait for rendering a resolved struct tree into a specific output format.
pub trait Renderer {
    fn render(&self, doc: &Struct<'_>) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "json" => Ok(Box::new(json::JsonRenderer)),
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "text" | "tree" => Ok(Box::new(text::TextRenderer)),
        _ => Err(anyhow!(
            "unknown format: {}. Use json, markdown, or text",
            format
        )),
    }
}
