//! JSON renderer: structured output for code generators.
//!
//! Serializes the struct tree directly; nested structs appear under each
//! field's `struct` key.

use crate::render::Renderer;
use anyhow::{Context, Result};
use structdoc::Struct;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, doc: &Struct<'_>) -> Result<String> {
        let mut out = serde_json::to_string_pretty(doc)
            .with_context(|| format!("failed to serialize {}", doc.name))?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
