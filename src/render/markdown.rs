//! GitHub-flavored markdown renderer.
//!
//! One section per distinct struct in the tree, root first, each with a
//! field table linking to the sections of nested structs.

use crate::render::Renderer;
use crate::toc;
use anyhow::Result;
use std::collections::HashSet;
use structdoc::{Field, Struct};

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, doc: &Struct<'_>) -> Result<String> {
        let mut sections: Vec<&Struct<'_>> = Vec::new();
        let mut seen = HashSet::new();
        doc.walk(&mut |s| {
            if seen.insert(s.name.as_str()) {
                sections.push(s);
            }
        });

        let mut output = String::new();
        for (i, section) in sections.iter().enumerate() {
            let level = if i == 0 { "#" } else { "##" };
            output.push_str(&render_struct(section, level));
        }
        Ok(output)
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

fn render_struct(doc: &Struct<'_>, level: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("{} {}\n", level, doc.name));

    if !doc.comment.is_empty() {
        lines.push(format!("{}\n", doc.comment));
    }
    if !doc.description.is_empty() {
        lines.push(format!("{}\n", doc.description));
    }

    if doc.fields.is_empty() {
        lines.push("_No fields._\n".to_string());
    } else {
        lines.push("| Field | Type | Comment |".to_string());
        lines.push("|-------|------|---------|".to_string());
        for field in &doc.fields {
            lines.push(render_field(field));
        }
        lines.push(String::new());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_field(field: &Field<'_>) -> String {
    let mut notes: Vec<String> = Vec::new();
    if field.is_embedded() {
        notes.push("_embedded_".to_string());
    }
    if !field.comment.is_empty() {
        notes.push(escape_cell(&field.comment));
    }
    if let Some(nested) = &field.strukt {
        notes.push(format!("see {}", toc::render_link(&nested.name)));
    }

    format!(
        "| {} | `{}` | {} |",
        field.name(),
        field.desc.type_name,
        notes.join(", ")
    )
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
