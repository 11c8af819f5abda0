//! Indented plain-text tree, for reading in a terminal.

use crate::render::Renderer;
use anyhow::Result;
use structdoc::Struct;

pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, doc: &Struct<'_>) -> Result<String> {
        let mut out = String::new();
        write_struct(&mut out, doc, 0);
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "txt"
    }
}

fn write_struct(out: &mut String, doc: &Struct<'_>, depth: usize) {
    let indent = "  ".repeat(depth);

    out.push_str(&indent);
    out.push_str(&doc.name);
    if !doc.comment.is_empty() {
        out.push_str(": ");
        out.push_str(&doc.comment);
    }
    out.push('\n');

    if !doc.description.is_empty() {
        out.push_str(&format!("{}  {}\n", indent, doc.description));
    }

    for field in &doc.fields {
        out.push_str(&format!("{}  {} {}", indent, field.name(), field.desc.type_name));
        if field.is_embedded() {
            out.push_str(" (embedded)");
        }
        if !field.comment.is_empty() {
            out.push_str(" // ");
            out.push_str(&field.comment);
        }
        out.push('\n');

        if let Some(nested) = &field.strukt {
            write_struct(out, nested, depth + 2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use structdoc::{Kind, Resolver, StaticSource, TypeGraph};

    #[test]
    fn nested_tree() {
        let mut g = TypeGraph::new();
        let string = g.basic("string");
        let int = g.basic("int");
        let basic = g.insert("p", "Basic", Kind::Struct(vec![g.field("Name", string)]));
        let user = g.insert(
            "p",
            "User",
            Kind::Struct(vec![g.embed(basic), g.field("Age", int)]),
        );
        let docs = StaticSource::new()
            .with("p.Basic", "type Basic struct {\n\tName string // name\n}\n")
            .with("p.User", "type User struct {\n\tBasic\n\tAge int // years\n}\n    User Customer A shop customer.\n");

        let tree = Resolver::new(&g, docs).resolve(user).unwrap();
        let out = TextRenderer.render(&tree).unwrap();
        assert_eq!(
            out,
            "\
p.User: Customer
  A shop customer.
  Basic p.Basic (embedded)
    p.Basic
      Name string // name
  Age int // years
"
        );
    }
}
