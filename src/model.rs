//! Resolved documentation tree.

use crate::types::{FieldDesc, TypeId};
use serde::Serialize;

/// Documentation of one struct type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Struct<'g> {
    /// Fully qualified name, e.g. `example.com/shop.User`.
    pub name: String,
    /// Short summary taken from the documentation text; may be empty.
    pub comment: String,
    /// Longer text following the summary; may be empty.
    pub description: String,
    /// Handle of the documented type in the graph it was resolved from.
    #[serde(skip)]
    pub type_ref: TypeId,
    /// One entry per declared field, in declaration order.
    pub fields: Vec<Field<'g>>,
}

/// Documentation of one struct field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field<'g> {
    /// Structural description, borrowed from the type graph.
    #[serde(flatten)]
    pub desc: &'g FieldDesc,
    pub comment: String,
    /// Documentation of the field's struct type, when it has one.
    #[serde(rename = "struct", skip_serializing_if = "Option::is_none")]
    pub strukt: Option<Struct<'g>>,
}

impl<'g> Struct<'g> {
    /// Local type name, without the package path.
    pub fn short_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn field(&self, name: &str) -> Option<&Field<'g>> {
        self.fields.iter().find(|f| f.desc.name == name)
    }

    /// Visit this struct and every nested struct, depth first, parents
    /// before children.
    pub fn walk<'s>(&'s self, visit: &mut impl FnMut(&'s Struct<'g>)) {
        visit(self);
        for field in &self.fields {
            if let Some(nested) = &field.strukt {
                nested.walk(visit);
            }
        }
    }
}

impl Field<'_> {
    pub fn name(&self) -> &str {
        &self.desc.name
    }

    pub fn is_embedded(&self) -> bool {
        self.desc.embedded
    }
}
