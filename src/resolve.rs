//! Struct resolution: merge a type's structure with its parsed documentation
//! and recurse into every struct reachable through its fields.

use crate::error::{Error, Result};
use crate::model::{Field, Struct};
use crate::parser::{self, ParsedDoc};
use crate::source::DocSource;
use crate::types::{Kind, TypeGraph, TypeId};
use std::collections::HashMap;
use std::rc::Rc;

/// Resolves documentation trees for types of one graph from one source.
pub struct Resolver<'g, S> {
    graph: &'g TypeGraph,
    source: S,
}

impl<'g, S: DocSource> Resolver<'g, S> {
    pub fn new(graph: &'g TypeGraph, source: S) -> Self {
        Self { graph, source }
    }

    /// Resolve the tree rooted at `ty`. A pointer is followed to its
    /// pointee. Any failure, including one on a nested type, aborts the
    /// whole call.
    pub fn resolve(&self, ty: TypeId) -> Result<Struct<'g>> {
        Walk::new(self).resolve(ty)
    }

    /// Resolve a type by its qualified name.
    pub fn resolve_name(&self, qualified_name: &str) -> Result<Struct<'g>> {
        let ty = self
            .graph
            .lookup(qualified_name)
            .ok_or_else(|| Error::UnknownType(qualified_name.to_string()))?;
        self.resolve(ty)
    }
}

/// State of one top-level resolution: the types on the active path and the
/// documentation already fetched, both keyed by handle. Unnamed structs all
/// display alike, so names cannot be keys.
struct Walk<'r, 'g, S> {
    resolver: &'r Resolver<'g, S>,
    path: Vec<(TypeId, String)>,
    docs: HashMap<TypeId, Rc<ParsedDoc>>,
}

impl<'r, 'g, S: DocSource> Walk<'r, 'g, S> {
    fn new(resolver: &'r Resolver<'g, S>) -> Self {
        Self {
            resolver,
            path: Vec::new(),
            docs: HashMap::new(),
        }
    }

    fn resolve(&mut self, ty: TypeId) -> Result<Struct<'g>> {
        let graph = self.resolver.graph;
        let ty = match graph.kind(ty) {
            Kind::Pointer(elem) => *elem,
            _ => ty,
        };
        let desc = graph.get(ty);
        let name = if desc.is_named() {
            desc.qualified_name()
        } else {
            graph.display(ty)
        };

        let Kind::Struct(fields) = &desc.kind else {
            return Err(Error::NotComposite {
                name,
                kind: desc.kind.name(),
            });
        };

        if self.path.iter().any(|(id, _)| *id == ty) {
            let mut path: Vec<String> = self.path.iter().map(|(_, n)| n.clone()).collect();
            path.push(name.clone());
            return Err(Error::CycleDetected { name, path });
        }

        let doc = self.doc(ty, &name)?;
        tracing::debug!(%name, fields = fields.len(), "resolving struct");

        self.path.push((ty, name.clone()));
        let mut resolved = Vec::with_capacity(fields.len());
        for field in fields {
            // Embedded fields are `T` or `*T`; other fields lose exactly one
            // layer of pointer, slice, array, map or chan.
            let effective = graph.kind(field.ty).elem().unwrap_or(field.ty);
            let nested = if graph.kind(effective).is_struct() {
                Some(self.resolve(effective)?)
            } else {
                None
            };
            let comment = if field.embedded {
                String::new()
            } else {
                doc.field_comment(&field.name).to_string()
            };
            resolved.push(Field {
                desc: field,
                comment,
                strukt: nested,
            });
        }
        self.path.pop();

        Ok(Struct {
            name,
            comment: doc.comment.clone(),
            description: doc.description.clone(),
            type_ref: ty,
            fields: resolved,
        })
    }

    /// Fetch and parse the documentation for `ty`, once per walk.
    fn doc(&mut self, ty: TypeId, name: &str) -> Result<Rc<ParsedDoc>> {
        if let Some(doc) = self.docs.get(&ty) {
            tracing::trace!(name, "documentation already fetched");
            return Ok(Rc::clone(doc));
        }

        let text = self
            .resolver
            .source
            .fetch(name)
            .map_err(|source| Error::SourceUnavailable {
                name: name.to_string(),
                source,
            })?;
        let doc = parser::parse(text.as_slice()).map_err(|source| Error::UnreadableText {
            name: name.to_string(),
            source,
        })?;
        tracing::trace!(name, documented = doc.fields.len(), "parsed documentation");

        let doc = Rc::new(doc);
        self.docs.insert(ty, Rc::clone(&doc));
        Ok(doc)
    }
}
