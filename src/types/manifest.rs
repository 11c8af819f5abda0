//! JSON type manifests.
//!
//! A manifest describes the struct types of one Go package:
//!
//! ```json
//! {
//!   "package": "example.com/shop",
//!   "types": [
//!     { "name": "User", "fields": [
//!         { "type": "*Model" },
//!         { "name": "Age", "type": "int" },
//!         { "name": "AddressList", "type": "[]Address" }
//!     ] },
//!     { "name": "Celsius", "underlying": "float64" }
//!   ]
//! }
//! ```
//!
//! A field without a name is embedded. Unqualified names refer to the
//! manifest's own package or to predeclared types; qualified names
//! (`example.com/geo.Point`) refer to any loaded package, and names from
//! packages no manifest describes become opaque leaves.

use super::expr::{self, ExprError, TypeExpr};
use super::{FieldDesc, Kind, TypeGraph, TypeId};
use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

const PREDECLARED: &[&str] = &[
    "bool", "string", "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16",
    "uint32", "uint64", "uintptr", "byte", "rune", "float32", "float64", "complex64",
    "complex128",
];

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub package: String,
    #[serde(default)]
    pub types: Vec<TypeDef>,
}

/// A named type: either a struct (`fields`) or a type defined over another
/// type (`underlying`).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDef {
    pub name: String,
    #[serde(default)]
    pub fields: Option<Vec<FieldDef>>,
    #[serde(default)]
    pub underlying: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub embedded: bool,
}

impl FieldDef {
    fn is_embedded(&self) -> bool {
        self.embedded || self.name.is_none()
    }
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid manifest JSON")]
    Json(#[from] serde_json::Error),

    #[error("{0}: duplicate type")]
    Duplicate(String),

    #[error("{0}: needs exactly one of `fields` or `underlying`")]
    Shape(String),

    #[error("{owner}: bad type for `{field}`")]
    Expr {
        owner: String,
        field: String,
        #[source]
        source: ExprError,
    },

    #[error("{owner}: unknown type `{name}`")]
    UnknownType { owner: String, name: String },

    #[error("{owner}: embedded field must be a named type, got `{ty}`")]
    Embed { owner: String, ty: String },

    #[error("{0}: underlying types form a cycle")]
    UnderlyingCycle(String),
}

impl Manifest {
    pub fn from_json(text: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(text)?)
    }
}

impl TypeGraph {
    /// Build a graph from a set of manifests.
    pub fn from_manifests(manifests: &[Manifest]) -> Result<Self, ManifestError> {
        let mut graph = TypeGraph::new();
        graph.load(manifests)?;
        Ok(graph)
    }

    /// Add the types of several manifests. Types may refer to each other
    /// across manifests regardless of order.
    pub fn load(&mut self, manifests: &[Manifest]) -> Result<(), ManifestError> {
        let mut seen = HashSet::new();
        let mut declared = Vec::new();
        for manifest in manifests {
            for def in &manifest.types {
                let qualified = format!("{}.{}", manifest.package, def.name);
                if !seen.insert(qualified.clone()) {
                    return Err(ManifestError::Duplicate(qualified));
                }
                let id = self.declare(&manifest.package, &def.name);
                declared.push((id, qualified, manifest.package.as_str(), def));
            }
        }

        let mut pending: Vec<(TypeId, TypeId, String)> = Vec::new();
        for (id, qualified, package, def) in declared {
            match (&def.fields, &def.underlying) {
                (Some(fields), None) => {
                    let mut descs = Vec::with_capacity(fields.len());
                    for field in fields {
                        descs.push(self.lower_field(&qualified, package, field)?);
                    }
                    self.define(id, Kind::Struct(descs));
                }
                (None, Some(underlying)) => {
                    let parsed = expr::parse(underlying).map_err(|source| ManifestError::Expr {
                        owner: qualified.clone(),
                        field: "underlying".to_string(),
                        source,
                    })?;
                    let target = self.lower(&qualified, package, &parsed)?;
                    pending.push((id, target, qualified));
                }
                _ => return Err(ManifestError::Shape(qualified)),
            }
        }

        // A defined type takes the shape of its underlying type, which may
        // itself still be waiting on another definition.
        while !pending.is_empty() {
            let before = pending.len();
            let waiting: HashSet<TypeId> = pending.iter().map(|(id, _, _)| *id).collect();
            pending.retain(|(id, target, _)| {
                if waiting.contains(target) {
                    return true;
                }
                let kind = self.kind(*target).clone();
                self.define(*id, kind);
                false
            });
            if pending.len() == before {
                return Err(ManifestError::UnderlyingCycle(pending.swap_remove(0).2));
            }
        }

        Ok(())
    }

    fn lower_field(
        &mut self,
        owner: &str,
        package: &str,
        field: &FieldDef,
    ) -> Result<FieldDesc, ManifestError> {
        let parsed = expr::parse(&field.ty).map_err(|source| ManifestError::Expr {
            owner: owner.to_string(),
            field: field.name.clone().unwrap_or_else(|| field.ty.clone()),
            source,
        })?;
        let ty = self.lower(owner, package, &parsed)?;

        if !field.is_embedded() {
            let name = field.name.as_deref().unwrap_or_default();
            return Ok(self.field(name, ty));
        }

        if parsed.embedded_name().is_none() {
            return Err(ManifestError::Embed {
                owner: owner.to_string(),
                ty: field.ty.clone(),
            });
        }
        let mut desc = self.embed(ty);
        if let Some(name) = &field.name {
            desc.name = name.clone();
        }
        Ok(desc)
    }

    fn lower(&mut self, owner: &str, package: &str, ty: &TypeExpr) -> Result<TypeId, ManifestError> {
        let id = match ty {
            TypeExpr::Named { package: None, name } => {
                if let Some(id) = self.lookup(&format!("{}.{}", package, name)) {
                    id
                } else if PREDECLARED.contains(&name.as_str()) {
                    self.basic(name)
                } else {
                    return Err(ManifestError::UnknownType {
                        owner: owner.to_string(),
                        name: name.clone(),
                    });
                }
            }
            TypeExpr::Named {
                package: Some(pkg),
                name,
            } => self.declare(pkg, name),
            TypeExpr::Pointer(inner) => {
                let elem = self.lower(owner, package, inner)?;
                self.pointer(elem)
            }
            TypeExpr::Slice(inner) => {
                let elem = self.lower(owner, package, inner)?;
                self.slice(elem)
            }
            TypeExpr::Array(len, inner) => {
                let elem = self.lower(owner, package, inner)?;
                self.array(*len, elem)
            }
            TypeExpr::Map(key, value) => {
                let key = self.lower(owner, package, key)?;
                let value = self.lower(owner, package, value)?;
                self.map(key, value)
            }
            TypeExpr::Chan(dir, inner) => {
                let elem = self.lower(owner, package, inner)?;
                self.chan(*dir, elem)
            }
            TypeExpr::Func => self.unnamed(Kind::Func),
            TypeExpr::Interface => self.unnamed(Kind::Interface),
        };
        Ok(id)
    }
}
