//! Type graph: the structural description of Go types.
//!
//! Types live in a [`TypeGraph`] and are referred to by copyable [`TypeId`]
//! handles, so self-referential and mutually recursive types are plain data.
//! The graph is filled either with the builder methods or from JSON type
//! manifests (see [`manifest`]).

pub mod expr;
pub mod manifest;

use serde::Serialize;
use std::collections::HashMap;

/// Handle to a type in a [`TypeGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(usize);

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// Shape of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    Struct(Vec<FieldDesc>),
    Pointer(TypeId),
    Slice(TypeId),
    Array { len: usize, elem: TypeId },
    Map { key: TypeId, value: TypeId },
    Chan { dir: ChanDir, elem: TypeId },
    Basic,
    Func,
    Interface,
    /// Declared but with no known shape, e.g. a type from a package no
    /// manifest describes.
    Opaque,
}

impl Kind {
    /// Strip one layer of indirection: the pointee, element or map value.
    pub fn elem(&self) -> Option<TypeId> {
        match self {
            Kind::Pointer(elem)
            | Kind::Slice(elem)
            | Kind::Array { elem, .. }
            | Kind::Chan { elem, .. } => Some(*elem),
            Kind::Map { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn fields(&self) -> Option<&[FieldDesc]> {
        match self {
            Kind::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn is_struct(&self) -> bool {
        matches!(self, Kind::Struct(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Kind::Struct(_) => "struct",
            Kind::Pointer(_) => "pointer",
            Kind::Slice(_) => "slice",
            Kind::Array { .. } => "array",
            Kind::Map { .. } => "map",
            Kind::Chan { .. } => "chan",
            Kind::Basic => "basic",
            Kind::Func => "func",
            Kind::Interface => "interface",
            Kind::Opaque => "opaque",
        }
    }
}

/// One field of a struct type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDesc {
    pub name: String,
    /// Declared type as a Go expression, e.g. `[]shop.Address`.
    #[serde(rename = "type")]
    pub type_name: String,
    pub embedded: bool,
    #[serde(skip)]
    pub ty: TypeId,
}

/// A type: named types have a package path and a local name, unnamed
/// composite types (`[]T`, `*T`) have neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDesc {
    pub package: String,
    pub name: String,
    pub kind: Kind,
}

impl TypeDesc {
    /// Package path and local name joined by `.`; predeclared types such as
    /// `int` have no package and are just their name.
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    types: Vec<TypeDesc>,
    named: HashMap<String, TypeId>,
}

impl TypeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of types in the graph.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Look up a type.
    ///
    /// Panics if `id` was issued by a different graph.
    pub fn get(&self, id: TypeId) -> &TypeDesc {
        &self.types[id.0]
    }

    pub fn kind(&self, id: TypeId) -> &Kind {
        &self.get(id).kind
    }

    pub fn qualified_name(&self, id: TypeId) -> String {
        self.get(id).qualified_name()
    }

    /// Find a named type by qualified name.
    pub fn lookup(&self, qualified_name: &str) -> Option<TypeId> {
        self.named.get(qualified_name).copied()
    }

    /// Declare a named type with an [`Kind::Opaque`] shape, or return the
    /// existing handle. Declaring first lets types refer to each other before
    /// they are [defined](Self::define).
    pub fn declare(&mut self, package: &str, name: &str) -> TypeId {
        let desc = TypeDesc {
            package: package.to_string(),
            name: name.to_string(),
            kind: Kind::Opaque,
        };
        let qualified = desc.qualified_name();
        if let Some(id) = self.named.get(&qualified) {
            return *id;
        }
        let id = self.push(desc);
        self.named.insert(qualified, id);
        id
    }

    /// Set the shape of a declared type.
    pub fn define(&mut self, id: TypeId, kind: Kind) {
        self.types[id.0].kind = kind;
    }

    /// Declare and define a named type in one step.
    pub fn insert(&mut self, package: &str, name: &str, kind: Kind) -> TypeId {
        let id = self.declare(package, name);
        self.define(id, kind);
        id
    }

    /// A predeclared type such as `int` or `string`.
    pub fn basic(&mut self, name: &str) -> TypeId {
        if let Some(id) = self.lookup(name) {
            return id;
        }
        self.insert("", name, Kind::Basic)
    }

    /// An unnamed type with the given shape.
    pub fn unnamed(&mut self, kind: Kind) -> TypeId {
        self.push(TypeDesc {
            package: String::new(),
            name: String::new(),
            kind,
        })
    }

    pub fn pointer(&mut self, elem: TypeId) -> TypeId {
        self.unnamed(Kind::Pointer(elem))
    }

    pub fn slice(&mut self, elem: TypeId) -> TypeId {
        self.unnamed(Kind::Slice(elem))
    }

    pub fn array(&mut self, len: usize, elem: TypeId) -> TypeId {
        self.unnamed(Kind::Array { len, elem })
    }

    pub fn map(&mut self, key: TypeId, value: TypeId) -> TypeId {
        self.unnamed(Kind::Map { key, value })
    }

    pub fn chan(&mut self, dir: ChanDir, elem: TypeId) -> TypeId {
        self.unnamed(Kind::Chan { dir, elem })
    }

    /// A named field of type `ty`.
    pub fn field(&self, name: &str, ty: TypeId) -> FieldDesc {
        FieldDesc {
            name: name.to_string(),
            type_name: self.display(ty),
            embedded: false,
            ty,
        }
    }

    /// An embedded field of type `ty` (`T` or `*T`). Its name is the local
    /// name of the embedded type.
    pub fn embed(&self, ty: TypeId) -> FieldDesc {
        let target = match self.kind(ty) {
            Kind::Pointer(elem) => *elem,
            _ => ty,
        };
        FieldDesc {
            name: self.get(target).name.clone(),
            type_name: self.display(ty),
            embedded: true,
            ty,
        }
    }

    /// Render a type as a Go expression. Named types are qualified by the
    /// last segment of their package path, as `reflect.Type.String` does.
    pub fn display(&self, id: TypeId) -> String {
        let desc = self.get(id);
        if desc.is_named() {
            return match desc.package.rsplit('/').next() {
                Some(pkg) if !pkg.is_empty() => format!("{}.{}", pkg, desc.name),
                _ => desc.name.clone(),
            };
        }
        match &desc.kind {
            Kind::Pointer(elem) => format!("*{}", self.display(*elem)),
            Kind::Slice(elem) => format!("[]{}", self.display(*elem)),
            Kind::Array { len, elem } => format!("[{}]{}", len, self.display(*elem)),
            Kind::Map { key, value } => {
                format!("map[{}]{}", self.display(*key), self.display(*value))
            }
            Kind::Chan { dir, elem } => {
                let prefix = match dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Recv => "<-chan ",
                };
                format!("{}{}", prefix, self.display(*elem))
            }
            Kind::Func => "func()".to_string(),
            Kind::Interface => "interface {}".to_string(),
            Kind::Struct(_) => "struct {...}".to_string(),
            Kind::Basic | Kind::Opaque => "?".to_string(),
        }
    }

    fn push(&mut self, desc: TypeDesc) -> TypeId {
        let id = TypeId(self.types.len());
        self.types.push(desc);
        id
    }
}
