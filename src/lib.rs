//! structdoc: resolve the documentation of Go struct types into a tree.
//!
//! Given a struct type, structdoc asks a documentation source (normally
//! `go doc`) for the type's text, parses out the summary comment, the
//! description and each field's inline comment, and recurses into every
//! struct reachable through the fields, embedded ones included.
//!
//! ```no_run
//! use structdoc::{GoDoc, Manifest, Resolver, TypeGraph};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = Manifest::from_json(&std::fs::read_to_string("shop.json")?)?;
//! let graph = TypeGraph::from_manifests(&[manifest])?;
//! let resolver = Resolver::new(&graph, GoDoc::new().dir("/src/shop"));
//! let user = resolver.resolve_name("example.com/shop.User")?;
//! println!("{}: {}", user.name, user.comment);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod model;
pub mod parser;
pub mod resolve;
pub mod source;
pub mod types;

pub use error::{Error, Result};
pub use model::{Field, Struct};
pub use parser::ParsedDoc;
pub use resolve::Resolver;
pub use source::{DirSource, DocSource, GoDoc, SourceError, StaticSource};
pub use types::manifest::{Manifest, ManifestError};
pub use types::{FieldDesc, Kind, TypeDesc, TypeGraph, TypeId};
