//! Error types for struct resolution.

use crate::source::SourceError;
use thiserror::Error;

/// Result type for resolver operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every variant carries the qualified name of the type that failed, which
/// for nested failures is the nested type, not the root.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested type (or one reached through a field) is not a struct.
    #[error("{name} is not a composite type (kind: {kind})")]
    NotComposite { name: String, kind: &'static str },

    /// The documentation source could not produce text.
    #[error("documentation source failed for {name}")]
    SourceUnavailable {
        name: String,
        #[source]
        source: SourceError,
    },

    /// The documentation text could not be read to completion.
    #[error("documentation text for {name} could not be read")]
    UnreadableText {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// A type was reached again while it was still being resolved.
    #[error("cycle detected at {name}: {}", path.join(" -> "))]
    CycleDetected { name: String, path: Vec<String> },

    /// No type with this qualified name exists in the graph.
    #[error("unknown type: {0}")]
    UnknownType(String),
}

impl Error {
    /// Qualified name of the type the error is about.
    pub fn type_name(&self) -> &str {
        match self {
            Error::NotComposite { name, .. }
            | Error::SourceUnavailable { name, .. }
            | Error::UnreadableText { name, .. }
            | Error::CycleDetected { name, .. } => name,
            Error::UnknownType(name) => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_message_lists_path() {
        let err = Error::CycleDetected {
            name: "p.A".to_string(),
            path: vec!["p.A".to_string(), "p.B".to_string(), "p.A".to_string()],
        };
        assert_eq!(err.to_string(), "cycle detected at p.A: p.A -> p.B -> p.A");
        assert_eq!(err.type_name(), "p.A");
    }

    #[test]
    fn source_error_is_chained() {
        let err = Error::SourceUnavailable {
            name: "p.A".to_string(),
            source: SourceError::Missing("p.A".to_string()),
        };
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("no documentation for p.A"));
    }
}
