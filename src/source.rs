//! Documentation sources: where raw type documentation text comes from.
//!
//! - [`GoDoc`] runs `go doc <qualified name>` and returns its stdout
//! - [`DirSource`] reads canned text from `<root>/<qualified name>.txt`
//! - [`StaticSource`] serves text from memory
//! - any `Fn(&str) -> Result<Vec<u8>, SourceError>` closure

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;

/// Failure to obtain documentation text for a type.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to run {program}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("no documentation for {0}")]
    Missing(String),

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Other(String),
}

/// Something that can produce the raw documentation text of a type given its
/// fully qualified name.
pub trait DocSource {
    fn fetch(&self, qualified_name: &str) -> Result<Vec<u8>, SourceError>;
}

impl<F> DocSource for F
where
    F: Fn(&str) -> Result<Vec<u8>, SourceError>,
{
    fn fetch(&self, qualified_name: &str) -> Result<Vec<u8>, SourceError> {
        self(qualified_name)
    }
}

/// Runs the Go toolchain's `doc` subcommand.
#[derive(Debug, Clone)]
pub struct GoDoc {
    program: PathBuf,
    dir: Option<PathBuf>,
    unexported: bool,
}

impl Default for GoDoc {
    fn default() -> Self {
        Self {
            program: PathBuf::from("go"),
            dir: None,
            unexported: false,
        }
    }
}

impl GoDoc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path to the `go` binary.
    pub fn program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Working directory; `go doc` resolves packages relative to the module
    /// it runs in.
    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Pass `-u` so unexported fields are listed too.
    pub fn unexported(mut self, unexported: bool) -> Self {
        self.unexported = unexported;
        self
    }

    fn command(&self, qualified_name: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("doc");
        if self.unexported {
            cmd.arg("-u");
        }
        cmd.arg(qualified_name);
        if let Some(dir) = &self.dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl DocSource for GoDoc {
    fn fetch(&self, qualified_name: &str) -> Result<Vec<u8>, SourceError> {
        let program = self.program.display().to_string();
        tracing::debug!(%program, name = qualified_name, "running go doc");

        let output = self
            .command(qualified_name)
            .output()
            .map_err(|source| SourceError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = match String::from_utf8(output.stderr) {
                Ok(s) => s,
                Err(e) => {
                    tracing::warn!(name = qualified_name, "go doc wrote non-UTF-8 stderr");
                    String::from_utf8_lossy(e.as_bytes()).into_owned()
                }
            };
            return Err(SourceError::Failed {
                program,
                status: output.status,
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

/// Reads pre-captured `go doc` output from `<root>/<qualified name>.txt`.
///
/// Package paths contain `/`, so `example.com/shop.User` lives at
/// `<root>/example.com/shop.User.txt`.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, qualified_name: &str) -> PathBuf {
        self.root.join(format!("{}.txt", qualified_name))
    }
}

impl DocSource for DirSource {
    fn fetch(&self, qualified_name: &str) -> Result<Vec<u8>, SourceError> {
        let path = self.path_for(qualified_name);
        tracing::debug!(path = %path.display(), "reading canned documentation");
        match std::fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(SourceError::Missing(qualified_name.to_string()))
            }
            Err(source) => Err(SourceError::Io { path, source }),
        }
    }
}

/// In-memory documentation keyed by qualified name.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    docs: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, qualified_name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(qualified_name, text);
        self
    }

    pub fn insert(&mut self, qualified_name: impl Into<String>, text: impl Into<String>) {
        self.docs.insert(qualified_name.into(), text.into());
    }
}

impl DocSource for StaticSource {
    fn fetch(&self, qualified_name: &str) -> Result<Vec<u8>, SourceError> {
        self.docs
            .get(qualified_name)
            .map(|text| text.clone().into_bytes())
            .ok_or_else(|| SourceError::Missing(qualified_name.to_string()))
    }
}
