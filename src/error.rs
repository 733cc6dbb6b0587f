//! Error types for each stage of the schema compilation pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading schema fragments into a registry.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("source directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON in {path}: {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} is not a schema: expected object or boolean, got {actual}")]
    NotASchema { path: PathBuf, actual: String },

    #[error("cannot derive a definition key from {path}")]
    InvalidKey { path: PathBuf },

    // Registry construction errors (exit code 2)
    #[error("duplicate definition key '{key}'")]
    DuplicateKey { key: String },

    #[error("duplicate definition key '{key}': {second} collides with {first}")]
    DuplicateFile {
        key: String,
        first: PathBuf,
        second: PathBuf,
    },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::DirectoryNotFound { .. }
            | LoadError::FileNotFound { .. }
            | LoadError::ReadError { .. } => 3,
            _ => 2,
        }
    }
}

/// A `$ref` that does not point at anything inside the envelope.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DanglingReference {
    /// JSON Pointer (RFC 6901) to the object holding the `$ref`.
    pub path: String,
    /// The `$ref` value as written.
    pub reference: String,
    /// Why it could not be followed.
    pub reason: String,
}

impl std::fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.path, self.reference, self.reason)
    }
}

/// Errors during reference resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{} unresolved reference(s): {}", dangling.len(), render_dangling(dangling))]
    UnresolvedReferences { dangling: Vec<DanglingReference> },

    #[error("circular pointer while inlining {reference}")]
    CircularPointer { reference: String },

    #[error("schema rejected: {message}")]
    Rejected { message: String },

    #[error("invalid schema at {path}: {message}")]
    InvalidSchema { path: String, message: String },

    #[error("unknown type \"{name}\" at {path}")]
    UnknownType { path: String, name: String },
}

fn render_dangling(dangling: &[DanglingReference]) -> String {
    dangling
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ResolveError {
    pub fn exit_code(&self) -> i32 {
        2
    }
}

/// Errors while turning a resolved schema into declarations.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("namespace \"{name}\" does not produce a valid identifier")]
    InvalidNamespace { name: String },

    #[error("definition key \"{key}\" does not produce a valid identifier")]
    InvalidIdentifier { key: String },

    #[error("definitions \"{first}\" and \"{second}\" both map to identifier {identifier}")]
    NameCollision {
        identifier: String,
        first: String,
        second: String,
    },

    #[error("reference to unknown definition \"{key}\"")]
    UnknownReference { key: String },

    /// Type aliases that expand to each other with no object, array or
    /// tuple in between.
    #[error("type aliases form a cycle: {}", .cycle.join(" -> "))]
    CircularAlias { cycle: Vec<String> },
}

impl EmitError {
    pub fn exit_code(&self) -> i32 {
        2
    }
}

/// Any failure of a full pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::Load(e) => e.exit_code(),
            PipelineError::Resolve(e) => e.exit_code(),
            PipelineError::Emit(e) => e.exit_code(),
            PipelineError::Write { .. } => 3,
        }
    }
}
