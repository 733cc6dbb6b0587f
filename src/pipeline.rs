//! Load → resolve → emit → write, one stage after another.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::emitter::{Emitted, TypeEmitter, TypeScriptEmitter};
use crate::error::PipelineError;
use crate::loader::load_registry;
use crate::resolver::{DefinitionsResolver, ReferenceResolver};
use crate::types::{EmitOptions, Envelope, Registry};

/// Default declaration namespace.
pub const DEFAULT_NAMESPACE: &str = "MockServer";

/// Outcome of a successful [`Pipeline::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Fragments loaded from the source directory.
    pub definitions: usize,
    /// Declaration names written, in output order.
    pub declarations: Vec<String>,
    pub output: PathBuf,
}

/// The schema compilation pipeline.
///
/// The resolver and emitter are swappable so each stage can be exercised
/// on its own.
#[derive(Debug, Clone)]
pub struct Pipeline<R = DefinitionsResolver, E = TypeScriptEmitter> {
    resolver: R,
    emitter: E,
    namespace: String,
}

impl Pipeline {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            resolver: DefinitionsResolver::new(),
            emitter: TypeScriptEmitter::default(),
            namespace: namespace.into(),
        }
    }

    pub fn with_emit_options(mut self, options: EmitOptions) -> Self {
        self.emitter = TypeScriptEmitter::new(options);
        self
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl<R: ReferenceResolver, E: TypeEmitter> Pipeline<R, E> {
    pub fn with_parts(resolver: R, emitter: E, namespace: impl Into<String>) -> Self {
        Self {
            resolver,
            emitter,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Resolve and emit a registry. Emission starts only after resolution
    /// has succeeded.
    pub async fn compile(&self, registry: Registry) -> Result<Emitted, PipelineError> {
        let envelope = Envelope::new(registry);
        let resolved = self.resolver.resolve(&envelope).await?;
        let emitted = self.emitter.emit(&resolved, &self.namespace).await?;
        Ok(emitted)
    }

    /// Compile every fragment in `src_dir` and write the declarations to
    /// `dest`, replacing any previous contents.
    ///
    /// Nothing is written unless every stage succeeds.
    pub async fn run(&self, src_dir: &Path, dest: &Path) -> Result<RunSummary, PipelineError> {
        info!(source = %src_dir.display(), "Loading schema fragments");
        let registry = load_registry(src_dir)?;
        let definitions = registry.len();
        info!(definitions, "Loaded schema fragments");

        let emitted = self.compile(registry).await?;
        write_output(dest, &emitted.source)?;
        info!(output = %dest.display(), "Wrote declarations");

        Ok(RunSummary {
            definitions,
            declarations: emitted.declarations,
            output: dest.to_path_buf(),
        })
    }
}

/// Replace `dest` with `contents` via a temporary file in the same directory.
fn write_output(dest: &Path, contents: &str) -> Result<(), PipelineError> {
    let write_err = |source: std::io::Error| PipelineError::Write {
        path: dest.to_path_buf(),
        source,
    };

    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(contents.as_bytes()).map_err(write_err)?;
    file.persist(dest).map_err(|e| write_err(e.error))?;
    Ok(())
}
