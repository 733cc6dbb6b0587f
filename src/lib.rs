//! MockServer schema type generator
//!
//! Compiles a directory of JSON Schema fragments, one per file, into a single
//! TypeScript declaration file. The fragments describe the payloads accepted
//! by MockServer's REST control plane (request matchers, actions, times and
//! time-to-live specs), so the generated types track the server's shapes.
//!
//! The pipeline runs three stages strictly in order:
//!
//! 1. **Load** ([`load_registry`]): each file becomes a registry entry keyed by
//!    its name up to the first `.`; a top-level `oneOf` next to `type` is dropped.
//! 2. **Resolve** ([`ReferenceResolver`]): the registry is wrapped as
//!    `{ "definitions": ... }` and every `$ref` is checked and turned into a
//!    graph edge, so recursive fragments stay finite.
//! 3. **Emit** ([`TypeEmitter`]): one declaration per definition, written to
//!    the destination only after both previous stages succeed.
//!
//! # Example
//!
//! ```
//! use mockserver_typegen::{EmitOptions, Pipeline, Registry};
//! use serde_json::json;
//!
//! let registry = Registry::from_pairs([
//!     ("matcher", json!({
//!         "type": "object",
//!         "properties": { "path": { "type": "string" } }
//!     })),
//!     ("action", json!({ "$ref": "#/definitions/matcher" })),
//! ])
//! .unwrap();
//!
//! let pipeline = Pipeline::new("mockserver").with_emit_options(EmitOptions::default().banner(false));
//! let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! let emitted = runtime.block_on(pipeline.compile(registry)).unwrap();
//!
//! assert_eq!(emitted.declarations, ["Matcher", "Action"]);
//! assert!(emitted.source.contains("export type Action = Matcher;"));
//! ```

mod emitter;
mod error;
mod loader;
mod naming;
mod pipeline;
mod refs;
mod resolver;
mod schema;
mod types;

pub use emitter::{Emitted, TypeEmitter, TypeScriptEmitter};
pub use error::{DanglingReference, EmitError, LoadError, PipelineError, ResolveError};
pub use loader::{
    load_fragment, load_fragment_str, load_registry, registry_key, strip_conflicting_one_of,
};
pub use naming::{declaration_name, is_identifier, quote};
pub use pipeline::{Pipeline, RunSummary, DEFAULT_NAMESPACE};
pub use refs::{check_refs, collect_refs, navigate_pointer, RefSite};
pub use resolver::{DefinitionsResolver, ReferenceResolver};
pub use schema::{Definition, ObjectShape, Property, ResolvedSchema, SchemaNode};
pub use types::{json_type_name, EmitOptions, Envelope, QuoteStyle, Registry};
