//! Core types: the fragment registry, the definitions envelope, and emit options.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::LoadError;

/// Key under which the registry is wrapped in the envelope.
pub const DEFINITIONS_KEY: &str = "definitions";

/// Pointer prefix that names a registry entry.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Named schema fragments, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    fragments: Map<String, Value>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from an explicit list of `(name, fragment)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::DuplicateKey` if a name appears twice.
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut registry = Self::new();
        for (key, fragment) in pairs {
            registry.insert(key, fragment)?;
        }
        Ok(registry)
    }

    /// Add a fragment. Keys are unique; a repeated key is rejected
    /// rather than overwriting the earlier fragment.
    pub fn insert(&mut self, key: impl Into<String>, fragment: Value) -> Result<(), LoadError> {
        let key = key.into();
        if self.fragments.contains_key(&key) {
            return Err(LoadError::DuplicateKey { key });
        }
        self.fragments.insert(key, fragment);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fragments.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fragments.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fragments.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fragments.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// The registry wrapped as `{ "definitions": { ... } }`, optionally with
/// root-level schema keywords next to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Envelope {
    registry: Registry,
    root: Map<String, Value>,
}

impl Envelope {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            root: Map::new(),
        }
    }

    /// Attach root-level keywords (e.g. `properties` or `$ref`).
    ///
    /// A `definitions` entry in `root` is ignored; the registry always wins.
    pub fn with_root(mut self, mut root: Map<String, Value>) -> Self {
        root.remove(DEFINITIONS_KEY);
        self.root = root;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Root-level keywords, excluding `definitions`.
    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn has_root(&self) -> bool {
        !self.root.is_empty()
    }

    /// The JSON document handed to schema tooling.
    pub fn to_value(&self) -> Value {
        let mut doc = self.root.clone();
        doc.insert(
            DEFINITIONS_KEY.to_string(),
            Value::Object(self.registry.fragments.clone()),
        );
        Value::Object(doc)
    }
}

/// How string literals and quoted property names are written.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    #[default]
    Single,
    Double,
}

impl QuoteStyle {
    pub fn quote_char(&self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }
}

/// Options for declaration emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmitOptions {
    /// Emit definitions that are not reachable from any root. Without a
    /// root schema the roots are the definitions nothing else refers to.
    /// Sibling matcher/action types are not reachable from one another,
    /// so this defaults to true.
    pub retain_unreachable: bool,
    pub quote_style: QuoteStyle,
    /// End the last member of multi-line lists with a separator.
    pub trailing_separator: bool,
    /// Prefix the output with a "generated file" comment.
    pub banner: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            retain_unreachable: true,
            quote_style: QuoteStyle::Single,
            trailing_separator: true,
            banner: true,
        }
    }
}

impl EmitOptions {
    pub fn retain_unreachable(mut self, retain: bool) -> Self {
        self.retain_unreachable = retain;
        self
    }

    pub fn quote_style(mut self, style: QuoteStyle) -> Self {
        self.quote_style = style;
        self
    }

    pub fn trailing_separator(mut self, trailing: bool) -> Self {
        self.trailing_separator = trailing;
        self
    }

    pub fn banner(mut self, banner: bool) -> Self {
        self.banner = banner;
        self
    }
}
