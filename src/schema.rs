//! Resolved schema graph.
//!
//! Definitions point at each other through [`SchemaNode::Ref`] edges keyed by
//! definition name, so mutually recursive fragments stay finite.

use std::collections::{BTreeSet, VecDeque};

use serde_json::Value;

/// Shape of one schema after resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// No constraint.
    Any,
    /// Matches nothing (`false`).
    Never,
    Null,
    Boolean,
    String,
    Number,
    Integer,
    /// A single allowed value (`const`, or one `enum` member).
    Literal(Value),
    Array(Box<SchemaNode>),
    Tuple {
        items: Vec<SchemaNode>,
        /// Leading positions every instance must have (`minItems`).
        min_items: usize,
        /// Schema for elements past the tuple; `None` closes the tuple.
        rest: Option<Box<SchemaNode>>,
    },
    Object(ObjectShape),
    Union(Vec<SchemaNode>),
    Intersection(Vec<SchemaNode>),
    /// Edge to another definition in the same [`ResolvedSchema`].
    Ref(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectShape {
    pub properties: Vec<Property>,
    /// Schema for undeclared keys; `None` closes the object.
    pub additional: Option<Box<SchemaNode>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub schema: SchemaNode,
    pub required: bool,
    pub description: Option<String>,
}

/// One registry entry after resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub key: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub schema: SchemaNode,
}

/// Output of reference resolution: every definition, in registry order,
/// plus the envelope's own root schema if it had one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedSchema {
    pub definitions: Vec<Definition>,
    pub root: Option<SchemaNode>,
}

impl SchemaNode {
    /// Names of definitions this node refers to directly.
    pub fn refs(&self) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        self.collect_refs(&mut out);
        out
    }

    fn collect_refs<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match self {
            SchemaNode::Ref(key) => {
                out.insert(key.as_str());
            }
            SchemaNode::Array(item) => item.collect_refs(out),
            SchemaNode::Tuple { items, rest, .. } => {
                for item in items {
                    item.collect_refs(out);
                }
                if let Some(rest) = rest {
                    rest.collect_refs(out);
                }
            }
            SchemaNode::Object(shape) => {
                for prop in &shape.properties {
                    prop.schema.collect_refs(out);
                }
                if let Some(additional) = &shape.additional {
                    additional.collect_refs(out);
                }
            }
            SchemaNode::Union(parts) | SchemaNode::Intersection(parts) => {
                for part in parts {
                    part.collect_refs(out);
                }
            }
            _ => {}
        }
    }
}

impl ResolvedSchema {
    pub fn get(&self, key: &str) -> Option<&Definition> {
        self.definitions.iter().find(|d| d.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|d| d.key.as_str())
    }

    /// Definitions that `key` refers to directly.
    pub fn references_of(&self, key: &str) -> BTreeSet<&str> {
        self.get(key)
            .map(|d| d.schema.refs())
            .unwrap_or_default()
    }

    /// Definitions that no other definition refers to, in registry order.
    /// A self-reference does not count.
    pub fn sources(&self) -> Vec<&str> {
        let referenced: BTreeSet<&str> = self
            .definitions
            .iter()
            .flat_map(|d| {
                d.schema
                    .refs()
                    .into_iter()
                    .filter(move |key| *key != d.key.as_str())
            })
            .collect();
        self.keys().filter(|key| !referenced.contains(key)).collect()
    }

    /// Definitions transitively referenced from the roots.
    ///
    /// With a root schema, that schema is the only root. Without one, every
    /// [source](Self::sources) is a root and counts as reachable itself, so
    /// only definitions hanging off an unreferenced cycle are left out.
    pub fn reachable(&self) -> BTreeSet<&str> {
        let mut seen = BTreeSet::new();
        let mut queue: VecDeque<&str> = match &self.root {
            Some(root) => root.refs().into_iter().collect(),
            None => self.sources().into_iter().collect(),
        };

        while let Some(key) = queue.pop_front() {
            if !seen.insert(key) {
                continue;
            }
            if let Some(def) = self.get(key) {
                queue.extend(def.schema.refs());
            }
        }
        seen
    }

    /// `Ref` targets that name no definition. Empty for resolver output.
    pub fn unresolved(&self) -> BTreeSet<&str> {
        let known: BTreeSet<&str> = self.keys().collect();
        self.definitions
            .iter()
            .map(|d| &d.schema)
            .chain(self.root.iter())
            .flat_map(|node| node.refs())
            .filter(|key| !known.contains(key))
            .collect()
    }
}
