//! Reference resolution: turns an envelope of raw fragments into a
//! [`ResolvedSchema`] whose references are checked graph edges.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{DanglingReference, ResolveError};
use crate::refs::{check_refs, definition_target, escape_segment, navigate_pointer};
use crate::schema::{Definition, ObjectShape, Property, ResolvedSchema, SchemaNode};
use crate::types::{json_type_name, Envelope};

/// Resolves `$ref` pointers in an envelope.
///
/// Implementations receive the envelope by shared reference and must not
/// observe or rely on later changes to it.
#[async_trait]
pub trait ReferenceResolver: Send + Sync {
    async fn resolve(&self, envelope: &Envelope) -> Result<ResolvedSchema, ResolveError>;
}

/// Resolver for self-contained `{ "definitions": ... }` documents.
///
/// `#/definitions/<key>` becomes a [`SchemaNode::Ref`] edge. Deeper pointers
/// (into a definition's properties, for instance) are inlined.
#[derive(Debug, Clone)]
pub struct DefinitionsResolver {
    validate: bool,
}

impl Default for DefinitionsResolver {
    fn default() -> Self {
        Self { validate: true }
    }
}

impl DefinitionsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile the envelope with `jsonschema` before translating it
    /// (default: true).
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }
}

#[async_trait]
impl ReferenceResolver for DefinitionsResolver {
    async fn resolve(&self, envelope: &Envelope) -> Result<ResolvedSchema, ResolveError> {
        let document = envelope.to_value();

        let dangling = check_refs(&document);
        if !dangling.is_empty() {
            return Err(ResolveError::UnresolvedReferences { dangling });
        }

        if self.validate {
            compile_check(&document)?;
        }

        let mut translator = Translator {
            document: &document,
            inlining: Vec::new(),
        };

        let mut definitions = Vec::with_capacity(envelope.registry().len());
        for (key, fragment) in envelope.registry().iter() {
            let path = format!("/definitions/{}", escape_segment(key));
            let schema = translator.translate(fragment, &path)?;
            debug!(key, refs = schema.refs().len(), "Resolved definition");
            definitions.push(Definition {
                key: key.to_string(),
                title: string_keyword(fragment, "title"),
                description: string_keyword(fragment, "description"),
                schema,
            });
        }

        let root = if envelope.has_root() {
            let root = Value::Object(envelope.root().clone());
            Some(translator.translate(&root, "")?)
        } else {
            None
        };

        info!(definitions = definitions.len(), "Resolved references");
        Ok(ResolvedSchema { definitions, root })
    }
}

/// Compile the document as a draft 7 schema so malformed keywords surface
/// before translation.
fn compile_check(document: &Value) -> Result<(), ResolveError> {
    jsonschema::options()
        .with_draft(jsonschema::Draft::Draft7)
        .build(document)
        .map(|_| ())
        .map_err(|e| ResolveError::Rejected {
            message: e.to_string(),
        })
}

fn string_keyword(schema: &Value, keyword: &str) -> Option<String> {
    schema.get(keyword).and_then(Value::as_str).map(str::to_string)
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

fn invalid(path: &str, message: impl Into<String>) -> ResolveError {
    ResolveError::InvalidSchema {
        path: display_path(path),
        message: message.into(),
    }
}

fn union(mut parts: Vec<SchemaNode>) -> SchemaNode {
    match parts.len() {
        0 => SchemaNode::Never,
        1 => parts.remove(0),
        _ => SchemaNode::Union(parts),
    }
}

fn intersection(mut parts: Vec<SchemaNode>) -> SchemaNode {
    match parts.len() {
        0 => SchemaNode::Any,
        1 => parts.remove(0),
        _ => SchemaNode::Intersection(parts),
    }
}

fn looks_like_object(map: &Map<String, Value>) -> bool {
    ["properties", "additionalProperties", "patternProperties", "required"]
        .iter()
        .any(|k| map.contains_key(*k))
}

fn looks_like_array(map: &Map<String, Value>) -> bool {
    ["items", "prefixItems", "additionalItems"]
        .iter()
        .any(|k| map.contains_key(*k))
}

/// Walks raw schema values and builds [`SchemaNode`]s.
struct Translator<'a> {
    document: &'a Value,
    /// Pointers currently being inlined, innermost last.
    inlining: Vec<String>,
}

impl<'a> Translator<'a> {
    fn translate(&mut self, schema: &Value, path: &str) -> Result<SchemaNode, ResolveError> {
        let map = match schema {
            Value::Bool(true) => return Ok(SchemaNode::Any),
            Value::Bool(false) => return Ok(SchemaNode::Never),
            Value::Object(map) => map,
            other => {
                return Err(invalid(
                    path,
                    format!("expected object or boolean, got {}", json_type_name(other)),
                ))
            }
        };

        // Siblings of $ref are ignored, as in draft 7.
        if let Some(reference) = map.get("$ref") {
            let reference = reference
                .as_str()
                .ok_or_else(|| invalid(path, "$ref must be a string"))?;
            return self.follow(reference, path);
        }

        let mut parts = Vec::new();

        if let Some(value) = map.get("const") {
            parts.push(SchemaNode::Literal(value.clone()));
        } else if let Some(values) = map.get("enum") {
            let values = values
                .as_array()
                .ok_or_else(|| invalid(path, "enum must be an array"))?;
            parts.push(union(
                values.iter().cloned().map(SchemaNode::Literal).collect(),
            ));
        } else if let Some(ty) = map.get("type") {
            parts.push(self.typed(ty, map, path)?);
        } else if looks_like_object(map) {
            parts.push(self.object(map, path)?);
        } else if looks_like_array(map) {
            parts.push(self.array(map, path)?);
        }

        if let Some(all) = map.get("allOf") {
            parts.extend(self.each(all, &format!("{}/allOf", path))?);
        }
        for keyword in ["anyOf", "oneOf"] {
            if let Some(branches) = map.get(keyword) {
                let branches = self.each(branches, &format!("{}/{}", path, keyword))?;
                parts.push(union(branches));
            }
        }

        Ok(intersection(parts))
    }

    fn follow(&mut self, reference: &str, path: &str) -> Result<SchemaNode, ResolveError> {
        if let Some((key, None)) = definition_target(reference) {
            return Ok(SchemaNode::Ref(key));
        }

        if self.inlining.iter().any(|r| r == reference) {
            return Err(ResolveError::CircularPointer {
                reference: reference.to_string(),
            });
        }

        let target = navigate_pointer(self.document, reference).ok_or_else(|| {
            ResolveError::UnresolvedReferences {
                dangling: vec![DanglingReference {
                    path: display_path(path),
                    reference: reference.to_string(),
                    reason: "pointer target not found".to_string(),
                }],
            }
        })?;

        self.inlining.push(reference.to_string());
        let node = self.translate(target, reference.trim_start_matches('#'));
        self.inlining.pop();
        node
    }

    fn each(&mut self, values: &Value, path: &str) -> Result<Vec<SchemaNode>, ResolveError> {
        let values = values
            .as_array()
            .ok_or_else(|| invalid(path, "expected an array of schemas"))?;
        values
            .iter()
            .enumerate()
            .map(|(i, v)| self.translate(v, &format!("{}/{}", path, i)))
            .collect()
    }

    fn typed(
        &mut self,
        ty: &Value,
        map: &Map<String, Value>,
        path: &str,
    ) -> Result<SchemaNode, ResolveError> {
        match ty {
            Value::String(name) => self.single_type(name, map, path),
            Value::Array(names) => {
                let mut members = Vec::with_capacity(names.len());
                for name in names {
                    let name = name
                        .as_str()
                        .ok_or_else(|| invalid(path, "type entries must be strings"))?;
                    members.push(self.single_type(name, map, path)?);
                }
                Ok(union(members))
            }
            other => Err(invalid(
                path,
                format!("type must be a string or array, got {}", json_type_name(other)),
            )),
        }
    }

    fn single_type(
        &mut self,
        name: &str,
        map: &Map<String, Value>,
        path: &str,
    ) -> Result<SchemaNode, ResolveError> {
        match name {
            "string" => Ok(SchemaNode::String),
            "number" => Ok(SchemaNode::Number),
            "integer" => Ok(SchemaNode::Integer),
            "boolean" => Ok(SchemaNode::Boolean),
            "null" => Ok(SchemaNode::Null),
            "object" => self.object(map, path),
            "array" => self.array(map, path),
            other => Err(ResolveError::UnknownType {
                path: display_path(path),
                name: other.to_string(),
            }),
        }
    }

    fn object(&mut self, map: &Map<String, Value>, path: &str) -> Result<SchemaNode, ResolveError> {
        let required: Vec<&str> = map
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let mut properties = Vec::new();
        if let Some(props) = map.get("properties") {
            let props = props
                .as_object()
                .ok_or_else(|| invalid(path, "properties must be an object"))?;
            for (name, schema) in props {
                let prop_path = format!("{}/properties/{}", path, escape_segment(name));
                properties.push(Property {
                    name: name.clone(),
                    schema: self.translate(schema, &prop_path)?,
                    required: required.contains(&name.as_str()),
                    description: string_keyword(schema, "description"),
                });
            }
        }

        // Required names without a declaration still have to be present.
        for name in &required {
            if !properties.iter().any(|p| p.name == *name) {
                properties.push(Property {
                    name: name.to_string(),
                    schema: SchemaNode::Any,
                    required: true,
                    description: None,
                });
            }
        }

        let mut patterns = Vec::new();
        if let Some(pattern_props) = map.get("patternProperties").and_then(Value::as_object) {
            for (pattern, schema) in pattern_props {
                let pattern_path =
                    format!("{}/patternProperties/{}", path, escape_segment(pattern));
                patterns.push(self.translate(schema, &pattern_path)?);
            }
        }

        let additional = match map.get("additionalProperties") {
            None | Some(Value::Bool(true)) => Some(SchemaNode::Any),
            Some(Value::Bool(false)) if patterns.is_empty() => None,
            Some(Value::Bool(false)) => Some(union(patterns)),
            Some(schema) => {
                let extra = self.translate(schema, &format!("{}/additionalProperties", path))?;
                patterns.push(extra);
                Some(union(patterns))
            }
        };

        Ok(SchemaNode::Object(ObjectShape {
            properties,
            additional: additional.map(Box::new),
        }))
    }

    fn array(&mut self, map: &Map<String, Value>, path: &str) -> Result<SchemaNode, ResolveError> {
        if let Some(prefix) = map.get("prefixItems") {
            let items = self.each(prefix, &format!("{}/prefixItems", path))?;
            let rest = self.rest(map.get("items"), &format!("{}/items", path))?;
            return Ok(SchemaNode::Tuple {
                items,
                min_items: min_items(map),
                rest,
            });
        }

        match map.get("items") {
            None => Ok(SchemaNode::Array(Box::new(SchemaNode::Any))),
            Some(items @ Value::Array(_)) => {
                let items = self.each(items, &format!("{}/items", path))?;
                let rest = self.rest(
                    map.get("additionalItems"),
                    &format!("{}/additionalItems", path),
                )?;
                Ok(SchemaNode::Tuple {
                    items,
                    min_items: min_items(map),
                    rest,
                })
            }
            Some(schema) => Ok(SchemaNode::Array(Box::new(
                self.translate(schema, &format!("{}/items", path))?,
            ))),
        }
    }

    /// Schema for elements past a tuple prefix; `false` closes the tuple.
    fn rest(
        &mut self,
        schema: Option<&Value>,
        path: &str,
    ) -> Result<Option<Box<SchemaNode>>, ResolveError> {
        match schema {
            None => Ok(Some(Box::new(SchemaNode::Any))),
            Some(Value::Bool(false)) => Ok(None),
            Some(schema) => Ok(Some(Box::new(self.translate(schema, path)?))),
        }
    }
}

/// `minItems` as a position count; absent or malformed means zero.
fn min_items(map: &Map<String, Value>) -> usize {
    map.get("minItems")
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
}
