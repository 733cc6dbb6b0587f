//! Type emission: renders a [`ResolvedSchema`] as TypeScript declarations.

use std::collections::{BTreeSet, HashMap, HashSet};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::EmitError;
use crate::naming::{declaration_name, property_key, quote};
use crate::schema::{Definition, ObjectShape, ResolvedSchema, SchemaNode};
use crate::types::EmitOptions;

const INDENT: &str = "  ";

const BANNER: &str = "/* eslint-disable */
/**
 * This file was automatically generated by mockserver-typegen.
 * DO NOT MODIFY IT BY HAND. Instead, modify the source JSON Schema files
 * and run mockserver-typegen to regenerate this file.
 */
";

/// Complete output of one emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emitted {
    /// Full text of the declaration file.
    pub source: String,
    /// Declared type names, in output order.
    pub declarations: Vec<String>,
}

/// Produces declaration text for a resolved schema.
#[async_trait]
pub trait TypeEmitter: Send + Sync {
    async fn emit(&self, schema: &ResolvedSchema, namespace: &str) -> Result<Emitted, EmitError>;
}

/// Emits a TypeScript module with one declaration per definition, wrapped in
/// `export declare namespace <Namespace>`.
#[derive(Debug, Clone, Default)]
pub struct TypeScriptEmitter {
    options: EmitOptions,
}

impl TypeScriptEmitter {
    pub fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// Render synchronously. [`TypeEmitter::emit`] delegates here.
    pub fn render(&self, schema: &ResolvedSchema, namespace: &str) -> Result<Emitted, EmitError> {
        let namespace_ident =
            declaration_name(namespace).ok_or_else(|| EmitError::InvalidNamespace {
                name: namespace.to_string(),
            })?;
        let names = assign_names(schema, &namespace_ident)?;
        if let Some(cycle) = find_alias_cycle(schema) {
            return Err(EmitError::CircularAlias { cycle });
        }
        let renderer = Renderer {
            names: &names,
            options: &self.options,
        };

        let selected = self.select(schema);
        let mut declarations = Vec::new();
        let mut blocks = Vec::new();

        if let Some(root) = &schema.root {
            blocks.push(renderer.declaration(&namespace_ident, None, root)?);
            declarations.push(namespace_ident.clone());
        }
        for def in selected {
            let name = &names[def.key.as_str()];
            blocks.push(renderer.declaration(name, Some(def), &def.schema)?);
            declarations.push(name.clone());
        }

        let mut source = String::new();
        if self.options.banner {
            source.push_str(BANNER);
            source.push('\n');
        }
        if blocks.is_empty() {
            source.push_str(&format!("export declare namespace {} {{}}\n", namespace_ident));
        } else {
            source.push_str(&format!("export declare namespace {} {{\n", namespace_ident));
            source.push_str(&blocks.join("\n"));
            source.push_str("}\n");
        }

        info!(
            namespace = %namespace_ident,
            declarations = declarations.len(),
            "Emitted declarations"
        );
        Ok(Emitted {
            source,
            declarations,
        })
    }

    fn select<'s>(&self, schema: &'s ResolvedSchema) -> Vec<&'s Definition> {
        if self.options.retain_unreachable {
            return schema.definitions.iter().collect();
        }

        let reachable = schema.reachable();
        let (kept, pruned): (Vec<_>, Vec<_>) = schema
            .definitions
            .iter()
            .partition(|d| reachable.contains(d.key.as_str()));
        for def in &pruned {
            debug!(key = %def.key, "Skipping unreachable definition");
        }
        if !pruned.is_empty() {
            info!(count = pruned.len(), "Pruned unreachable definitions");
        }
        kept
    }
}

#[async_trait]
impl TypeEmitter for TypeScriptEmitter {
    async fn emit(&self, schema: &ResolvedSchema, namespace: &str) -> Result<Emitted, EmitError> {
        self.render(schema, namespace)
    }
}

/// Map every definition key to a distinct declaration name.
fn assign_names(
    schema: &ResolvedSchema,
    namespace_ident: &str,
) -> Result<HashMap<String, String>, EmitError> {
    let mut names = HashMap::with_capacity(schema.definitions.len());
    let mut owners: HashMap<String, &str> = HashMap::new();
    if schema.root.is_some() {
        owners.insert(namespace_ident.to_string(), "<root>");
    }

    for def in &schema.definitions {
        let ident = declaration_name(&def.key).ok_or_else(|| EmitError::InvalidIdentifier {
            key: def.key.clone(),
        })?;
        if let Some(first) = owners.get(&ident) {
            return Err(EmitError::NameCollision {
                identifier: ident,
                first: first.to_string(),
                second: def.key.clone(),
            });
        }
        owners.insert(ident.clone(), &def.key);
        names.insert(def.key.clone(), ident);
    }
    Ok(names)
}

/// Refs a type alias needs expanded eagerly. Object types, arrays and tuples
/// are deferred by the compiler, so only unions and intersections are followed.
fn eager_refs<'a>(node: &'a SchemaNode, out: &mut Vec<&'a str>) {
    match node {
        SchemaNode::Ref(key) => out.push(key.as_str()),
        SchemaNode::Union(parts) | SchemaNode::Intersection(parts) => {
            for part in parts {
                eager_refs(part, out);
            }
        }
        _ => {}
    }
}

/// First cycle of aliases that only refer to each other, as a key path
/// ending where it started.
fn find_alias_cycle(schema: &ResolvedSchema) -> Option<Vec<String>> {
    let edges: HashMap<&str, Vec<&str>> = schema
        .definitions
        .iter()
        .map(|def| {
            let mut refs = Vec::new();
            // Rendered as an interface.
            if !matches!(def.schema, SchemaNode::Object(_)) {
                eager_refs(&def.schema, &mut refs);
            }
            (def.key.as_str(), refs)
        })
        .collect();

    let mut done = HashSet::new();
    let mut path = Vec::new();
    schema
        .definitions
        .iter()
        .find_map(|def| visit_alias(&def.key, &edges, &mut path, &mut done))
}

fn visit_alias<'a>(
    key: &'a str,
    edges: &HashMap<&'a str, Vec<&'a str>>,
    path: &mut Vec<&'a str>,
    done: &mut HashSet<&'a str>,
) -> Option<Vec<String>> {
    if let Some(start) = path.iter().position(|k| *k == key) {
        let mut cycle: Vec<String> = path[start..].iter().map(|k| k.to_string()).collect();
        cycle.push(key.to_string());
        return Some(cycle);
    }
    if done.contains(key) {
        return None;
    }

    path.push(key);
    for &next in edges.get(key).into_iter().flatten() {
        if let Some(cycle) = visit_alias(next, edges, path, done) {
            return Some(cycle);
        }
    }
    path.pop();
    done.insert(key);
    None
}

struct Renderer<'a> {
    names: &'a HashMap<String, String>,
    options: &'a EmitOptions,
}

impl Renderer<'_> {
    /// One top-level declaration, indented one level inside the namespace.
    fn declaration(
        &self,
        name: &str,
        def: Option<&Definition>,
        node: &SchemaNode,
    ) -> Result<String, EmitError> {
        let mut out = String::new();
        if let Some(def) = def {
            let mut lines = Vec::new();
            if let Some(title) = &def.title {
                lines.push(title.clone());
            }
            if let Some(description) = &def.description {
                if !lines.is_empty() {
                    lines.push(String::new());
                }
                lines.push(description.clone());
            }
            out.push_str(&doc_comment(&lines.join("\n"), 1));
        }

        match node {
            SchemaNode::Object(shape) => {
                let body = self.object_body(shape, 1)?;
                out.push_str(&format!("{}export interface {} {}\n", INDENT, name, body));
            }
            other => {
                let ty = self.ty(other, 1)?;
                out.push_str(&format!("{}export type {} = {};\n", INDENT, name, ty));
            }
        }
        Ok(out)
    }

    fn ty(&self, node: &SchemaNode, indent: usize) -> Result<String, EmitError> {
        Ok(match node {
            SchemaNode::Any => "unknown".to_string(),
            SchemaNode::Never => "never".to_string(),
            SchemaNode::Null => "null".to_string(),
            SchemaNode::Boolean => "boolean".to_string(),
            SchemaNode::String => "string".to_string(),
            SchemaNode::Number | SchemaNode::Integer => "number".to_string(),
            SchemaNode::Literal(value) => self.literal(value),
            SchemaNode::Ref(key) => self
                .names
                .get(key)
                .cloned()
                .ok_or_else(|| EmitError::UnknownReference { key: key.clone() })?,
            SchemaNode::Array(item) => format!("{}[]", self.operand(item, indent)?),
            SchemaNode::Tuple {
                items,
                min_items,
                rest,
            } => {
                let mut parts = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        if i < *min_items {
                            self.ty(item, indent)
                        } else {
                            self.operand(item, indent).map(|ty| format!("{}?", ty))
                        }
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                if let Some(rest) = rest {
                    parts.push(format!("...{}[]", self.operand(rest, indent)?));
                }
                format!("[{}]", parts.join(", "))
            }
            SchemaNode::Object(shape) => self.object_body(shape, indent)?,
            SchemaNode::Union(parts) => {
                let rendered = parts
                    .iter()
                    .map(|p| self.ty(p, indent))
                    .collect::<Result<Vec<_>, _>>()?;
                dedup(rendered).join(" | ")
            }
            SchemaNode::Intersection(parts) => {
                let rendered = parts
                    .iter()
                    .map(|p| match p {
                        SchemaNode::Union(_) => self.ty(p, indent).map(|s| format!("({})", s)),
                        _ => self.ty(p, indent),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                dedup(rendered).join(" & ")
            }
        })
    }

    /// A type used as an array element, parenthesized if it is compound.
    fn operand(&self, node: &SchemaNode, indent: usize) -> Result<String, EmitError> {
        let rendered = self.ty(node, indent)?;
        Ok(match node {
            SchemaNode::Union(parts) | SchemaNode::Intersection(parts) if parts.len() > 1 => {
                format!("({})", rendered)
            }
            _ => rendered,
        })
    }

    fn literal(&self, value: &Value) -> String {
        match value {
            Value::String(s) => quote(s, self.options.quote_style),
            Value::Array(items) => {
                let items: Vec<_> = items.iter().map(|v| self.literal(v)).collect();
                format!("[{}]", items.join(", "))
            }
            Value::Object(map) => {
                if map.is_empty() {
                    return "{}".to_string();
                }
                let fields: Vec<_> = map
                    .iter()
                    .map(|(k, v)| {
                        format!(
                            "{}: {}",
                            property_key(k, self.options.quote_style),
                            self.literal(v)
                        )
                    })
                    .collect();
                format!("{{ {} }}", fields.join("; "))
            }
            scalar => scalar.to_string(),
        }
    }

    /// `{ ... }` for an object shape whose closing brace sits at `indent`.
    fn object_body(&self, shape: &ObjectShape, indent: usize) -> Result<String, EmitError> {
        let pad = INDENT.repeat(indent + 1);
        let mut members: Vec<(String, String)> = Vec::new();

        for prop in &shape.properties {
            let doc = prop
                .description
                .as_deref()
                .map(|d| doc_comment(d, indent + 1))
                .unwrap_or_default();
            let key = property_key(&prop.name, self.options.quote_style);
            let optional = if prop.required { "" } else { "?" };
            let ty = self.ty(&prop.schema, indent + 1)?;
            members.push((doc, format!("{}{}: {}", key, optional, ty)));
        }

        if let Some(additional) = &shape.additional {
            let ty = self.index_type(shape, additional, indent + 1)?;
            members.push((String::new(), format!("[k: string]: {}", ty)));
        }

        if members.is_empty() {
            return Ok("{}".to_string());
        }

        let last = members.len() - 1;
        let mut out = String::from("{\n");
        for (i, (doc, line)) in members.into_iter().enumerate() {
            out.push_str(&doc);
            out.push_str(&pad);
            out.push_str(&line);
            if i < last || self.options.trailing_separator {
                out.push(';');
            }
            out.push('\n');
        }
        out.push_str(&INDENT.repeat(indent));
        out.push('}');
        Ok(out)
    }

    /// Index signature type. Declared properties must be assignable to it,
    /// so a constrained signature is widened by their types.
    fn index_type(
        &self,
        shape: &ObjectShape,
        additional: &SchemaNode,
        indent: usize,
    ) -> Result<String, EmitError> {
        if matches!(additional, SchemaNode::Any) {
            return Ok("unknown".to_string());
        }

        let mut parts = vec![self.ty(additional, indent)?];
        for prop in &shape.properties {
            parts.push(self.ty(&prop.schema, indent)?);
            if !prop.required {
                parts.push("undefined".to_string());
            }
        }
        Ok(dedup(parts).join(" | "))
    }
}

fn dedup(items: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// JSDoc block at `indent`; empty text yields an empty string.
fn doc_comment(text: &str, indent: usize) -> String {
    if text.trim().is_empty() {
        return String::new();
    }
    let pad = INDENT.repeat(indent);
    let mut out = format!("{}/**\n", pad);
    for line in text.replace("*/", "*\\/").lines() {
        if line.is_empty() {
            out.push_str(&format!("{} *\n", pad));
        } else {
            out.push_str(&format!("{} * {}\n", pad, line));
        }
    }
    out.push_str(&format!("{} */\n", pad));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Property;
    use crate::types::QuoteStyle;
    use serde_json::json;

    fn def(key: &str, schema: SchemaNode) -> Definition {
        Definition {
            key: key.into(),
            title: None,
            description: None,
            schema,
        }
    }

    fn prop(name: &str, schema: SchemaNode, required: bool) -> Property {
        Property {
            name: name.into(),
            schema,
            required,
            description: None,
        }
    }

    fn bare() -> EmitOptions {
        EmitOptions::default().banner(false)
    }

    fn render(schema: &ResolvedSchema, options: EmitOptions) -> Emitted {
        TypeScriptEmitter::new(options)
            .render(schema, "mockserver")
            .unwrap()
    }

    #[test]
    fn empty_schema_emits_empty_namespace() {
        let out = render(&ResolvedSchema::default(), bare());
        assert_eq!(out.source, "export declare namespace Mockserver {}\n");
        assert!(out.declarations.is_empty());
    }

    #[test]
    fn banner_is_optional() {
        let out = render(&ResolvedSchema::default(), EmitOptions::default());
        assert!(out.source.starts_with("/* eslint-disable */\n"));
        assert!(out.source.contains("DO NOT MODIFY IT BY HAND"));
    }

    #[test]
    fn object_becomes_interface() {
        let schema = ResolvedSchema {
            definitions: vec![def(
                "httpRequest",
                SchemaNode::Object(ObjectShape {
                    properties: vec![
                        prop("method", SchemaNode::String, true),
                        prop("Content-Type", SchemaNode::String, false),
                    ],
                    additional: Some(Box::new(SchemaNode::Any)),
                }),
            )],
            root: None,
        };
        let out = render(&schema, bare());
        let expected = "export declare namespace Mockserver {
  export interface HttpRequest {
    method: string;
    'Content-Type'?: string;
    [k: string]: unknown;
  }
}
";
        assert_eq!(out.source, expected);
        assert_eq!(out.declarations, ["HttpRequest"]);
    }

    #[test]
    fn trailing_separator_can_be_dropped() {
        let schema = ResolvedSchema {
            definitions: vec![def(
                "times",
                SchemaNode::Object(ObjectShape {
                    properties: vec![
                        prop("remainingTimes", SchemaNode::Integer, false),
                        prop("unlimited", SchemaNode::Boolean, false),
                    ],
                    additional: None,
                }),
            )],
            root: None,
        };
        let out = render(&schema, bare().trailing_separator(false));
        assert!(out.source.contains("    remainingTimes?: number;\n    unlimited?: boolean\n  }"));
    }

    #[test]
    fn refs_render_as_declaration_names() {
        let schema = ResolvedSchema {
            definitions: vec![
                def("matcher", SchemaNode::Object(ObjectShape {
                    properties: vec![],
                    additional: None,
                })),
                def("action", SchemaNode::Ref("matcher".into())),
                def(
                    "actions",
                    SchemaNode::Array(Box::new(SchemaNode::Union(vec![
                        SchemaNode::Ref("action".into()),
                        SchemaNode::Null,
                    ]))),
                ),
            ],
            root: None,
        };
        let out = render(&schema, bare());
        assert!(out.source.contains("  export interface Matcher {}\n"));
        assert!(out.source.contains("  export type Action = Matcher;\n"));
        assert!(out.source.contains("  export type Actions = (Action | null)[];\n"));
    }

    #[test]
    fn literals_use_quote_style() {
        let schema = ResolvedSchema {
            definitions: vec![def(
                "verb",
                SchemaNode::Union(vec![
                    SchemaNode::Literal(json!("GET")),
                    SchemaNode::Literal(json!("POST")),
                    SchemaNode::Literal(json!(7)),
                ]),
            )],
            root: None,
        };
        let out = render(&schema, bare().quote_style(QuoteStyle::Double));
        assert!(out.source.contains(r#"export type Verb = "GET" | "POST" | 7;"#));
    }

    #[test]
    fn intersection_parenthesizes_unions() {
        let schema = ResolvedSchema {
            definitions: vec![def(
                "body",
                SchemaNode::Intersection(vec![
                    SchemaNode::Ref("base".into()),
                    SchemaNode::Union(vec![SchemaNode::String, SchemaNode::Number]),
                ]),
            ), def("base", SchemaNode::Any)],
            root: None,
        };
        let out = render(&schema, bare());
        assert!(out.source.contains("export type Body = Base & (string | number);"));
        assert!(out.source.contains("export type Base = unknown;"));
    }

    #[test]
    fn tuples_render_rest_elements() {
        let schema = ResolvedSchema {
            definitions: vec![
                def(
                    "open",
                    SchemaNode::Tuple {
                        items: vec![SchemaNode::String],
                        min_items: 1,
                        rest: Some(Box::new(SchemaNode::Any)),
                    },
                ),
                def(
                    "closed",
                    SchemaNode::Tuple {
                        items: vec![SchemaNode::String, SchemaNode::Number],
                        min_items: 2,
                        rest: None,
                    },
                ),
            ],
            root: None,
        };
        let out = render(&schema, bare());
        assert!(out.source.contains("export type Open = [string, ...unknown[]];"));
        assert!(out.source.contains("export type Closed = [string, number];"));
    }

    #[test]
    fn tuple_positions_past_min_items_are_optional() {
        let schema = ResolvedSchema {
            definitions: vec![
                def(
                    "pair",
                    SchemaNode::Tuple {
                        items: vec![SchemaNode::String, SchemaNode::Number],
                        min_items: 0,
                        rest: Some(Box::new(SchemaNode::Any)),
                    },
                ),
                def(
                    "header",
                    SchemaNode::Tuple {
                        items: vec![
                            SchemaNode::String,
                            SchemaNode::Union(vec![SchemaNode::String, SchemaNode::Null]),
                        ],
                        min_items: 1,
                        rest: None,
                    },
                ),
            ],
            root: None,
        };
        let out = render(&schema, bare());
        assert!(out.source.contains("export type Pair = [string?, number?, ...unknown[]];"));
        assert!(out.source.contains("export type Header = [string, (string | null)?];"));
    }

    #[test]
    fn constrained_index_signature_is_widened() {
        let schema = ResolvedSchema {
            definitions: vec![def(
                "headers",
                SchemaNode::Object(ObjectShape {
                    properties: vec![prop("name", SchemaNode::String, false)],
                    additional: Some(Box::new(SchemaNode::Array(Box::new(SchemaNode::String)))),
                }),
            )],
            root: None,
        };
        let out = render(&schema, bare());
        assert!(out
            .source
            .contains("    [k: string]: string[] | string | undefined;\n"));
    }

    #[test]
    fn docs_come_from_title_and_description() {
        let mut matcher = def("matcher", SchemaNode::String);
        matcher.title = Some("Request matcher".into());
        matcher.description = Some("Selects requests.\nEnds with */".into());
        let schema = ResolvedSchema {
            definitions: vec![matcher],
            root: None,
        };
        let out = render(&schema, bare());
        let expected = "  /**
   * Request matcher
   *
   * Selects requests.
   * Ends with *\\/
   */
  export type Matcher = string;
";
        assert!(out.source.contains(expected), "{}", out.source);
    }

    #[test]
    fn unreachable_definitions_can_be_pruned() {
        let schema = ResolvedSchema {
            definitions: vec![
                def("matcher", SchemaNode::String),
                def("unused", SchemaNode::Number),
            ],
            root: Some(SchemaNode::Object(ObjectShape {
                properties: vec![prop("httpRequest", SchemaNode::Ref("matcher".into()), false)],
                additional: None,
            })),
        };

        let pruned = render(&schema, bare().retain_unreachable(false));
        assert_eq!(pruned.declarations, ["Mockserver", "Matcher"]);

        let kept = render(&schema, bare());
        assert_eq!(kept.declarations, ["Mockserver", "Matcher", "Unused"]);
        assert!(kept.source.contains("  export interface Mockserver {\n    httpRequest?: Matcher;\n  }\n"));
    }

    #[test]
    fn colliding_identifiers_are_rejected() {
        let schema = ResolvedSchema {
            definitions: vec![
                def("http-request", SchemaNode::Any),
                def("httpRequest", SchemaNode::Any),
            ],
            root: None,
        };
        let err = TypeScriptEmitter::default()
            .render(&schema, "mockserver")
            .unwrap_err();
        assert!(matches!(
            err,
            EmitError::NameCollision { ref identifier, ref first, ref second }
                if identifier == "HttpRequest" && first == "http-request" && second == "httpRequest"
        ));
    }

    #[test]
    fn invalid_names_are_rejected() {
        let schema = ResolvedSchema {
            definitions: vec![def("--", SchemaNode::Any)],
            root: None,
        };
        let emitter = TypeScriptEmitter::default();
        assert!(matches!(
            emitter.render(&schema, "mockserver"),
            Err(EmitError::InvalidIdentifier { .. })
        ));
        assert!(matches!(
            emitter.render(&ResolvedSchema::default(), "..."),
            Err(EmitError::InvalidNamespace { .. })
        ));
    }

    #[test]
    fn dangling_ref_is_an_emit_error() {
        let schema = ResolvedSchema {
            definitions: vec![def("action", SchemaNode::Ref("ghost".into()))],
            root: None,
        };
        let err = TypeScriptEmitter::default()
            .render(&schema, "mockserver")
            .unwrap_err();
        assert!(matches!(err, EmitError::UnknownReference { key } if key == "ghost"));
    }

    #[test]
    fn alias_cycles_are_rejected() {
        let schema = ResolvedSchema {
            definitions: vec![
                def("times", SchemaNode::Integer),
                def("a", SchemaNode::Ref("b".into())),
                def(
                    "b",
                    SchemaNode::Union(vec![SchemaNode::Ref("a".into()), SchemaNode::Null]),
                ),
            ],
            root: None,
        };
        let err = TypeScriptEmitter::default()
            .render(&schema, "mockserver")
            .unwrap_err();
        assert!(matches!(err, EmitError::CircularAlias { ref cycle } if cycle == &["a", "b", "a"]));
        assert_eq!(err.to_string(), "type aliases form a cycle: a -> b -> a");

        let schema = ResolvedSchema {
            definitions: vec![def("self", SchemaNode::Ref("self".into()))],
            root: None,
        };
        assert!(matches!(
            TypeScriptEmitter::default().render(&schema, "mockserver"),
            Err(EmitError::CircularAlias { .. })
        ));
    }

    #[test]
    fn cycles_through_deferred_types_are_allowed() {
        let schema = ResolvedSchema {
            definitions: vec![
                def("list", SchemaNode::Array(Box::new(SchemaNode::Ref("item".into())))),
                def(
                    "item",
                    SchemaNode::Union(vec![SchemaNode::Ref("list".into()), SchemaNode::String]),
                ),
                def("node", SchemaNode::Object(ObjectShape {
                    properties: vec![prop("next", SchemaNode::Ref("link".into()), false)],
                    additional: None,
                })),
                def("link", SchemaNode::Ref("node".into())),
            ],
            root: None,
        };
        let out = render(&schema, bare());
        assert!(out.source.contains("export type Item = List | string;"));
        assert!(out.source.contains("export type Link = Node;"));
    }

    #[tokio::test]
    async fn emit_delegates_to_render() {
        let schema = ResolvedSchema {
            definitions: vec![def("times", SchemaNode::Integer)],
            root: None,
        };
        let emitter = TypeScriptEmitter::new(bare());
        let emitted = emitter.emit(&schema, "mockserver").await.unwrap();
        assert_eq!(emitted, emitter.render(&schema, "mockserver").unwrap());
    }
}
