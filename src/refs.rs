//! Reference integrity: find every `$ref` in a document and check it resolves.

use serde_json::Value;

use crate::error::DanglingReference;
use crate::types::{DEFINITIONS_KEY, DEFINITIONS_PREFIX};

/// A `$ref` occurrence inside a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefSite {
    /// JSON Pointer to the object holding the `$ref`.
    pub path: String,
    pub reference: String,
}

/// Escape a key for use as a JSON Pointer segment.
pub(crate) fn escape_segment(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

/// Decode one segment of a URI-fragment pointer: percent escapes first,
/// then `~1` and `~0`. A segment that does not decode to UTF-8 is kept as is.
fn unescape_segment(segment: &str) -> String {
    let decoded = urlencoding::decode(segment).unwrap_or(std::borrow::Cow::Borrowed(segment));
    decoded.replace("~1", "/").replace("~0", "~")
}

/// Follow a fragment pointer (e.g. `#/definitions/foo/properties/bar`).
///
/// Returns `None` if any segment is missing.
pub fn navigate_pointer<'a>(root: &'a Value, pointer: &str) -> Option<&'a Value> {
    let path = pointer.strip_prefix('#')?;
    if path.is_empty() {
        return Some(root);
    }

    let mut current = root;
    for part in path.strip_prefix('/')?.split('/') {
        let key = unescape_segment(part);
        current = match current {
            Value::Object(map) => map.get(&key)?,
            Value::Array(arr) => arr.get(key.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Split `#/definitions/<key>[/rest]` into the key and the remaining pointer.
pub fn definition_target(reference: &str) -> Option<(String, Option<&str>)> {
    let rest = reference.strip_prefix(DEFINITIONS_PREFIX)?;
    match rest.split_once('/') {
        Some((key, tail)) => Some((unescape_segment(key), Some(tail))),
        None => Some((unescape_segment(rest), None)),
    }
}

/// Collect every `$ref` string in `value`, depth first.
pub fn collect_refs(value: &Value) -> Vec<RefSite> {
    let mut sites = Vec::new();
    collect_refs_inner(value, "", &mut sites);
    sites
}

fn collect_refs_inner(value: &Value, path: &str, sites: &mut Vec<RefSite>) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(reference)) = map.get("$ref") {
                sites.push(RefSite {
                    path: if path.is_empty() { "/".into() } else { path.into() },
                    reference: reference.clone(),
                });
            }

            for (key, val) in map {
                let child_path = format!("{}/{}", path, escape_segment(key));
                collect_refs_inner(val, &child_path, sites);
            }
        }
        Value::Array(arr) => {
            for (i, item) in arr.iter().enumerate() {
                let child_path = format!("{}/{}", path, i);
                collect_refs_inner(item, &child_path, sites);
            }
        }
        _ => {}
    }
}

/// Check every `$ref` in an envelope document.
///
/// Internal pointers must land on an existing value. References to the whole
/// document (`#`) or to other documents are reported as unsupported, since
/// the envelope must be self-contained.
pub fn check_refs(document: &Value) -> Vec<DanglingReference> {
    collect_refs(document)
        .into_iter()
        .filter_map(|site| {
            dangling_reason(document, &site.reference).map(|reason| DanglingReference {
                path: site.path,
                reference: site.reference,
                reason: reason.to_string(),
            })
        })
        .collect()
}

fn dangling_reason(document: &Value, reference: &str) -> Option<&'static str> {
    if !reference.starts_with('#') {
        return Some("external references are not supported");
    }
    if reference == "#" {
        return Some("whole-document references are not supported");
    }
    if let Some((key, _)) = definition_target(reference) {
        let known = document
            .get(DEFINITIONS_KEY)
            .and_then(|defs| defs.get(&key))
            .is_some();
        if !known {
            return Some("no such definition");
        }
    }
    if navigate_pointer(document, reference).is_none() {
        return Some("pointer target not found");
    }
    None
}
