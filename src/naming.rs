//! Identifier rules for emitted TypeScript.

use crate::types::QuoteStyle;

/// Declaration name for a registry key.
///
/// The key is split on every character that is not ASCII alphanumeric; each
/// segment gets an upper-case first letter and keeps the rest as written.
/// A leading digit is prefixed with `_`. Returns `None` when the key has no
/// alphanumeric characters at all.
///
/// ```
/// use mockserver_typegen::declaration_name;
///
/// assert_eq!(declaration_name("httpRequest").as_deref(), Some("HttpRequest"));
/// assert_eq!(declaration_name("key-to-multi.value").as_deref(), Some("KeyToMultiValue"));
/// ```
pub fn declaration_name(key: &str) -> Option<String> {
    let mut name = String::with_capacity(key.len());
    for segment in key.split(|c: char| !c.is_ascii_alphanumeric()) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            name.push(first.to_ascii_uppercase());
            name.extend(chars);
        }
    }

    if name.is_empty() {
        return None;
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    Some(name)
}

/// True if `name` can be written as a bare property key.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Write `text` as a string literal.
pub fn quote(text: &str, style: QuoteStyle) -> String {
    let q = style.quote_char();
    let mut out = String::with_capacity(text.len() + 2);
    out.push(q);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == q => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(q);
    out
}

/// Property key as written inside an object type.
pub fn property_key(name: &str, style: QuoteStyle) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        quote(name, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_name_normalizes_delimiters() {
        assert_eq!(declaration_name("httpRequest").unwrap(), "HttpRequest");
        assert_eq!(declaration_name("times_spec").unwrap(), "TimesSpec");
        assert_eq!(declaration_name("key-to-multi.value").unwrap(), "KeyToMultiValue");
        assert_eq!(declaration_name("--body--").unwrap(), "Body");
        assert_eq!(declaration_name("HTTPForward").unwrap(), "HTTPForward");
    }

    #[test]
    fn declaration_name_handles_digits_and_empty() {
        assert_eq!(declaration_name("3xx-response").unwrap(), "_3xxResponse");
        assert_eq!(declaration_name("-.-"), None);
        assert_eq!(declaration_name(""), None);
    }

    #[test]
    fn identifiers() {
        assert!(is_identifier("method"));
        assert!(is_identifier("$schema"));
        assert!(is_identifier("_x1"));
        assert!(!is_identifier("content-type"));
        assert!(!is_identifier("1st"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn quoting_escapes_active_quote_only() {
        assert_eq!(quote("it's", QuoteStyle::Single), r"'it\'s'");
        assert_eq!(quote("it's", QuoteStyle::Double), r#""it's""#);
        assert_eq!(quote("a\"b\\c\n", QuoteStyle::Double), r#""a\"b\\c\n""#);
    }

    #[test]
    fn property_keys_quote_when_needed() {
        assert_eq!(property_key("path", QuoteStyle::Single), "path");
        assert_eq!(
            property_key("Content-Type", QuoteStyle::Double),
            "\"Content-Type\""
        );
    }
}
