#![deny(missing_docs)]

//! # Naming
//!
//! Derives Swift identifiers from arbitrary document names.
//!
//! - **Type names** keep their case: `Pet-Store` becomes `Pet_Store`. Invalid
//!   characters become `_`.
//! - **Member names** are lower-camel-cased first: `X-Rate-Limit` becomes `xRateLimit`.
//! - **Content cases** come from a fixed media-type table, with a mechanical
//!   fallback for unknown types.
//!
//! Reserved words are escaped with backticks rather than renamed.

use heck::ToLowerCamelCase;
use regex::Regex;
use std::sync::OnceLock;

static IDENTIFIER_RE: OnceLock<Regex> = OnceLock::new();

const SWIFT_KEYWORDS: &[&str] = &[
    "Any", "Self", "as", "associatedtype", "await", "break", "case", "catch", "class",
    "continue", "default", "defer", "deinit", "do", "else", "enum", "extension", "fallthrough",
    "false", "fileprivate", "for", "func", "guard", "if", "import", "in", "init", "inout",
    "internal", "is", "let", "nil", "open", "operator", "precedencegroup", "private",
    "protocol", "public", "repeat", "rethrows", "return", "self", "static", "struct",
    "subscript", "super", "switch", "throw", "throws", "true", "try", "typealias", "var",
    "where", "while",
];

/// Well-known media types and their case names. Keys are lowercase.
const CONTENT_CASE_NAMES: &[(&str, &str)] = &[
    ("application/json", "json"),
    ("text/plain", "plainText"),
    ("application/x-www-form-urlencoded", "urlEncodedForm"),
    ("multipart/form-data", "multipartForm"),
    ("application/octet-stream", "binary"),
    ("application/xml", "xml"),
    ("text/html", "html"),
    ("text/csv", "csv"),
    ("application/pdf", "pdf"),
    ("image/png", "png"),
    ("image/jpeg", "jpeg"),
    ("application/yaml", "yaml"),
    ("*/*", "any"),
];

#[allow(clippy::expect_used)]
fn identifier_re() -> &'static Regex {
    IDENTIFIER_RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid regex"))
}

/// Whether `name` is a reserved word that needs backticks.
pub fn is_keyword(name: &str) -> bool {
    SWIFT_KEYWORDS.contains(&name)
}

/// Whether `name` can be used verbatim as an identifier.
pub fn is_valid_identifier(name: &str) -> bool {
    identifier_re().is_match(name) && !is_keyword(name)
}

/// Makes `name` usable as a Swift identifier, preserving its case.
///
/// ```
/// use oasgen_core::naming::swift_safe_name;
///
/// assert_eq!(swift_safe_name("Pet"), "Pet");
/// assert_eq!(swift_safe_name("pet-store.v2"), "pet_store_v2");
/// assert_eq!(swift_safe_name("2xx"), "_2xx");
/// assert_eq!(swift_safe_name("default"), "`default`");
/// ```
pub fn swift_safe_name(name: &str) -> String {
    if is_valid_identifier(name) {
        return name.to_string();
    }
    if is_keyword(name) {
        return format!("`{name}`");
    }
    let mut safe: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if safe.is_empty() || safe.starts_with(|c: char| c.is_ascii_digit()) {
        safe.insert(0, '_');
    }
    safe
}

/// The property or case identifier for a source name.
///
/// ```
/// use oasgen_core::naming::property_identifier;
///
/// assert_eq!(property_identifier("X-Rate-Limit"), "xRateLimit");
/// assert_eq!(property_identifier("created_at"), "createdAt");
/// ```
pub fn property_identifier(name: &str) -> String {
    let camel = name.to_lower_camel_case();
    if camel.is_empty() {
        return swift_safe_name(name);
    }
    swift_safe_name(&camel)
}

/// The tagged-union case identifier for a media type.
///
/// Parameters such as `; charset=utf-8` are ignored and the lookup is
/// case-insensitive. Unknown types map to `<type>_<subtype>`.
pub fn content_case_name(media_type: &str) -> String {
    let essence = media_type_essence(media_type);
    if let Some((_, case)) = CONTENT_CASE_NAMES.iter().find(|(key, _)| *key == essence) {
        return (*case).to_string();
    }
    match essence.split_once('/') {
        Some((kind, subtype)) => {
            format!("{}_{}", content_component(kind), content_component(subtype))
        }
        None => swift_safe_name(&essence),
    }
}

fn content_component(component: &str) -> String {
    if component == "*" {
        return "any".to_string();
    }
    component
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// The media-type essence (`type/subtype`, lowercase, no parameters).
pub fn media_type_essence(media_type: &str) -> String {
    media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_name_keeps_valid_identifiers() {
        assert_eq!(swift_safe_name("PetStore"), "PetStore");
        assert_eq!(swift_safe_name("_private"), "_private");
    }

    #[test]
    fn test_safe_name_replaces_invalid_characters() {
        assert_eq!(swift_safe_name("Pet Store"), "Pet_Store");
        assert_eq!(swift_safe_name("a+b"), "a_b");
        assert_eq!(swift_safe_name(""), "_");
        assert_eq!(swift_safe_name("404"), "_404");
    }

    #[test]
    fn test_keywords_get_backticks() {
        assert_eq!(swift_safe_name("self"), "`self`");
        assert_eq!(property_identifier("protocol"), "`protocol`");
        assert!(!is_valid_identifier("case"));
        assert!(is_valid_identifier("cases"));
    }

    #[test]
    fn test_property_identifier_collisions_are_visible() {
        assert_eq!(property_identifier("X-Rate-Limit"), property_identifier("x-rate-limit"));
        assert_eq!(property_identifier("x_request_id"), "xRequestId");
    }

    #[test]
    fn test_content_case_table() {
        assert_eq!(content_case_name("application/json"), "json");
        assert_eq!(content_case_name("text/plain"), "plainText");
        assert_eq!(content_case_name("application/x-www-form-urlencoded"), "urlEncodedForm");
        assert_eq!(content_case_name("multipart/form-data"), "multipartForm");
        assert_eq!(content_case_name("application/octet-stream"), "binary");
        assert_eq!(content_case_name("*/*"), "any");
    }

    #[test]
    fn test_content_case_ignores_parameters_and_case() {
        assert_eq!(content_case_name("Application/JSON; charset=utf-8"), "json");
        assert_eq!(content_case_name("text/plain;charset=ascii"), "plainText");
    }

    #[test]
    fn test_content_case_fallback() {
        assert_eq!(content_case_name("application/vnd.api+json"), "application_vnd_api_json");
        assert_eq!(content_case_name("image/*"), "image_any");
        assert_eq!(media_type_essence("Text/HTML; q=1"), "text/html");
    }
}
