#![deny(missing_docs)]

//! # Typed Content
//!
//! Pairs each content entry of a response with the type its payload decodes to.

use indexmap::IndexMap;
use openapiv3::MediaType;

use crate::error::AppResult;
use crate::ir::Declaration;
use crate::naming::{content_case_name, media_type_essence};
use crate::oas::SchemaNode;
use crate::translator::schemas::IdentifierScope;
use crate::translator::type_name::TypeName;
use crate::translator::type_resolver::TypeResolver;
use crate::translator::type_usage::TypeUsage;

/// How a media type's payload is represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// JSON, decoded into the schema's type.
    Json,
    /// URL-encoded form, decoded into the schema's type.
    UrlEncodedForm,
    /// Anything else, passed through as a raw byte stream.
    Raw,
}

impl ContentKind {
    /// Classifies a media type string.
    pub fn of(media_type: &str) -> Self {
        let essence = media_type_essence(media_type);
        if essence == "application/json" || essence.ends_with("+json") {
            ContentKind::Json
        } else if essence == "application/x-www-form-urlencoded" {
            ContentKind::UrlEncodedForm
        } else {
            ContentKind::Raw
        }
    }

    /// Whether the payload type comes from the schema.
    pub fn uses_schema(self) -> bool {
        !matches!(self, ContentKind::Raw)
    }
}

/// One content entry with its resolved payload type.
#[derive(Debug, Clone)]
pub struct TypedContent<'a> {
    /// Media type as written in the document.
    pub media_type: &'a str,
    /// Case identifier derived from the media type.
    pub case_name: String,
    /// Payload representation.
    pub kind: ContentKind,
    /// The schema the payload type came from.
    pub schema: Option<SchemaNode<'a>>,
    /// Payload type.
    pub usage: TypeUsage,
    /// Inline declaration synthesized for the payload.
    pub declaration: Option<Declaration>,
}

impl<'a> TypeResolver<'a> {
    /// Resolves every content entry, in document order, under `parent`.
    ///
    /// Two media types mapping to the same case identifier is a naming collision.
    pub fn typed_contents<'c>(
        &self,
        content: &'c IndexMap<String, MediaType>,
        parent: &TypeName,
    ) -> AppResult<Vec<TypedContent<'c>>> {
        let mut scope = IdentifierScope::new(parent);
        let mut typed = Vec::with_capacity(content.len());
        for (media_type, entry) in content {
            let case_name = content_case_name(media_type);
            scope.claim(&case_name, media_type)?;
            let kind = ContentKind::of(media_type);
            let schema = entry.schema.as_ref().map(SchemaNode::from);
            let (usage, declaration) = if kind.uses_schema() {
                let resolved = self.resolve_optional(schema, parent, &case_name)?;
                (resolved.usage, resolved.declaration)
            } else {
                (TypeName::body().into(), None)
            };
            typed.push(TypedContent {
                media_type,
                case_name,
                kind,
                schema,
                usage,
                declaration,
            });
        }
        Ok(typed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_kinds() {
        assert_eq!(ContentKind::of("application/json"), ContentKind::Json);
        assert_eq!(ContentKind::of("application/problem+json; charset=utf-8"), ContentKind::Json);
        assert_eq!(
            ContentKind::of("application/x-www-form-urlencoded"),
            ContentKind::UrlEncodedForm
        );
        assert_eq!(ContentKind::of("text/plain"), ContentKind::Raw);
        assert!(!ContentKind::of("application/octet-stream").uses_schema());
    }
}
