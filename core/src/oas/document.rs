#![deny(missing_docs)]

//! # OpenAPI Document
//!
//! A read-only view over an already parsed `openapiv3::OpenAPI` graph with the
//! by-name component lookups the translators need. Component maps keep the
//! order in which the document declares them.

use std::fmt;

use openapiv3::{Header, OpenAPI, ReferenceOr, Response, Schema};

use crate::error::{AppError, AppResult, ResolutionError};
use crate::oas::ref_utils::{encode_pointer_segment, extract_component_name};

/// Hard limit on `$ref` chains between response or header components.
const MAX_REF_HOPS: usize = 32;

/// The component sections the generator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentSection {
    /// `#/components/schemas`
    Schemas,
    /// `#/components/responses`
    Responses,
    /// `#/components/headers`
    Headers,
}

impl ComponentSection {
    /// The section key as written in the document.
    pub fn key(self) -> &'static str {
        match self {
            ComponentSection::Schemas => "schemas",
            ComponentSection::Responses => "responses",
            ComponentSection::Headers => "headers",
        }
    }
}

/// Identity of a reusable component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentKey {
    /// Section holding the component.
    pub section: ComponentSection,
    /// Name as declared in the document.
    pub name: String,
}

impl ComponentKey {
    /// Key of a schema component.
    pub fn schema(name: impl Into<String>) -> Self {
        Self {
            section: ComponentSection::Schemas,
            name: name.into(),
        }
    }

    /// Key of a response component.
    pub fn response(name: impl Into<String>) -> Self {
        Self {
            section: ComponentSection::Responses,
            name: name.into(),
        }
    }

    /// Parses a local `$ref` into a key of the given section.
    pub fn from_ref(reference: &str, section: ComponentSection) -> Option<Self> {
        extract_component_name(reference, section.key()).map(|name| Self { section, name })
    }

    /// JSON path of the component, e.g. `#/components/schemas/Pet`.
    pub fn json_path(&self) -> String {
        format!(
            "#/components/{}/{}",
            self.section.key(),
            encode_pointer_segment(&self.name)
        )
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.json_path())
    }
}

/// A schema position in the document: either a `$ref` or an inline schema.
#[derive(Debug, Clone, Copy)]
pub enum SchemaNode<'a> {
    /// `$ref: ...`
    Reference(&'a str),
    /// An inline schema.
    Inline(&'a Schema),
}

impl<'a> From<&'a ReferenceOr<Schema>> for SchemaNode<'a> {
    fn from(value: &'a ReferenceOr<Schema>) -> Self {
        match value {
            ReferenceOr::Reference { reference } => SchemaNode::Reference(reference),
            ReferenceOr::Item(schema) => SchemaNode::Inline(schema),
        }
    }
}

impl<'a> From<&'a ReferenceOr<Box<Schema>>> for SchemaNode<'a> {
    fn from(value: &'a ReferenceOr<Box<Schema>>) -> Self {
        match value {
            ReferenceOr::Reference { reference } => SchemaNode::Reference(reference),
            ReferenceOr::Item(schema) => SchemaNode::Inline(schema.as_ref()),
        }
    }
}

/// A parsed OpenAPI document.
#[derive(Debug, Clone)]
pub struct Document {
    api: OpenAPI,
}

impl From<OpenAPI> for Document {
    fn from(api: OpenAPI) -> Self {
        Self { api }
    }
}

impl Document {
    /// Parses a YAML document.
    pub fn from_yaml_str(yaml: &str) -> AppResult<Self> {
        let api: OpenAPI = serde_yaml::from_str(yaml)
            .map_err(|e| AppError::Document(format!("Failed to parse OpenAPI YAML: {}", e)))?;
        Ok(Self { api })
    }

    /// Parses a JSON document.
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let api: OpenAPI = serde_json::from_str(json)
            .map_err(|e| AppError::Document(format!("Failed to parse OpenAPI JSON: {}", e)))?;
        Ok(Self { api })
    }

    /// The underlying document model.
    pub fn api(&self) -> &OpenAPI {
        &self.api
    }

    /// Schema components in declaration order.
    pub fn schemas(&self) -> impl Iterator<Item = (&String, &ReferenceOr<Schema>)> {
        self.api.components.iter().flat_map(|c| c.schemas.iter())
    }

    /// Response components in declaration order.
    pub fn responses(&self) -> impl Iterator<Item = (&String, &ReferenceOr<Response>)> {
        self.api.components.iter().flat_map(|c| c.responses.iter())
    }

    /// Looks up a schema component by name.
    pub fn schema_component(&self, name: &str) -> Option<&ReferenceOr<Schema>> {
        self.api.components.as_ref()?.schemas.get(name)
    }

    /// Looks up a response component by name.
    pub fn response_component(&self, name: &str) -> Option<&ReferenceOr<Response>> {
        self.api.components.as_ref()?.responses.get(name)
    }

    /// Looks up a header component by name.
    pub fn header_component(&self, name: &str) -> Option<&ReferenceOr<Header>> {
        self.api.components.as_ref()?.headers.get(name)
    }

    /// Follows `$ref`s until a concrete response is reached.
    pub fn resolve_response<'a>(
        &'a self,
        response: &'a ReferenceOr<Response>,
    ) -> Result<&'a Response, ResolutionError> {
        follow(response, ComponentSection::Responses, |name| {
            self.response_component(name)
        })
    }

    /// Follows `$ref`s until a concrete header is reached.
    pub fn resolve_header<'a>(
        &'a self,
        header: &'a ReferenceOr<Header>,
    ) -> Result<&'a Header, ResolutionError> {
        follow(header, ComponentSection::Headers, |name| {
            self.header_component(name)
        })
    }
}

fn follow<'a, T>(
    start: &'a ReferenceOr<T>,
    section: ComponentSection,
    lookup: impl Fn(&str) -> Option<&'a ReferenceOr<T>>,
) -> Result<&'a T, ResolutionError> {
    let mut current = start;
    for _ in 0..MAX_REF_HOPS {
        match current {
            ReferenceOr::Item(item) => return Ok(item),
            ReferenceOr::Reference { reference } => {
                let key = ComponentKey::from_ref(reference, section).ok_or_else(|| {
                    ResolutionError::new(
                        reference.clone(),
                        format!("only local `#/components/{}/*` references are supported", section.key()),
                    )
                })?;
                current = lookup(&key.name).ok_or_else(|| {
                    ResolutionError::new(reference.clone(), "referenced component does not exist")
                        .in_component(key.name.clone())
                })?;
            }
        }
    }
    Err(ResolutionError::new(
        format!("#/components/{}", section.key()),
        "reference chain is cyclic or too deep",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
openapi: 3.0.3
info:
  title: Pets
  version: 1.0.0
paths: {}
components:
  schemas:
    Pet:
      type: object
    Tag:
      type: string
  headers:
    RateLimit:
      required: true
      schema:
        type: integer
  responses:
    Ok:
      description: fine
    Alias:
      $ref: '#/components/responses/Ok'
    Loop:
      $ref: '#/components/responses/Loop'
    Dangling:
      $ref: '#/components/responses/Missing'
"#;

    #[test]
    fn test_components_keep_declaration_order() {
        let doc = Document::from_yaml_str(YAML).unwrap();
        let names: Vec<&String> = doc.schemas().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Pet", "Tag"]);
        let responses: Vec<&String> = doc.responses().map(|(name, _)| name).collect();
        assert_eq!(responses, vec!["Ok", "Alias", "Loop", "Dangling"]);
    }

    #[test]
    fn test_resolve_response_follows_refs() {
        let doc = Document::from_yaml_str(YAML).unwrap();
        let alias = doc.response_component("Alias").unwrap();
        assert_eq!(doc.resolve_response(alias).unwrap().description, "fine");
    }

    #[test]
    fn test_resolve_response_reports_missing_and_cycles() {
        let doc = Document::from_yaml_str(YAML).unwrap();
        let dangling = doc.response_component("Dangling").unwrap();
        let err = doc.resolve_response(dangling).unwrap_err();
        assert_eq!(err.component.as_deref(), Some("Missing"));

        let looping = doc.response_component("Loop").unwrap();
        assert!(doc.resolve_response(looping).is_err());
    }

    #[test]
    fn test_resolve_header_component() {
        let doc = Document::from_yaml_str(YAML).unwrap();
        let header = ReferenceOr::Reference {
            reference: "#/components/headers/RateLimit".to_string(),
        };
        assert!(doc.resolve_header(&header).unwrap().required);
    }

    #[test]
    fn test_component_key_paths() {
        let key = ComponentKey::from_ref("#/components/schemas/Pet", ComponentSection::Schemas)
            .unwrap();
        assert_eq!(key, ComponentKey::schema("Pet"));
        assert_eq!(key.json_path(), "#/components/schemas/Pet");
        assert!(ComponentKey::from_ref("#/components/schemas/Pet", ComponentSection::Responses)
            .is_none());
    }

    #[test]
    fn test_malformed_document_is_a_document_error() {
        let err = Document::from_yaml_str("openapi: [").unwrap_err();
        assert!(matches!(err, AppError::Document(_)));
    }

    #[test]
    fn test_json_document() {
        let doc = Document::from_json_str(
            r#"{"openapi":"3.0.3","info":{"title":"t","version":"1"},"paths":{}}"#,
        )
        .unwrap();
        assert_eq!(doc.schemas().count(), 0);
        assert!(doc.schema_component("Pet").is_none());
    }
}
