#![deny(missing_docs)]

//! # Type Resolver
//!
//! Maps one schema node to a [`TypeUsage`], synthesizing a nested declaration
//! when the node is an inline record or union.
//!
//! - `$ref`s to schema components resolve to the component's registered type
//!   name. The first resolution of a component also synthesizes its
//!   declaration into the [`ComponentRegistry`]; later resolutions reuse the name.
//! - Inline records and unions are named `<member>Payload` under the parent
//!   namespace and returned to the caller, which owns the declaration.
//! - Primitive, array and dictionary shapes map straight to built-in usages.

use std::collections::HashSet;

use openapiv3::{ReferenceOr, Schema};
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::{AppError, AppResult, NamingCollisionError, ResolutionError};
use crate::ir::{Declaration, TypealiasDescription};
use crate::naming::swift_safe_name;
use crate::oas::{ComponentKey, ComponentSection, Document, SchemaNode};
use crate::translator::registry::ComponentRegistry;
use crate::translator::schemas::{classify, Shape};
use crate::translator::type_name::TypeName;
use crate::translator::type_usage::TypeUsage;

/// The outcome of resolving one schema node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// How the node is referenced.
    pub usage: TypeUsage,
    /// Declaration synthesized for an inline node, owned by the caller.
    pub declaration: Option<Declaration>,
}

impl ResolvedType {
    fn builtin(usage: TypeUsage) -> Self {
        Self {
            usage,
            declaration: None,
        }
    }
}

/// Resolves schema nodes against one document and a shared registry.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    pub(crate) document: &'a Document,
    pub(crate) registry: &'a ComponentRegistry,
    pub(crate) config: &'a GeneratorConfig,
}

impl<'a> TypeResolver<'a> {
    /// A resolver over `document` that records components in `registry`.
    pub fn new(
        document: &'a Document,
        registry: &'a ComponentRegistry,
        config: &'a GeneratorConfig,
    ) -> Self {
        Self {
            document,
            registry,
            config,
        }
    }

    /// The document being translated.
    pub fn document(&self) -> &'a Document {
        self.document
    }

    /// The configuration in effect.
    pub fn config(&self) -> &'a GeneratorConfig {
        self.config
    }

    /// Resolves `node`; an inline record or union is named `<member>Payload`
    /// under `parent`.
    pub fn resolve(
        &self,
        node: SchemaNode<'_>,
        parent: &TypeName,
        member: &str,
    ) -> AppResult<ResolvedType> {
        match node {
            SchemaNode::Reference(reference) => {
                let key = ComponentKey::from_ref(reference, ComponentSection::Schemas)
                    .ok_or_else(|| {
                        ResolutionError::new(
                            reference,
                            "only local `#/components/schemas/*` references are supported",
                        )
                    })?;
                let type_name = self.resolve_component(&key)?;
                Ok(ResolvedType::builtin(type_name.into()))
            }
            SchemaNode::Inline(schema) => self.resolve_inline(schema, parent, member),
        }
    }

    /// Resolves a schema that may be absent; absent schemas accept any value.
    pub fn resolve_optional(
        &self,
        node: Option<SchemaNode<'_>>,
        parent: &TypeName,
        member: &str,
    ) -> AppResult<ResolvedType> {
        match node {
            Some(node) => self.resolve(node, parent, member),
            None => Ok(ResolvedType::builtin(TypeName::value_container().into())),
        }
    }

    /// The type name of a schema component, synthesizing its declaration the
    /// first time the component is seen.
    pub fn resolve_component(&self, key: &ComponentKey) -> AppResult<TypeName> {
        let schema = self.document.schema_component(&key.name).ok_or_else(|| {
            ResolutionError::new(key.json_path(), "referenced component does not exist")
                .in_component(key.name.clone())
        })?;
        let (type_name, is_first) = self.registry.assign(key)?;
        if !is_first {
            if let Some(failure) = self.registry.failure(key) {
                return Err(failure);
            }
            return Ok(type_name);
        }
        match self.translate_component(key, schema, &type_name) {
            Ok(declaration) => {
                debug!(component = %key, "synthesized component declaration");
                self.registry.store(key, declaration);
                Ok(type_name)
            }
            Err(error) => {
                let error = match error {
                    AppError::Resolution(inner) if inner.component.is_none() => {
                        AppError::Resolution(inner.in_component(key.name.clone()))
                    }
                    other => other,
                };
                self.registry.record_failure(key, error.clone());
                Err(error)
            }
        }
    }

    fn translate_component(
        &self,
        key: &ComponentKey,
        schema: &ReferenceOr<Schema>,
        type_name: &TypeName,
    ) -> AppResult<Declaration> {
        match schema {
            ReferenceOr::Reference { reference } => {
                self.check_alias_chain(key)?;
                let resolved = self.resolve(SchemaNode::Reference(reference), type_name, "")?;
                Ok(self.typealias(type_name, &resolved.usage))
            }
            ReferenceOr::Item(schema) => {
                let shape = classify(schema, &key.json_path())?;
                if shape.is_inlinable() {
                    return self.translate_shape(shape, schema, type_name);
                }
                let resolved = self.resolve_shape(
                    shape,
                    schema,
                    &TypeName::schemas(),
                    type_name.short_swift_name(),
                )?;
                if resolved.declaration.is_some() {
                    self.reserve_synthesized(key, resolved.usage.base_type())?;
                }
                let alias = self
                    .typealias(type_name, &resolved.usage)
                    .commented(self.doc_comment(schema));
                Ok(match resolved.declaration {
                    Some(nested) => Declaration::Group(vec![nested, alias]),
                    None => alias,
                })
            }
        }
    }

    /// Claims the name of a type synthesized next to component `key`. Fails
    /// when a schema component of the document maps to the same name, whether
    /// or not it has been resolved yet.
    fn reserve_synthesized(&self, key: &ComponentKey, synthesized: &TypeName) -> AppResult<()> {
        let swift = synthesized.short_swift_name();
        if let Some((name, _)) = self
            .document
            .schemas()
            .find(|(name, _)| swift_safe_name(name) == swift)
        {
            return Err(NamingCollisionError {
                identifier: swift.to_string(),
                first: name.clone(),
                second: key.name.clone(),
                scope: TypeName::schemas().fully_qualified_swift_name(),
            }
            .into());
        }
        self.registry
            .reserve(ComponentSection::Schemas, swift, &key.name)?;
        Ok(())
    }

    /// Fails when a component is an alias whose chain of aliases returns to itself.
    fn check_alias_chain(&self, start: &ComponentKey) -> Result<(), ResolutionError> {
        let mut visited = HashSet::new();
        let mut current = start.clone();
        while visited.insert(current.name.clone()) {
            let Some(ReferenceOr::Reference { reference }) =
                self.document.schema_component(&current.name)
            else {
                return Ok(());
            };
            match ComponentKey::from_ref(reference, ComponentSection::Schemas) {
                Some(next) => current = next,
                None => return Ok(()),
            }
        }
        Err(
            ResolutionError::new(start.json_path(), "reference cycle without a named type")
                .in_component(start.name.clone()),
        )
    }

    fn typealias(&self, type_name: &TypeName, usage: &TypeUsage) -> Declaration {
        Declaration::Typealias(TypealiasDescription {
            access: Some(self.config.access_modifier),
            name: type_name.short_swift_name().to_string(),
            existing_type: usage.to_existing_type(),
        })
    }

    fn resolve_inline(
        &self,
        schema: &Schema,
        parent: &TypeName,
        member: &str,
    ) -> AppResult<ResolvedType> {
        let path = member_path(parent, member);
        let shape = classify(schema, &path)?;
        self.resolve_shape(shape, schema, parent, member)
    }

    pub(crate) fn resolve_shape(
        &self,
        shape: Shape<'_>,
        schema: &Schema,
        parent: &TypeName,
        member: &str,
    ) -> AppResult<ResolvedType> {
        match shape {
            Shape::Builtin(usage) => Ok(ResolvedType::builtin(usage)),
            Shape::Array(items) => {
                let item = self.resolve_optional(items, parent, member)?;
                Ok(ResolvedType {
                    usage: item.usage.as_array(),
                    declaration: item.declaration,
                })
            }
            Shape::Dictionary(values) => {
                let value = self.resolve(values, parent, member)?;
                Ok(ResolvedType {
                    usage: value.usage.as_dictionary_value(),
                    declaration: value.declaration,
                })
            }
            inlinable => {
                let type_name = parent.appending(payload_name(member), None);
                let declaration = self.translate_shape(inlinable, schema, &type_name)?;
                debug!(type_name = %type_name, "synthesized inline declaration");
                Ok(ResolvedType {
                    usage: type_name.into(),
                    declaration: Some(declaration),
                })
            }
        }
    }
}

/// `<member>Payload`, without reserved-word backticks.
pub(crate) fn payload_name(member: &str) -> String {
    format!("{}Payload", member.trim_matches('`'))
}

/// Diagnostic path of a member below `parent`.
pub(crate) fn member_path(parent: &TypeName, member: &str) -> String {
    let base = parent
        .full_json_path()
        .unwrap_or_else(|| parent.fully_qualified_swift_name());
    if member.is_empty() {
        base
    } else {
        format!("{base}/{member}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::TextRenderer;
    use pretty_assertions::assert_eq;

    fn document(yaml_components: &str) -> Document {
        let yaml = format!(
            "openapi: 3.0.3\ninfo:\n  title: t\n  version: '1'\npaths: {{}}\ncomponents:\n{yaml_components}"
        );
        Document::from_yaml_str(&yaml).unwrap()
    }

    fn inline(yaml: &str) -> Schema {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_primitives_by_format() {
        let doc = document("  schemas: {}\n");
        let registry = ComponentRegistry::new();
        let config = GeneratorConfig::default();
        let resolver = TypeResolver::new(&doc, &registry, &config);
        let parent = TypeName::schemas();
        let cases = [
            ("type: integer", "Swift.Int"),
            ("type: integer\nformat: int32", "Swift.Int32"),
            ("type: integer\nformat: int64", "Swift.Int64"),
            ("type: number", "Swift.Double"),
            ("type: number\nformat: float", "Swift.Float"),
            ("type: boolean", "Swift.Bool"),
            ("type: string", "Swift.String"),
            ("type: string\nformat: date-time", "Foundation.Date"),
            ("type: string\nformat: byte", "OpenAPIRuntime.Base64EncodedData"),
            ("type: string\nformat: binary", "OpenAPIRuntime.HTTPBody"),
            ("{}", "OpenAPIRuntime.OpenAPIValueContainer"),
            ("type: object", "OpenAPIRuntime.OpenAPIObjectContainer"),
            ("type: array\nitems:\n  type: string", "[Swift.String]"),
            (
                "type: object\nadditionalProperties:\n  type: integer",
                "[Swift.String: Swift.Int]",
            ),
        ];
        for (yaml, expected) in cases {
            let schema = inline(yaml);
            let resolved = resolver
                .resolve(SchemaNode::Inline(&schema), &parent, "value")
                .unwrap();
            assert_eq!(resolved.usage.fully_qualified_swift_name(), expected, "{yaml}");
            assert!(resolved.declaration.is_none());
        }
    }

    #[test]
    fn test_inline_object_is_synthesized_under_parent() {
        let doc = document("  schemas: {}\n");
        let registry = ComponentRegistry::new();
        let config = GeneratorConfig::default();
        let resolver = TypeResolver::new(&doc, &registry, &config);
        let schema = inline("type: object\nproperties:\n  id:\n    type: integer\nrequired: [id]");
        let parent = TypeName::responses().appending("Ok", None).appending("Body", None);
        let resolved = resolver
            .resolve(SchemaNode::Inline(&schema), &parent, "json")
            .unwrap();
        assert_eq!(
            resolved.usage.fully_qualified_swift_name(),
            "Components.Responses.Ok.Body.jsonPayload"
        );
        let text = TextRenderer::default()
            .render(&resolved.declaration.unwrap())
            .unwrap();
        assert!(text.starts_with("public struct jsonPayload: Codable, Hashable, Sendable {\n"));
        assert!(text.contains("    public var id: Swift.Int\n"));
    }

    #[test]
    fn test_component_resolved_twice_is_synthesized_once() {
        let doc = document("  schemas:\n    Pet:\n      type: object\n      properties:\n        name:\n          type: string\n");
        let registry = ComponentRegistry::new();
        let config = GeneratorConfig::default();
        let resolver = TypeResolver::new(&doc, &registry, &config);
        let node = SchemaNode::Reference("#/components/schemas/Pet");
        let first = resolver.resolve(node, &TypeName::responses(), "a").unwrap();
        let second = resolver.resolve(node, &TypeName::responses(), "b").unwrap();
        assert_eq!(first, second);
        assert!(first.declaration.is_none());
        assert_eq!(registry.declaration_count(), 1);
    }

    #[test]
    fn test_self_referencing_component_resolves() {
        let doc = document(
            "  schemas:\n    Node:\n      type: object\n      properties:\n        next:\n          $ref: '#/components/schemas/Node'\n",
        );
        let registry = ComponentRegistry::new();
        let config = GeneratorConfig::default();
        let resolver = TypeResolver::new(&doc, &registry, &config);
        let name = resolver.resolve_component(&ComponentKey::schema("Node")).unwrap();
        assert_eq!(name.fully_qualified_swift_name(), "Components.Schemas.Node");
        assert_eq!(registry.declaration_count(), 1);
    }

    #[test]
    fn test_alias_cycle_is_a_resolution_error() {
        let doc = document(
            "  schemas:\n    A:\n      $ref: '#/components/schemas/B'\n    B:\n      $ref: '#/components/schemas/A'\n",
        );
        let registry = ComponentRegistry::new();
        let config = GeneratorConfig::default();
        let resolver = TypeResolver::new(&doc, &registry, &config);
        let err = resolver.resolve_component(&ComponentKey::schema("A")).unwrap_err();
        assert!(matches!(err, AppError::Resolution(ref e) if e.component.as_deref() == Some("A")));
        let again = resolver.resolve_component(&ComponentKey::schema("A")).unwrap_err();
        assert!(matches!(again, AppError::Resolution(_)));
    }

    #[test]
    fn test_failed_component_keeps_failing_with_same_collision() {
        let doc = document(
            "  schemas:\n    Pet:\n      type: object\n      properties:\n        X-Id:\n          type: string\n        x_id:\n          type: string\n",
        );
        let registry = ComponentRegistry::new();
        let config = GeneratorConfig::default();
        let resolver = TypeResolver::new(&doc, &registry, &config);
        let node = SchemaNode::Reference("#/components/schemas/Pet");
        for member in ["first", "second"] {
            let err = resolver.resolve(node, &TypeName::responses(), member).unwrap_err();
            assert!(matches!(err, AppError::NamingCollision(ref e) if e.identifier == "xId"));
        }
        assert_eq!(registry.declaration_count(), 0);
    }

    #[test]
    fn test_synthesized_item_name_collides_with_component() {
        let doc = document(
            "  schemas:\n    Pets:\n      type: array\n      items:\n        type: object\n        properties:\n          id:\n            type: integer\n    PetsPayload:\n      type: object\n      properties:\n        name:\n          type: string\n",
        );
        for order in [["Pets", "PetsPayload"], ["PetsPayload", "Pets"]] {
            let registry = ComponentRegistry::new();
            let config = GeneratorConfig::default();
            let resolver = TypeResolver::new(&doc, &registry, &config);
            let results: Vec<_> = order
                .iter()
                .map(|name| resolver.resolve_component(&ComponentKey::schema(*name)))
                .collect();
            let pets = &results[order.iter().position(|n| *n == "Pets").unwrap()];
            match pets {
                Err(AppError::NamingCollision(e)) => {
                    assert_eq!(e.identifier, "PetsPayload");
                    assert_eq!(e.second, "Pets");
                }
                other => panic!("unexpected result: {other:?}"),
            }
        }
    }

    #[test]
    fn test_synthesized_item_name_is_used_by_alias() {
        let doc = document(
            "  schemas:\n    Pets:\n      type: array\n      items:\n        type: object\n        properties:\n          id:\n            type: integer\n",
        );
        let registry = ComponentRegistry::new();
        let config = GeneratorConfig::default();
        let resolver = TypeResolver::new(&doc, &registry, &config);
        resolver.resolve_component(&ComponentKey::schema("Pets")).unwrap();
        let text = TextRenderer::default()
            .render(&registry.take_declarations(ComponentSection::Schemas))
            .unwrap();
        assert!(text.contains("public struct PetsPayload: Codable, Hashable, Sendable {\n"));
        assert!(text.ends_with("public typealias Pets = [Components.Schemas.PetsPayload]"));
    }

    #[test]
    fn test_unsupported_shapes_fail() {
        let doc = document("  schemas: {}\n");
        let registry = ComponentRegistry::new();
        let config = GeneratorConfig::default();
        let resolver = TypeResolver::new(&doc, &registry, &config);
        let parent = TypeName::schemas();

        let not = inline("not:\n  type: string");
        let err = resolver
            .resolve(SchemaNode::Inline(&not), &parent, "value")
            .unwrap_err();
        assert!(matches!(err, AppError::Resolution(_)));

        let external = resolver.resolve(
            SchemaNode::Reference("other.yaml#/components/schemas/Pet"),
            &parent,
            "value",
        );
        assert!(external.is_err());

        let missing = resolver.resolve(
            SchemaNode::Reference("#/components/schemas/Missing"),
            &parent,
            "value",
        );
        assert!(matches!(missing, Err(AppError::Resolution(ref e)) if e.component.as_deref() == Some("Missing")));
    }

    #[test]
    fn test_primitive_component_becomes_typealias() {
        let doc = document("  schemas:\n    Tag:\n      description: A tag.\n      type: string\n");
        let registry = ComponentRegistry::new();
        let config = GeneratorConfig::default();
        let resolver = TypeResolver::new(&doc, &registry, &config);
        resolver.resolve_component(&ComponentKey::schema("Tag")).unwrap();
        let decls = registry.take_declarations(ComponentSection::Schemas);
        let text = TextRenderer::default().render(&decls).unwrap();
        assert_eq!(text, "/// A tag.\npublic typealias Tag = Swift.String");
    }

    #[test]
    fn test_payload_name_strips_backticks() {
        assert_eq!(payload_name("`default`"), "defaultPayload");
        assert_eq!(
            member_path(&TypeName::schemas().appending("Pet", Some("Pet")), "owner"),
            "#/components/schemas/Pet/owner"
        );
    }
}
