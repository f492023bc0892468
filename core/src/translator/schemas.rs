#![deny(missing_docs)]

//! # Schema Translation
//!
//! Classifies a schema into a [`Shape`] and lowers the inlinable shapes
//! (records, string enums and compositions) into declarations.

use std::collections::HashMap;

use indexmap::IndexMap;
use openapiv3::{
    AdditionalProperties, IntegerFormat, NumberFormat, ReferenceOr, Schema, SchemaKind,
    StringFormat, Type, VariantOrUnknownOrEmpty,
};

use crate::error::{AppResult, NamingCollisionError, ResolutionError};
use crate::ir::{
    Comment, Declaration, EnumCaseDescription, EnumCaseKind, EnumDescription, LiteralDescription,
};
use crate::naming::property_identifier;
use crate::oas::SchemaNode;
use crate::translator::blueprints::{PropertyBlueprint, StructBlueprint};
use crate::translator::type_name::TypeName;
use crate::translator::type_resolver::TypeResolver;
use crate::translator::type_usage::TypeUsage;

/// Conformances of generated record types.
const RECORD_CONFORMANCES: &[&str] = &["Codable", "Hashable", "Sendable"];
/// Conformances of generated string enums, raw type first.
const STRING_ENUM_CONFORMANCES: &[&str] = &["String", "Codable", "Hashable", "Sendable", "CaseIterable"];

type Properties = IndexMap<String, ReferenceOr<Box<Schema>>>;

/// The structural category of a schema.
#[derive(Debug, Clone)]
pub(crate) enum Shape<'a> {
    /// Maps to a built-in type.
    Builtin(TypeUsage),
    /// `[T]`; items absent means any value.
    Array(Option<SchemaNode<'a>>),
    /// `[String: T]`
    Dictionary(SchemaNode<'a>),
    /// A record with named properties.
    Object {
        properties: &'a Properties,
        required: &'a [String],
    },
    /// A closed set of string values.
    StringEnum(Vec<String>),
    /// Exactly one of the listed schemas.
    OneOf(&'a [ReferenceOr<Schema>]),
    /// All of the listed schemas.
    AllOf(&'a [ReferenceOr<Schema>]),
    /// Any non-empty subset of the listed schemas.
    AnyOf(&'a [ReferenceOr<Schema>]),
}

impl Shape<'_> {
    /// Whether the shape needs its own declaration.
    pub(crate) fn is_inlinable(&self) -> bool {
        matches!(
            self,
            Shape::Object { .. }
                | Shape::StringEnum(_)
                | Shape::OneOf(_)
                | Shape::AllOf(_)
                | Shape::AnyOf(_)
        )
    }
}

fn object_shape<'a>(
    properties: &'a Properties,
    required: &'a [String],
    additional: Option<&'a AdditionalProperties>,
) -> Shape<'a> {
    if !properties.is_empty() {
        return Shape::Object {
            properties,
            required,
        };
    }
    match additional {
        Some(AdditionalProperties::Schema(values)) => {
            Shape::Dictionary(SchemaNode::from(values.as_ref()))
        }
        _ => Shape::Builtin(TypeName::object_container().into()),
    }
}

/// Classifies `schema`; `path` is used in diagnostics.
pub(crate) fn classify<'a>(schema: &'a Schema, path: &str) -> Result<Shape<'a>, ResolutionError> {
    Ok(match &schema.schema_kind {
        SchemaKind::Type(Type::String(string)) => {
            let values: Vec<String> = string.enumeration.iter().flatten().cloned().collect();
            if !values.is_empty() {
                Shape::StringEnum(values)
            } else {
                let name = match &string.format {
                    VariantOrUnknownOrEmpty::Item(StringFormat::DateTime) => TypeName::date(),
                    VariantOrUnknownOrEmpty::Item(StringFormat::Byte) => {
                        TypeName::base64_encoded_data()
                    }
                    VariantOrUnknownOrEmpty::Item(StringFormat::Binary) => TypeName::body(),
                    _ => TypeName::string(),
                };
                Shape::Builtin(name.into())
            }
        }
        SchemaKind::Type(Type::Integer(integer)) => Shape::Builtin(
            match &integer.format {
                VariantOrUnknownOrEmpty::Item(IntegerFormat::Int32) => TypeName::int32(),
                VariantOrUnknownOrEmpty::Item(IntegerFormat::Int64) => TypeName::int64(),
                _ => TypeName::int(),
            }
            .into(),
        ),
        SchemaKind::Type(Type::Number(number)) => Shape::Builtin(
            match &number.format {
                VariantOrUnknownOrEmpty::Item(NumberFormat::Float) => TypeName::float(),
                _ => TypeName::double(),
            }
            .into(),
        ),
        SchemaKind::Type(Type::Boolean { .. }) => Shape::Builtin(TypeName::bool().into()),
        SchemaKind::Type(Type::Array(array)) => Shape::Array(array.items.as_ref().map(SchemaNode::from)),
        SchemaKind::Type(Type::Object(object)) => object_shape(
            &object.properties,
            &object.required,
            object.additional_properties.as_ref(),
        ),
        SchemaKind::OneOf { one_of } => Shape::OneOf(one_of),
        SchemaKind::AllOf { all_of } => Shape::AllOf(all_of),
        SchemaKind::AnyOf { any_of } => Shape::AnyOf(any_of),
        SchemaKind::Not { .. } => {
            return Err(ResolutionError::new(path, "`not` schemas are not supported"));
        }
        SchemaKind::Any(any) => {
            if any.not.is_some() {
                return Err(ResolutionError::new(path, "`not` schemas are not supported"));
            }
            if !any.one_of.is_empty() {
                Shape::OneOf(&any.one_of)
            } else if !any.all_of.is_empty() {
                Shape::AllOf(&any.all_of)
            } else if !any.any_of.is_empty() {
                Shape::AnyOf(&any.any_of)
            } else if !any.properties.is_empty() || any.typ.as_deref() == Some("object") {
                object_shape(&any.properties, &any.required, any.additional_properties.as_ref())
            } else if any.items.is_some() || any.typ.as_deref() == Some("array") {
                Shape::Array(any.items.as_ref().map(SchemaNode::from))
            } else {
                let strings: Option<Vec<String>> = any
                    .enumeration
                    .iter()
                    .filter(|value| !value.is_null())
                    .map(|value| value.as_str().map(String::from))
                    .collect();
                match strings {
                    Some(values) if !values.is_empty() => Shape::StringEnum(values),
                    _ => Shape::Builtin(TypeName::value_container().into()),
                }
            }
        }
    })
}

/// Text without trailing whitespace; blank text is absent.
fn trimmed(text: &Option<String>) -> Option<&str> {
    text.as_deref()
        .map(str::trim_end)
        .filter(|text| !text.is_empty())
}

/// Whether a node explicitly allows `null`.
pub(crate) fn is_nullable(node: SchemaNode<'_>) -> bool {
    match node {
        SchemaNode::Inline(schema) => schema.schema_data.nullable,
        SchemaNode::Reference(_) => false,
    }
}

fn collision(identifier: &str, first: &str, second: &str, scope: &TypeName) -> NamingCollisionError {
    NamingCollisionError {
        identifier: identifier.to_string(),
        first: first.to_string(),
        second: second.to_string(),
        scope: scope.fully_qualified_swift_name(),
    }
}

/// Tracks identifiers generated inside one scope and reports collisions.
#[derive(Debug)]
pub(crate) struct IdentifierScope<'a> {
    scope: &'a TypeName,
    seen: HashMap<String, String>,
}

impl<'a> IdentifierScope<'a> {
    pub(crate) fn new(scope: &'a TypeName) -> Self {
        Self {
            scope,
            seen: HashMap::new(),
        }
    }

    /// Claims `identifier` for `source`, failing if another source already holds it.
    pub(crate) fn claim(&mut self, identifier: &str, source: &str) -> Result<(), NamingCollisionError> {
        if let Some(first) = self.seen.get(identifier) {
            return Err(collision(identifier, first, source, self.scope));
        }
        self.seen.insert(identifier.to_string(), source.to_string());
        Ok(())
    }
}

impl TypeResolver<'_> {
    /// Doc comment derived from a schema's title and description.
    pub(crate) fn doc_comment(&self, schema: &Schema) -> Option<Comment> {
        let data = &schema.schema_data;
        let text = match (trimmed(&data.title), trimmed(&data.description)) {
            (Some(title), Some(description)) => format!("{title}\n\n{description}"),
            (Some(text), None) | (None, Some(text)) => text.to_string(),
            (None, None) => return None,
        };
        Some(Comment::Doc(text))
    }

    /// Lowers an inlinable shape into a declaration named after `type_name`.
    pub(crate) fn translate_shape(
        &self,
        shape: Shape<'_>,
        schema: &Schema,
        type_name: &TypeName,
    ) -> AppResult<Declaration> {
        let comment = self.doc_comment(schema);
        let declaration = match shape {
            Shape::Object {
                properties,
                required,
            } => self.translate_object(properties, required, type_name)?,
            Shape::StringEnum(values) => self.translate_string_enum(&values, type_name)?,
            Shape::OneOf(members) => self.translate_one_of(members, type_name)?,
            Shape::AllOf(members) => self.translate_composition(members, type_name, false)?,
            Shape::AnyOf(members) => self.translate_composition(members, type_name, true)?,
            Shape::Builtin(_) | Shape::Array(_) | Shape::Dictionary(_) => {
                return Err(ResolutionError::new(
                    type_name.fully_qualified_swift_name(),
                    "shape has no declaration of its own",
                )
                .into());
            }
        };
        Ok(declaration.commented(comment))
    }

    fn translate_object(
        &self,
        properties: &Properties,
        required: &[String],
        type_name: &TypeName,
    ) -> AppResult<Declaration> {
        let mut scope = IdentifierScope::new(type_name);
        let mut blueprints = Vec::with_capacity(properties.len());
        for (name, schema) in properties {
            let identifier = property_identifier(name);
            scope.claim(&identifier, name)?;
            let node = SchemaNode::from(schema);
            let resolved = self.resolve(node, type_name, &identifier)?;
            let optional = !required.contains(name) || is_nullable(node);
            let mut property =
                PropertyBlueprint::new(name.clone(), identifier, resolved.usage.with_optional(optional));
            if let SchemaNode::Inline(inline) = node {
                property.comment = self.doc_comment(inline);
            }
            property.associated_declarations.extend(resolved.declaration);
            blueprints.push(property);
        }
        Ok(StructBlueprint {
            comment: None,
            access: self.config.access_modifier,
            type_name: type_name.clone(),
            conformances: RECORD_CONFORMANCES.iter().map(|c| c.to_string()).collect(),
            coding_keys: true,
            properties: blueprints,
        }
        .into_declaration())
    }

    fn translate_string_enum(&self, values: &[String], type_name: &TypeName) -> AppResult<Declaration> {
        let mut scope = IdentifierScope::new(type_name);
        let mut members = Vec::with_capacity(values.len());
        for value in values {
            let identifier = property_identifier(value);
            scope.claim(&identifier, value)?;
            members.push(Declaration::EnumCase(EnumCaseDescription {
                name: identifier,
                kind: EnumCaseKind::RawValue(LiteralDescription::String(value.clone())),
            }));
        }
        Ok(Declaration::Enum(EnumDescription {
            is_frozen: true,
            is_indirect: false,
            access: Some(self.config.access_modifier),
            name: type_name.short_swift_name().to_string(),
            conformances: STRING_ENUM_CONFORMANCES.iter().map(|c| c.to_string()).collect(),
            members,
        }))
    }

    fn translate_one_of(
        &self,
        schemas: &[ReferenceOr<Schema>],
        type_name: &TypeName,
    ) -> AppResult<Declaration> {
        if schemas.is_empty() {
            return Err(ResolutionError::new(
                type_name.fully_qualified_swift_name(),
                "`oneOf` must list at least one schema",
            )
            .into());
        }
        let mut members = Vec::new();
        for (index, schema) in schemas.iter().enumerate() {
            let case_name = format!("case{}", index + 1);
            let resolved = self.resolve(SchemaNode::from(schema), type_name, &case_name)?;
            members.extend(resolved.declaration);
            members.push(Declaration::EnumCase(EnumCaseDescription::with_payload(
                case_name,
                resolved.usage.to_existing_type(),
            )));
        }
        Ok(Declaration::Enum(EnumDescription {
            is_frozen: true,
            is_indirect: false,
            access: Some(self.config.access_modifier),
            name: type_name.short_swift_name().to_string(),
            conformances: RECORD_CONFORMANCES.iter().map(|c| c.to_string()).collect(),
            members,
        }))
    }

    /// `allOf` (every value required) or `anyOf` (every value optional).
    fn translate_composition(
        &self,
        schemas: &[ReferenceOr<Schema>],
        type_name: &TypeName,
        optional: bool,
    ) -> AppResult<Declaration> {
        let mut blueprints = Vec::with_capacity(schemas.len());
        for (index, schema) in schemas.iter().enumerate() {
            let name = format!("value{}", index + 1);
            let resolved = self.resolve(SchemaNode::from(schema), type_name, &name)?;
            let mut property =
                PropertyBlueprint::new(name.clone(), name, resolved.usage.with_optional(optional));
            property.associated_declarations.extend(resolved.declaration);
            blueprints.push(property);
        }
        Ok(StructBlueprint {
            comment: None,
            access: self.config.access_modifier,
            type_name: type_name.clone(),
            conformances: RECORD_CONFORMANCES.iter().map(|c| c.to_string()).collect(),
            coding_keys: false,
            properties: blueprints,
        }
        .into_declaration())
    }
}
