#![deny(missing_docs)]

//! # Record Blueprints
//!
//! Intermediate descriptions of records built by the translators before they
//! are lowered into a struct declaration. Lowering adds the stored properties
//! (each preceded by the nested declarations it owns), an optional
//! `CodingKeys` enum and a memberwise initializer.

use crate::ir::{
    AccessModifier, BindingKind, CodeBlock, Comment, Declaration, EnumCaseDescription,
    EnumCaseKind, EnumDescription, Expression, FunctionDescription, LiteralDescription,
    ParameterDescription, StructDescription, VariableDescription,
};
use crate::translator::type_name::TypeName;
use crate::translator::type_usage::TypeUsage;

/// Default value of a stored property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyDefault {
    /// `nil`
    Nil,
    /// `.init()`
    EmptyInit,
    /// Any other expression.
    Expression(Expression),
}

impl PropertyDefault {
    /// The IR expression for this default.
    pub fn to_expression(&self) -> Expression {
        match self {
            PropertyDefault::Nil => Expression::nil(),
            PropertyDefault::EmptyInit => Expression::implicit_member("init").call(vec![]),
            PropertyDefault::Expression(expression) => expression.clone(),
        }
    }
}

/// A stored property of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyBlueprint {
    /// Doc comment.
    pub comment: Option<Comment>,
    /// Name in the document (used for coding keys).
    pub original_name: String,
    /// Swift identifier.
    pub name: String,
    /// Property type.
    pub usage: TypeUsage,
    /// Explicit default. Optional properties default to `nil` without one.
    pub default: Option<PropertyDefault>,
    /// Nested declarations owned by this property, emitted right before it.
    pub associated_declarations: Vec<Declaration>,
}

impl PropertyBlueprint {
    /// A property with no comment, default or nested declarations.
    pub fn new(original_name: impl Into<String>, name: impl Into<String>, usage: TypeUsage) -> Self {
        Self {
            comment: None,
            original_name: original_name.into(),
            name: name.into(),
            usage,
            default: None,
            associated_declarations: Vec::new(),
        }
    }

    /// The default used by the initializer, if any.
    pub fn effective_default(&self) -> Option<PropertyDefault> {
        match &self.default {
            Some(default) => Some(default.clone()),
            None if self.usage.is_optional() => Some(PropertyDefault::Nil),
            None => None,
        }
    }

    /// The name without reserved-word backticks.
    pub fn bare_name(&self) -> &str {
        self.name.trim_matches('`')
    }
}

/// A record to be lowered into a struct declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructBlueprint {
    /// Doc comment of the struct.
    pub comment: Option<Comment>,
    /// Access modifier of every generated member.
    pub access: AccessModifier,
    /// Full type name; the struct is declared with its short name.
    pub type_name: TypeName,
    /// Conformances in declaration order.
    pub conformances: Vec<String>,
    /// Emits a `CodingKeys` enum when properties exist.
    pub coding_keys: bool,
    /// Stored properties in order.
    pub properties: Vec<PropertyBlueprint>,
}

impl StructBlueprint {
    /// Whether `init()` with no arguments is possible.
    pub fn has_empty_init(&self) -> bool {
        self.properties
            .iter()
            .all(|p| p.effective_default().is_some())
    }

    /// Lowers the blueprint into a struct declaration.
    pub fn into_declaration(self) -> Declaration {
        let mut members = Vec::new();
        for property in &self.properties {
            members.extend(property.associated_declarations.iter().cloned());
            let mut variable = VariableDescription::new(BindingKind::Var, property.name.clone());
            variable.access = Some(self.access);
            variable.ty = Some(property.usage.to_existing_type());
            members.push(Declaration::Variable(variable).commented(property.comment.clone()));
        }
        members.push(self.initializer());
        if self.coding_keys && !self.properties.is_empty() {
            members.push(self.coding_keys_enum());
        }
        let record = StructDescription {
            access: Some(self.access),
            name: self.type_name.short_swift_name().to_string(),
            conformances: self.conformances,
            members,
        };
        Declaration::Struct(record).commented(self.comment)
    }

    fn initializer(&self) -> Declaration {
        let parameters = self
            .properties
            .iter()
            .map(|property| ParameterDescription {
                label: Some(property.name.clone()),
                name: None,
                ty: property.usage.to_existing_type(),
                default_value: property.effective_default().map(|d| d.to_expression()),
            })
            .collect();
        let body = self
            .properties
            .iter()
            .map(|property| {
                CodeBlock::expression(
                    Expression::identifier("self")
                        .dot(property.name.clone())
                        .assign(Expression::identifier(property.name.clone())),
                )
            })
            .collect();
        let mut init = FunctionDescription::initializer();
        init.access = Some(self.access);
        init.parameters = parameters;
        init.body = Some(body);
        Declaration::Function(init).with_doc(self.initializer_doc())
    }

    fn initializer_doc(&self) -> String {
        let mut doc = format!("Creates a new `{}`.", self.type_name.short_swift_name());
        if self.properties.is_empty() {
            return doc;
        }
        doc.push_str("\n\n- Parameters:");
        for property in &self.properties {
            let summary = match &property.comment {
                Some(Comment::Doc(text)) | Some(Comment::Inline(text)) => {
                    text.lines().next().unwrap_or_default().to_string()
                }
                _ => String::new(),
            };
            if summary.is_empty() {
                doc.push_str(&format!("\n  - {}:", property.bare_name()));
            } else {
                doc.push_str(&format!("\n  - {}: {}", property.bare_name(), summary));
            }
        }
        doc
    }

    fn coding_keys_enum(&self) -> Declaration {
        let cases = self
            .properties
            .iter()
            .map(|property| {
                let kind = if property.bare_name() == property.original_name {
                    EnumCaseKind::NameOnly
                } else {
                    EnumCaseKind::RawValue(LiteralDescription::String(
                        property.original_name.clone(),
                    ))
                };
                Declaration::EnumCase(EnumCaseDescription {
                    name: property.name.clone(),
                    kind,
                })
            })
            .collect();
        Declaration::Enum(EnumDescription {
            is_frozen: false,
            is_indirect: false,
            access: Some(self.access),
            name: "CodingKeys".into(),
            conformances: vec!["String".into(), "CodingKey".into()],
            members: cases,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::TextRenderer;
    use pretty_assertions::assert_eq;

    fn headers_name() -> TypeName {
        TypeName::responses()
            .appending("Ok", Some("Ok"))
            .appending("Headers", None)
    }

    #[test]
    fn test_empty_record_has_empty_init() {
        let blueprint = StructBlueprint {
            comment: None,
            access: AccessModifier::Public,
            type_name: headers_name(),
            conformances: vec!["Sendable".into(), "Hashable".into()],
            coding_keys: false,
            properties: vec![],
        };
        assert!(blueprint.has_empty_init());
        let text = TextRenderer::default()
            .render(&blueprint.into_declaration())
            .unwrap();
        assert_eq!(
            text,
            "public struct Headers: Sendable, Hashable {\n    /// Creates a new `Headers`.\n    public init() {}\n}"
        );
    }

    #[test]
    fn test_required_property_blocks_empty_init() {
        let mut optional =
            PropertyBlueprint::new("X-Trace", "xTrace", TypeUsage::from(TypeName::string()).with_optional(true));
        optional.comment = Some(Comment::Doc("Trace id".into()));
        let required = PropertyBlueprint::new("X-Limit", "xLimit", TypeName::int().into());
        let blueprint = StructBlueprint {
            comment: None,
            access: AccessModifier::Public,
            type_name: headers_name(),
            conformances: vec![],
            coding_keys: false,
            properties: vec![optional.clone(), required],
        };
        assert!(!blueprint.has_empty_init());
        let text = TextRenderer::default()
            .render(&blueprint.into_declaration())
            .unwrap();
        assert_eq!(
            text,
            r#"public struct Headers {
    /// Trace id
    public var xTrace: Swift.String?
    public var xLimit: Swift.Int
    /// Creates a new `Headers`.
    ///
    /// - Parameters:
    ///   - xTrace: Trace id
    ///   - xLimit:
    public init(
        xTrace: Swift.String? = nil,
        xLimit: Swift.Int
    ) {
        self.xTrace = xTrace
        self.xLimit = xLimit
    }
}"#
        );
    }

    #[test]
    fn test_coding_keys_map_original_names() {
        let blueprint = StructBlueprint {
            comment: Some(Comment::Doc("A pet.".into())),
            access: AccessModifier::Internal,
            type_name: TypeName::schemas().appending("Pet", Some("Pet")),
            conformances: vec!["Codable".into()],
            coding_keys: true,
            properties: vec![
                PropertyBlueprint::new("name", "name", TypeName::string().into()),
                PropertyBlueprint::new(
                    "created_at",
                    "createdAt",
                    TypeUsage::from(TypeName::date()).with_optional(true),
                ),
            ],
        };
        let text = TextRenderer::default()
            .render(&blueprint.into_declaration())
            .unwrap();
        assert!(text.starts_with("/// A pet.\ninternal struct Pet: Codable {\n"));
        assert!(text.contains(
            "    internal enum CodingKeys: String, CodingKey {\n        case name\n        case createdAt = \"created_at\"\n    }\n}"
        ));
    }

    #[test]
    fn test_nested_declarations_precede_their_property() {
        let mut property = PropertyBlueprint::new("body", "body", TypeName::string().into());
        property.associated_declarations =
            vec![Declaration::Struct(StructDescription::new("Nested"))];
        let blueprint = StructBlueprint {
            comment: None,
            access: AccessModifier::Public,
            type_name: TypeName::responses().appending("Ok", None),
            conformances: vec![],
            coding_keys: false,
            properties: vec![property],
        };
        let Declaration::Struct(record) = blueprint.into_declaration() else {
            panic!("expected a struct");
        };
        assert_eq!(record.members[0].name(), Some("Nested"));
        assert_eq!(record.members[1].name(), Some("body"));
        assert!(record.members[2].name().is_none());
    }
}
