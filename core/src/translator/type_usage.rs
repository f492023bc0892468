#![deny(missing_docs)]

//! # Type Usages
//!
//! A [`TypeName`] plus the optional / collection modifiers it is used with.

use crate::ir::ExistingTypeDescription;
use crate::translator::type_name::TypeName;

/// A reference to a type as used by a property, case or parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeUsage {
    /// The named type itself.
    Name(TypeName),
    /// `T?`
    Optional(Box<TypeUsage>),
    /// `[T]`
    Array(Box<TypeUsage>),
    /// `[Swift.String: T]`
    DictionaryValue(Box<TypeUsage>),
}

impl From<TypeName> for TypeUsage {
    fn from(name: TypeName) -> Self {
        TypeUsage::Name(name)
    }
}

impl TypeUsage {
    /// Whether the outermost modifier is optional.
    pub fn is_optional(&self) -> bool {
        matches!(self, TypeUsage::Optional(_))
    }

    /// Wraps in `Optional` when `optional` is set and the usage is not already optional.
    pub fn with_optional(self, optional: bool) -> Self {
        if optional && !self.is_optional() {
            TypeUsage::Optional(Box::new(self))
        } else {
            self
        }
    }

    /// `[self]`
    pub fn as_array(self) -> Self {
        TypeUsage::Array(Box::new(self))
    }

    /// `[Swift.String: self]`
    pub fn as_dictionary_value(self) -> Self {
        TypeUsage::DictionaryValue(Box::new(self))
    }

    /// The innermost named type.
    pub fn base_type(&self) -> &TypeName {
        match self {
            TypeUsage::Name(name) => name,
            TypeUsage::Optional(inner)
            | TypeUsage::Array(inner)
            | TypeUsage::DictionaryValue(inner) => inner.base_type(),
        }
    }

    /// The IR type reference.
    pub fn to_existing_type(&self) -> ExistingTypeDescription {
        match self {
            TypeUsage::Name(name) => name.to_existing_type(),
            TypeUsage::Optional(inner) => {
                ExistingTypeDescription::Optional(Box::new(inner.to_existing_type()))
            }
            TypeUsage::Array(inner) => {
                ExistingTypeDescription::Array(Box::new(inner.to_existing_type()))
            }
            TypeUsage::DictionaryValue(inner) => {
                ExistingTypeDescription::DictionaryValue(Box::new(inner.to_existing_type()))
            }
        }
    }

    /// The Swift spelling, e.g. `[Components.Schemas.Pet]?`.
    pub fn fully_qualified_swift_name(&self) -> String {
        match self {
            TypeUsage::Name(name) => name.fully_qualified_swift_name(),
            TypeUsage::Optional(inner) => format!("{}?", inner.fully_qualified_swift_name()),
            TypeUsage::Array(inner) => format!("[{}]", inner.fully_qualified_swift_name()),
            TypeUsage::DictionaryValue(inner) => {
                format!("[Swift.String: {}]", inner.fully_qualified_swift_name())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_optional_is_idempotent() {
        let usage = TypeUsage::from(TypeName::string()).with_optional(true);
        assert!(usage.is_optional());
        assert_eq!(usage.clone().with_optional(true), usage);
        assert_eq!(usage.fully_qualified_swift_name(), "Swift.String?");
    }

    #[test]
    fn test_modifiers_nest() {
        let usage = TypeUsage::from(TypeName::int())
            .as_dictionary_value()
            .as_array()
            .with_optional(true);
        assert_eq!(
            usage.fully_qualified_swift_name(),
            "[[Swift.String: Swift.Int]]?"
        );
        assert_eq!(usage.base_type(), &TypeName::int());
        assert!(!TypeUsage::from(TypeName::int()).with_optional(false).is_optional());
    }
}
