#![deny(missing_docs)]

//! # Type Names
//!
//! Hierarchical, dot-addressed Swift type paths. Each component may remember
//! the JSON path segment it was derived from, so diagnostics can point back
//! into the document.

use std::fmt;

use crate::ir::ExistingTypeDescription;

/// One component of a [`TypeName`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeNameComponent {
    /// Swift identifier of this component.
    pub swift: String,
    /// Document path segment, if the component comes from the document.
    pub json: Option<String>,
}

/// A fully qualified Swift type name, e.g. `Components.Schemas.Pet`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName {
    components: Vec<TypeNameComponent>,
}

impl TypeName {
    fn builtin(path: &[&str]) -> Self {
        Self {
            components: path
                .iter()
                .map(|swift| TypeNameComponent {
                    swift: (*swift).to_string(),
                    json: None,
                })
                .collect(),
        }
    }

    /// `Components`, the root namespace of generated component types.
    pub fn components() -> Self {
        Self {
            components: vec![TypeNameComponent {
                swift: "Components".into(),
                json: Some("#/components".into()),
            }],
        }
    }

    /// `Components.Schemas`.
    pub fn schemas() -> Self {
        Self::components().appending("Schemas", Some("schemas"))
    }

    /// `Components.Responses`.
    pub fn responses() -> Self {
        Self::components().appending("Responses", Some("responses"))
    }

    /// `Swift.String`
    pub fn string() -> Self {
        Self::builtin(&["Swift", "String"])
    }

    /// `Swift.Int`
    pub fn int() -> Self {
        Self::builtin(&["Swift", "Int"])
    }

    /// `Swift.Int32`
    pub fn int32() -> Self {
        Self::builtin(&["Swift", "Int32"])
    }

    /// `Swift.Int64`
    pub fn int64() -> Self {
        Self::builtin(&["Swift", "Int64"])
    }

    /// `Swift.Double`
    pub fn double() -> Self {
        Self::builtin(&["Swift", "Double"])
    }

    /// `Swift.Float`
    pub fn float() -> Self {
        Self::builtin(&["Swift", "Float"])
    }

    /// `Swift.Bool`
    pub fn bool() -> Self {
        Self::builtin(&["Swift", "Bool"])
    }

    /// `Foundation.Date`
    pub fn date() -> Self {
        Self::builtin(&["Foundation", "Date"])
    }

    /// `OpenAPIRuntime.Base64EncodedData`
    pub fn base64_encoded_data() -> Self {
        Self::builtin(&["OpenAPIRuntime", "Base64EncodedData"])
    }

    /// `OpenAPIRuntime.HTTPBody`
    pub fn body() -> Self {
        Self::builtin(&["OpenAPIRuntime", "HTTPBody"])
    }

    /// `OpenAPIRuntime.OpenAPIValueContainer`
    pub fn value_container() -> Self {
        Self::builtin(&["OpenAPIRuntime", "OpenAPIValueContainer"])
    }

    /// `OpenAPIRuntime.OpenAPIObjectContainer`
    pub fn object_container() -> Self {
        Self::builtin(&["OpenAPIRuntime", "OpenAPIObjectContainer"])
    }

    /// A child path.
    pub fn appending(&self, swift: impl Into<String>, json: Option<&str>) -> Self {
        let mut components = self.components.clone();
        components.push(TypeNameComponent {
            swift: swift.into(),
            json: json.map(String::from),
        });
        Self { components }
    }

    /// The last Swift component, e.g. `Pet`.
    pub fn short_swift_name(&self) -> &str {
        self.components
            .last()
            .map(|c| c.swift.as_str())
            .unwrap_or_default()
    }

    /// Swift components from the root.
    pub fn swift_components(&self) -> Vec<String> {
        self.components.iter().map(|c| c.swift.clone()).collect()
    }

    /// Dot-joined Swift path, e.g. `Components.Schemas.Pet`.
    pub fn fully_qualified_swift_name(&self) -> String {
        self.swift_components().join(".")
    }

    /// Slash-joined document path of the components that carry one.
    pub fn full_json_path(&self) -> Option<String> {
        let segments: Vec<&str> = self
            .components
            .iter()
            .filter_map(|c| c.json.as_deref())
            .collect();
        if segments.is_empty() {
            None
        } else {
            Some(segments.join("/"))
        }
    }

    /// The IR type reference for this name.
    pub fn to_existing_type(&self) -> ExistingTypeDescription {
        ExistingTypeDescription::Member(self.swift_components())
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fully_qualified_swift_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appending_builds_paths() {
        let pet = TypeName::schemas().appending("Pet", Some("Pet"));
        assert_eq!(pet.fully_qualified_swift_name(), "Components.Schemas.Pet");
        assert_eq!(pet.short_swift_name(), "Pet");
        assert_eq!(
            pet.full_json_path().as_deref(),
            Some("#/components/schemas/Pet")
        );
        let headers = pet.appending("Headers", None);
        assert_eq!(headers.to_string(), "Components.Schemas.Pet.Headers");
        assert_eq!(headers.full_json_path(), pet.full_json_path());
    }

    #[test]
    fn test_builtins_have_no_json_path() {
        assert_eq!(TypeName::string().fully_qualified_swift_name(), "Swift.String");
        assert_eq!(TypeName::body().short_swift_name(), "HTTPBody");
        assert!(TypeName::date().full_json_path().is_none());
    }

    #[test]
    fn test_existing_type_uses_all_components() {
        assert_eq!(
            TypeName::int64().to_existing_type(),
            ExistingTypeDescription::Member(vec!["Swift".into(), "Int64".into()])
        );
    }
}
