#![deny(missing_docs)]

//! # Component Registry
//!
//! Maps reusable components to their assigned [`TypeName`] and collects the
//! declarations synthesized for them.
//!
//! The registry is passed by reference into every resolver. All state sits
//! behind one `Mutex`, so translations running on different threads agree on
//! names, and exactly one of them (the first to call [`ComponentRegistry::assign`]
//! for a key) synthesizes the component's declaration. Translation itself runs
//! outside the lock.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::error::{AppError, NamingCollisionError};
use crate::ir::Declaration;
use crate::naming::swift_safe_name;
use crate::oas::ref_utils::encode_pointer_segment;
use crate::oas::{ComponentKey, ComponentSection};
use crate::translator::type_name::TypeName;

#[derive(Debug, Default)]
struct RegistryState {
    assigned: HashMap<ComponentKey, TypeName>,
    /// (section, swift name) -> the component name that claimed it.
    swift_names: HashMap<(ComponentSection, String), String>,
    /// Keyed by (section, swift name) so draining is sorted by name.
    declarations: BTreeMap<(ComponentSection, String), Declaration>,
    failures: HashMap<ComponentKey, AppError>,
}

/// Shared registry of component type names and synthesized declarations.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    state: Mutex<RegistryState>,
}

fn namespace(section: ComponentSection) -> TypeName {
    match section {
        ComponentSection::Schemas => TypeName::schemas(),
        ComponentSection::Responses => TypeName::responses(),
        ComponentSection::Headers => TypeName::components().appending("Headers", Some("headers")),
    }
}

impl ComponentRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the type name for `key` and whether this call made the first
    /// assignment. Only the first caller should synthesize the declaration.
    pub fn assign(&self, key: &ComponentKey) -> Result<(TypeName, bool), NamingCollisionError> {
        let mut state = self.lock();
        if let Some(existing) = state.assigned.get(key) {
            return Ok((existing.clone(), false));
        }
        let swift = swift_safe_name(&key.name);
        let slot = (key.section, swift.clone());
        if let Some(first) = state.swift_names.get(&slot) {
            return Err(NamingCollisionError {
                identifier: swift,
                first: first.clone(),
                second: key.name.clone(),
                scope: namespace(key.section).fully_qualified_swift_name(),
            });
        }
        let type_name = namespace(key.section).appending(
            swift.clone(),
            Some(&encode_pointer_segment(&key.name)),
        );
        debug!(component = %key, type_name = %type_name, "assigned component type name");
        state.swift_names.insert(slot, key.name.clone());
        state.assigned.insert(key.clone(), type_name.clone());
        Ok((type_name, true))
    }

    /// Claims `swift`, a name synthesized inside `section` on behalf of
    /// `owner`, so no component or other synthesized type can take it.
    pub fn reserve(
        &self,
        section: ComponentSection,
        swift: &str,
        owner: &str,
    ) -> Result<(), NamingCollisionError> {
        let mut state = self.lock();
        let slot = (section, swift.to_string());
        if let Some(first) = state.swift_names.get(&slot) {
            return Err(NamingCollisionError {
                identifier: swift.to_string(),
                first: first.clone(),
                second: owner.to_string(),
                scope: namespace(section).fully_qualified_swift_name(),
            });
        }
        debug!(owner, type_name = swift, "reserved synthesized type name");
        state.swift_names.insert(slot, owner.to_string());
        Ok(())
    }

    /// Stores the declaration synthesized for `key`.
    pub fn store(&self, key: &ComponentKey, declaration: Declaration) {
        let mut state = self.lock();
        let swift = swift_safe_name(&key.name);
        state.declarations.insert((key.section, swift), declaration);
    }

    /// Records that synthesizing `key` failed, so later lookups report the same error.
    pub fn record_failure(&self, key: &ComponentKey, error: AppError) {
        self.lock().failures.insert(key.clone(), error);
    }

    /// The recorded failure for `key`, if synthesizing it failed.
    pub fn failure(&self, key: &ComponentKey) -> Option<AppError> {
        self.lock().failures.get(key).cloned()
    }

    /// Number of declarations currently stored.
    pub fn declaration_count(&self) -> usize {
        self.lock().declarations.len()
    }

    /// Removes and returns the stored declarations of `section`, sorted by type name.
    pub fn take_declarations(&self, section: ComponentSection) -> Vec<Declaration> {
        let mut state = self.lock();
        let keys: Vec<(ComponentSection, String)> = state
            .declarations
            .keys()
            .filter(|(s, _)| *s == section)
            .cloned()
            .collect();
        keys.into_iter()
            .filter_map(|key| state.declarations.remove(&key))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::StructDescription;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_first_assignment_wins() {
        let registry = ComponentRegistry::new();
        let key = ComponentKey::schema("Pet");
        let (first, is_first) = registry.assign(&key).unwrap();
        let (second, again) = registry.assign(&key).unwrap();
        assert!(is_first);
        assert!(!again);
        assert_eq!(first, second);
        assert_eq!(first.fully_qualified_swift_name(), "Components.Schemas.Pet");
    }

    #[test]
    fn test_reserved_name_blocks_component() {
        let registry = ComponentRegistry::new();
        registry
            .reserve(ComponentSection::Schemas, "PetsPayload", "Pets")
            .unwrap();
        let err = registry
            .assign(&ComponentKey::schema("PetsPayload"))
            .unwrap_err();
        assert_eq!(err.identifier, "PetsPayload");
        assert_eq!(err.first, "Pets");
        assert_eq!(err.second, "PetsPayload");
        assert!(registry
            .reserve(ComponentSection::Responses, "PetsPayload", "Pets")
            .is_ok());
    }

    #[test]
    fn test_component_name_blocks_reservation() {
        let registry = ComponentRegistry::new();
        registry.assign(&ComponentKey::schema("PetsPayload")).unwrap();
        let err = registry
            .reserve(ComponentSection::Schemas, "PetsPayload", "Pets")
            .unwrap_err();
        assert_eq!(err.first, "PetsPayload");
        assert_eq!(err.second, "Pets");
    }

    #[test]
    fn test_failures_are_remembered_per_key() {
        let registry = ComponentRegistry::new();
        let key = ComponentKey::schema("Pet");
        let collision = NamingCollisionError {
            identifier: "xId".into(),
            first: "X-Id".into(),
            second: "x_id".into(),
            scope: "Components.Schemas.Pet".into(),
        };
        registry.record_failure(&key, collision.clone().into());
        assert!(matches!(
            registry.failure(&key),
            Some(AppError::NamingCollision(ref e)) if *e == collision
        ));
        assert!(registry.failure(&ComponentKey::schema("Other")).is_none());
    }

    #[test]
    fn test_colliding_safe_names_are_rejected() {
        let registry = ComponentRegistry::new();
        registry.assign(&ComponentKey::schema("Pet-Store")).unwrap();
        let err = registry
            .assign(&ComponentKey::schema("Pet Store"))
            .unwrap_err();
        assert_eq!(err.identifier, "Pet_Store");
        assert_eq!(err.first, "Pet-Store");
        assert_eq!(err.second, "Pet Store");
    }

    #[test]
    fn test_sections_do_not_collide() {
        let registry = ComponentRegistry::new();
        registry.assign(&ComponentKey::schema("Pet")).unwrap();
        let (name, is_first) = registry.assign(&ComponentKey::response("Pet")).unwrap();
        assert!(is_first);
        assert_eq!(name.fully_qualified_swift_name(), "Components.Responses.Pet");
    }

    #[test]
    fn test_declarations_drain_sorted() {
        let registry = ComponentRegistry::new();
        for name in ["Zebra", "Apple", "Mango"] {
            let key = ComponentKey::schema(name);
            registry.assign(&key).unwrap();
            registry.store(&key, Declaration::Struct(StructDescription::new(name)));
        }
        let names: Vec<String> = registry
            .take_declarations(ComponentSection::Schemas)
            .iter()
            .filter_map(|d| d.name().map(String::from))
            .collect();
        assert_eq!(names, vec!["Apple", "Mango", "Zebra"]);
        assert_eq!(registry.declaration_count(), 0);
    }

    #[test]
    fn test_parallel_assignment_has_one_winner() {
        let registry = Arc::new(ComponentRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.assign(&ComponentKey::schema("Shared")).unwrap())
            })
            .collect();
        let results: Vec<(TypeName, bool)> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results.iter().filter(|(_, first)| *first).count(), 1);
        assert!(results.windows(2).all(|w| w[0].0 == w[1].0));
    }
}
