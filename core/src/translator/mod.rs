#![deny(missing_docs)]

//! # Translators
//!
//! Turn OpenAPI document fragments into Declaration IR.
//!
//! - **type_name / type_usage**: how generated and built-in types are named
//!   and referenced.
//! - **type_resolver**: schema node to type usage, synthesizing inline and
//!   component declarations.
//! - **schemas**: lowering of records, string enums and compositions.
//! - **content**: content entries paired with their payload types.
//! - **responses**: response objects to `Headers`/`Body` records.
//! - **components**: the whole `Components` namespace as one file.
//! - **registry**: shared, thread-safe component naming and collection.
//! - **blueprints**: record descriptions lowered into struct declarations.

pub mod blueprints;
pub mod components;
pub mod content;
pub mod registry;
pub mod responses;
pub(crate) mod schemas;
pub mod type_name;
pub mod type_resolver;
pub mod type_usage;

pub use blueprints::{PropertyBlueprint, PropertyDefault, StructBlueprint};
pub use components::ComponentsFileTranslator;
pub use content::{ContentKind, TypedContent};
pub use registry::ComponentRegistry;
pub use responses::ResponseTranslator;
pub use type_name::{TypeName, TypeNameComponent};
pub use type_resolver::{ResolvedType, TypeResolver};
pub use type_usage::TypeUsage;
