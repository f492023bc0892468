#![deny(missing_docs)]

//! # OpenAPI Document Model
//!
//! - **document**: the parsed document and its component lookups.
//! - **ref_utils**: local `$ref` parsing and JSON pointer escaping.

pub mod document;
pub(crate) mod ref_utils;

pub use document::{ComponentKey, ComponentSection, Document, SchemaNode};
