#![deny(missing_docs)]

//! # oasgen core
//!
//! Core library of the OpenAPI to Swift generator.
//!
//! Translation and rendering are two separate stages joined by the
//! Declaration IR:
//!
//! 1. [`oas::Document`] wraps a parsed OpenAPI 3 document.
//! 2. The [`translator`] module maps schemas and responses to IR trees.
//! 3. The [`renderer`] turns IR trees into Swift source text.
//!
//! ```
//! use oasgen_core::{generate_components_source, GeneratorConfig};
//!
//! let yaml = r#"
//! openapi: 3.0.3
//! info: { title: Pets, version: '1' }
//! paths: {}
//! components:
//!   schemas:
//!     Name:
//!       type: string
//! "#;
//! let source = generate_components_source(yaml, &GeneratorConfig::default()).unwrap();
//! assert!(source.contains("public typealias Name = Swift.String"));
//! ```

/// Generator configuration.
pub mod config;

/// Shared error types.
pub mod error;

/// Declaration IR.
pub mod ir;

/// Swift identifier derivation.
pub mod naming;

/// OpenAPI document access.
pub mod oas;

/// IR to text rendering.
pub mod renderer;

/// Document to IR translation.
pub mod translator;

pub use config::GeneratorConfig;
pub use error::{AppError, AppResult, NamingCollisionError, RenderPrecondition, ResolutionError};
pub use oas::Document;
pub use renderer::{Render, TextRenderer};
pub use translator::{ComponentsFileTranslator, ResponseTranslator, TypeResolver};

/// Parses a YAML or JSON document and renders its components file.
pub fn generate_components_source(source: &str, config: &GeneratorConfig) -> AppResult<String> {
    let document = if source.trim_start().starts_with('{') {
        Document::from_json_str(source)?
    } else {
        Document::from_yaml_str(source)?
    };
    render_components(&document, config)
}

/// Renders the components file of an already parsed document.
pub fn render_components(document: &Document, config: &GeneratorConfig) -> AppResult<String> {
    let file = ComponentsFileTranslator::new(document, config).translate()?;
    Ok(TextRenderer::from_config(config).render(&file)?)
}
