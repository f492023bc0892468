#![deny(missing_docs)]

//! # Components File
//!
//! Assembles the `Components` namespace of a document into one source file:
//! every schema component (plus anything they reference) under
//! `Components.Schemas`, and every response component under
//! `Components.Responses`.
//!
//! Response components are translated in parallel against one shared
//! [`ComponentRegistry`]; results are collected in document order and schema
//! declarations drain from the registry sorted by name, so the output does not
//! depend on scheduling.

use rayon::prelude::*;
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::AppResult;
use crate::ir::{
    CodeBlock, Comment, Declaration, EnumDescription, FileDescription, ImportDescription,
    Preconcurrency,
};
use crate::oas::{ComponentKey, ComponentSection, Document};
use crate::translator::registry::ComponentRegistry;
use crate::translator::responses::ResponseTranslator;
use crate::translator::type_name::TypeName;
use crate::translator::type_resolver::TypeResolver;

/// Translates the components section of a document into a file.
#[derive(Debug, Clone, Copy)]
pub struct ComponentsFileTranslator<'a> {
    document: &'a Document,
    config: &'a GeneratorConfig,
}

impl<'a> ComponentsFileTranslator<'a> {
    /// A translator for `document`.
    pub fn new(document: &'a Document, config: &'a GeneratorConfig) -> Self {
        Self { document, config }
    }

    /// The imports every generated components file starts with.
    pub fn imports() -> Vec<ImportDescription> {
        vec![
            ImportDescription {
                spi: Some("Generated".into()),
                ..ImportDescription::new("OpenAPIRuntime")
            },
            ImportDescription {
                preconcurrency: Preconcurrency::OnOs(vec!["Linux".into()]),
                ..ImportDescription::new("Foundation")
            },
        ]
    }

    /// Translates all schema and response components.
    pub fn translate(&self) -> AppResult<FileDescription> {
        let registry = ComponentRegistry::new();
        let resolver = TypeResolver::new(self.document, &registry, self.config);

        for (name, _) in self.document.schemas() {
            resolver.resolve_component(&ComponentKey::schema(name.clone()))?;
        }

        let responses: Vec<_> = self.document.responses().collect();
        let translator = ResponseTranslator::new(resolver);
        let response_declarations = responses
            .par_iter()
            .map(|(name, response)| translator.translate_response_component(name, response))
            .collect::<AppResult<Vec<Declaration>>>()?;

        let schema_declarations = registry.take_declarations(ComponentSection::Schemas);
        debug!(
            schemas = schema_declarations.len(),
            responses = response_declarations.len(),
            "assembled components file"
        );

        let components = self.namespace(
            &TypeName::components(),
            "Types generated from the components section of the OpenAPI document.",
            vec![
                Declaration::Comment(Comment::Mark {
                    text: "Schemas".into(),
                    section_break: true,
                }),
                self.namespace(
                    &TypeName::schemas(),
                    "Types generated from the `#/components/schemas` section of the OpenAPI document.",
                    schema_declarations,
                ),
                Declaration::Comment(Comment::Mark {
                    text: "Responses".into(),
                    section_break: true,
                }),
                self.namespace(
                    &TypeName::responses(),
                    "Types generated from the `#/components/responses` section of the OpenAPI document.",
                    response_declarations,
                ),
            ],
        );

        Ok(FileDescription {
            top_comment: Some(Comment::Inline(self.config.top_comment.clone())),
            imports: Self::imports(),
            code_blocks: vec![CodeBlock::declaration(components)],
        })
    }

    fn namespace(&self, type_name: &TypeName, doc: &str, members: Vec<Declaration>) -> Declaration {
        Declaration::Enum(EnumDescription {
            access: Some(self.config.access_modifier),
            members,
            ..EnumDescription::new(type_name.short_swift_name())
        })
        .with_doc(doc)
    }
}
