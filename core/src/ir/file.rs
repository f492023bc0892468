#![deny(missing_docs)]

//! # Files
//!
//! Import statements and the top-level shape of a generated source file.

use crate::ir::declarations::Comment;
use crate::ir::expressions::CodeBlock;

/// When an import gets the `@preconcurrency` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preconcurrency {
    /// Never annotated.
    Never,
    /// Always annotated.
    Always,
    /// Annotated only when compiling for one of the listed operating systems.
    OnOs(Vec<String>),
}

/// An `import` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDescription {
    /// Imported module.
    pub module_name: String,
    /// Optional `@_spi(...)` name.
    pub spi: Option<String>,
    /// Concurrency annotation policy.
    pub preconcurrency: Preconcurrency,
}

impl ImportDescription {
    /// A plain `import module`.
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            spi: None,
            preconcurrency: Preconcurrency::Never,
        }
    }
}

/// A whole source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescription {
    /// Comment emitted before the imports.
    pub top_comment: Option<Comment>,
    /// Imports in emission order.
    pub imports: Vec<ImportDescription>,
    /// Top-level code blocks.
    pub code_blocks: Vec<CodeBlock>,
}
