#![deny(missing_docs)]

//! # Declaration IR
//!
//! The closed vocabulary of Swift constructs the generator can emit. This is the
//! single contract between the translators and the renderer: translators build
//! these value trees, the renderer turns them into text. Nothing here has
//! behavior beyond construction helpers; equality is structural.
//!
//! - **declarations**: records, tagged unions, interfaces, aliases, functions,
//!   bindings, extensions, comments and groups.
//! - **expressions**: literals, identifiers, calls, and the code block items
//!   that make up function and getter bodies.
//! - **file**: imports and whole-file assembly.

pub mod declarations;
pub mod expressions;
pub mod file;

pub use declarations::{
    AccessModifier, BindingKind, Comment, Declaration, DeprecationDescription,
    EnumCaseAssociatedValue, EnumCaseDescription, EnumCaseKind, EnumDescription,
    ExistingTypeDescription, ExtensionDescription, FunctionDescription, FunctionKeyword,
    FunctionKind, ParameterDescription, ProtocolDescription, StructDescription,
    TypealiasDescription, VariableDescription,
};
pub use expressions::{
    CodeBlock, CodeBlockItem, Expression, FunctionArgument, LiteralDescription, MemberAccess,
};
pub use file::{FileDescription, ImportDescription, Preconcurrency};
