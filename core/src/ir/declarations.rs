#![deny(missing_docs)]

//! # Declarations
//!
//! Every construct that can appear at file scope or as a member of a type.
//! `Declaration` is a closed sum type: the renderer matches on it exhaustively,
//! so adding a construct is a compiler-checked change everywhere it is handled.
//! Nested declarations are owned by value by their parent; there are no
//! back-references.

use serde::{Deserialize, Serialize};

use crate::ir::expressions::{CodeBlock, Expression, LiteralDescription};

/// Access-visibility of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessModifier {
    /// `public`
    Public,
    /// `internal` (module-internal)
    Internal,
    /// `fileprivate`
    FilePrivate,
    /// `private`
    Private,
}

/// A comment node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comment {
    /// `// text`, one marker per line.
    Inline(String),
    /// `/// text`, one marker per line.
    Doc(String),
    /// `// MARK: text`, or `// MARK: - text` when `section_break` is set.
    Mark {
        /// The marker title.
        text: String,
        /// Renders the stronger visual separator.
        section_break: bool,
    },
}

/// A reference to an existing type, as written in source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExistingTypeDescription {
    /// A dot-separated member path, e.g. `Swift.String`.
    Member(Vec<String>),
    /// `T?`
    Optional(Box<ExistingTypeDescription>),
    /// `[T]`
    Array(Box<ExistingTypeDescription>),
    /// `[String: T]`
    DictionaryValue(Box<ExistingTypeDescription>),
}

impl ExistingTypeDescription {
    /// A type named by a single identifier.
    pub fn named(name: impl Into<String>) -> Self {
        ExistingTypeDescription::Member(vec![name.into()])
    }
}

/// `@available(*, deprecated, ...)`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeprecationDescription {
    /// Optional `message:` argument.
    pub message: Option<String>,
    /// Optional `renamed:` argument.
    pub renamed: Option<String>,
}

/// `let` or `var`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// `var`
    Var,
    /// `let`
    Let,
}

/// An effect annotation on a function or getter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FunctionKeyword {
    /// `async` ("suspends").
    Async,
    /// `throws` ("may fail").
    Throws,
    /// `rethrows`.
    Rethrows,
}

/// A variable or constant binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDescription {
    /// Access modifier.
    pub access: Option<AccessModifier>,
    /// Whether the binding is `static`.
    pub is_static: bool,
    /// `let` or `var`.
    pub kind: BindingKind,
    /// The bound name.
    pub left: String,
    /// Type annotation.
    pub ty: Option<ExistingTypeDescription>,
    /// Initial value.
    pub right: Option<Expression>,
    /// Computed-property body.
    pub getter: Option<Vec<CodeBlock>>,
    /// Effects of the computed getter.
    pub getter_effects: Vec<FunctionKeyword>,
}

impl VariableDescription {
    /// A bare binding with no type, value or getter.
    pub fn new(kind: BindingKind, left: impl Into<String>) -> Self {
        Self {
            access: None,
            is_static: false,
            kind,
            left: left.into(),
            ty: None,
            right: None,
            getter: None,
            getter_effects: Vec::new(),
        }
    }
}

/// Scoped extension of an existing named type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionDescription {
    /// Access modifier.
    pub access: Option<AccessModifier>,
    /// The extended type.
    pub on_type: String,
    /// Added conformances.
    pub conformances: Vec<String>,
    /// Members.
    pub declarations: Vec<Declaration>,
}

/// A record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDescription {
    /// Access modifier.
    pub access: Option<AccessModifier>,
    /// Type name (short).
    pub name: String,
    /// Capability conformances, in declaration order.
    pub conformances: Vec<String>,
    /// Members.
    pub members: Vec<Declaration>,
}

impl StructDescription {
    /// An empty record named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            access: None,
            name: name.into(),
            conformances: Vec::new(),
            members: Vec::new(),
        }
    }
}

/// A tagged-union type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescription {
    /// Renders `@frozen`.
    pub is_frozen: bool,
    /// Renders `indirect`.
    pub is_indirect: bool,
    /// Access modifier.
    pub access: Option<AccessModifier>,
    /// Type name (short).
    pub name: String,
    /// Conformances, raw type first when present.
    pub conformances: Vec<String>,
    /// Cases and other members.
    pub members: Vec<Declaration>,
}

impl EnumDescription {
    /// An empty, non-frozen enum named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            is_frozen: false,
            is_indirect: false,
            access: None,
            name: name.into(),
            conformances: Vec::new(),
            members: Vec::new(),
        }
    }
}

/// A capability-interface type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolDescription {
    /// Access modifier.
    pub access: Option<AccessModifier>,
    /// Type name.
    pub name: String,
    /// Inherited protocols.
    pub conformances: Vec<String>,
    /// Requirements.
    pub members: Vec<Declaration>,
}

impl ProtocolDescription {
    /// An empty protocol named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            access: None,
            name: name.into(),
            conformances: Vec::new(),
            members: Vec::new(),
        }
    }
}

/// A type alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypealiasDescription {
    /// Access modifier.
    pub access: Option<AccessModifier>,
    /// Alias name.
    pub name: String,
    /// The aliased type.
    pub existing_type: ExistingTypeDescription,
}

/// A function parameter.
///
/// `label: None` renders `_`; `name: None` omits the inner name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescription {
    /// External argument label.
    pub label: Option<String>,
    /// Internal parameter name.
    pub name: Option<String>,
    /// Parameter type.
    pub ty: ExistingTypeDescription,
    /// Default value.
    pub default_value: Option<Expression>,
}

/// What kind of function is declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionKind {
    /// `init` or `init?`.
    Initializer {
        /// Renders `init?`.
        failable: bool,
    },
    /// `func name` or `static func name`.
    Function {
        /// Function name.
        name: String,
        /// Renders `static`.
        is_static: bool,
    },
}

/// A free function, method or initializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDescription {
    /// Access modifier.
    pub access: Option<AccessModifier>,
    /// Function kind and name.
    pub kind: FunctionKind,
    /// Parameters.
    pub parameters: Vec<ParameterDescription>,
    /// Effect annotations; rendered in a fixed order regardless of input order.
    pub keywords: Vec<FunctionKeyword>,
    /// Return type.
    pub return_type: Option<ExistingTypeDescription>,
    /// Body statements; `None` renders a bodiless requirement.
    pub body: Option<Vec<CodeBlock>>,
}

impl FunctionDescription {
    /// A function named `name` with an empty body.
    pub fn function(name: impl Into<String>) -> Self {
        Self {
            access: None,
            kind: FunctionKind::Function {
                name: name.into(),
                is_static: false,
            },
            parameters: Vec::new(),
            keywords: Vec::new(),
            return_type: None,
            body: Some(Vec::new()),
        }
    }

    /// An initializer with an empty body.
    pub fn initializer() -> Self {
        Self {
            access: None,
            kind: FunctionKind::Initializer { failable: false },
            parameters: Vec::new(),
            keywords: Vec::new(),
            return_type: None,
            body: Some(Vec::new()),
        }
    }
}

/// An associated value slot of an enum case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumCaseAssociatedValue {
    /// Optional slot label.
    pub label: Option<String>,
    /// Slot type.
    pub ty: ExistingTypeDescription,
}

/// The payload shape of an enum case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumCaseKind {
    /// `case foo`
    NameOnly,
    /// `case foo = "bar"`
    RawValue(LiteralDescription),
    /// `case foo(A, label: B)`
    AssociatedValues(Vec<EnumCaseAssociatedValue>),
}

/// A case of a tagged union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumCaseDescription {
    /// Case identifier.
    pub name: String,
    /// Payload shape.
    pub kind: EnumCaseKind,
}

impl EnumCaseDescription {
    /// A case carrying one unlabeled value of type `ty`.
    pub fn with_payload(name: impl Into<String>, ty: ExistingTypeDescription) -> Self {
        Self {
            name: name.into(),
            kind: EnumCaseKind::AssociatedValues(vec![EnumCaseAssociatedValue { label: None, ty }]),
        }
    }
}

/// A Swift declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// A declaration preceded by a comment.
    Commentable(Comment, Box<Declaration>),
    /// A declaration preceded by a deprecation attribute.
    Deprecated(DeprecationDescription, Box<Declaration>),
    /// A standalone comment.
    Comment(Comment),
    /// A variable or constant.
    Variable(VariableDescription),
    /// An extension.
    Extension(ExtensionDescription),
    /// A struct.
    Struct(StructDescription),
    /// An enum.
    Enum(EnumDescription),
    /// A protocol.
    Protocol(ProtocolDescription),
    /// A typealias.
    Typealias(TypealiasDescription),
    /// A function or initializer.
    Function(FunctionDescription),
    /// An enum case.
    EnumCase(EnumCaseDescription),
    /// Sibling declarations rendered in sequence without any enclosing braces.
    Group(Vec<Declaration>),
}

impl Declaration {
    /// Wraps `self` with a comment; `None` leaves it unchanged.
    pub fn commented(self, comment: Option<Comment>) -> Self {
        match comment {
            Some(comment) => Declaration::Commentable(comment, Box::new(self)),
            None => self,
        }
    }

    /// Wraps `self` with a doc comment.
    pub fn with_doc(self, text: impl Into<String>) -> Self {
        Declaration::Commentable(Comment::Doc(text.into()), Box::new(self))
    }

    /// The declaration with comment and deprecation wrappers removed.
    pub fn stripping_wrappers(&self) -> &Declaration {
        match self {
            Declaration::Commentable(_, inner) | Declaration::Deprecated(_, inner) => {
                inner.stripping_wrappers()
            }
            other => other,
        }
    }

    /// The declared type or member name, if this declaration introduces one.
    pub fn name(&self) -> Option<&str> {
        match self.stripping_wrappers() {
            Declaration::Variable(v) => Some(&v.left),
            Declaration::Extension(e) => Some(&e.on_type),
            Declaration::Struct(s) => Some(&s.name),
            Declaration::Enum(e) => Some(&e.name),
            Declaration::Protocol(p) => Some(&p.name),
            Declaration::Typealias(t) => Some(&t.name),
            Declaration::Function(f) => match &f.kind {
                FunctionKind::Function { name, .. } => Some(name),
                FunctionKind::Initializer { .. } => None,
            },
            Declaration::EnumCase(c) => Some(&c.name),
            Declaration::Comment(_)
            | Declaration::Group(_)
            | Declaration::Commentable(..)
            | Declaration::Deprecated(..) => None,
        }
    }
}
