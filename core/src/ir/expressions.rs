#![deny(missing_docs)]

//! # Expressions
//!
//! Expression and statement nodes used inside function bodies, getters,
//! default values and literals.

use crate::ir::declarations::Declaration;

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralDescription {
    /// A string literal, e.g. `"hi"` or `#"say "hi""#`.
    String(String),
    /// An integer literal.
    Int(i64),
    /// A boolean literal.
    Bool(bool),
    /// The absent value, `nil`.
    Nil,
    /// An array literal.
    Array(Vec<Expression>),
}

/// Member access, `left.right`, or `.right` when the base is implicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberAccess {
    /// The base expression; `None` renders the implicit-member form.
    pub left: Option<Box<Expression>>,
    /// The member name.
    pub right: String,
}

/// One argument of a function call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionArgument {
    /// Argument label; `None` for unlabeled arguments.
    pub label: Option<String>,
    /// The argument value.
    pub expression: Expression,
}

impl FunctionArgument {
    /// Creates a labeled argument.
    pub fn labeled(label: impl Into<String>, expression: Expression) -> Self {
        Self {
            label: Some(label.into()),
            expression,
        }
    }

    /// Creates an unlabeled argument.
    pub fn unlabeled(expression: Expression) -> Self {
        Self {
            label: None,
            expression,
        }
    }
}

/// A Swift expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// A literal value.
    Literal(LiteralDescription),
    /// A bare identifier, e.g. `foo`.
    Identifier(String),
    /// `left.right`.
    MemberAccess(MemberAccess),
    /// `callee(label: value, ...)`.
    FunctionCall {
        /// The called expression.
        called: Box<Expression>,
        /// Arguments in call order.
        arguments: Vec<FunctionArgument>,
    },
    /// `left = right`.
    Assignment {
        /// Assignment target.
        left: Box<Expression>,
        /// Assigned value.
        right: Box<Expression>,
    },
    /// `try expr`.
    Try(Box<Expression>),
    /// `await expr`.
    Await(Box<Expression>),
    /// `return` or `return expr`.
    Return(Option<Box<Expression>>),
}

impl Expression {
    /// `nil`.
    pub fn nil() -> Self {
        Expression::Literal(LiteralDescription::Nil)
    }

    /// A string literal.
    pub fn string(value: impl Into<String>) -> Self {
        Expression::Literal(LiteralDescription::String(value.into()))
    }

    /// An identifier.
    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier(name.into())
    }

    /// `self.dot(member)`.
    pub fn dot(self, member: impl Into<String>) -> Self {
        Expression::MemberAccess(MemberAccess {
            left: Some(Box::new(self)),
            right: member.into(),
        })
    }

    /// The implicit-member form `.member`.
    pub fn implicit_member(member: impl Into<String>) -> Self {
        Expression::MemberAccess(MemberAccess {
            left: None,
            right: member.into(),
        })
    }

    /// `self(arguments)`.
    pub fn call(self, arguments: Vec<FunctionArgument>) -> Self {
        Expression::FunctionCall {
            called: Box::new(self),
            arguments,
        }
    }

    /// `self = right`.
    pub fn assign(self, right: Expression) -> Self {
        Expression::Assignment {
            left: Box::new(self),
            right: Box::new(right),
        }
    }
}

/// The item carried by a code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeBlockItem {
    /// A nested declaration.
    Declaration(Declaration),
    /// An expression statement.
    Expression(Expression),
}

/// One statement in a body, or one top-level block of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Comment rendered right above the item.
    pub comment: Option<crate::ir::Comment>,
    /// The item itself.
    pub item: CodeBlockItem,
}

impl CodeBlock {
    /// A code block holding a declaration.
    pub fn declaration(declaration: Declaration) -> Self {
        Self {
            comment: None,
            item: CodeBlockItem::Declaration(declaration),
        }
    }

    /// A code block holding an expression.
    pub fn expression(expression: Expression) -> Self {
        Self {
            comment: None,
            item: CodeBlockItem::Expression(expression),
        }
    }

    /// Returns the block with a leading comment.
    pub fn with_comment(mut self, comment: crate::ir::Comment) -> Self {
        self.comment = Some(comment);
        self
    }
}
