//! # Error Handling
//!
//! Provides the typed failures raised by translation and rendering, and the
//! unified `AppError` enum used across the crate.
//!
//! Resolution and naming failures are recoverable: the caller discards the
//! partially built tree for that unit and reports the error. A
//! `RenderPrecondition` always points at a translator defect and aborts the
//! whole generation run.

use derive_more::{Display, From};

/// A schema construct has no representable target type.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("Unable to resolve `{path}`: {reason}")]
pub struct ResolutionError {
    /// JSON path of the offending node, e.g. `#/components/schemas/Pet`.
    pub path: String,
    /// Name of the component the node belongs to, if any.
    pub component: Option<String>,
    /// Human readable cause.
    pub reason: String,
}

impl ResolutionError {
    /// Creates an error for the node at `path`.
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            component: None,
            reason: reason.into(),
        }
    }

    /// Attaches the owning component name.
    pub fn in_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }
}

/// Two generated identifiers collide after the safe-name transformation.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("Naming collision in {scope}: `{first}` and `{second}` both map to `{identifier}`")]
pub struct NamingCollisionError {
    /// The generated identifier both sources map to.
    pub identifier: String,
    /// Source name seen first.
    pub first: String,
    /// Source name seen second.
    pub second: String,
    /// Where the collision happened, e.g. `Components.Responses.Pet.Headers`.
    pub scope: String,
}

/// The renderer was handed an IR node that violates a structural invariant.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("Render precondition violated for {construct}: {reason}")]
pub struct RenderPrecondition {
    /// The IR construct being rendered.
    pub construct: &'static str,
    /// The violated invariant.
    pub reason: String,
}

impl RenderPrecondition {
    /// Creates a precondition failure for `construct`.
    pub fn new(construct: &'static str, reason: impl Into<String>) -> Self {
        Self {
            construct,
            reason: reason.into(),
        }
    }
}

/// The Global Error Enum.
///
/// Typed failures convert via `From`; text errors must be created explicitly.
#[derive(Debug, Clone, Display, From)]
pub enum AppError {
    /// A schema could not be mapped to a type.
    #[display("{_0}")]
    Resolution(ResolutionError),

    /// Two generated identifiers collided.
    #[display("{_0}")]
    NamingCollision(NamingCollisionError),

    /// The renderer received an invalid IR tree.
    #[display("{_0}")]
    RenderPrecondition(RenderPrecondition),

    /// The input document could not be parsed.
    #[from(ignore)]
    #[display("Document Error: {_0}")]
    Document(String),

    /// The generator configuration could not be parsed.
    #[from(ignore)]
    #[display("Config Error: {_0}")]
    Config(String),
}

impl AppError {
    /// Whether the failure is limited to one generation unit.
    ///
    /// Only `RenderPrecondition` is fatal for the whole run.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AppError::RenderPrecondition(_))
    }
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

impl std::error::Error for ResolutionError {}

impl std::error::Error for NamingCollisionError {}

impl std::error::Error for RenderPrecondition {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
