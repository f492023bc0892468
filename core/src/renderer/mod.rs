#![deny(missing_docs)]

//! # Text Renderer
//!
//! Serializes Declaration IR into formatted Swift source.
//!
//! Every IR node implements [`Render`], which writes the node into a
//! [`RenderPass`]. [`TextRenderer::render`] creates a fresh pass per call, so
//! rendering is a pure function of the IR: the same tree always yields
//! byte-identical text and no state carries over between invocations.
//!
//! ```
//! use oasgen_core::ir::{Declaration, StructDescription};
//! use oasgen_core::renderer::TextRenderer;
//!
//! let decl = Declaration::Struct(StructDescription::new("Foo"));
//! assert_eq!(TextRenderer::default().render(&decl).unwrap(), "struct Foo {}");
//! ```

mod declarations;
mod expressions;
mod file;
mod writer;

use tracing::trace;

use crate::config::GeneratorConfig;
use crate::error::RenderPrecondition;

pub(crate) use writer::LineWriter;

/// Maximum width of a single-line array literal.
pub(crate) const MAX_INLINE_ARRAY_WIDTH: usize = 80;

/// An IR node that knows how to write itself as Swift source.
pub trait Render {
    /// Writes `self` into `pass`, failing if the node violates an IR invariant.
    fn render_into(&self, pass: &mut RenderPass) -> Result<(), RenderPrecondition>;
}

impl<T: Render> Render for [T] {
    fn render_into(&self, pass: &mut RenderPass) -> Result<(), RenderPrecondition> {
        for item in self {
            item.render_into(pass)?;
        }
        Ok(())
    }
}

impl<T: Render> Render for Vec<T> {
    fn render_into(&self, pass: &mut RenderPass) -> Result<(), RenderPrecondition> {
        self.as_slice().render_into(pass)
    }
}

/// The transient state of one render invocation.
#[derive(Debug)]
pub struct RenderPass {
    pub(crate) writer: LineWriter,
    pub(crate) trailing_newline: bool,
}

impl RenderPass {
    fn new(indentation: usize) -> Self {
        Self {
            writer: LineWriter::new(indentation),
            trailing_newline: false,
        }
    }

    /// Renders `node` in an isolated pass with the same indentation width and
    /// returns its lines.
    pub(crate) fn lines_of<T: Render + ?Sized>(
        &self,
        node: &T,
    ) -> Result<Vec<String>, RenderPrecondition> {
        let mut nested = RenderPass::new(self.writer.indentation());
        node.render_into(&mut nested)?;
        Ok(nested.writer.into_lines())
    }

    /// Renders `node` in an isolated pass and appends it to the current line.
    pub(crate) fn append_node<T: Render + ?Sized>(
        &mut self,
        node: &T,
    ) -> Result<(), RenderPrecondition> {
        let lines = self.lines_of(node)?;
        self.writer.next_line_appends_to_last();
        self.writer.write_lines(lines);
        Ok(())
    }

    fn finish(self) -> String {
        let mut text = self.writer.contents();
        if self.trailing_newline && !text.ends_with('\n') {
            text.push('\n');
        }
        text
    }
}

/// Deterministic IR-to-text renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRenderer {
    indentation: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self { indentation: 4 }
    }
}

impl TextRenderer {
    /// A renderer indenting each level by `indentation` spaces.
    pub fn new(indentation: usize) -> Self {
        Self { indentation }
    }

    /// A renderer using the configured indentation width.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.indentation)
    }

    /// Renders one expression, declaration, code block sequence or file.
    ///
    /// Files end with a single trailing newline; every other unit is returned
    /// without one.
    pub fn render<T: Render + ?Sized>(&self, unit: &T) -> Result<String, RenderPrecondition> {
        trace!(indentation = self.indentation, "rendering unit");
        let mut pass = RenderPass::new(self.indentation);
        unit.render_into(&mut pass)?;
        Ok(pass.finish())
    }
}

/// Fails when `identifier` is empty.
pub(crate) fn require_identifier(
    construct: &'static str,
    identifier: &str,
) -> Result<(), RenderPrecondition> {
    if identifier.is_empty() {
        return Err(RenderPrecondition::new(construct, "identifier must not be empty"));
    }
    Ok(())
}
