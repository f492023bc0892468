//! Rendering of literals, expressions and code blocks.

use crate::error::RenderPrecondition;
use crate::ir::{
    CodeBlock, CodeBlockItem, Expression, FunctionArgument, LiteralDescription, MemberAccess,
};
use crate::renderer::{require_identifier, Render, RenderPass, MAX_INLINE_ARRAY_WIDTH};

/// Quotes `value` as a Swift string literal.
///
/// Values containing `"` use the raw form `#"..."#` with as many `#` as needed
/// so that neither the terminator nor an escape sequence occurs in the value.
pub(crate) fn string_literal(value: &str) -> String {
    if value.contains('"') {
        let mut hashes = String::from("#");
        while value.contains(&format!("\"{hashes}")) || value.contains(&format!("\\{hashes}")) {
            hashes.push('#');
        }
        let body = value
            .replace('\n', &format!("\\{hashes}n"))
            .replace('\r', &format!("\\{hashes}r"));
        format!("{hashes}\"{body}\"{hashes}")
    } else {
        let mut escaped = String::with_capacity(value.len() + 2);
        escaped.push('"');
        for c in value.chars() {
            match c {
                '\\' => escaped.push_str("\\\\"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                '\0' => escaped.push_str("\\0"),
                other => escaped.push(other),
            }
        }
        escaped.push('"');
        escaped
    }
}

impl Render for LiteralDescription {
    fn render_into(&self, pass: &mut RenderPass) -> Result<(), RenderPrecondition> {
        match self {
            LiteralDescription::String(value) => pass.writer.write_line(&string_literal(value)),
            LiteralDescription::Int(value) => pass.writer.write_line(&value.to_string()),
            LiteralDescription::Bool(value) => pass.writer.write_line(&value.to_string()),
            LiteralDescription::Nil => pass.writer.write_line("nil"),
            LiteralDescription::Array(items) => render_array(items, pass)?,
        }
        Ok(())
    }
}

fn render_array(items: &[Expression], pass: &mut RenderPass) -> Result<(), RenderPrecondition> {
    if items.is_empty() {
        pass.writer.write_line("[]");
        return Ok(());
    }
    let rendered = items
        .iter()
        .map(|item| pass.lines_of(item))
        .collect::<Result<Vec<_>, _>>()?;
    let single_line = rendered.iter().all(|lines| lines.len() == 1);
    if single_line {
        let joined = rendered
            .iter()
            .map(|lines| lines[0].as_str())
            .collect::<Vec<_>>()
            .join(", ");
        if joined.len() + 2 <= MAX_INLINE_ARRAY_WIDTH {
            pass.writer.write_line(&format!("[{joined}]"));
            return Ok(());
        }
    }
    pass.writer.write_line("[");
    let count = rendered.len();
    pass.writer.with_nested_level(|writer| {
        for (index, lines) in rendered.into_iter().enumerate() {
            writer.write_lines(lines);
            if index + 1 < count {
                writer.append(",");
            }
        }
    });
    pass.writer.write_line("]");
    Ok(())
}

impl Render for MemberAccess {
    fn render_into(&self, pass: &mut RenderPass) -> Result<(), RenderPrecondition> {
        require_identifier("member access", &self.right)?;
        match &self.left {
            Some(left) => {
                left.render_into(pass)?;
                pass.writer.append(&format!(".{}", self.right));
            }
            None => pass.writer.write_line(&format!(".{}", self.right)),
        }
        Ok(())
    }
}

impl Render for FunctionArgument {
    fn render_into(&self, pass: &mut RenderPass) -> Result<(), RenderPrecondition> {
        match &self.label {
            Some(label) => {
                require_identifier("function argument", label)?;
                pass.writer.write_line(&format!("{label}: "));
                pass.append_node(&self.expression)
            }
            None => self.expression.render_into(pass),
        }
    }
}

fn render_call(
    called: &Expression,
    arguments: &[FunctionArgument],
    pass: &mut RenderPass,
) -> Result<(), RenderPrecondition> {
    called.render_into(pass)?;
    pass.writer.append("(");
    match arguments {
        [] => {}
        [only] => pass.append_node(only)?,
        many => {
            let count = many.len();
            let rendered = many
                .iter()
                .map(|argument| pass.lines_of(argument))
                .collect::<Result<Vec<_>, _>>()?;
            pass.writer.with_nested_level(|writer| {
                for (index, lines) in rendered.into_iter().enumerate() {
                    writer.write_lines(lines);
                    if index + 1 < count {
                        writer.append(",");
                    }
                }
            });
            pass.writer.write_line(")");
            return Ok(());
        }
    }
    pass.writer.append(")");
    Ok(())
}

impl Render for Expression {
    fn render_into(&self, pass: &mut RenderPass) -> Result<(), RenderPrecondition> {
        match self {
            Expression::Literal(literal) => literal.render_into(pass),
            Expression::Identifier(name) => {
                require_identifier("identifier", name)?;
                pass.writer.write_line(name);
                Ok(())
            }
            Expression::MemberAccess(access) => access.render_into(pass),
            Expression::FunctionCall { called, arguments } => render_call(called, arguments, pass),
            Expression::Assignment { left, right } => {
                left.render_into(pass)?;
                pass.writer.append(" = ");
                pass.append_node(right.as_ref())
            }
            Expression::Try(inner) => {
                pass.writer.write_line("try ");
                pass.append_node(inner.as_ref())
            }
            Expression::Await(inner) => {
                pass.writer.write_line("await ");
                pass.append_node(inner.as_ref())
            }
            Expression::Return(value) => match value {
                Some(value) => {
                    pass.writer.write_line("return ");
                    pass.append_node(value.as_ref())
                }
                None => {
                    pass.writer.write_line("return");
                    Ok(())
                }
            },
        }
    }
}

impl Render for CodeBlockItem {
    fn render_into(&self, pass: &mut RenderPass) -> Result<(), RenderPrecondition> {
        match self {
            CodeBlockItem::Declaration(declaration) => declaration.render_into(pass),
            CodeBlockItem::Expression(expression) => expression.render_into(pass),
        }
    }
}

impl Render for CodeBlock {
    fn render_into(&self, pass: &mut RenderPass) -> Result<(), RenderPrecondition> {
        if let Some(comment) = &self.comment {
            comment.render_into(pass)?;
        }
        self.item.render_into(pass)
    }
}
