//! Rendering of comments, types and declarations.

use crate::error::RenderPrecondition;
use crate::ir::{
    AccessModifier, BindingKind, Comment, Declaration, DeprecationDescription,
    EnumCaseDescription, EnumCaseKind, EnumDescription, ExistingTypeDescription,
    ExtensionDescription, FunctionDescription, FunctionKeyword, FunctionKind,
    ParameterDescription, ProtocolDescription, StructDescription, TypealiasDescription,
    VariableDescription,
};
use crate::renderer::expressions::string_literal;
use crate::renderer::{require_identifier, Render, RenderPass};

impl AccessModifier {
    /// The Swift keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            AccessModifier::Public => "public",
            AccessModifier::Internal => "internal",
            AccessModifier::FilePrivate => "fileprivate",
            AccessModifier::Private => "private",
        }
    }
}

impl BindingKind {
    /// The Swift keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            BindingKind::Var => "var",
            BindingKind::Let => "let",
        }
    }
}

impl FunctionKeyword {
    /// The Swift keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            FunctionKeyword::Async => "async",
            FunctionKeyword::Throws => "throws",
            FunctionKeyword::Rethrows => "rethrows",
        }
    }
}

impl Render for Comment {
    fn render_into(&self, pass: &mut RenderPass) -> Result<(), RenderPrecondition> {
        let (prefix, text) = match self {
            Comment::Inline(text) => ("//", text),
            Comment::Doc(text) => ("///", text),
            Comment::Mark {
                text,
                section_break,
            } => {
                let separator = if *section_break { "- " } else { "" };
                pass.writer.write_line(&format!("// MARK: {separator}{text}"));
                return Ok(());
            }
        };
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        for line in normalized.split('\n') {
            if line.is_empty() {
                pass.writer.write_line(prefix);
            } else {
                pass.writer.write_line(&format!("{prefix} {line}"));
            }
        }
        Ok(())
    }
}

/// Renders a type reference, e.g. `[Swift.String: Foo.Bar]?`.
pub(crate) fn existing_type(ty: &ExistingTypeDescription) -> Result<String, RenderPrecondition> {
    Ok(match ty {
        ExistingTypeDescription::Member(components) => {
            if components.is_empty() || components.iter().any(String::is_empty) {
                return Err(RenderPrecondition::new(
                    "type",
                    "member path components must not be empty",
                ));
            }
            components.join(".")
        }
        ExistingTypeDescription::Optional(inner) => format!("{}?", existing_type(inner)?),
        ExistingTypeDescription::Array(inner) => format!("[{}]", existing_type(inner)?),
        ExistingTypeDescription::DictionaryValue(inner) => {
            format!("[Swift.String: {}]", existing_type(inner)?)
        }
    })
}

impl Render for DeprecationDescription {
    fn render_into(&self, pass: &mut RenderPass) -> Result<(), RenderPrecondition> {
        let mut parts = vec!["*".to_string(), "deprecated".to_string()];
        if let Some(message) = &self.message {
            parts.push(format!("message: {}", string_literal(message)));
        }
        if let Some(renamed) = &self.renamed {
            parts.push(format!("renamed: {}", string_literal(renamed)));
        }
        pass.writer
            .write_line(&format!("@available({})", parts.join(", ")));
        Ok(())
    }
}

fn access_prefix(access: Option<AccessModifier>) -> String {
    access
        .map(|a| format!("{} ", a.keyword()))
        .unwrap_or_default()
}

fn conformance_suffix(conformances: &[String]) -> String {
    if conformances.is_empty() {
        String::new()
    } else {
        format!(": {}", conformances.join(", "))
    }
}

/// Appends ` {}` or a brace-bounded block with one member per line.
fn render_member_block(
    members: &[Declaration],
    pass: &mut RenderPass,
) -> Result<(), RenderPrecondition> {
    if members.is_empty() {
        pass.writer.append(" {}");
        return Ok(());
    }
    pass.writer.append(" {");
    nested(pass, members)?;
    pass.writer.write_line("}");
    Ok(())
}

impl Render for VariableDescription {
    fn render_into(&self, pass: &mut RenderPass) -> Result<(), RenderPrecondition> {
        require_identifier("variable", &self.left)?;
        if self.right.is_some() && self.getter.is_some() {
            return Err(RenderPrecondition::new(
                "variable",
                "cannot have both an initializer and a getter",
            ));
        }
        if self.getter.is_some() && self.kind == BindingKind::Let {
            return Err(RenderPrecondition::new(
                "variable",
                "a `let` binding cannot have a getter",
            ));
        }
        if self.getter.is_none() && !self.getter_effects.is_empty() {
            return Err(RenderPrecondition::new(
                "variable",
                "getter effects require a getter",
            ));
        }

        let mut head = access_prefix(self.access);
        if self.is_static {
            head.push_str("static ");
        }
        head.push_str(self.kind.keyword());
        head.push(' ');
        head.push_str(&self.left);
        if let Some(ty) = &self.ty {
            head.push_str(": ");
            head.push_str(&existing_type(ty)?);
        }
        pass.writer.write_line(&head);

        if let Some(right) = &self.right {
            pass.writer.append(" = ");
            pass.append_node(right)?;
        }

        if let Some(getter) = &self.getter {
            pass.writer.append(" {");
            let effects = effects(&self.getter_effects)?;
            if effects.is_empty() {
                nested(pass, getter)?;
            } else {
                let body = pass.lines_of(getter)?;
                pass.writer.with_nested_level(|writer| {
                    writer.write_line(&format!("get {effects} {{"));
                    writer.with_nested_level(|writer| writer.write_lines(body));
                    writer.write_line("}");
                });
            }
            pass.writer.write_line("}");
        }
        Ok(())
    }
}

/// Renders `node` one level deeper.
fn nested<T: Render + ?Sized>(pass: &mut RenderPass, node: &T) -> Result<(), RenderPrecondition> {
    let lines = pass.lines_of(node)?;
    pass.writer.with_nested_level(|writer| writer.write_lines(lines));
    Ok(())
}

/// Effect keywords in canonical order, deduplicated.
fn effects(keywords: &[FunctionKeyword]) -> Result<String, RenderPrecondition> {
    let mut sorted = keywords.to_vec();
    sorted.sort();
    sorted.dedup();
    if sorted.contains(&FunctionKeyword::Throws) && sorted.contains(&FunctionKeyword::Rethrows) {
        return Err(RenderPrecondition::new(
            "function",
            "`throws` and `rethrows` are mutually exclusive",
        ));
    }
    Ok(sorted
        .iter()
        .map(|k| k.keyword())
        .collect::<Vec<_>>()
        .join(" "))
}

impl Render for ExtensionDescription {
    fn render_into(&self, pass: &mut RenderPass) -> Result<(), RenderPrecondition> {
        require_identifier("extension", &self.on_type)?;
        pass.writer.write_line(&format!(
            "{}extension {}{}",
            access_prefix(self.access),
            self.on_type,
            conformance_suffix(&self.conformances)
        ));
        render_member_block(&self.declarations, pass)
    }
}

impl Render for StructDescription {
    fn render_into(&self, pass: &mut RenderPass) -> Result<(), RenderPrecondition> {
        require_identifier("struct", &self.name)?;
        pass.writer.write_line(&format!(
            "{}struct {}{}",
            access_prefix(self.access),
            self.name,
            conformance_suffix(&self.conformances)
        ));
        render_member_block(&self.members, pass)
    }
}

impl Render for EnumDescription {
    fn render_into(&self, pass: &mut RenderPass) -> Result<(), RenderPrecondition> {
        require_identifier("enum", &self.name)?;
        let mut head = String::new();
        if self.is_frozen {
            head.push_str("@frozen ");
        }
        head.push_str(&access_prefix(self.access));
        if self.is_indirect {
            head.push_str("indirect ");
        }
        head.push_str("enum ");
        head.push_str(&self.name);
        head.push_str(&conformance_suffix(&self.conformances));
        pass.writer.write_line(&head);
        render_member_block(&self.members, pass)
    }
}

impl Render for ProtocolDescription {
    fn render_into(&self, pass: &mut RenderPass) -> Result<(), RenderPrecondition> {
        require_identifier("protocol", &self.name)?;
        pass.writer.write_line(&format!(
            "{}protocol {}{}",
            access_prefix(self.access),
            self.name,
            conformance_suffix(&self.conformances)
        ));
        render_member_block(&self.members, pass)
    }
}

impl Render for TypealiasDescription {
    fn render_into(&self, pass: &mut RenderPass) -> Result<(), RenderPrecondition> {
        require_identifier("typealias", &self.name)?;
        pass.writer.write_line(&format!(
            "{}typealias {} = {}",
            access_prefix(self.access),
            self.name,
            existing_type(&self.existing_type)?
        ));
        Ok(())
    }
}

fn function_kind(kind: &FunctionKind) -> Result<String, RenderPrecondition> {
    Ok(match kind {
        FunctionKind::Initializer { failable: false } => "init".to_string(),
        FunctionKind::Initializer { failable: true } => "init?".to_string(),
        FunctionKind::Function { name, is_static } => {
            require_identifier("function", name)?;
            if *is_static {
                format!("static func {name}")
            } else {
                format!("func {name}")
            }
        }
    })
}

impl Render for FunctionKind {
    fn render_into(&self, pass: &mut RenderPass) -> Result<(), RenderPrecondition> {
        pass.writer.write_line(&function_kind(self)?);
        Ok(())
    }
}

impl Render for ParameterDescription {
    fn render_into(&self, pass: &mut RenderPass) -> Result<(), RenderPrecondition> {
        if self.label.as_deref() == Some("") || self.name.as_deref() == Some("") {
            return Err(RenderPrecondition::new(
                "parameter",
                "label and name must be absent rather than empty",
            ));
        }
        let head = match (&self.label, &self.name) {
            (Some(label), Some(name)) => format!("{label} {name}"),
            (None, Some(name)) => format!("_ {name}"),
            (Some(label), None) => label.clone(),
            (None, None) => "_".to_string(),
        };
        pass.writer
            .write_line(&format!("{head}: {}", existing_type(&self.ty)?));
        if let Some(default_value) = &self.default_value {
            pass.writer.append(" = ");
            pass.append_node(default_value)?;
        }
        Ok(())
    }
}

impl Render for FunctionDescription {
    fn render_into(&self, pass: &mut RenderPass) -> Result<(), RenderPrecondition> {
        if matches!(self.kind, FunctionKind::Initializer { .. }) && self.return_type.is_some() {
            return Err(RenderPrecondition::new(
                "function",
                "an initializer cannot declare a return type",
            ));
        }
        let effects = effects(&self.keywords)?;

        pass.writer.write_line(&format!(
            "{}{}(",
            access_prefix(self.access),
            function_kind(&self.kind)?
        ));
        match self.parameters.as_slice() {
            [] => pass.writer.append(")"),
            [only] => {
                pass.append_node(only)?;
                pass.writer.append(")");
            }
            many => {
                let count = many.len();
                let rendered = many
                    .iter()
                    .map(|parameter| pass.lines_of(parameter))
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
            }
        }
        if !effects.is_empty() {
            pass.writer.append(&format!(" {effects}"));
        }
        if let Some(return_type) = &self.return_type {
            pass.writer
                .append(&format!(" -> {}", existing_type(return_type)?));
        }
        match &self.body {
            None => {}
            Some(body) if body.is_empty() => pass.writer.append(" {}"),
            Some(body) => {
                pass.writer.append(" {");
                nested(pass, body)?;
                pass.writer.write_line("}");
            }
        }
        Ok(())
    }
}

impl Render for EnumCaseDescription {
    fn render_into(&self, pass: &mut RenderPass) -> Result<(), RenderPrecondition> {
        require_identifier("enum case", &self.name)?;
        match &self.kind {
            EnumCaseKind::NameOnly => pass.writer.write_line(&format!("case {}", self.name)),
            EnumCaseKind::RawValue(value) => {
                pass.writer.write_line(&format!("case {} = ", self.name));
                pass.append_node(value)?;
            }
            EnumCaseKind::AssociatedValues(values) => {
                if values.is_empty() {
                    return Err(RenderPrecondition::new(
                        "enum case",
                        "associated values must not be empty",
                    ));
                }
                let slots = values
                    .iter()
                    .map(|value| -> Result<String, RenderPrecondition> {
                        let ty = existing_type(&value.ty)?;
                        Ok(match &value.label {
                            Some(label) => format!("{label}: {ty}"),
                            None => ty,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                pass.writer
                    .write_line(&format!("case {}({})", self.name, slots.join(", ")));
            }
        }
        Ok(())
    }
}

impl Render for Declaration {
    fn render_into(&self, pass: &mut RenderPass) -> Result<(), RenderPrecondition> {
        match self {
            Declaration::Commentable(comment, inner) => {
                comment.render_into(pass)?;
                inner.render_into(pass)
            }
            Declaration::Deprecated(deprecation, inner) => {
                deprecation.render_into(pass)?;
                inner.render_into(pass)
            }
            Declaration::Comment(comment) => comment.render_into(pass),
            Declaration::Variable(variable) => variable.render_into(pass),
            Declaration::Extension(extension) => extension.render_into(pass),
            Declaration::Struct(record) => record.render_into(pass),
            Declaration::Enum(union) => union.render_into(pass),
            Declaration::Protocol(protocol) => protocol.render_into(pass),
            Declaration::Typealias(alias) => alias.render_into(pass),
            Declaration::Function(function) => function.render_into(pass),
            Declaration::EnumCase(case) => case.render_into(pass),
            Declaration::Group(members) => members.render_into(pass),
        }
    }
}
