//! Rendering of imports and whole files.

use crate::error::RenderPrecondition;
use crate::ir::{FileDescription, ImportDescription, Preconcurrency};
use crate::renderer::{require_identifier, Render, RenderPass};

impl Render for ImportDescription {
    fn render_into(&self, pass: &mut RenderPass) -> Result<(), RenderPrecondition> {
        require_identifier("import", &self.module_name)?;
        let spi = match &self.spi {
            Some(spi) => {
                require_identifier("import", spi)?;
                format!("@_spi({spi}) ")
            }
            None => String::new(),
        };
        let plain = format!("{spi}import {}", self.module_name);
        match &self.preconcurrency {
            Preconcurrency::Never => pass.writer.write_line(&plain),
            Preconcurrency::Always => pass.writer.write_line(&format!("@preconcurrency {plain}")),
            Preconcurrency::OnOs(systems) => {
                if systems.is_empty() {
                    return Err(RenderPrecondition::new(
                        "import",
                        "a platform guard needs at least one operating system",
                    ));
                }
                let condition = systems
                    .iter()
                    .map(|os| format!("os({os})"))
                    .collect::<Vec<_>>()
                    .join(" || ");
                pass.writer.write_line(&format!("#if {condition}"));
                pass.writer.write_line(&format!("@preconcurrency {plain}"));
                pass.writer.write_line("#else");
                pass.writer.write_line(&plain);
                pass.writer.write_line("#endif");
            }
        }
        Ok(())
    }
}

impl Render for FileDescription {
    fn render_into(&self, pass: &mut RenderPass) -> Result<(), RenderPrecondition> {
        if let Some(comment) = &self.top_comment {
            comment.render_into(pass)?;
        }
        self.imports.render_into(pass)?;
        for block in &self.code_blocks {
            block.render_into(pass)?;
            pass.writer.write_line("");
        }
        pass.trailing_newline = true;
        Ok(())
    }
}
