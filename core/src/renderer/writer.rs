//! # Line Writer
//!
//! Accumulates rendered lines at a current indentation depth. The writer is
//! created fresh for each render invocation and dropped afterwards.

/// Line buffer with indentation and append-to-last-line state.
#[derive(Debug)]
pub(crate) struct LineWriter {
    lines: Vec<String>,
    level: usize,
    indentation: usize,
    next_line_appends: bool,
}

impl LineWriter {
    pub(crate) fn new(indentation: usize) -> Self {
        Self {
            lines: Vec::new(),
            level: 0,
            indentation,
            next_line_appends: false,
        }
    }

    /// Writes `line` at the current depth, or appends it to the last line when
    /// the previous call asked for that.
    pub(crate) fn write_line(&mut self, line: &str) {
        if self.next_line_appends {
            self.next_line_appends = false;
            if let Some(last) = self.lines.last_mut() {
                last.push_str(line);
                return;
            }
        }
        if line.is_empty() {
            self.lines.push(String::new());
        } else {
            let mut indented = " ".repeat(self.level * self.indentation);
            indented.push_str(line);
            self.lines.push(indented);
        }
    }

    /// The next `write_line` continues the last line instead of starting a new one.
    pub(crate) fn next_line_appends_to_last(&mut self) {
        self.next_line_appends = true;
    }

    /// Shorthand for `next_line_appends_to_last` followed by `write_line`.
    pub(crate) fn append(&mut self, text: &str) {
        self.next_line_appends_to_last();
        self.write_line(text);
    }

    /// Writes pre-rendered lines, keeping their relative indentation. The first
    /// line honors a pending append.
    pub(crate) fn write_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.write_line(line.as_ref());
        }
    }

    /// Runs `body` one level deeper.
    pub(crate) fn with_nested_level<T>(&mut self, body: impl FnOnce(&mut Self) -> T) -> T {
        self.level += 1;
        let result = body(self);
        self.level -= 1;
        result
    }

    pub(crate) fn indentation(&self) -> usize {
        self.indentation
    }

    pub(crate) fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// All lines joined by `\n`, without a trailing newline.
    pub(crate) fn contents(&self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nesting_and_append() {
        let mut writer = LineWriter::new(4);
        writer.write_line("struct Foo {");
        writer.with_nested_level(|w| {
            w.write_line("let a");
            w.append(": Int");
        });
        writer.write_line("}");
        assert_eq!(writer.contents(), "struct Foo {\n    let a: Int\n}");
    }

    #[test]
    fn test_blank_lines_carry_no_indentation() {
        let mut writer = LineWriter::new(2);
        writer.with_nested_level(|w| {
            w.write_line("a");
            w.write_line("");
            w.write_line("b");
        });
        assert_eq!(writer.into_lines(), vec!["  a", "", "  b"]);
    }

    #[test]
    fn test_append_on_empty_writer_starts_a_line() {
        let mut writer = LineWriter::new(4);
        writer.append("x");
        assert_eq!(writer.contents(), "x");
    }
}
