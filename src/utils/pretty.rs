//! Line-oriented writer for emitted sources and IR dumps.
//!
//! Everything this compiler prints — generated C++ and the textual IR —
//! is a brace-delimited, line-at-a-time format, so the writer deals in
//! whole lines: each one lands at the current block depth, and opening or
//! closing a brace block moves the depth with it. Namespaces are the one
//! exception and are written flush via plain [`SourceWriter::line`] calls,
//! since their contents stay unindented.

/// Accumulates output lines at a tracked block depth.
#[derive(Debug)]
pub struct SourceWriter {
    buffer: String,
    depth: usize,
    indent: String,
}

impl SourceWriter {
    /// Create a writer with the given indent unit.
    pub fn new(indent: &str) -> Self {
        Self {
            buffer: String::new(),
            depth: 0,
            indent: indent.to_string(),
        }
    }

    /// Writer with the two-space indent used for generated sources.
    pub fn generated() -> Self {
        Self::new("  ")
    }

    /// Write one line at the current depth. An empty string is a blank line.
    pub fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.buffer.push_str(&self.indent);
            }
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
    }

    /// Write a blank separator line.
    pub fn blank(&mut self) {
        self.buffer.push('\n');
    }

    /// Write a block header (ending in `{`) and step into the block.
    pub fn open(&mut self, header: &str) {
        self.line(header);
        self.depth += 1;
    }

    /// Step out of the block and write its footer (`}` or `};`).
    pub fn close(&mut self, footer: &str) {
        if self.depth > 0 {
            self.depth -= 1;
        }
        self.line(footer);
    }

    /// Current block depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Take the accumulated output.
    pub fn finish(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_lines_are_indented() {
        let mut out = SourceWriter::generated();
        out.open("void add() {");
        out.line("return;");
        out.close("}");

        assert_eq!(out.finish(), "void add() {\n  return;\n}\n");
    }

    #[test]
    fn test_nested_blocks() {
        let mut out = SourceWriter::generated();
        out.open("struct Outer {");
        out.open("struct Inner {");
        out.line("bool flag;");
        out.close("};");
        out.close("};");

        let output = out.finish();
        assert!(output.contains("  struct Inner {"));
        assert!(output.contains("    bool flag;"));
        assert!(output.ends_with("};\n"));
    }

    #[test]
    fn test_blank_lines_carry_no_indent() {
        let mut out = SourceWriter::generated();
        out.open("namespace scratch {");
        out.blank();
        out.line("");
        out.close("}");

        assert_eq!(out.finish(), "namespace scratch {\n\n\n}\n");
    }

    #[test]
    fn test_close_below_zero_is_clamped() {
        let mut out = SourceWriter::generated();
        out.close("}");
        out.line("after");
        assert_eq!(out.depth(), 0);
        assert_eq!(out.finish(), "}\nafter\n");
    }
}
