//! Content-Length framing for JSON-RPC messages on byte streams.

use std::io::{BufRead, Read, Write};

/// Extracts Language Server Protocol payloads from an input stream.
#[derive(Debug, Default)]
pub struct MessageReader;

impl MessageReader {
    /// Create a reader.
    pub fn new() -> Self {
        Self
    }

    /// Read one framed payload.
    ///
    /// Returns `None` on EOF or malformed headers. Header keys are matched
    /// case-insensitively and CRLF line endings are tolerated.
    pub fn read_message(&self, input: &mut impl BufRead) -> Option<String> {
        let mut content_length: usize = 0;
        let mut saw_any_header = false;

        loop {
            let mut line = String::new();
            let read = input.read_line(&mut line).ok()?;
            if read == 0 {
                // EOF before a complete header block.
                return None;
            }

            let line = line.trim_end_matches(['\r', '\n']);
            if line.is_empty() {
                break;
            }
            saw_any_header = true;

            if let Some((key, value)) = line.split_once(':') {
                if key.trim().eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().ok()?;
                }
            }
        }

        if !saw_any_header || content_length == 0 {
            return None;
        }

        let mut payload = vec![0u8; content_length];
        input.read_exact(&mut payload).ok()?;
        String::from_utf8(payload).ok()
    }
}

/// Serializes JSON-RPC payloads back to the client with LSP framing.
#[derive(Debug, Default)]
pub struct MessageWriter;

impl MessageWriter {
    /// Create a writer.
    pub fn new() -> Self {
        Self
    }

    /// Write one framed payload and flush.
    pub fn write_message(&self, output: &mut impl Write, payload: &str) -> std::io::Result<()> {
        write!(output, "Content-Length: {}\r\n\r\n{}", payload.len(), payload)?;
        output.flush()
    }
}
