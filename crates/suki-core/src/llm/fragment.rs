//! Newline-delimited JSON fragment decoding.
//!
//! Byte chunks from the transport do not respect line boundaries: a fragment,
//! or a multi-byte UTF-8 character inside one, may be split across chunks.
//! [`FragmentDecoder`] buffers raw bytes and only decodes complete lines.

use suki_types::llm::{GenerateFragment, LlmError};

/// Longest slice of an offending line quoted in a protocol error.
const ERROR_PREVIEW_CHARS: usize = 80;

/// Incremental splitter/parser for a newline-delimited JSON body.
#[derive(Debug, Default)]
pub struct FragmentDecoder {
    buffer: Vec<u8>,
}

impl FragmentDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk; returns the outcome of every line it completed.
    ///
    /// Blank lines produce nothing. A line that is not valid UTF-8 or not a
    /// JSON fragment produces an `Err(LlmError::Protocol)` and decoding
    /// carries on with the next line.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Result<GenerateFragment, LlmError>> {
        self.buffer.extend_from_slice(chunk);

        let mut out = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(parsed) = parse_line(&line[..line.len() - 1]) {
                out.push(parsed);
            }
        }
        out
    }

    /// Flush the trailing unterminated line once the transport has closed.
    pub fn finish(&mut self) -> Option<Result<GenerateFragment, LlmError>> {
        let rest = std::mem::take(&mut self.buffer);
        parse_line(&rest)
    }

    /// Bytes held back waiting for a newline.
    pub fn pending_bytes(&self) -> usize {
        self.buffer.len()
    }
}

fn parse_line(line: &[u8]) -> Option<Result<GenerateFragment, LlmError>> {
    let text = match std::str::from_utf8(line) {
        Ok(text) => text,
        Err(e) => return Some(Err(LlmError::Protocol(format!("line is not UTF-8: {e}")))),
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    Some(serde_json::from_str::<GenerateFragment>(trimmed).map_err(|e| {
        let preview: String = trimmed.chars().take(ERROR_PREVIEW_CHARS).collect();
        LlmError::Protocol(format!("{e} in line '{preview}'"))
    }))
}
