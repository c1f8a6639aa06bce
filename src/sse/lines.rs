//! Chunk-to-line reassembly.

/// Reassembles complete lines from byte chunks that arrive at arbitrary
/// boundaries.
///
/// Handles both split lines (a line spanning multiple chunks) and split
/// UTF-8 sequences (a multi-byte character spanning a chunk boundary). An
/// incomplete multi-byte tail is held back until the next chunk; bytes that
/// can never form valid UTF-8 decode to U+FFFD.
#[derive(Debug, Default)]
pub struct LineBuffer {
    /// Decoded text not yet terminated by a newline.
    text: String,
    /// Trailing bytes that may be the prefix of a multi-byte character.
    partial: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return every line it completes, in order.
    ///
    /// Lines are terminated by `\n`; a trailing `\r` is stripped so CRLF
    /// input behaves identically to LF.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut bytes = std::mem::take(&mut self.partial);
        bytes.extend_from_slice(chunk);
        self.decode(&bytes);

        let mut lines = Vec::new();
        while let Some(pos) = self.text.find('\n') {
            let mut line: String = self.text.drain(..=pos).collect();
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
            lines.push(line);
        }
        lines
    }

    /// Text accumulated after the last newline. Discarded when the stream
    /// ends; exposed so callers can log what was dropped.
    pub fn fragment(&self) -> &str {
        &self.text
    }

    fn decode(&mut self, mut input: &[u8]) {
        loop {
            match std::str::from_utf8(input) {
                Ok(valid) => {
                    self.text.push_str(valid);
                    return;
                }
                Err(err) => {
                    let (valid, rest) = input.split_at(err.valid_up_to());
                    if let Ok(prefix) = std::str::from_utf8(valid) {
                        self.text.push_str(prefix);
                    }
                    match err.error_len() {
                        Some(invalid_len) => {
                            self.text.push('\u{FFFD}');
                            input = &rest[invalid_len..];
                        }
                        None => {
                            // Possibly the start of a character finishing in
                            // the next chunk.
                            self.partial = rest.to_vec();
                            return;
                        }
                    }
                }
            }
        }
    }
}
