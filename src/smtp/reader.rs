/// Accumulates raw bytes from the wire and hands out complete lines.
///
/// Lines are split on `\n`; a trailing `\r` is trimmed. Bytes after the last
/// `\n` stay buffered until more data arrives, so the lines produced do not
/// depend on how the stream was chunked.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `chunk` and returns every line it completed, in order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);
        let mut lines = Vec::new();
        while let Some(line) = self.next_line() {
            lines.push(line);
        }
        lines
    }

    /// Pops the next complete line, if one is buffered.
    pub fn next_line(&mut self) -> Option<String> {
        let pos = self.pending.iter().position(|byte| *byte == b'\n')?;
        let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }

    /// Bytes received after the last line terminator.
    pub fn remainder(&self) -> &[u8] {
        &self.pending
    }
}
