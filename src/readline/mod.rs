// src/readline/mod.rs
// Raw line reader: one line per call, no editing, no history

use std::io::{BufRead, ErrorKind};

use crate::error::ShellError;

// ── Line ─────────────────────────────────────────────────────────────────────

/// What the parser sees when it walks a line: raw bytes, then the end marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Byte(u8),
    End,
}

/// One line of input, without its newline. Kept as raw bytes so arguments
/// that are not valid UTF-8 reach `execvp` unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    bytes: Vec<u8>,
}

impl Line {
    #[cfg(test)]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Line { bytes: bytes.into() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The bytes of the line followed by exactly one `Symbol::End`.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.bytes
            .iter()
            .copied()
            .map(Symbol::Byte)
            .chain(std::iter::once(Symbol::End))
    }

    #[cfg(test)]
    fn capacity(&self) -> usize {
        self.bytes.capacity()
    }
}

// ── Reader ───────────────────────────────────────────────────────────────────

pub struct LineReader<R> {
    input: R,
    unit: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(input: R, unit: usize) -> Self {
        LineReader { input, unit: unit.max(1) }
    }

    /// Block until a newline or end of input. `Ok(None)` means the input is
    /// exhausted and nothing was read.
    pub fn read_line(&mut self) -> Result<Option<Line>, ShellError> {
        let mut buf: Vec<u8> = Vec::new();
        self.grow(&mut buf)?;

        let mut saw_any = false;
        loop {
            let chunk = match self.input.fill_buf() {
                Ok(chunk) => chunk,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            if chunk.is_empty() {
                if !saw_any {
                    return Ok(None);
                }
                break;
            }
            saw_any = true;

            let (take, found_newline) = match chunk.iter().position(|&b| b == b'\n') {
                Some(i) => (i, true),
                None => (chunk.len(), false),
            };
            let piece = chunk[..take].to_vec();
            self.input.consume(if found_newline { take + 1 } else { take });

            if let Err(e) = self.append(&mut buf, &piece) {
                if !found_newline {
                    self.discard_rest();
                }
                return Err(e);
            }
            if found_newline {
                break;
            }
        }

        Ok(Some(Line { bytes: buf }))
    }

    fn append(&self, buf: &mut Vec<u8>, bytes: &[u8]) -> Result<(), ShellError> {
        while buf.capacity() - buf.len() < bytes.len() {
            self.grow(buf)?;
        }
        buf.extend_from_slice(bytes);
        Ok(())
    }

    /// First call allocates one unit, later calls double the capacity.
    fn grow(&self, buf: &mut Vec<u8>) -> Result<(), ShellError> {
        let target = if buf.capacity() == 0 {
            self.unit
        } else {
            buf.capacity().checked_mul(2).ok_or(ShellError::OutOfMemory("reading input"))?
        };
        buf.try_reserve_exact(target - buf.len())
            .map_err(|_| ShellError::OutOfMemory("reading input"))
    }

    fn discard_rest(&mut self) {
        let mut sink = Vec::new();
        if let Err(e) = self.input.read_until(b'\n', &mut sink) {
            log::debug!("discarding rest of oversized line failed: {e}");
        }
    }
}
