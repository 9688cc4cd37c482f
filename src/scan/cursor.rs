//! Byte cursor with line tracking.

/// Position within a source buffer.
///
/// All movement goes through [`ScanCursor::advance`], so `line` and
/// `line_start` always agree with the number of newline bytes stepped over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanCursor {
    offset: usize,
    line: usize,
    line_start: usize,
}

impl Default for ScanCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanCursor {
    pub fn new() -> Self {
        Self {
            offset: 0,
            line: 1,
            line_start: 0,
        }
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Current 1-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Offset of the first byte of the current line.
    pub fn line_start(&self) -> usize {
        self.line_start
    }

    /// Byte under the cursor, if any.
    pub fn peek(&self, bytes: &[u8]) -> Option<u8> {
        bytes.get(self.offset).copied()
    }

    pub fn at_end(&self, bytes: &[u8]) -> bool {
        self.offset >= bytes.len()
    }

    /// Step over the byte under the cursor.
    pub fn advance(&mut self, bytes: &[u8]) {
        if self.peek(bytes) == Some(b'\n') {
            self.line += 1;
            self.line_start = self.offset + 1;
        }
        self.offset += 1;
    }

    /// Move just past the next occurrence of `marker`.
    ///
    /// Matches are only accepted at offsets below `bytes.len() - marker.len()`.
    /// Returns false when no match remains; the cursor is then left at that limit.
    pub fn find_marker(&mut self, bytes: &[u8], marker: &[u8]) -> bool {
        if marker.is_empty() {
            return false;
        }

        let limit = bytes.len().saturating_sub(marker.len());
        while self.offset < limit {
            if bytes[self.offset..].starts_with(marker) {
                for _ in 0..marker.len() {
                    self.advance(bytes);
                }
                return true;
            }
            self.advance(bytes);
        }
        false
    }

    /// Advance until the cursor sits on `target`.
    ///
    /// Returns false if the buffer ends first.
    pub fn seek(&mut self, bytes: &[u8], target: u8) -> bool {
        while let Some(b) = self.peek(bytes) {
            if b == target {
                return true;
            }
            self.advance(bytes);
        }
        false
    }

    /// Advance over spaces, tabs and newlines.
    pub fn skip_whitespace(&mut self, bytes: &[u8]) {
        while matches!(self.peek(bytes), Some(b' ' | b'\t' | b'\n')) {
            self.advance(bytes);
        }
    }
}
