//! Declaration extraction.
//!
//! A declaration looks like
//!
//! ```text
//! DECLARE_INFO_COMMAND (info_next_line, _("Move down to the next line"))
//! ```
//!
//! Only the text around the marker is inspected: the first `(` after it, the
//! name up to the next `,`, and the first string literal after that comma.
//! A declaration cut off by the end of the buffer is dropped silently and ends
//! the scan of that buffer.
//!
//! Extracted text is kept as raw bytes so that sources in any 8-bit encoding
//! reach the generated files unchanged.

use serde::{Serialize, Serializer};
use thiserror::Error;

use super::ScanCursor;
use crate::names::visible_name;

/// Marker used by the Info sources.
pub const DEFAULT_MARKER: &str = "\nDECLARE_INFO_COMMAND";

/// Problems found inside a single declaration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("declaration name at line {line} (byte {offset}) is not followed by a comma")]
    UnterminatedName { line: usize, offset: usize },
}

impl ExtractError {
    /// Line where the offending declaration starts.
    pub fn line(&self) -> usize {
        match self {
            ExtractError::UnterminatedName { line, .. } => *line,
        }
    }
}

/// One extracted command declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    /// Identifier exactly as written in the source.
    #[serde(serialize_with = "serialize_lossy")]
    pub raw_name: Vec<u8>,
    /// Source line text from its start up to the comma ending the name.
    #[serde(serialize_with = "serialize_lossy")]
    pub tag_name: Vec<u8>,
    /// Hyphenated user-visible name.
    #[serde(serialize_with = "serialize_lossy")]
    pub visible_name: Vec<u8>,
    /// Documentation literal including its quotes, escapes untouched.
    #[serde(serialize_with = "serialize_lossy")]
    pub doc: Vec<u8>,
    /// Line of the first byte of the name.
    pub line: usize,
    /// Byte offset of the first byte of the name.
    pub offset: usize,
}

/// Iterator over the declarations of one buffer.
///
/// Yields at most one error, after which iteration stops.
pub struct Scanner<'a> {
    bytes: &'a [u8],
    marker: &'a [u8],
    cursor: ScanCursor,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(bytes: &'a [u8], marker: &'a str) -> Self {
        Self {
            bytes,
            marker: marker.as_bytes(),
            cursor: ScanCursor::new(),
            done: false,
        }
    }

    fn extract_next(&mut self) -> Result<Option<Declaration>, ExtractError> {
        let bytes = self.bytes;
        let cursor = &mut self.cursor;

        if !cursor.find_marker(bytes, self.marker) {
            return Ok(None);
        }

        if !cursor.seek(bytes, b'(') {
            return Ok(None);
        }
        cursor.advance(bytes);
        cursor.skip_whitespace(bytes);
        if cursor.at_end(bytes) {
            return Ok(None);
        }

        let name_start = cursor.offset();
        let line = cursor.line();
        let line_start = cursor.line_start();
        if !cursor.seek(bytes, b',') {
            return Err(ExtractError::UnterminatedName {
                line,
                offset: name_start,
            });
        }
        let comma = cursor.offset();
        let raw_name = bytes[name_start..comma].to_vec();
        let tag_name = bytes[line_start..comma].to_vec();

        cursor.advance(bytes);
        if !cursor.seek(bytes, b'"') {
            return Ok(None);
        }
        let doc_start = cursor.offset();
        cursor.advance(bytes);
        loop {
            match cursor.peek(bytes) {
                None => return Ok(None),
                Some(b'\\') => {
                    cursor.advance(bytes);
                    cursor.advance(bytes);
                }
                Some(b'"') => break,
                Some(_) => cursor.advance(bytes),
            }
        }
        cursor.advance(bytes);
        let doc = bytes[doc_start..cursor.offset()].to_vec();

        let visible_name = visible_name(&raw_name);
        Ok(Some(Declaration {
            raw_name,
            tag_name,
            visible_name,
            doc,
            line,
            offset: name_start,
        }))
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Declaration, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.extract_next() {
            Ok(Some(decl)) => Some(Ok(decl)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Serialize bytes as a string, replacing invalid UTF-8.
pub(crate) fn serialize_lossy<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(bytes))
}
