//! Emacs-style tag table.
//!
//! Each source file with at least one command contributes a block:
//!
//! ```text
//! \x0c
//! session.c,<length>
//! DECLARE_INFO_COMMAND (info_next_line,\x7f412,10234
//! ```
//!
//! `<length>` is the byte count of the entry lines that follow the header.

use std::io::{self, Write};

use serde::Serialize;

use crate::scan::serialize_lossy;

/// Byte separating the tag text from its position.
const TAG_DELIMITER: u8 = 0x7f;

/// One tag: the text preceding the name's comma, and where the name starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagEntry {
    #[serde(serialize_with = "serialize_lossy")]
    pub name: Vec<u8>,
    pub line: usize,
    pub offset: usize,
}

impl TagEntry {
    /// Bytes this entry occupies in the dumped table.
    ///
    /// Three bytes for the comma, delimiter and newline, plus the name and the
    /// `line,offset` digits.
    pub fn dumped_len(&self) -> usize {
        3 + self.name.len() + decimal_width(self.line) + 1 + decimal_width(self.offset)
    }
}

/// Tags found in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagBlock {
    pub filename: String,
    pub entries: Vec<TagEntry>,
}

impl TagBlock {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, name: impl Into<Vec<u8>>, line: usize, offset: usize) {
        self.entries.push(TagEntry {
            name: name.into(),
            line,
            offset,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total dumped length of all entry lines.
    pub fn entries_len(&self) -> usize {
        self.entries.iter().map(TagEntry::dumped_len).sum()
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "\x0c\n{},{}\n", self.filename, self.entries_len())?;
        for entry in &self.entries {
            out.write_all(&entry.name)?;
            out.write_all(&[b',', TAG_DELIMITER])?;
            writeln!(out, "{},{}", entry.line, entry.offset)?;
        }
        Ok(())
    }
}

/// Blocks retained across the whole run, in argument order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagTable {
    blocks: Vec<TagBlock>,
}

impl TagTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `block` if it holds any entries.
    pub fn retain(&mut self, block: TagBlock) {
        if !block.is_empty() {
            self.blocks.push(block);
        }
    }

    pub fn blocks(&self) -> &[TagBlock] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Dump every block. Lines end in a bare `\n` on every platform.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for block in &self.blocks {
            block.write_to(out)?;
        }
        out.flush()
    }
}

fn decimal_width(mut n: usize) -> usize {
    let mut width = 1;
    while n >= 10 {
        n /= 10;
        width += 1;
    }
    width
}
