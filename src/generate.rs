//! Generation driver.
//!
//! Walks the input files in argument order, feeding every declaration to the
//! emitter, the key allocator and the tag table.

use std::io::{self, Write};
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::emit::{Artifacts, Emitter};
use crate::keys::KeyAllocator;
use crate::scan::{Declaration, ScanError, Scanner, SourceBuffer};
use crate::tags::{TagBlock, TagTable};

/// Errors that abort a run.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Couldn't manipulate the file {}.", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("writing generated output: {0}")]
    Write(#[from] io::Error),
}

impl From<ScanError> for GenerateError {
    fn from(err: ScanError) -> Self {
        let path = err.path().to_path_buf();
        let source = match err {
            ScanError::Read { source, .. } => source,
            ScanError::NotAFile { .. } => {
                io::Error::new(io::ErrorKind::InvalidInput, "not a regular file")
            }
        };
        GenerateError::File { path, source }
    }
}

/// A declaration together with its allocated key.
#[derive(Debug, Clone, Serialize)]
pub struct KeyedDeclaration {
    pub key: u32,
    #[serde(flatten)]
    pub declaration: Declaration,
}

/// Declarations extracted from one input file.
#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub path: String,
    pub declarations: Vec<KeyedDeclaration>,
}

/// A non-fatal problem found while scanning.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub line: usize,
    pub message: String,
}

/// Outcome of a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerateReport {
    pub files: Vec<FileSummary>,
    /// Number of commands generated
    pub total: u32,
    pub tags: TagTable,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerateReport {
    /// All declarations in key order.
    pub fn declarations(&self) -> impl Iterator<Item = &KeyedDeclaration> {
        self.files.iter().flat_map(|f| f.declarations.iter())
    }
}

/// State shared across all files of one run.
struct RunState {
    keys: KeyAllocator,
    report: GenerateReport,
}

/// Scans sources and drives the emitter.
pub struct Generator {
    config: Config,
}

impl Generator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Generate everything for `args`.
    ///
    /// Every argument is listed in the generated headers, but arguments
    /// starting with `-` are not scanned.
    pub fn run<W: Write>(
        &self,
        program: &str,
        args: &[String],
        mut emitter: Emitter<W>,
    ) -> Result<(GenerateReport, Artifacts<W>), GenerateError> {
        emitter.write_headers(&self.config.funs_file, program, args)?;

        let mut state = RunState {
            keys: KeyAllocator::new(0),
            report: GenerateReport::default(),
        };

        for arg in args {
            if arg.starts_with('-') {
                continue;
            }
            emitter.begin_file(arg)?;
            self.process_file(arg, &mut state, &mut emitter)?;
        }

        let total = state.keys.peek();
        state.report.total = total;
        let artifacts = emitter.finish(total)?;

        tracing::debug!(total, files = state.report.files.len(), "generation finished");
        Ok((state.report, artifacts))
    }

    fn process_file<W: Write>(
        &self,
        filename: &str,
        state: &mut RunState,
        emitter: &mut Emitter<W>,
    ) -> Result<(), GenerateError> {
        let buffer = SourceBuffer::load(filename)?;
        tracing::debug!(file = filename, bytes = buffer.len(), "scanning");

        let mut block = TagBlock::new(filename);
        let mut summary = FileSummary {
            path: filename.to_string(),
            declarations: Vec::new(),
        };

        for result in Scanner::new(buffer.as_bytes(), &self.config.marker) {
            let declaration = match result {
                Ok(d) => d,
                Err(e) => {
                    tracing::warn!(file = filename, error = %e, "skipping rest of file");
                    state.report.diagnostics.push(Diagnostic {
                        file: filename.to_string(),
                        line: e.line(),
                        message: e.to_string(),
                    });
                    break;
                }
            };

            let key = state.keys.next_key();
            tracing::debug!(
                name = %String::from_utf8_lossy(&declaration.raw_name),
                key,
                line = declaration.line,
                "found command"
            );
            emitter.write_declaration(&declaration, key)?;
            block.add(
                declaration.tag_name.clone(),
                declaration.line,
                declaration.offset,
            );
            summary.declarations.push(KeyedDeclaration { key, declaration });
        }

        state.report.tags.retain(block);
        state.report.files.push(summary);
        Ok(())
    }
}
