//! Whole-file source buffers.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while loading a source file.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("couldn't read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not a regular file", path.display())]
    NotAFile { path: PathBuf },
}

impl ScanError {
    /// Path of the file that could not be loaded.
    pub fn path(&self) -> &Path {
        match self {
            ScanError::Read { path, .. } | ScanError::NotAFile { path } => path,
        }
    }
}

/// The full byte content of one input file.
#[derive(Debug, Clone)]
pub struct SourceBuffer {
    bytes: Vec<u8>,
}

impl SourceBuffer {
    /// Read `path` into memory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScanError> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|source| ScanError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if metadata.is_dir() {
            return Err(ScanError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let bytes = fs::read(path).map_err(|source| ScanError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
