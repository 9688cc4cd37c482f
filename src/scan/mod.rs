//! Source scanning: loading files, finding markers and extracting declarations.

mod cursor;
mod extract;
mod source;

pub use cursor::ScanCursor;
pub(crate) use extract::serialize_lossy;
pub use extract::{Declaration, ExtractError, Scanner, DEFAULT_MARKER};
pub use source::{ScanError, SourceBuffer};
